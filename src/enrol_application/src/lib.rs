pub mod email_template;
pub mod use_cases;

pub use email_template::{CONFIRMATION_EMAIL_SUBJECT, ConfirmationEmail, confirmation_link};
pub use use_cases::{
    app_user_service::{AppUserService, AppUserServiceError},
    confirmation_token_service::ConfirmationTokenService,
    login::{LoginError, LoginUseCase},
    registration::{CONFIRMED, RegistrationError, RegistrationRequest, RegistrationService},
};
