pub mod confirm;
pub mod error;
pub mod login;
pub mod registration;

pub use confirm::{ConfirmQuery, confirm};
pub use error::{ApiError, ErrorResponse};
pub use login::{LoginHttpResponse, LoginRequest, login};
pub use registration::{RegistrationBody, RegistrationHttpResponse, register};
