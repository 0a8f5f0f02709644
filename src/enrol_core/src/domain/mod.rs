pub mod confirmation_token;
pub mod email;
pub mod email_message;
pub mod error_kind;
pub mod password;
pub mod user;
