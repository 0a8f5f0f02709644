pub mod app_user_service;
pub mod confirmation_token_service;
pub mod login;
pub mod registration;

#[cfg(test)]
pub(crate) mod test_support;
