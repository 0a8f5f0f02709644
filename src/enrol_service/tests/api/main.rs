mod helpers;
mod login;
mod registration;
