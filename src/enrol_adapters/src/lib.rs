pub mod config;
pub mod email;
pub mod hashing;
pub mod http;
pub mod persistence;
