mod enrol_service;
pub mod helpers;
pub mod telemetry;

pub use enrol_service::EnrolService;
pub use helpers::{configure_postgresql, get_postgres_pool};
