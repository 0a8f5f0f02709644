pub mod hashmap_app_user_store;
pub mod hashmap_confirmation_token_store;
pub mod postgres_app_user_store;
pub mod postgres_confirmation_token_store;

pub use hashmap_app_user_store::HashMapAppUserStore;
pub use hashmap_confirmation_token_store::HashMapConfirmationTokenStore;
pub use postgres_app_user_store::PostgresAppUserStore;
pub use postgres_confirmation_token_store::PostgresConfirmationTokenStore;
