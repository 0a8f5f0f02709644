use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use enrol_core::{AppUser, AppUserStore, AppUserStoreError, Email};

#[derive(Default, Clone)]
pub struct HashMapAppUserStore {
    users: Arc<RwLock<HashMap<Email, AppUser>>>,
}

impl HashMapAppUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl AppUserStore for HashMapAppUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<AppUser>, AppUserStoreError> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn save(&self, user: AppUser) -> Result<AppUser, AppUserStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.email()) {
            return Err(AppUserStoreError::UserAlreadyExists);
        }
        users.insert(user.email().clone(), user.clone());
        Ok(user)
    }

    async fn enable_app_user(&self, email: &Email) -> Result<u64, AppUserStoreError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(email) else {
            return Ok(0);
        };
        user.enabled = true;
        Ok(1)
    }
}
