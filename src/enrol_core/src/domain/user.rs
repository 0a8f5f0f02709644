use std::fmt;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    email::Email,
    password::{Password, PasswordHash},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppUserRole {
    #[default]
    User,
    Admin,
}

impl AppUserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppUserRole::User => "USER",
            AppUserRole::Admin => "ADMIN",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "USER" => Some(AppUserRole::User),
            "ADMIN" => Some(AppUserRole::Admin),
            _ => None,
        }
    }
}

/// Sign-up candidate. Carries the plaintext password until the account
/// service hashes it.
#[derive(Debug, Clone)]
pub struct NewAppUser {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: Password,
    pub role: AppUserRole,
}

impl NewAppUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Email,
        password: Password,
        role: AppUserRole,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            password,
            role,
        }
    }

    /// Turn the candidate into a stored account. New accounts start disabled
    /// and unlocked.
    pub fn into_app_user(self, password_hash: PasswordHash) -> AppUser {
        AppUser {
            id: UserId::new(),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash,
            role: self.role,
            locked: false,
            enabled: false,
        }
    }
}

/// A persisted account.
#[derive(Debug, Clone)]
pub struct AppUser {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub role: AppUserRole,
    pub locked: bool,
    pub enabled: bool,
}

impl AppUser {
    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn details(&self) -> UserDetails {
        UserDetails {
            username: self.email.clone(),
            password_hash: self.password_hash.clone(),
            authorities: vec![self.role.as_str().to_string()],
            account_non_locked: !self.locked,
            enabled: self.enabled,
        }
    }
}

/// What a login check needs to know about an account.
#[derive(Debug, Clone)]
pub struct UserDetails {
    pub username: Email,
    pub password_hash: PasswordHash,
    pub authorities: Vec<String>,
    pub account_non_locked: bool,
    pub enabled: bool,
}

impl UserDetails {
    pub fn password_hash_str(&self) -> &str {
        self.password_hash.as_ref().expose_secret()
    }
}

impl From<&AppUser> for UserDetails {
    fn from(user: &AppUser) -> Self {
        user.details()
    }
}
