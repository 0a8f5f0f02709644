//! # Enrol - User Registration Service Library
//!
//! Facade crate that re-exports the public APIs of the registration service
//! components: account sign-up, email confirmation tokens and login.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `AppUser`, `ConfirmationToken`
//! - **Repository traits**: `AppUserStore`, `ConfirmationTokenStore`
//! - **Use cases**: `RegistrationService`, `AppUserService`, `LoginUseCase`
//! - **Adapters**: `PostgresAppUserStore`, `Argon2PasswordHasher`, `PostmarkEmailClient`, etc.
//! - **Service**: `EnrolService` - HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use enrol_core::*;
}

pub use enrol_core::{
    AppUser, AppUserRole, CONFIRMATION_TOKEN_VALIDITY, ConfirmationToken, Email, EmailMessage,
    ErrorKind, NewAppUser, Password, PasswordError, PasswordHash, TokenOwner, TokenStatus,
    UserDetails, UserId,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use enrol_core::{
        AppUserStore, AppUserStoreError, ConfirmationTokenStore, ConfirmationTokenStoreError,
    };
}

pub use enrol_core::{
    AppUserStore, AppUserStoreError, ConfirmationTokenStore, ConfirmationTokenStoreError,
    EmailClient, EmailValidator, PasswordHasher, PasswordHasherError, RegexEmailValidator,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use enrol_application::*;
}

pub use enrol_application::{
    AppUserService, AppUserServiceError, ConfirmationTokenService, LoginError, LoginUseCase,
    RegistrationError, RegistrationRequest, RegistrationService,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use enrol_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use enrol_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use enrol_adapters::email::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use enrol_adapters::hashing::*;
    }

    /// Configuration
    pub mod config {
        pub use enrol_adapters::config::*;
    }
}

pub use enrol_adapters::{
    email::{MockEmailClient, PostmarkEmailClient},
    hashing::Argon2PasswordHasher,
    persistence::{
        HashMapAppUserStore, HashMapConfirmationTokenStore, PostgresAppUserStore,
        PostgresConfirmationTokenStore,
    },
};

// ============================================================================
// Enrol Service (Main Entry Point)
// ============================================================================

pub use enrol_service::{EnrolService, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
