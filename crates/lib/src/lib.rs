//! PermitDesk: backend library for a small multi-resource service exposing
//! account management, authentication, and two largely-stubbed resource
//! collections (planning-permission reports sourced from a public register,
//! and file downloads).
//!
//! ## Core Concepts
//!
//! * **Accounts (`account`)**: The user account and authentication service.
//!   Owns password hashing policy, credential verification, and the account
//!   record lifecycle (create/read/update/delete, partial updates).
//! * **Store (`store`)**: The `AccountStore` unit-of-work boundary the
//!   account service operates against, plus an in-memory implementation
//!   with transactional commit semantics.
//! * **Registry (`registry`)**: A pass-through client for the external
//!   planning-permissions register.
//! * **Downloads (`download`)**: Placeholder download-record subsystem.
//!
//! The HTTP surface lives in the `permitdesk` binary; this library has no
//! wire protocol of its own.

pub mod account;
pub mod download;
pub mod registry;
pub mod store;

pub use account::{Account, AccountId, AccountService};
pub use store::{AccountStore, MemoryStore};

/// Result type used throughout the PermitDesk library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the PermitDesk library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured account errors from the account module
    #[error(transparent)]
    Account(account::AccountError),

    /// Structured store errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured registry errors from the registry module
    #[error(transparent)]
    Registry(registry::RegistryError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Account(_) => "account",
            Error::Store(_) => "store",
            Error::Registry(_) => "registry",
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Account(account_err) => account_err.is_duplicate(),
            Error::Store(store_err) => store_err.is_unique_violation(),
            Error::Registry(_) => false,
        }
    }

    /// Check if this error indicates rejected credential input.
    pub fn is_invalid_credential(&self) -> bool {
        match self {
            Error::Account(account_err) => account_err.is_invalid_credential(),
            _ => false,
        }
    }

    /// Check if this error indicates the store could not be reached or the
    /// transaction aborted for a reason other than a constraint violation.
    pub fn is_store_unavailable(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_unavailable(),
            _ => false,
        }
    }

    /// Check if this error came from the external register.
    pub fn is_registry_error(&self) -> bool {
        matches!(self, Error::Registry(_))
    }
}
