//! User account and authentication service
//!
//! The one subsystem with real behavioral logic: credential hashing and
//! verification, account record lifecycle, and partial-update semantics.
//! Everything here runs against an [`crate::store::AccountStore`]
//! unit-of-work supplied by the caller.

pub mod crypto;
pub mod errors;
pub mod service;
pub mod types;

pub use crypto::{Argon2Hasher, CredentialHasher};
pub use errors::AccountError;
pub use service::AccountService;
pub use types::{Account, AccountId, AccountRecord, AccountUpdate, NewAccount};
