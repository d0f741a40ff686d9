//! Error types for the account service
use thiserror::Error;

use crate::store::UniqueField;

#[derive(Error, Debug)]
pub enum AccountError {
    /// The store rejected a create or update because another account already
    /// holds the same value for a unique field.
    #[error("account already exists: {field} must be unique")]
    DuplicateAccount { field: UniqueField },

    /// The supplied plaintext password failed policy checks before hashing
    /// was attempted.
    #[error("invalid password: {reason}")]
    InvalidPassword { reason: String },

    #[error("password hashing failed: {reason}")]
    HashingFailed { reason: String },

    /// The stored password hash could not be parsed. Indicates a corrupted
    /// record, not a wrong password.
    #[error("stored password hash is malformed")]
    MalformedHash,
}

impl AccountError {
    /// Check if this error indicates a uniqueness conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, AccountError::DuplicateAccount { .. })
    }

    /// Check if this error indicates rejected credential input.
    pub fn is_invalid_credential(&self) -> bool {
        matches!(self, AccountError::InvalidPassword { .. })
    }
}

impl From<AccountError> for crate::Error {
    fn from(err: AccountError) -> Self {
        crate::Error::Account(err)
    }
}
