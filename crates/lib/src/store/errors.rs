//! Error types for the store boundary
use thiserror::Error;

/// The account columns carrying a uniqueness constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    Username,
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniqueField::Email => write!(f, "email"),
            UniqueField::Username => write!(f, "username"),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    /// A commit would leave two accounts sharing a unique field value.
    #[error("unique constraint violated on {field}")]
    UniqueViolation { field: UniqueField },

    /// The store could not be queried or the transaction aborted for a
    /// reason other than a constraint violation. Fatal to the current
    /// operation; never retried internally.
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl StoreError {
    /// Check if this error is a uniqueness constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation { .. })
    }

    /// Check if this error indicates the store could not be reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}

impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
