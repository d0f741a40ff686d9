//! Password hashing policy for the account service
//!
//! Hashing is a capability injected into [`super::AccountService`] at
//! construction so tests can substitute a fast dummy hasher. The production
//! implementation uses Argon2id in PHC string format.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};

use super::errors::AccountError;

/// Upper bound on accepted plaintext password length, in bytes.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// One-way, salted, deliberately slow password hashing policy.
///
/// Implementations must never be reversible and must produce a fresh salt
/// per hash. `verify` distinguishes a wrong password (`Ok(false)`) from a
/// hash that cannot be checked at all (`Err`).
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password into an opaque storable string.
    fn hash(&self, password: &str) -> Result<String, AccountError>;

    /// Verify a plaintext password against a stored hash.
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AccountError>;
}

/// Argon2id hashing policy (default parameters, PHC format).
///
/// Hashing is intentionally CPU-expensive, on the order of tens to hundreds
/// of milliseconds; callers should expect it to dominate the latency of
/// account creation and authentication.
#[derive(Clone, Copy, Debug, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AccountError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);

        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AccountError::HashingFailed {
                reason: format!("Password hashing failed: {e}"),
            })?
            .to_string();

        Ok(password_hash)
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AccountError> {
        let parsed_hash =
            PasswordHash::new(password_hash).map_err(|_| AccountError::MalformedHash)?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AccountError::HashingFailed {
                reason: format!("Password verification failed: {e}"),
            }),
        }
    }
}

/// Check plaintext password policy before any hashing or store interaction.
pub(crate) fn check_password_policy(password: &str) -> Result<(), AccountError> {
    if password.is_empty() {
        return Err(AccountError::InvalidPassword {
            reason: "password must not be empty".to_string(),
        });
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AccountError::InvalidPassword {
            reason: format!("password exceeds {MAX_PASSWORD_LENGTH} bytes"),
        });
    }
    Ok(())
}
