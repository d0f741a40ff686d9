use permitdesk::account::{AccountError, CredentialHasher, NewAccount};

/// Fast dummy hashing policy so tests do not pay the Argon2 work factor.
///
/// The "hash" is trivially reversible; that is fine here because these tests
/// exercise service semantics, not hash strength (the real policy has its
/// own tests in the crypto module).
pub struct TestHasher;

impl CredentialHasher for TestHasher {
    fn hash(&self, password: &str) -> Result<String, AccountError> {
        Ok(format!("hashed::{password}"))
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AccountError> {
        Ok(password_hash == format!("hashed::{password}"))
    }
}

/// Creation input with the optional fields left unset.
pub fn new_account(email: &str, username: &str, password: &str) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        first_name: None,
        last_name: None,
        is_active: None,
    }
}
