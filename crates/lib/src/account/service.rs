//! Account lifecycle operations
//!
//! [`AccountService`] orchestrates creation, lookup, authentication, update,
//! and deletion against one [`AccountStore`] unit-of-work. Callers construct
//! one service per request bound to one store session and invoke exactly one
//! operation; the service holds no state between calls and never caches
//! records.

use tracing::debug;

use crate::Result;
use crate::store::{AccountStore, StoreError};

use super::crypto::{CredentialHasher, check_password_policy};
use super::errors::AccountError;
use super::types::{Account, AccountId, AccountRecord, AccountUpdate, NewAccount};

/// The user account and authentication service.
///
/// Holds only transient references for the duration of one operation. The
/// store session is supplied by the caller and is not owned, pooled, or
/// recycled here; the service neither opens nor closes it.
pub struct AccountService<'a> {
    store: &'a mut dyn AccountStore,
    hasher: &'a dyn CredentialHasher,
}

impl<'a> AccountService<'a> {
    /// Bind a service to one store unit-of-work and one hashing policy.
    pub fn new(store: &'a mut dyn AccountStore, hasher: &'a dyn CredentialHasher) -> Self {
        Self { store, hasher }
    }

    /// Create a new account.
    ///
    /// The plaintext password is policy-checked before any hashing or store
    /// interaction, then hashed with the configured policy. The record is
    /// staged, committed, and reloaded from storage to pick up the
    /// store-assigned `id` and timestamps. `is_superuser` is always false at
    /// creation; `is_active` defaults to true.
    ///
    /// A store uniqueness violation surfaces as
    /// [`AccountError::DuplicateAccount`], never as a silent partial success.
    pub fn create_account(&mut self, input: NewAccount) -> Result<Account> {
        check_password_policy(&input.password)?;
        let password_hash = self.hasher.hash(&input.password)?;

        let record = AccountRecord {
            email: input.email,
            username: input.username,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            is_active: input.is_active.unwrap_or(true),
            is_superuser: false,
        };

        let id = self.store.stage_insert(record)?;
        self.commit()?;
        let account = self.reload(id)?;
        debug!(id = %account.id, username = %account.username, "created account");
        Ok(account)
    }

    /// Look up an account by id. Absence is a normal outcome, not a failure.
    pub fn get_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        Ok(self.store.get(id)?)
    }

    /// Look up an account by email.
    pub fn get_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self.store.find_first(&|account| account.email == email)?)
    }

    /// Look up an account by username.
    pub fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        Ok(self
            .store
            .find_first(&|account| account.username == username)?)
    }

    /// Verify a username/password pair.
    ///
    /// Returns the account only when the username is known and the password
    /// verifies against the stored hash. Unknown username and wrong password
    /// both yield `None`; the return value never distinguishes the two
    /// (anti-enumeration property).
    ///
    /// Verification is skipped entirely for unknown usernames, so the hash
    /// work factor is absent from that path's latency. Closing that timing
    /// signal would require always verifying against a dummy hash.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<Account>> {
        let Some(account) = self.get_by_username(username)? else {
            return Ok(None);
        };
        if self.hasher.verify(password, &account.password_hash)? {
            Ok(Some(account))
        } else {
            Ok(None)
        }
    }

    /// Apply a sparse update to an account.
    ///
    /// Only fields present in `update` are applied; the field set is the
    /// closed enumeration in [`AccountUpdate`]. A present `password` is
    /// policy-checked and re-hashed into `password_hash`. Returns `Ok(None)`
    /// when the id is unknown.
    pub fn update_account(
        &mut self,
        id: AccountId,
        update: AccountUpdate,
    ) -> Result<Option<Account>> {
        let Some(current) = self.store.get(id)? else {
            return Ok(None);
        };

        let mut record = AccountRecord::from(&current);
        if let Some(email) = update.email {
            record.email = email;
        }
        if let Some(username) = update.username {
            record.username = username;
        }
        if let Some(password) = update.password {
            check_password_policy(&password)?;
            record.password_hash = self.hasher.hash(&password)?;
        }
        if let Some(first_name) = update.first_name {
            record.first_name = Some(first_name);
        }
        if let Some(last_name) = update.last_name {
            record.last_name = Some(last_name);
        }
        if let Some(is_active) = update.is_active {
            record.is_active = is_active;
        }

        self.store.stage_update(id, record)?;
        self.commit()?;
        let account = self.reload(id)?;
        debug!(id = %account.id, "updated account");
        Ok(Some(account))
    }

    /// Delete an account. Returns false, with no store mutation, when the id
    /// is unknown; repeated deletion is an idempotent failure, not an error.
    pub fn delete_account(&mut self, id: AccountId) -> Result<bool> {
        if self.store.get(id)?.is_none() {
            return Ok(false);
        }
        self.store.stage_delete(id)?;
        self.commit()?;
        debug!(id = %id, "deleted account");
        Ok(true)
    }

    /// Return a page of accounts in ascending-id order.
    ///
    /// `skip` and `limit` are passed through to the store unmodified; no
    /// upper bound is enforced here.
    pub fn list_accounts(&self, skip: usize, limit: usize) -> Result<Vec<Account>> {
        Ok(self.store.list(skip, limit)?)
    }

    fn commit(&mut self) -> Result<()> {
        match self.store.commit() {
            Ok(()) => Ok(()),
            Err(StoreError::UniqueViolation { field }) => {
                Err(AccountError::DuplicateAccount { field }.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn reload(&self, id: AccountId) -> Result<Account> {
        self.store.get(id)?.ok_or_else(|| {
            StoreError::Unavailable {
                reason: format!("account {id} missing after commit"),
            }
            .into()
        })
    }
}
