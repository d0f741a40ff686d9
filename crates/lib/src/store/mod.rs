//! Account persistence boundary
//!
//! Defines the [`AccountStore`] trait: one transactional session against the
//! durable account table. The account service receives an already-open
//! session and drives it through stage/commit/reload; acquisition and
//! release are owned entirely by the caller.
//!
//! [`MemoryStore`] is the bundled implementation, suitable for tests,
//! development, and single-process deployments.

pub mod errors;
pub mod memory;

pub use errors::{StoreError, UniqueField};
pub use memory::{MemorySession, MemoryStore};

use crate::account::{Account, AccountId, AccountRecord};

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// One transactional unit-of-work against the durable account table.
///
/// Staged operations become visible only at [`commit`](AccountStore::commit),
/// and a failed commit leaves no partial mutation visible to subsequent
/// reads. Reads (`get`, `find_first`, `list`) observe committed state.
///
/// Implementations enforce uniqueness of `email` and `username` at commit
/// time and must enumerate accounts in ascending-id order so that
/// offset/limit pagination is deterministic.
pub trait AccountStore: Send {
    /// Stage a new record for insertion and assign its id.
    ///
    /// The id is store-assigned and final; the record itself becomes
    /// readable only after a successful commit.
    fn stage_insert(&mut self, record: AccountRecord) -> StoreResult<AccountId>;

    /// Stage a full-record replacement for an existing id.
    fn stage_update(&mut self, id: AccountId, record: AccountRecord) -> StoreResult<()>;

    /// Stage the removal of an existing id.
    fn stage_delete(&mut self, id: AccountId) -> StoreResult<()>;

    /// Atomically apply all staged operations.
    ///
    /// On [`StoreError::UniqueViolation`] the transaction is aborted and
    /// nothing staged becomes visible. The session is drained either way.
    fn commit(&mut self) -> StoreResult<()>;

    /// Fetch one account by id from committed state.
    fn get(&self, id: AccountId) -> StoreResult<Option<Account>>;

    /// Return the first committed account matching the predicate, scanning
    /// in ascending-id order.
    fn find_first(
        &self,
        predicate: &dyn Fn(&Account) -> bool,
    ) -> StoreResult<Option<Account>>;

    /// Enumerate committed accounts in ascending-id order, skipping `skip`
    /// records and returning at most `limit`.
    fn list(&self, skip: usize, limit: usize) -> StoreResult<Vec<Account>>;
}
