//! In-memory account store implementation
//!
//! Suitable for testing, development, or single-process deployments where
//! durability is handled externally. Committed state lives behind an
//! `RwLock` shared by all sessions; each [`MemorySession`] buffers staged
//! operations and applies them atomically at commit.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::account::{Account, AccountId, AccountRecord};

use super::errors::{StoreError, UniqueField};
use super::{AccountStore, StoreResult};

/// Committed state plus the id sequence.
///
/// `rows` is keyed by raw id; `BTreeMap` iteration gives the ascending-id
/// enumeration order the store contract requires.
#[derive(Debug, Default)]
struct Shared {
    next_id: i64,
    rows: BTreeMap<i64, Account>,
}

/// Shared in-memory account table. Cheap to clone; clones observe the same
/// committed state. Open one [`MemorySession`] per request.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    shared: Arc<RwLock<Shared>>,
}

impl MemoryStore {
    /// Creates a new, empty `MemoryStore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a unit-of-work against this store.
    pub fn session(&self) -> MemorySession {
        MemorySession {
            shared: Arc::clone(&self.shared),
            pending: Vec::new(),
        }
    }
}

/// One transactional session against a [`MemoryStore`].
#[derive(Debug)]
pub struct MemorySession {
    shared: Arc<RwLock<Shared>>,
    pending: Vec<PendingOp>,
}

#[derive(Debug)]
enum PendingOp {
    Insert { id: AccountId, record: AccountRecord },
    Update { id: AccountId, record: AccountRecord },
    Delete { id: AccountId },
}

impl MemorySession {
    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Shared>> {
        self.shared.read().map_err(|_| StoreError::Unavailable {
            reason: "store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Shared>> {
        self.shared.write().map_err(|_| StoreError::Unavailable {
            reason: "store lock poisoned".to_string(),
        })
    }
}

impl AccountStore for MemorySession {
    fn stage_insert(&mut self, record: AccountRecord) -> StoreResult<AccountId> {
        // Ids come off a shared sequence at staging time and are consumed
        // even if the commit later aborts, like a database sequence.
        let id = {
            let mut shared = self.write()?;
            shared.next_id += 1;
            AccountId(shared.next_id)
        };
        self.pending.push(PendingOp::Insert { id, record });
        Ok(id)
    }

    fn stage_update(&mut self, id: AccountId, record: AccountRecord) -> StoreResult<()> {
        self.pending.push(PendingOp::Update { id, record });
        Ok(())
    }

    fn stage_delete(&mut self, id: AccountId) -> StoreResult<()> {
        self.pending.push(PendingOp::Delete { id });
        Ok(())
    }

    fn commit(&mut self) -> StoreResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(&mut self.pending);
        let mut shared = self.write()?;

        // Apply against a scratch copy; committed state is swapped in only
        // when every staged operation succeeds.
        let mut next = shared.rows.clone();
        let now = Utc::now();

        for op in pending {
            match op {
                PendingOp::Insert { id, record } => {
                    check_unique(&next, id, &record)?;
                    next.insert(id.0, materialize(id, record, now, None));
                }
                PendingOp::Update { id, record } => {
                    // A row deleted earlier in the same transaction (or by a
                    // concurrent session) leaves nothing to update.
                    let Some(existing) = next.get(&id.0) else {
                        continue;
                    };
                    check_unique(&next, id, &record)?;
                    let created_at = existing.created_at;
                    next.insert(id.0, materialize(id, record, created_at, Some(now)));
                }
                PendingOp::Delete { id } => {
                    next.remove(&id.0);
                }
            }
        }

        shared.rows = next;
        Ok(())
    }

    fn get(&self, id: AccountId) -> StoreResult<Option<Account>> {
        let shared = self.read()?;
        Ok(shared.rows.get(&id.0).cloned())
    }

    fn find_first(
        &self,
        predicate: &dyn Fn(&Account) -> bool,
    ) -> StoreResult<Option<Account>> {
        let shared = self.read()?;
        Ok(shared.rows.values().find(|account| predicate(account)).cloned())
    }

    fn list(&self, skip: usize, limit: usize) -> StoreResult<Vec<Account>> {
        let shared = self.read()?;
        Ok(shared.rows.values().skip(skip).take(limit).cloned().collect())
    }
}

/// Assemble the durable row from a record plus the store-managed fields.
fn materialize(
    id: AccountId,
    record: AccountRecord,
    created_at: chrono::DateTime<Utc>,
    updated_at: Option<chrono::DateTime<Utc>>,
) -> Account {
    Account {
        id,
        email: record.email,
        username: record.username,
        password_hash: record.password_hash,
        first_name: record.first_name,
        last_name: record.last_name,
        is_active: record.is_active,
        is_superuser: record.is_superuser,
        created_at,
        updated_at,
    }
}

/// Uniqueness check for `email` and `username` against the scratch state,
/// ignoring the row being written itself.
fn check_unique(
    rows: &BTreeMap<i64, Account>,
    id: AccountId,
    record: &AccountRecord,
) -> StoreResult<()> {
    for other in rows.values() {
        if other.id == id {
            continue;
        }
        if other.email == record.email {
            return Err(StoreError::UniqueViolation {
                field: UniqueField::Email,
            });
        }
        if other.username == record.username {
            return Err(StoreError::UniqueViolation {
                field: UniqueField::Username,
            });
        }
    }
    Ok(())
}
