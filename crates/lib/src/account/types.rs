//! Core data types for the account service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned account identifier.
///
/// Assigned exactly once, at creation, by the store. The service never
/// assigns or mutates it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AccountId(pub i64);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for AccountId {
    fn from(raw: i64) -> Self {
        AccountId(raw)
    }
}

/// A user's durable identity and credential record.
///
/// `password_hash` is always the output of the configured one-way hash
/// function applied to some plaintext; the service never stores or logs
/// plaintext. `created_at`/`updated_at` are store-managed and picked up on
/// reload after commit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for account creation.
///
/// `is_active` defaults to true when unspecified; `is_superuser` is not an
/// input at all and is always false at creation.
#[derive(Clone, Debug, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Sparse update payload.
///
/// The field set is a fixed, closed enumeration: only fields present here
/// can ever change through the update path. Unset fields are excluded from
/// the update, never defaulted or nulled. A plaintext `password` is
/// re-hashed into `password_hash` by the service.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccountUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
}

/// The shape the store persists: an [`Account`] minus the store-managed
/// fields (`id`, timestamps).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        AccountRecord {
            email: account.email.clone(),
            username: account.username.clone(),
            password_hash: account.password_hash.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            is_active: account.is_active,
            is_superuser: account.is_superuser,
        }
    }
}
