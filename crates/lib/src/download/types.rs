//! Data types for download records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;

/// A file-download record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Download {
    pub id: i64,
    pub filename: String,
    pub file_path: String,
    pub file_size: Option<i64>,
    pub content_type: Option<String>,
    pub user_id: AccountId,
    pub download_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a download record.
#[derive(Clone, Debug, Deserialize)]
pub struct NewDownload {
    pub filename: String,
    pub file_path: String,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Sparse update payload for a download record.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DownloadUpdate {
    pub filename: Option<String>,
    pub file_path: Option<String>,
    pub file_size: Option<i64>,
    pub content_type: Option<String>,
}
