//! Placeholder download-record operations
//!
//! Mirrors the deployed placeholder surface: `create` echoes its input with
//! a fixed id, every lookup reports absence, and nothing touches storage.

use chrono::Utc;

use crate::account::AccountId;

use super::types::{Download, DownloadUpdate, NewDownload};

/// Placeholder service for download records.
#[derive(Clone, Copy, Debug, Default)]
pub struct DownloadService;

impl DownloadService {
    pub fn new() -> Self {
        Self
    }

    /// Echo a new download record without persisting it.
    // TODO: persist download records once a downloads table exists in the store
    pub fn create(&self, owner: AccountId, request: NewDownload) -> Download {
        let now = Utc::now();
        Download {
            id: 1,
            filename: request.filename,
            file_path: request.file_path,
            file_size: request.file_size,
            content_type: request.content_type,
            user_id: owner,
            download_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// List download records for an owner. Always empty.
    pub fn list(&self, _owner: AccountId, _skip: usize, _limit: usize) -> Vec<Download> {
        Vec::new()
    }

    /// Fetch one download record. Always absent.
    pub fn get(&self, _owner: AccountId, _id: i64) -> Option<Download> {
        None
    }

    /// Update one download record. Always absent.
    pub fn update(&self, _owner: AccountId, _id: i64, _update: DownloadUpdate) -> Option<Download> {
        None
    }

    /// Delete one download record. Always reports absence.
    pub fn delete(&self, _owner: AccountId, _id: i64) -> bool {
        false
    }

    /// Serve a file and bump its download count. Always absent.
    pub fn record_download(&self, _owner: AccountId, _id: i64) -> Option<Download> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_echoes_request() {
        let service = DownloadService::new();
        let download = service.create(
            AccountId(7),
            NewDownload {
                filename: "report.pdf".to_string(),
                file_path: "/files/report.pdf".to_string(),
                file_size: Some(1024),
                content_type: Some("application/pdf".to_string()),
            },
        );

        assert_eq!(download.filename, "report.pdf");
        assert_eq!(download.user_id, AccountId(7));
        assert_eq!(download.download_count, 0);
    }

    #[test]
    fn test_lookups_report_absence() {
        let service = DownloadService::new();
        let owner = AccountId(1);

        assert!(service.list(owner, 0, 100).is_empty());
        assert!(service.get(owner, 1).is_none());
        assert!(service.update(owner, 1, DownloadUpdate::default()).is_none());
        assert!(!service.delete(owner, 1));
        assert!(service.record_download(owner, 1).is_none());
    }
}
