//! Download-record subsystem
//!
//! Entirely placeholder behavior: the routes exist and the shapes are fixed,
//! but nothing is persisted yet. Kept as a separate module so the eventual
//! implementation lands behind the same API.

pub mod service;
pub mod types;

pub use service::DownloadService;
pub use types::{Download, DownloadUpdate, NewDownload};
