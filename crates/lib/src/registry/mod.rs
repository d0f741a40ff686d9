//! Planning-permissions register client
//!
//! A pass-through fetch against the public planning-permissions register:
//! one HTTP GET plus response parsing, exposed as a method returning a fixed
//! record shape. No caching, retrying, or reshaping happens here.

pub mod client;
pub mod errors;
pub mod types;

pub use client::{DEFAULT_REGISTRY_URL, RegistryClient};
pub use errors::RegistryError;
pub use types::{PermissionPage, PermissionRecord};
