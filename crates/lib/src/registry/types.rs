//! Wire types for the planning-permissions register

use serde::{Deserialize, Serialize};

/// One planning-permission entry as published by the register.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRecord {
    pub id: String,
    pub permission_type: String,
    pub status: String,
    pub activity: String,
    pub duty_holder: String,
    pub suburb: String,
    pub postcode: String,
}

/// One page of register results.
///
/// The register publishes the record list under the wire key `records`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionPage {
    pub total: u64,
    #[serde(rename = "records")]
    pub permissions: Vec<PermissionRecord>,
    pub page: u32,
    pub page_size: u32,
}
