//! HTTP client for the planning-permissions register

use tracing::debug;
use url::Url;

use super::errors::RegistryError;
use super::types::PermissionPage;

/// Public register endpoint the original deployment points at.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://www.epa.vic.gov.au/api/public-register/permissions";

/// Permission type the reports surface is scoped to.
const PERMISSION_TYPE: &str = "Development licence";

/// The register is fetched one fixed page at a time; downstream pagination
/// happens against the returned page, not at the register.
const PAGE: &str = "1";
const PAGE_SIZE: &str = "1000";

/// Client for the external planning-permissions register.
#[derive(Clone, Debug)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RegistryClient {
    /// Create a client against the given register base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// The register base URL this client targets.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the development-licence page of the register.
    ///
    /// One GET, one parse; a non-success status or an undecodable body
    /// surfaces as [`RegistryError::Request`].
    pub async fn planning_permissions(&self) -> Result<PermissionPage, RegistryError> {
        debug!(url = %self.base_url, "fetching planning permissions");
        let page = self
            .http
            .get(self.base_url.clone())
            .query(&[
                ("permissionType", PERMISSION_TYPE),
                ("page", PAGE),
                ("pageSize", PAGE_SIZE),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<PermissionPage>()
            .await?;
        Ok(page)
    }
}
