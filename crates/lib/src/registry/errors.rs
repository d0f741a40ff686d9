//! Error types for the register client
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// Transport failure, non-success HTTP status, or an undecodable
    /// response body.
    #[error("register request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl From<RegistryError> for crate::Error {
    fn from(err: RegistryError) -> Self {
        crate::Error::Registry(err)
    }
}
