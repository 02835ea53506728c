use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a catalog read.
///
/// `NotFound` is the one transport failure callers commonly branch on, so it
/// gets its own variant; everything else is a [`TransportError`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("entry {id} does not exist")]
    NotFound { id: u32 },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("malformed entry reference: {0:?}")]
    MalformedReference(String),
}
