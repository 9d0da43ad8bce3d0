//! Failure taxonomy for the CouchDB-backed question store.

use reqwest::StatusCode;
use thiserror::Error;

use crate::dao::storage::StorageError;

/// Result alias used throughout the CouchDB layer.
pub type CouchResult<T> = Result<T, CouchError>;

/// Everything that can go wrong between this process and CouchDB.
#[derive(Debug, Error)]
pub enum CouchError {
    /// A required variable is absent from the process environment.
    #[error("environment variable `{name}` is not set")]
    Env {
        /// Variable the configuration needs.
        name: &'static str,
    },
    /// Constructing the underlying HTTP client failed.
    #[error("cannot build the CouchDB HTTP client")]
    BuildClient {
        /// Builder failure from reqwest.
        #[source]
        source: reqwest::Error,
    },
    /// A request never produced a response.
    #[error("CouchDB request to `{url}` failed")]
    Http {
        /// Absolute URL of the failed request.
        url: String,
        /// Transport failure from reqwest.
        #[source]
        source: reqwest::Error,
    },
    /// CouchDB answered with a status this layer does not accept.
    #[error("CouchDB answered `{url}` with status {status}")]
    UnexpectedStatus {
        /// Absolute URL of the rejected request.
        url: String,
        /// Status carried by the response.
        status: StatusCode,
    },
    /// A response body is not the JSON shape this layer expects.
    #[error("CouchDB response from `{url}` does not decode")]
    BadPayload {
        /// Absolute URL the payload came from.
        url: String,
        /// Decode failure from reqwest.
        #[source]
        source: reqwest::Error,
    },
    /// One stored document does not deserialize into its entity shape.
    #[error("stored document `{doc_id}` does not deserialize")]
    BadDocument {
        /// Identifier of the offending document.
        doc_id: String,
        /// Deserialize failure from serde.
        #[source]
        source: serde_json::Error,
    },
    /// A document identifier violates the `kind::key` naming scheme.
    #[error("document id `{doc_id}` is unusable: {reason}")]
    DocKey {
        /// Identifier that broke the scheme.
        doc_id: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl From<CouchError> for StorageError {
    fn from(err: CouchError) -> Self {
        match err {
            CouchError::BadPayload { .. }
            | CouchError::BadDocument { .. }
            | CouchError::DocKey { .. } => StorageError::malformed(err.to_string(), err),
            _ => StorageError::unavailable(err.to_string(), err),
        }
    }
}
