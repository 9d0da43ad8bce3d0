use std::error::Error as StdError;

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be reached or refused the operation.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Human-readable context for operators.
        message: String,
        /// Backend-specific cause.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    /// The backend answered, but its payload does not decode into the
    /// expected question or team documents.
    #[error("storage returned malformed data: {message}")]
    Malformed {
        /// Human-readable context for operators.
        message: String,
        /// Backend-specific cause.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl StdError + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a malformed-data error from a decode failure.
    pub fn malformed(message: String, source: impl StdError + Send + Sync + 'static) -> Self {
        StorageError::Malformed {
            message,
            source: Box::new(source),
        }
    }
}
