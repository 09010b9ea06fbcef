use crate::types::HeroId;

/// Errors raised locally, before or after talking to a backend.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: HeroId },

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Failure of a remote call against a hero backend.
///
/// The `Display` output is the human-readable detail that ends up in the
/// diagnostic log, so it stays short.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The requested record does not exist.
    #[error("Not Found")]
    NotFound,

    /// The backend answered with a non-success status.
    #[error("{status} {body}")]
    Status {
        /// HTTP-style status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The request never produced a response (network, DNS, TLS, decode).
    #[error("{0}")]
    Transport(String),

    /// The backend rejected the payload.
    #[error("{0}")]
    Rejected(String),
}

impl From<CoreError> for BackendError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { .. } => BackendError::NotFound,
            CoreError::Validation(msg) => BackendError::Rejected(msg),
        }
    }
}
