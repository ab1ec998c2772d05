use thiserror::Error;

/// Errors surfaced by the controller layer.
///
/// Network outcomes that the user just needs to hear about become
/// [`crate::Notice`]s instead; `CoreError` is for failures the calling
/// code must branch on, like validation rejecting a submit before any
/// request is made.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Client-side validation failure, surfaced as an inline field
    /// error rather than a network round trip.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Registry call failed.
    #[error(transparent)]
    Api(#[from] featctl_api::Error),
}

impl CoreError {
    /// The HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status(),
            Self::Validation { .. } => None,
        }
    }
}
