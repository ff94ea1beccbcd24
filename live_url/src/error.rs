use thiserror::Error;

/// The text could not be parsed as an absolute URL.
///
/// This is the only error shown to the user; it is captured into the
/// engine's [`ErrorState`](crate::state::ErrorState) rather than returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },
}

impl From<url::ParseError> for UrlError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl {
            reason: e.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("parameter index {index} is out of range for {len} parameters")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("host location is not an absolute URL: {0}")]
    InvalidLocation(String),
    #[error("host location error: {0}")]
    Host(String),
}

/// Errors returned to the caller of
/// [`SyncEngine::apply_edit`](crate::engine::SyncEngine::apply_edit).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The edit was rejected and the state was left untouched.
    #[error(transparent)]
    Param(#[from] ParamError),
    /// The state settled, but mirroring it into the host location failed.
    #[error("failed to publish settled URL: {0}")]
    Publish(#[from] LocationError),
}
