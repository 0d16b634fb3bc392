use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    /// A collaborator could not deliver a collection or vocabulary.
    ///
    /// The engine never raises this; it is surfaced to the UI as a retryable state.
    #[error("Failed to fetch {what}: {reason}")]
    Fetch { what: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl SiftError {
    pub fn fetch(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        SiftError::Fetch {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the UI should offer a retry for this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SiftError::Fetch { .. })
    }
}

impl From<confique::Error> for SiftError {
    fn from(err: confique::Error) -> Self {
        SiftError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_are_retryable() {
        let err = SiftError::fetch("campaigns", "connection refused");
        assert!(err.is_retryable());
        assert_eq!(
            err.to_string(),
            "Failed to fetch campaigns: connection refused"
        );
    }

    #[test]
    fn api_errors_are_not_retryable() {
        assert!(!SiftError::Api("unknown domain".into()).is_retryable());
    }
}
