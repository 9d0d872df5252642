//! Error types for ytgrab

use thiserror::Error;

/// Main error type for ytgrab operations
#[derive(Debug, Error)]
pub enum GrabError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service reported error: {0}")]
    ServiceReported(String),

    #[error("malformed stream map segment: {0}")]
    MalformedStreamMap(String),

    #[error("metadata field missing: {0}")]
    MissingField(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GrabError {
    /// Check if the error was reported by the upstream service itself
    /// rather than produced locally.
    pub fn is_service_error(&self) -> bool {
        matches!(self, GrabError::ServiceReported(_))
    }

    /// Check if the error aborted a metadata fetch before any variant
    /// could be produced.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            GrabError::Transport(_)
                | GrabError::ServiceReported(_)
                | GrabError::MalformedStreamMap(_)
                | GrabError::MissingField(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_classification() {
        let err = GrabError::ServiceReported("This video is unavailable".to_string());
        assert!(err.is_service_error());
        assert!(err.is_fetch_error());

        let err = GrabError::InvalidUrl("not-a-url".to_string());
        assert!(!err.is_service_error());
        assert!(!err.is_fetch_error());
    }

    #[test]
    fn test_fetch_error_classification() {
        assert!(GrabError::MalformedStreamMap("itag18".to_string()).is_fetch_error());
        assert!(GrabError::MissingField("title").is_fetch_error());

        let io = GrabError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(!io.is_fetch_error());
    }
}
