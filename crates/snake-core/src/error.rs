//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid action index: {0} (expected 0, 1 or 2)")]
    InvalidAction(i64),

    #[error("Episode already terminated at step {step}; call reset first")]
    EpisodeTerminated { step: u64 },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidAction(7);
        assert_eq!(err.to_string(), "Invalid action index: 7 (expected 0, 1 or 2)");

        let err = Error::EpisodeTerminated { step: 12 };
        assert!(err.to_string().contains("step 12"));
    }

    #[test]
    fn test_from_serde_json() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
