//! Error types for dn.
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (unknown todo id, bad configuration values)
//! - 3: Operation failed (storage, JSON or TOML failures, ids exhausted)

use thiserror::Error;

/// Exit codes for the dn CLI.
pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 3;
}

/// Main error type for dn operations.
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Todo {0} not found")]
    TodoNotFound(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures (exit code 3)
    #[error("Stored todos under '{key}' could not be parsed: {source}")]
    CorruptStore {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No todo ids left: id 18446744073709551615 is already in use")]
    IdSpaceExhausted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::TodoNotFound(_) | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            Error::CorruptStore { .. }
            | Error::IdSpaceExhausted
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for dn operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::TodoNotFound(7).exit_code(), exit_codes::USER_ERROR);
        assert_eq!(
            Error::InvalidConfig("bad".into()).exit_code(),
            exit_codes::USER_ERROR
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(Error::from(io).exit_code(), exit_codes::OPERATION_FAILED);
        assert_eq!(
            Error::IdSpaceExhausted.exit_code(),
            exit_codes::OPERATION_FAILED
        );
    }

    #[test]
    fn test_corrupt_store_message_names_key() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = Error::CorruptStore { key: "dn-todos".into(), source };
        assert!(err.to_string().contains("'dn-todos'"));
        assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
    }
}
