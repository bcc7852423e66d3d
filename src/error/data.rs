//! Drink store error types.
//!
//! A malformed overlay is not represented here as a load failure: the store
//! recovers by falling back to the seed and only logs the corruption. The
//! variants below are the failures that do reach callers.

use std::fmt;
use std::path::PathBuf;

/// Persistence-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    /// The bundled seed file is missing. It ships with the application, so
    /// this indicates a broken install rather than user data loss.
    SeedMissing { path: PathBuf },

    /// The bundled seed file could not be decoded.
    SeedMalformed { path: PathBuf, message: String },

    /// Reading or writing a data file failed.
    Io { path: PathBuf, message: String },

    /// The collection could not be serialized.
    Serialize { message: String },
}

impl DataError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            DataError::SeedMissing { .. } | DataError::SeedMalformed { .. } => {
                "The built-in drink list could not be loaded. Please reinstall the app."
                    .to_string()
            }
            DataError::Io { .. } => {
                "Your drinks could not be saved. Please check available storage.".to_string()
            }
            DataError::Serialize { .. } => {
                "Your drinks could not be saved. Please try again.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DataError::SeedMissing { .. } => "E_DATA_SEED_MISSING",
            DataError::SeedMalformed { .. } => "E_DATA_SEED_BAD",
            DataError::Io { .. } => "E_DATA_IO",
            DataError::Serialize { .. } => "E_DATA_SERIALIZE",
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::SeedMissing { path } => {
                write!(f, "seed file not found at {}", path.display())
            }
            DataError::SeedMalformed { path, message } => {
                write!(f, "seed file at {} is malformed: {}", path.display(), message)
            }
            DataError::Io { path, message } => {
                write!(f, "I/O error at {}: {}", path.display(), message)
            }
            DataError::Serialize { message } => write!(f, "serialization failed: {}", message),
        }
    }
}

impl std::error::Error for DataError {}
