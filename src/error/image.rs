//! Image resolution error types.

use std::fmt;

use super::network::NetworkError;

/// Image-cache-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    /// The record carries no image key, so there is nothing to resolve.
    MissingKey,

    /// Not cached locally and no network path to fetch over. The UI offers
    /// the settings affordance for this one.
    Offline { key: String },

    /// Bytes were found or fetched but could not be decoded as an image.
    Decode { key: String, message: String },

    /// Reading the cached file failed.
    Io { key: String, message: String },

    /// The remote fetch failed.
    Network(NetworkError),
}

impl ImageError {
    /// Whether the UI should offer the network-settings affordance.
    pub fn suggests_settings(&self) -> bool {
        match self {
            ImageError::Offline { .. } => true,
            ImageError::Network(net) => net.suggests_settings(),
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ImageError::MissingKey => "This drink has no photo yet.".to_string(),
            ImageError::Offline { .. } => "Connection error. Go to Settings?".to_string(),
            ImageError::Decode { .. } => "The photo could not be displayed.".to_string(),
            ImageError::Io { .. } => "The photo could not be read from storage.".to_string(),
            ImageError::Network(net) => net.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ImageError::MissingKey => "E_IMG_NO_KEY",
            ImageError::Offline { .. } => "E_IMG_OFFLINE",
            ImageError::Decode { .. } => "E_IMG_DECODE",
            ImageError::Io { .. } => "E_IMG_IO",
            ImageError::Network(net) => net.error_code(),
        }
    }
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::MissingKey => write!(f, "record has no image key"),
            ImageError::Offline { key } => {
                write!(f, "image '{}' not cached and no network path", key)
            }
            ImageError::Decode { key, message } => {
                write!(f, "image '{}' failed to decode: {}", key, message)
            }
            ImageError::Io { key, message } => {
                write!(f, "image '{}' could not be read: {}", key, message)
            }
            ImageError::Network(net) => net.fmt(f),
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageError::Network(net) => Some(net),
            _ => None,
        }
    }
}

impl From<NetworkError> for ImageError {
    fn from(err: NetworkError) -> Self {
        ImageError::Network(err)
    }
}
