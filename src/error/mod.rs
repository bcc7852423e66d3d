//! Unified error handling for the Barman core.
//!
//! Every failure a component can surface is classified here:
//!
//! - **Domain errors**: [`NetworkError`], [`AuthError`], [`DataError`],
//!   [`ImageError`], one file per domain
//! - **Unified type**: [`BarmanError`] consolidates them for callers that
//!   funnel everything into a single alert affordance
//! - **User messages**: every variant maps to exactly one human-readable
//!   string via `user_message()`; `error_code()` gives a short stable code
//!   for logs
//!
//! The deliberate exception to "nothing is silent": a missing prior
//! federated session on launch is expected steady state and never becomes an
//! error at all.

mod auth;
mod data;
mod image;
mod network;

pub use auth::AuthError;
pub use data::DataError;
pub use image::ImageError;
pub use network::{classify_reqwest_error, NetworkError};

use std::fmt;

/// High-level classification for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connectivity or transport trouble.
    Network,
    /// Sign-in and validation trouble.
    Auth,
    /// On-device persistence trouble.
    Data,
    /// Image resolution trouble.
    Image,
}

/// Consolidated error type for callers that surface everything through one
/// alert path.
#[derive(Debug, Clone, PartialEq)]
pub enum BarmanError {
    Network(NetworkError),
    Auth(AuthError),
    Data(DataError),
    Image(ImageError),
}

impl BarmanError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BarmanError::Network(_) => ErrorCategory::Network,
            BarmanError::Auth(AuthError::Network(_)) => ErrorCategory::Network,
            BarmanError::Auth(_) => ErrorCategory::Auth,
            BarmanError::Data(_) => ErrorCategory::Data,
            BarmanError::Image(ImageError::Network(_)) => ErrorCategory::Network,
            BarmanError::Image(_) => ErrorCategory::Image,
        }
    }

    /// Whether the UI should offer the network-settings affordance alongside
    /// the alert.
    pub fn suggests_settings(&self) -> bool {
        match self {
            BarmanError::Network(net) => net.suggests_settings(),
            BarmanError::Auth(auth) => auth.suggests_settings(),
            BarmanError::Image(img) => img.suggests_settings(),
            BarmanError::Data(_) => false,
        }
    }

    /// The one human-readable message for this failure.
    pub fn user_message(&self) -> String {
        match self {
            BarmanError::Network(net) => net.user_message(),
            BarmanError::Auth(auth) => auth.user_message(),
            BarmanError::Data(data) => data.user_message(),
            BarmanError::Image(img) => img.user_message(),
        }
    }

    /// Short stable code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            BarmanError::Network(net) => net.error_code(),
            BarmanError::Auth(auth) => auth.error_code(),
            BarmanError::Data(data) => data.error_code(),
            BarmanError::Image(img) => img.error_code(),
        }
    }
}

impl fmt::Display for BarmanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarmanError::Network(err) => err.fmt(f),
            BarmanError::Auth(err) => err.fmt(f),
            BarmanError::Data(err) => err.fmt(f),
            BarmanError::Image(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for BarmanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BarmanError::Network(err) => Some(err),
            BarmanError::Auth(err) => Some(err),
            BarmanError::Data(err) => Some(err),
            BarmanError::Image(err) => Some(err),
        }
    }
}

impl From<NetworkError> for BarmanError {
    fn from(err: NetworkError) -> Self {
        BarmanError::Network(err)
    }
}

impl From<AuthError> for BarmanError {
    fn from(err: AuthError) -> Self {
        BarmanError::Auth(err)
    }
}

impl From<DataError> for BarmanError {
    fn from(err: DataError) -> Self {
        BarmanError::Data(err)
    }
}

impl From<ImageError> for BarmanError {
    fn from(err: ImageError) -> Self {
        BarmanError::Image(err)
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_error_unification() {
        let net: BarmanError = NetworkError::Offline.into();
        let auth: BarmanError = AuthError::ProviderCancelled.into();
        let data: BarmanError = DataError::Serialize { message: "loop".to_string() }.into();
        let img: BarmanError = ImageError::MissingKey.into();

        assert_eq!(net.category(), ErrorCategory::Network);
        assert_eq!(auth.category(), ErrorCategory::Auth);
        assert_eq!(data.category(), ErrorCategory::Data);
        assert_eq!(img.category(), ErrorCategory::Image);

        for err in [net, auth, data, img] {
            assert!(!err.user_message().is_empty());
            assert!(!err.error_code().is_empty());
        }
    }

    #[test]
    fn test_wrapped_network_errors_categorize_as_network() {
        let auth: BarmanError = AuthError::Network(NetworkError::Offline).into();
        assert_eq!(auth.category(), ErrorCategory::Network);
        assert!(auth.suggests_settings());

        let img: BarmanError =
            ImageError::Network(NetworkError::Timeout { operation: "image fetch".to_string() })
                .into();
        assert_eq!(img.category(), ErrorCategory::Network);
        assert!(!img.suggests_settings());
    }

    #[test]
    fn test_settings_affordance_is_offline_only() {
        let offline: BarmanError = NetworkError::Offline.into();
        assert!(offline.suggests_settings());

        let rejected: BarmanError =
            AuthError::Rejected { message: "bad creds".to_string() }.into();
        assert!(!rejected.suggests_settings());

        let image_offline: BarmanError = ImageError::Offline { key: "m.png".to_string() }.into();
        assert!(image_offline.suggests_settings());
    }
}
