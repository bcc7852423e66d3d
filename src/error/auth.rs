//! Authentication-related error types.
//!
//! Outcomes of the three sign-in flows and their validation step. Provider
//! cancellation is a failure (the attempt did not produce a session) but is
//! deliberately non-alarming in its user message.

use std::fmt;

use super::network::NetworkError;

/// Authentication-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// Username field was empty (per-field validation).
    MissingUsername,

    /// Password field was empty (per-field validation).
    MissingPassword,

    /// One or both credential fields were empty (combined validation).
    MissingCredentials,

    /// Backend answered with a non-200 code; the message is shown verbatim.
    Rejected { message: String },

    /// The user cancelled a federated sign-in.
    ProviderCancelled,

    /// A federated provider reported an error.
    ProviderError { message: String },

    /// Another sign-in attempt is already in flight.
    AttemptInFlight,

    /// Persisting the session flags after a successful login failed.
    FlagsPersist { message: String },

    /// The network layer failed before or during the attempt.
    Network(NetworkError),
}

impl AuthError {
    /// Whether the failure came from empty input rather than any provider.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AuthError::MissingUsername | AuthError::MissingPassword | AuthError::MissingCredentials
        )
    }

    /// Whether the UI should offer the network-settings affordance.
    pub fn suggests_settings(&self) -> bool {
        matches!(self, AuthError::Network(net) if net.suggests_settings())
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::MissingUsername => "Please enter your email".to_string(),
            AuthError::MissingPassword => "Please enter your password".to_string(),
            AuthError::MissingCredentials => {
                "Please enter your email and password.".to_string()
            }
            AuthError::Rejected { message } => message.clone(),
            AuthError::ProviderCancelled => "Sign-in was cancelled.".to_string(),
            AuthError::ProviderError { message } => {
                format!("We have a problem... {}", message)
            }
            AuthError::AttemptInFlight => {
                "A sign-in is already in progress. Please wait for it to finish.".to_string()
            }
            AuthError::FlagsPersist { .. } => {
                "Could not save your session. Please check storage permissions.".to_string()
            }
            AuthError::Network(net) => net.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingUsername => "E_AUTH_NO_USER",
            AuthError::MissingPassword => "E_AUTH_NO_PASS",
            AuthError::MissingCredentials => "E_AUTH_NO_CREDS",
            AuthError::Rejected { .. } => "E_AUTH_REJECTED",
            AuthError::ProviderCancelled => "E_AUTH_CANCELLED",
            AuthError::ProviderError { .. } => "E_AUTH_PROVIDER",
            AuthError::AttemptInFlight => "E_AUTH_IN_FLIGHT",
            AuthError::FlagsPersist { .. } => "E_AUTH_FLAGS",
            AuthError::Network(net) => net.error_code(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingUsername => write!(f, "username is empty"),
            AuthError::MissingPassword => write!(f, "password is empty"),
            AuthError::MissingCredentials => write!(f, "credentials are incomplete"),
            AuthError::Rejected { message } => write!(f, "credentials rejected: {}", message),
            AuthError::ProviderCancelled => write!(f, "provider sign-in cancelled by user"),
            AuthError::ProviderError { message } => write!(f, "provider error: {}", message),
            AuthError::AttemptInFlight => write!(f, "sign-in attempt already in flight"),
            AuthError::FlagsPersist { message } => {
                write!(f, "failed to persist session flags: {}", message)
            }
            AuthError::Network(net) => net.fmt(f),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Network(net) => Some(net),
            _ => None,
        }
    }
}

impl From<NetworkError> for AuthError {
    fn from(err: NetworkError) -> Self {
        AuthError::Network(err)
    }
}
