//! Client for the custom password login backend.
//!
//! One endpoint, one attempt: POST `{base}/WS/login.php` with a
//! form-urlencoded `username` and password digest. The backend answers a JSON
//! envelope `{code, message}` where `code == 200` means the credentials were
//! accepted and anything else is a rejection whose message is shown to the
//! user verbatim.

use reqwest::Client;
use serde::Deserialize;

use crate::config;
use crate::error::{classify_reqwest_error, AuthError, NetworkError};

/// Response envelope from the login endpoint.
#[derive(Debug, Clone, Deserialize)]
struct LoginEnvelope {
    code: i64,
    message: String,
}

/// Acknowledgement of accepted credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginAck {
    /// Backend message accompanying the acceptance.
    pub message: String,
}

/// Client for the password login backend.
#[derive(Debug, Clone)]
pub struct BackendAuthClient {
    base_url: String,
    client: Client,
}

impl BackendAuthClient {
    /// Create a client against the production backend.
    pub fn new() -> Self {
        Self::with_base_url(config::BACKEND_BASE_URL)
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// Attempt a login. Resolves exactly once:
    ///
    /// - accepted credentials (`code == 200`) → `Ok(LoginAck)`
    /// - rejected credentials (any other code) → [`AuthError::Rejected`]
    ///   carrying the backend message
    /// - transport failure or undecodable body → [`AuthError::Network`],
    ///   distinct from a rejection
    pub async fn login(
        &self,
        username: &str,
        password_digest: &str,
    ) -> Result<LoginAck, AuthError> {
        let url = format!("{}/WS/login.php", self.base_url);

        let response = self
            .client
            .post(&url)
            .form(&[("username", username), ("password", password_digest)])
            .send()
            .await
            .map_err(|e| AuthError::Network(classify_reqwest_error(&e, &url)))?;

        // Read the text first so a non-JSON body produces a useful message.
        let text = response.text().await.map_err(|e| {
            AuthError::Network(NetworkError::InvalidResponse { message: e.to_string() })
        })?;

        let envelope: LoginEnvelope = serde_json::from_str(&text).map_err(|e| {
            let snippet: String = text.chars().take(200).collect();
            AuthError::Network(NetworkError::InvalidResponse {
                message: format!("{} (body: {})", e, snippet),
            })
        })?;

        if envelope.code == 200 {
            Ok(LoginAck { message: envelope.message })
        } else {
            Err(AuthError::Rejected { message: envelope.message })
        }
    }
}

impl Default for BackendAuthClient {
    fn default() -> Self {
        Self::new()
    }
}
