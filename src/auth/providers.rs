//! Seam for the federated identity SDKs.
//!
//! The Google and Apple SDKs are platform capability objects; the core only
//! ever asks them to restore a session, run their interactive sign-in, or
//! sign out. Their wire protocols, UI presentation, and requested scopes are
//! configured where the capability is constructed, outside this crate.

use async_trait::async_trait;

use crate::error::AuthError;

/// Identity asserted by a federated provider after a successful sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct FederatedIdentity {
    /// Provider-scoped stable user identifier.
    pub user_id: String,
    /// Display name, when the provider shares it.
    pub name: Option<String>,
    /// Email, when the provider shares it.
    pub email: Option<String>,
}

impl FederatedIdentity {
    /// Best label for display and session records.
    pub fn display_label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.user_id)
    }
}

/// Why an interactive federated sign-in did not produce an identity.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderFailure {
    /// The user backed out. A failure, but not an alarming one.
    Cancelled,
    /// The provider reported an error; the message is surfaced.
    Failed { message: String },
}

impl From<ProviderFailure> for AuthError {
    fn from(failure: ProviderFailure) -> Self {
        match failure {
            ProviderFailure::Cancelled => AuthError::ProviderCancelled,
            ProviderFailure::Failed { message } => AuthError::ProviderError { message },
        }
    }
}

/// A federated identity SDK, consumed only through these three operations.
#[async_trait]
pub trait FederatedProvider: Send + Sync {
    /// Attempt to restore a previous session without user interaction.
    /// `Ok(None)` means no prior session exists, which is normal steady
    /// state, not an error.
    async fn restore_session(&self) -> Result<Option<FederatedIdentity>, ProviderFailure>;

    /// Run the provider's interactive sign-in flow.
    async fn sign_in(&self) -> Result<FederatedIdentity, ProviderFailure>;

    /// Drop any session state the provider holds on its side.
    async fn sign_out(&self);
}
