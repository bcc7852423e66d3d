//! Multi-provider sign-in orchestration.
//!
//! One state machine over the three flows. Before any network-dependent
//! flow (password login, interactive Apple sign-in) the orchestrator
//! consults the connectivity monitor and fails fast when offline, without
//! touching any provider. Google manages its own reachability, so its
//! restore and interactive flows skip the guard.
//!
//! Attempts are serialized: a second sign-in while one is in flight is
//! rejected with [`AuthError::AttemptInFlight`] rather than racing two
//! completions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, MutexGuard};

use crate::auth::backend::BackendAuthClient;
use crate::auth::hasher::hash_password;
use crate::auth::providers::FederatedProvider;
use crate::auth::session::{Provider, Session, SessionFlagsStore};
use crate::connectivity::ConnectivityMonitor;
use crate::error::{AuthError, NetworkError};

/// Observable state of the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Idle,
    /// Validating input and consulting connectivity.
    Checking,
    /// Waiting on a provider or the backend.
    InFlight(Provider),
    Completed(Session),
    Failed(AuthError),
}

/// How empty credential fields are reported.
///
/// The app historically shipped two login editions with divergent behavior;
/// both survive as selectable policies. `PerField` is the default: it checks
/// the username first and names the missing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Tailored message per empty field, username checked first.
    #[default]
    PerField,
    /// One generic message when either field is empty.
    Combined,
}

impl ValidationPolicy {
    pub fn validate(&self, username: &str, password: &str) -> Result<(), AuthError> {
        match self {
            ValidationPolicy::PerField => {
                if username.is_empty() {
                    Err(AuthError::MissingUsername)
                } else if password.is_empty() {
                    Err(AuthError::MissingPassword)
                } else {
                    Ok(())
                }
            }
            ValidationPolicy::Combined => {
                if username.is_empty() || password.is_empty() {
                    Err(AuthError::MissingCredentials)
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Coordinates the three sign-in flows behind one result contract.
pub struct AuthOrchestrator {
    connectivity: Arc<ConnectivityMonitor>,
    backend: BackendAuthClient,
    google: Arc<dyn FederatedProvider>,
    apple: Arc<dyn FederatedProvider>,
    flags: SessionFlagsStore,
    validation: ValidationPolicy,
    state: Mutex<AuthState>,
    attempt: AsyncMutex<()>,
    restore_attempted: AtomicBool,
}

impl AuthOrchestrator {
    pub fn new(
        connectivity: Arc<ConnectivityMonitor>,
        backend: BackendAuthClient,
        google: Arc<dyn FederatedProvider>,
        apple: Arc<dyn FederatedProvider>,
        flags: SessionFlagsStore,
    ) -> Self {
        Self {
            connectivity,
            backend,
            google,
            apple,
            flags,
            validation: ValidationPolicy::default(),
            state: Mutex::new(AuthState::Idle),
            attempt: AsyncMutex::new(()),
            restore_attempted: AtomicBool::new(false),
        }
    }

    /// Select how empty credential fields are reported.
    pub fn with_validation_policy(mut self, policy: ValidationPolicy) -> Self {
        self.validation = policy;
        self
    }

    /// Current observable state.
    pub fn state(&self) -> AuthState {
        self.state.lock().expect("auth state lock poisoned").clone()
    }

    fn set_state(&self, next: AuthState) {
        *self.state.lock().expect("auth state lock poisoned") = next;
    }

    /// Acquire the single-attempt guard, rejecting concurrent sign-ins.
    /// Does not touch the state machine: a rejected attempt must not clobber
    /// the one in flight.
    fn begin_attempt(&self) -> Result<MutexGuard<'_, ()>, AuthError> {
        self.attempt.try_lock().map_err(|_| AuthError::AttemptInFlight)
    }

    fn complete(&self, session: Session) -> Result<Session, AuthError> {
        tracing::info!(provider = ?session.provider(), "sign-in completed");
        self.set_state(AuthState::Completed(session.clone()));
        Ok(session)
    }

    fn fail(&self, err: AuthError) -> Result<Session, AuthError> {
        tracing::warn!(code = err.error_code(), "sign-in failed: {}", err);
        self.set_state(AuthState::Failed(err.clone()));
        Err(err)
    }

    /// Password login against the custom backend.
    ///
    /// Empty fields are reported before hashing or any network dispatch,
    /// per the configured [`ValidationPolicy`]. Offline fails before the
    /// backend is contacted.
    pub async fn login_with_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let _guard = self.begin_attempt()?;
        self.set_state(AuthState::Checking);

        if let Err(err) = self.validation.validate(username, password) {
            return self.fail(err);
        }

        if !self.connectivity.is_connected() {
            return self.fail(AuthError::Network(NetworkError::Offline));
        }

        self.set_state(AuthState::InFlight(Provider::Password));
        let digest = hash_password(password);
        match self.backend.login(username, &digest).await {
            Ok(ack) => {
                tracing::debug!("backend accepted credentials: {}", ack.message);
                let mut flags = self.flags.load();
                flags.password_logged = true;
                if !self.flags.save(&flags) {
                    return self.fail(AuthError::FlagsPersist {
                        message: format!("could not write {}", self.flags.path().display()),
                    });
                }
                self.complete(Session::signed_in(Provider::Password, username))
            }
            Err(err) => self.fail(err),
        }
    }

    /// Best-effort restore of a prior Google session, attempted at most once
    /// per orchestrator lifetime. No connectivity guard: the SDK handles its
    /// own reachability. Absence of a prior session is silent steady state.
    pub async fn restore_google_session(&self) -> Result<Option<Session>, AuthError> {
        if self.restore_attempted.swap(true, Ordering::SeqCst) {
            return Ok(None);
        }

        match self.google.restore_session().await {
            Ok(Some(identity)) => {
                let session =
                    Session::signed_in(Provider::Google, identity.display_label());
                tracing::info!("restored prior Google session");
                self.set_state(AuthState::Completed(session.clone()));
                Ok(Some(session))
            }
            Ok(None) => Ok(None),
            Err(failure) => {
                // Restore is opportunistic; a failed probe leaves us Idle.
                tracing::debug!("google session restore failed: {:?}", failure);
                Ok(None)
            }
        }
    }

    /// Interactive Google sign-in. No connectivity guard: the SDK handles
    /// its own reachability.
    pub async fn login_with_google(&self) -> Result<Session, AuthError> {
        let _guard = self.begin_attempt()?;
        self.set_state(AuthState::InFlight(Provider::Google));

        match self.google.sign_in().await {
            Ok(identity) => self.complete(Session::signed_in(
                Provider::Google,
                identity.display_label(),
            )),
            Err(failure) => self.fail(failure.into()),
        }
    }

    /// Interactive Apple sign-in via the native authorization UI. Gated on
    /// connectivity; the Apple user identifier is persisted on success so
    /// sign-out can scrub it later.
    pub async fn login_with_apple(&self) -> Result<Session, AuthError> {
        let _guard = self.begin_attempt()?;
        self.set_state(AuthState::Checking);

        if !self.connectivity.is_connected() {
            return self.fail(AuthError::Network(NetworkError::Offline));
        }

        self.set_state(AuthState::InFlight(Provider::Apple));
        match self.apple.sign_in().await {
            Ok(identity) => {
                let mut flags = self.flags.load();
                flags.apple_user_id = Some(identity.user_id.clone());
                if !self.flags.save(&flags) {
                    return self.fail(AuthError::FlagsPersist {
                        message: format!("could not write {}", self.flags.path().display()),
                    });
                }
                self.complete(Session::signed_in(Provider::Apple, identity.display_label()))
            }
            Err(failure) => self.fail(failure.into()),
        }
    }

    /// Sign out, clearing every provider's residue unconditionally: the
    /// durable flags file (password flag and Apple identifier) is removed
    /// and both federated SDKs are told to sign out, regardless of which
    /// provider produced the current session.
    pub async fn sign_out(&self) {
        let _guard = self.attempt.lock().await;

        if !self.flags.clear() {
            tracing::warn!("session flags file could not be removed on sign-out");
        }
        self.google.sign_out().await;
        self.apple.sign_out().await;

        tracing::info!("signed out, all provider residue cleared");
        self.set_state(AuthState::Idle);
    }
}
