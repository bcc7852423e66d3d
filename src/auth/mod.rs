//! Authentication module for the Barman core.
//!
//! This module unifies three heterogeneous sign-in flows behind one
//! session-result contract:
//! - Google sign-in (federated, restores a prior session on launch)
//! - Apple sign-in (federated, native authorization UI)
//! - Password login against the custom backend
//!
//! The [`AuthOrchestrator`] owns the state machine and consults the
//! connectivity monitor before any network-dependent flow.

pub mod backend;
pub mod hasher;
pub mod orchestrator;
pub mod providers;
pub mod session;

pub use backend::{BackendAuthClient, LoginAck};
pub use hasher::hash_password;
pub use orchestrator::{AuthOrchestrator, AuthState, ValidationPolicy};
pub use providers::{FederatedIdentity, FederatedProvider, ProviderFailure};
pub use session::{Provider, Session, SessionFlags, SessionFlagsStore};
