//! Barman core - the stateful heart of the Barman drinks client
//!
//! This library exposes the pieces of the app that carry real state and
//! failure semantics. The embedding UI layer calls into these and renders
//! whatever comes back:
//!
//! - [`connectivity`] - reachability monitoring consulted before any network work
//! - [`auth`] - sign-in orchestration across Google, Apple, and the password backend
//! - [`store`] - bundled seed + on-device overlay persistence for drink records
//! - [`images`] - local-first image resolution with a connectivity-gated fetch
//! - [`deeplink`] - synthesizing a drink from an `app://open` URL
//! - [`error`] - the unified error taxonomy surfaced to users

pub mod auth;
pub mod config;
pub mod connectivity;
pub mod deeplink;
pub mod error;
pub mod images;
pub mod models;
pub mod store;

pub use auth::{AuthOrchestrator, AuthState, Provider, Session, ValidationPolicy};
pub use config::Config;
pub use connectivity::{ConnectivityMonitor, InterfaceKind, PathStatus};
pub use error::BarmanError;
pub use images::ImageCache;
pub use models::{Drink, DrinkId};
pub use store::DrinkStore;
