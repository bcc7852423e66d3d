//! Session state and its durable residue.
//!
//! The in-memory truth is the [`Session`] sum type owned by the
//! orchestrator: exactly one provider is authoritative at a time. What must
//! survive a restart is much smaller and lives in [`SessionFlags`], a JSON
//! file in the data directory: the password-login flag and the Apple user
//! identifier. Sign-out clears all of it unconditionally, without assuming
//! the caller remembers which provider was active.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The session flags file name inside the data directory.
const FLAGS_FILE: &str = "session.json";

/// Identity provider that produced a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    Google,
    Apple,
    Password,
}

/// Authoritative session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Session {
    SignedOut,
    SignedIn {
        provider: Provider,
        /// Display label for the signed-in user (email, name, or id).
        user: String,
        signed_in_at: DateTime<Utc>,
    },
}

impl Session {
    /// Build a fresh signed-in session stamped with the current time.
    pub fn signed_in(provider: Provider, user: impl Into<String>) -> Self {
        Session::SignedIn {
            provider,
            user: user.into(),
            signed_in_at: Utc::now(),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Session::SignedIn { .. })
    }

    /// The provider backing the session, if any.
    pub fn provider(&self) -> Option<Provider> {
        match self {
            Session::SignedOut => None,
            Session::SignedIn { provider, .. } => Some(*provider),
        }
    }
}

/// Durable sign-in residue persisted across launches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionFlags {
    /// Set after a successful password login.
    #[serde(default)]
    pub password_logged: bool,
    /// Apple-scoped user identifier from the last Apple sign-in.
    #[serde(default)]
    pub apple_user_id: Option<String>,
}

impl SessionFlags {
    /// Whether any provider left durable residue behind.
    pub fn any_set(&self) -> bool {
        self.password_logged || self.apple_user_id.is_some()
    }
}

/// Manages the session flags file.
#[derive(Debug)]
pub struct SessionFlagsStore {
    path: PathBuf,
}

impl SessionFlagsStore {
    /// Store the flags file inside `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { path: data_dir.into().join(FLAGS_FILE) }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the flags, returning defaults if the file is missing or
    /// unreadable.
    pub fn load(&self) -> SessionFlags {
        if !self.path.exists() {
            return SessionFlags::default();
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return SessionFlags::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(flags) => flags,
            Err(_) => SessionFlags::default(),
        }
    }

    /// Save the flags, creating the parent directory if needed.
    /// Returns `true` on success.
    pub fn save(&self, flags: &SessionFlags) -> bool {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }

        let file = match File::create(&self.path) {
            Ok(f) => f,
            Err(_) => return false,
        };

        let mut writer = BufWriter::new(file);
        if serde_json::to_writer_pretty(&mut writer, flags).is_err() {
            return false;
        }

        writer.flush().is_ok()
    }

    /// Remove the flags file. Returns `true` if it is gone afterwards.
    pub fn clear(&self) -> bool {
        if !self.path.exists() {
            return true;
        }

        fs::remove_file(&self.path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_session_defaults() {
        let session = Session::SignedOut;
        assert!(!session.is_signed_in());
        assert!(session.provider().is_none());
    }

    #[test]
    fn test_signed_in_session() {
        let session = Session::signed_in(Provider::Password, "ada@example.com");
        assert!(session.is_signed_in());
        assert_eq!(session.provider(), Some(Provider::Password));
    }

    #[test]
    fn test_flags_default_empty() {
        let flags = SessionFlags::default();
        assert!(!flags.any_set());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let dir = TempDir::new().unwrap();
        let store = SessionFlagsStore::new(dir.path());
        assert_eq!(store.load(), SessionFlags::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = SessionFlagsStore::new(dir.path().join("barman"));

        let flags = SessionFlags {
            password_logged: true,
            apple_user_id: Some("apple-uid-42".to_string()),
        };
        assert!(store.save(&flags));
        assert_eq!(store.load(), flags);
    }

    #[test]
    fn test_save_creates_parent_dir() {
        let dir = TempDir::new().unwrap();
        let store = SessionFlagsStore::new(dir.path().join("nested").join("deeper"));

        assert!(!store.path().parent().unwrap().exists());
        assert!(store.save(&SessionFlags { password_logged: true, apple_user_id: None }));
        assert!(store.path().exists());
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let store = SessionFlagsStore::new(dir.path());

        store.save(&SessionFlags { password_logged: true, apple_user_id: None });
        assert!(store.path().exists());

        assert!(store.clear());
        assert!(!store.path().exists());
        assert_eq!(store.load(), SessionFlags::default());
    }

    #[test]
    fn test_clear_nonexistent_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = SessionFlagsStore::new(dir.path());
        assert!(store.clear());
    }

    #[test]
    fn test_load_invalid_json_returns_default() {
        let dir = TempDir::new().unwrap();
        let store = SessionFlagsStore::new(dir.path());

        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not valid json").unwrap();

        assert_eq!(store.load(), SessionFlags::default());
    }
}
