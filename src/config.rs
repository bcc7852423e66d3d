//! Library configuration: base URLs and on-device storage locations.
//!
//! The embedding application normally builds a [`Config`] once at startup and
//! hands it to the components that need it. Defaults point at the production
//! backend; everything is overridable for staging and tests.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default base URL for the custom login backend.
pub const BACKEND_BASE_URL: &str = "https://barmanapp.example.com";

/// Default base URL that drink image keys are resolved against.
pub const IMAGE_BASE_URL: &str = "https://barmanapp.example.com/images";

/// File name of the mutable overlay written to the data directory.
pub const OVERLAY_FILE: &str = "drinks.json";

/// Runtime configuration for the core components.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Base URL for the password login backend.
    pub backend_base_url: String,
    /// Base URL prefix for remote drink images.
    pub image_base_url: String,
    /// Path to the read-only bundled seed file (JSON array of drinks).
    pub seed_path: PathBuf,
    /// Directory for all mutable on-device state: the drinks overlay,
    /// session flags, and cached images.
    pub data_dir: PathBuf,
}

impl Config {
    /// Build a config for the given seed file, with production URLs and the
    /// platform data directory.
    pub fn new(seed_path: impl Into<PathBuf>) -> Self {
        Self {
            backend_base_url: BACKEND_BASE_URL.to_string(),
            image_base_url: IMAGE_BASE_URL.to_string(),
            seed_path: seed_path.into(),
            data_dir: default_data_dir(),
        }
    }

    /// Override the backend base URL.
    pub fn with_backend_base_url(mut self, url: impl Into<String>) -> Self {
        self.backend_base_url = url.into();
        self
    }

    /// Override the image base URL.
    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into();
        self
    }

    /// Override the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Path of the mutable drinks overlay inside the data directory.
    pub fn overlay_path(&self) -> PathBuf {
        self.data_dir.join(OVERLAY_FILE)
    }
}

/// Per-user data directory, falling back to the current directory when the
/// platform does not report one.
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("barman"))
        .unwrap_or_else(|| PathBuf::from("barman-data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("seed/drinks.json");
        assert_eq!(config.backend_base_url, BACKEND_BASE_URL);
        assert_eq!(config.image_base_url, IMAGE_BASE_URL);
        assert_eq!(config.seed_path, PathBuf::from("seed/drinks.json"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::new("seed.json")
            .with_backend_base_url("http://localhost:9000")
            .with_image_base_url("http://localhost:9000/img")
            .with_data_dir("/tmp/barman-test");

        assert_eq!(config.backend_base_url, "http://localhost:9000");
        assert_eq!(config.image_base_url, "http://localhost:9000/img");
        assert_eq!(config.overlay_path(), PathBuf::from("/tmp/barman-test/drinks.json"));
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = Config::new("seed.json").with_data_dir("/tmp/x");
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
