//! Drink image resolution: local cache first, network fallback second.
//!
//! Resolution order for a record's image key:
//! 1. a file named after the key in the data directory → decode and return,
//!    never touching the network
//! 2. otherwise, if the connectivity monitor reports a path, fetch
//!    `{image base}/{key}`, decode, persist a copy under the key, return
//! 3. otherwise fail with an offline error the UI maps to a settings
//!    affordance
//!
//! Fetches are single-attempt. Concurrent requests for the same key are not
//! deduplicated; the cache write is idempotent, so racing fetches at worst
//! write the same bytes twice.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use image::DynamicImage;
use reqwest::Client;

use crate::config::Config;
use crate::connectivity::ConnectivityMonitor;
use crate::error::{classify_reqwest_error, ImageError, NetworkError};
use crate::models::Drink;

/// Resolves drink images through the local cache with a gated remote fetch.
pub struct ImageCache {
    cache_dir: PathBuf,
    base_url: String,
    client: Client,
    connectivity: Arc<ConnectivityMonitor>,
}

impl ImageCache {
    pub fn new(config: &Config, connectivity: Arc<ConnectivityMonitor>) -> Self {
        Self {
            cache_dir: config.data_dir.clone(),
            base_url: config.image_base_url.clone(),
            client: Client::new(),
            connectivity,
        }
    }

    /// On-device path a key is cached under.
    pub fn local_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(key)
    }

    /// Resolve the image for `drink`.
    pub async fn image_for(&self, drink: &Drink) -> Result<DynamicImage, ImageError> {
        if !drink.has_image() {
            return Err(ImageError::MissingKey);
        }
        let key = drink.img.as_str();

        let local = self.local_path(key);
        if local.exists() {
            tracing::debug!(%key, "image cache hit");
            let bytes = fs::read(&local).map_err(|e| ImageError::Io {
                key: key.to_string(),
                message: e.to_string(),
            })?;
            return image::load_from_memory(&bytes).map_err(|e| ImageError::Decode {
                key: key.to_string(),
                message: e.to_string(),
            });
        }

        if !self.connectivity.is_connected() {
            tracing::debug!(%key, "image cache miss while offline");
            return Err(ImageError::Offline { key: key.to_string() });
        }

        self.fetch_and_cache(key).await
    }

    async fn fetch_and_cache(&self, key: &str) -> Result<DynamicImage, ImageError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), key);
        tracing::debug!(%key, %url, "fetching image");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ImageError::Network(classify_reqwest_error(&e, &url)))?;

        if !response.status().is_success() {
            return Err(ImageError::Network(NetworkError::HttpStatus {
                status: response.status().as_u16(),
                message: format!("image fetch for '{}'", key),
            }));
        }

        let bytes = response.bytes().await.map_err(|e| {
            ImageError::Network(NetworkError::InvalidResponse { message: e.to_string() })
        })?;

        let decoded = image::load_from_memory(&bytes).map_err(|e| ImageError::Decode {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        // Best-effort persist: a failed write costs a refetch next time, the
        // decoded image is still returned.
        if let Err(err) = self.write_cache(key, &bytes) {
            tracing::warn!(%key, "could not cache image: {}", err);
        }

        Ok(decoded)
    }

    fn write_cache(&self, key: &str, bytes: &[u8]) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)?;
        fs::write(self.local_path(key), bytes)
    }
}
