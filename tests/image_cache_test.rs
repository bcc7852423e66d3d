//! Integration tests for image resolution.
//!
//! These verify the cache-or-fetch decision against a mock image host:
//! - a locally cached key never triggers a network fetch
//! - a miss while online fetches once and persists a copy for the next call
//! - remote failures surface as network errors, not decode errors

use std::fs;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tempfile::TempDir;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use barman_core::config::Config;
use barman_core::connectivity::{ConnectivityMonitor, InterfaceKind, PathStatus};
use barman_core::error::ImageError;
use barman_core::images::ImageCache;
use barman_core::models::Drink;

/// A valid 1x1 PNG.
const PNG_1X1: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

fn png_bytes() -> Vec<u8> {
    STANDARD.decode(PNG_1X1).unwrap()
}

async fn online_monitor() -> (Arc<ConnectivityMonitor>, mpsc::Sender<PathStatus>) {
    let monitor = Arc::new(ConnectivityMonitor::new());
    let (tx, rx) = mpsc::channel(4);
    monitor.start(rx);

    let mut sub = monitor.subscribe();
    tx.send(PathStatus::online(InterfaceKind::Wifi)).await.unwrap();
    sub.changed().await.unwrap();

    (monitor, tx)
}

fn cache_for(server: &MockServer, dir: &TempDir, monitor: Arc<ConnectivityMonitor>) -> ImageCache {
    let config = Config::new("seed.json")
        .with_image_base_url(server.uri())
        .with_data_dir(dir.path());
    ImageCache::new(&config, monitor)
}

#[tokio::test]
async fn test_local_hit_never_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("m.png"), png_bytes()).unwrap();

    // Even online, the cached file must win.
    let (monitor, _tx) = online_monitor().await;
    let cache = cache_for(&server, &dir, monitor);

    let drink = Drink::new("Mojito", "m.png", "rum", "shake");
    let img = cache.image_for(&drink).await.unwrap();
    assert_eq!(img.width(), 1);
    assert_eq!(img.height(), 1);
}

#[tokio::test]
async fn test_miss_fetches_once_and_persists_a_copy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/m.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let (monitor, _tx) = online_monitor().await;
    let cache = cache_for(&server, &dir, monitor);

    let drink = Drink::new("Mojito", "m.png", "rum", "shake");
    cache.image_for(&drink).await.unwrap();

    // The copy landed under the key...
    assert_eq!(fs::read(dir.path().join("m.png")).unwrap(), png_bytes());

    // ...so the second resolution is served locally (mock expects one GET).
    cache.image_for(&drink).await.unwrap();
}

#[tokio::test]
async fn test_remote_404_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let (monitor, _tx) = online_monitor().await;
    let cache = cache_for(&server, &dir, monitor);

    let drink = Drink::new("Lost", "gone.png", "?", "?");
    let err = cache.image_for(&drink).await.unwrap_err();
    assert!(matches!(err, ImageError::Network(_)));
    // And nothing was cached for the failed key.
    assert!(!dir.path().join("gone.png").exists());
}

#[tokio::test]
async fn test_corrupt_remote_bytes_are_a_decode_error_and_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bad.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not an image".to_vec()))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let (monitor, _tx) = online_monitor().await;
    let cache = cache_for(&server, &dir, monitor);

    let drink = Drink::new("Broken", "bad.png", "?", "?");
    let err = cache.image_for(&drink).await.unwrap_err();
    assert!(matches!(err, ImageError::Decode { .. }));
    assert!(!dir.path().join("bad.png").exists());
}
