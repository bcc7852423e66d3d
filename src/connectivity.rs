//! Network reachability monitoring.
//!
//! Wraps a platform path-observation primitive behind the [`PathSource`]
//! trait and keeps the last-observed reachability available to every other
//! component. The auth orchestrator and the image cache consult
//! [`ConnectivityMonitor::is_connected`] before attempting network work.
//!
//! The monitor only reflects what the platform reports; it never probes and
//! never retries. Reports arrive on a background task, so consumers that
//! touch UI state must hop back to their own context themselves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Coarse classification of the active network interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceKind {
    Wifi,
    Other,
}

/// A single reachability report from the platform path observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStatus {
    pub reachable: bool,
    pub interface: Option<InterfaceKind>,
}

impl PathStatus {
    pub fn offline() -> Self {
        Self { reachable: false, interface: None }
    }

    pub fn online(interface: InterfaceKind) -> Self {
        Self { reachable: true, interface: Some(interface) }
    }
}

/// Source of asynchronous path reports. The embedding application adapts the
/// platform facility (NWPathMonitor, netlink, ...) to this trait.
#[async_trait]
pub trait PathSource: Send + 'static {
    /// Next report, or `None` when the source is exhausted.
    async fn next_status(&mut self) -> Option<PathStatus>;
}

/// Channel-backed source, used by tests and by adapters that already push
/// reports through a channel.
#[async_trait]
impl PathSource for mpsc::Receiver<PathStatus> {
    async fn next_status(&mut self) -> Option<PathStatus> {
        self.recv().await
    }
}

#[derive(Debug)]
struct MonitorShared {
    reachable: AtomicBool,
    interface: Mutex<Option<InterfaceKind>>,
    tx: watch::Sender<PathStatus>,
}

/// Process-wide reachability state fed by one observer task.
///
/// `start` and `stop` are idempotent: a second `start` while the observer is
/// running is a no-op, and `stop` without a running observer does nothing.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    shared: Arc<MonitorShared>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(PathStatus::offline());
        Self {
            shared: Arc::new(MonitorShared {
                reachable: AtomicBool::new(false),
                interface: Mutex::new(None),
                tx,
            }),
            task: Mutex::new(None),
        }
    }

    /// Begin observing path changes from `source`.
    ///
    /// Returns `true` if an observer was started, `false` if one is already
    /// running (in which case `source` is dropped unused).
    pub fn start(&self, mut source: impl PathSource) -> bool {
        let mut slot = self.task.lock().expect("monitor task lock poisoned");
        if let Some(handle) = slot.as_ref() {
            if !handle.is_finished() {
                tracing::debug!("connectivity monitor already running, start ignored");
                return false;
            }
        }

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            while let Some(status) = source.next_status().await {
                shared.reachable.store(status.reachable, Ordering::SeqCst);
                *shared.interface.lock().expect("interface lock poisoned") = status.interface;
                // Every report is forwarded, duplicates included; consumers
                // must tolerate "still connected" repeats.
                shared.tx.send_replace(status);
            }
            tracing::debug!("connectivity path source exhausted");
        });
        *slot = Some(handle);
        true
    }

    /// Cancel observation. Safe to call when not running.
    pub fn stop(&self) {
        let mut slot = self.task.lock().expect("monitor task lock poisoned");
        if let Some(handle) = slot.take() {
            handle.abort();
            self.shared.reachable.store(false, Ordering::SeqCst);
            *self.shared.interface.lock().expect("interface lock poisoned") = None;
            tracing::debug!("connectivity monitor stopped");
        }
    }

    /// Whether an observer task is currently running.
    pub fn is_monitoring(&self) -> bool {
        self.task
            .lock()
            .expect("monitor task lock poisoned")
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Last observed reachability; `false` before the first report.
    pub fn is_connected(&self) -> bool {
        self.shared.reachable.load(Ordering::SeqCst)
    }

    /// Last observed interface classification, if any.
    pub fn interface(&self) -> Option<InterfaceKind> {
        *self.shared.interface.lock().expect("interface lock poisoned")
    }

    /// Subscribe to path reports. The receiver is notified on every report
    /// the observer forwards, not only on edge transitions.
    pub fn subscribe(&self) -> watch::Receiver<PathStatus> {
        self.shared.tx.subscribe()
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.task.lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}
