//! OS network facade.
//!
//! The core never talks to an operating system directly. Everything it needs
//! is behind [`NetworkBackend`]: snapshot reads plus notification
//! registrations that push unit marks ("something changed, re-read") into a
//! channel. The real facility on a given platform implements this trait; the
//! scripted [`SimBackend`](super::sim::SimBackend) implements it for tests
//! and the demo.

use tokio::sync::mpsc::UnboundedSender;

use crate::error::BackendResult;

use super::types::{AccessPoint, ConnectivityStatus};

/// Guard for one OS-level notification registration.
///
/// Dropping the guard releases the registration. Release is idempotent on
/// the backend side and happens exactly once per guard; after it, no further
/// marks are pushed into the channel the registration was created with.
pub trait Registration: Send {}

/// A change mark: the watched dimension changed, re-read its state.
pub type ChangeMark = ();

pub trait NetworkBackend: Send + Sync + 'static {
    /// Snapshot of the current link state.
    fn link_status(&self) -> BackendResult<ConnectivityStatus>;

    /// Register for link-state change marks.
    fn watch_link(&self, marks: UnboundedSender<ChangeMark>)
    -> BackendResult<Box<dyn Registration>>;

    /// Latest RSSI reading in dBm; `None` when not associated.
    fn wifi_rssi(&self) -> BackendResult<Option<i32>>;

    /// Register for RSSI change marks.
    fn watch_wifi_rssi(
        &self,
        marks: UnboundedSender<ChangeMark>,
    ) -> BackendResult<Box<dyn Registration>>;

    /// Results of the most recently completed scan.
    fn scan_results(&self) -> BackendResult<Vec<AccessPoint>>;

    /// Register for scan-completion marks.
    fn watch_scans(
        &self,
        marks: UnboundedSender<ChangeMark>,
    ) -> BackendResult<Box<dyn Registration>>;

    /// Ask the OS to start a fresh scan; completion arrives as a scan mark.
    fn request_scan(&self) -> BackendResult<()>;
}
