//! Scripted in-process backend.
//!
//! Stands in for a real OS facility in the demo binary and in tests: state
//! is mutated through the driver methods ([`set_link`], [`set_rssi`],
//! [`complete_scan`]) and every mutation pushes a change mark to the
//! registered watchers, exactly like a platform notification would.
//!
//! [`set_link`]: SimBackend::set_link
//! [`set_rssi`]: SimBackend::set_rssi
//! [`complete_scan`]: SimBackend::complete_scan

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc::UnboundedSender;

use crate::error::{BackendError, BackendResult};

use super::backend::{ChangeMark, NetworkBackend, Registration};
use super::types::{AccessPoint, ConnectivityStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    Link,
    Rssi,
    Scan,
}

type Watcher = (u64, UnboundedSender<ChangeMark>);

#[derive(Debug, Default)]
struct SimState {
    link: ConnectivityStatus,
    rssi: Option<i32>,
    scan: Vec<AccessPoint>,
    deny_registrations: bool,
    fail_link_reads: bool,
    scan_requests: usize,
    next_watcher_id: u64,
    link_watchers: Vec<Watcher>,
    rssi_watchers: Vec<Watcher>,
    scan_watchers: Vec<Watcher>,
}

impl SimState {
    fn watchers_mut(&mut self, dimension: Dimension) -> &mut Vec<Watcher> {
        match dimension {
            Dimension::Link => &mut self.link_watchers,
            Dimension::Rssi => &mut self.rssi_watchers,
            Dimension::Scan => &mut self.scan_watchers,
        }
    }

    fn notify(&mut self, dimension: Dimension) {
        for (_, tx) in self.watchers_mut(dimension).iter() {
            let _ = tx.send(());
        }
    }
}

/// Deterministic [`NetworkBackend`] driven from test or demo code.
/// Clones share state, so a driver handle can outlive the facade's copy.
#[derive(Debug, Clone, Default)]
pub struct SimBackend {
    state: Arc<Mutex<SimState>>,
}

impl SimBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().expect("sim state lock poisoned")
    }

    /// Change the link state and mark every link watcher.
    pub fn set_link(&self, status: ConnectivityStatus) {
        let mut state = self.lock();
        state.link = status;
        state.notify(Dimension::Link);
    }

    /// Change the RSSI reading and mark every RSSI watcher.
    pub fn set_rssi(&self, rssi_dbm: Option<i32>) {
        let mut state = self.lock();
        state.rssi = rssi_dbm;
        state.notify(Dimension::Rssi);
    }

    /// Complete a scan: replace the snapshot and mark every scan watcher.
    pub fn complete_scan(&self, access_points: Vec<AccessPoint>) {
        let mut state = self.lock();
        state.scan = access_points;
        state.notify(Dimension::Scan);
    }

    /// Make every subsequent registration attempt fail, as a denied
    /// permission would.
    pub fn deny_registrations(&self, deny: bool) {
        self.lock().deny_registrations = deny;
    }

    /// Make every subsequent link-state read fail, as a mid-stream OS fault
    /// would.
    pub fn fail_link_reads(&self, fail: bool) {
        self.lock().fail_link_reads = fail;
    }

    pub fn live_link_watchers(&self) -> usize {
        self.lock().link_watchers.len()
    }

    pub fn live_rssi_watchers(&self) -> usize {
        self.lock().rssi_watchers.len()
    }

    pub fn live_scan_watchers(&self) -> usize {
        self.lock().scan_watchers.len()
    }

    pub fn scan_requests(&self) -> usize {
        self.lock().scan_requests
    }

    fn register(
        &self,
        dimension: Dimension,
        marks: UnboundedSender<ChangeMark>,
    ) -> BackendResult<Box<dyn Registration>> {
        let mut state = self.lock();
        if state.deny_registrations {
            return Err(BackendError::PermissionDenied(
                "simulated denial".to_string(),
            ));
        }
        let id = state.next_watcher_id;
        state.next_watcher_id += 1;
        state.watchers_mut(dimension).push((id, marks));
        Ok(Box::new(SimRegistration {
            state: Arc::clone(&self.state),
            dimension,
            id,
        }))
    }
}

impl NetworkBackend for SimBackend {
    fn link_status(&self) -> BackendResult<ConnectivityStatus> {
        let state = self.lock();
        if state.fail_link_reads {
            return Err(BackendError::LinkReadFailed("simulated fault".to_string()));
        }
        Ok(state.link)
    }

    fn watch_link(
        &self,
        marks: UnboundedSender<ChangeMark>,
    ) -> BackendResult<Box<dyn Registration>> {
        self.register(Dimension::Link, marks)
    }

    fn wifi_rssi(&self) -> BackendResult<Option<i32>> {
        Ok(self.lock().rssi)
    }

    fn watch_wifi_rssi(
        &self,
        marks: UnboundedSender<ChangeMark>,
    ) -> BackendResult<Box<dyn Registration>> {
        self.register(Dimension::Rssi, marks)
    }

    fn scan_results(&self) -> BackendResult<Vec<AccessPoint>> {
        Ok(self.lock().scan.clone())
    }

    fn watch_scans(
        &self,
        marks: UnboundedSender<ChangeMark>,
    ) -> BackendResult<Box<dyn Registration>> {
        self.register(Dimension::Scan, marks)
    }

    fn request_scan(&self) -> BackendResult<()> {
        self.lock().scan_requests += 1;
        Ok(())
    }
}

/// Watcher entry guard; removal on drop is the simulated unregistration.
#[derive(Debug)]
struct SimRegistration {
    state: Arc<Mutex<SimState>>,
    dimension: Dimension,
    id: u64,
}

impl Registration for SimRegistration {}

impl Drop for SimRegistration {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state
                .watchers_mut(self.dimension)
                .retain(|(id, _)| *id != self.id);
        }
    }
}
