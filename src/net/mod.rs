//! Network observation module for netpulse
//!
//! [`NetworkObserver`] is the consumer-facing facade: four independent
//! observe entry points, each returning a cold [`Observable`] backed by its
//! own adapter. Subscribing runs the adapter's OS registration (or probe
//! loop) fresh; cancelling the returned subscription releases it.

mod connectivity;
mod reachability;
mod scan;
mod signal_level;

pub mod backend;
pub mod probe;
pub mod sim;
pub mod types;

pub use reachability::ReachabilityPolicy;

use std::sync::Arc;

use crate::stream::Observable;

use backend::NetworkBackend;
use probe::{Probe, TcpProbe};
use types::{AccessPoint, ConnectivityStatus, WifiSignalLevel};

/// Entry point for observing a device's network state.
pub struct NetworkObserver {
    backend: Arc<dyn NetworkBackend>,
    probe: Arc<dyn Probe>,
    reachability: ReachabilityPolicy,
}

impl NetworkObserver {
    /// Observe through `backend`, probing reachability over TCP with the
    /// default policy.
    pub fn new(backend: Arc<dyn NetworkBackend>) -> Self {
        Self {
            backend,
            probe: Arc::new(TcpProbe::default()),
            reachability: ReachabilityPolicy::default(),
        }
    }

    pub fn with_probe(mut self, probe: Arc<dyn Probe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_reachability_policy(mut self, policy: ReachabilityPolicy) -> Self {
        self.reachability = policy;
        self
    }

    /// Link-layer connectivity class. Emits the true current state
    /// immediately on subscribe, then one snapshot per OS change.
    pub fn connectivity(&self) -> Observable<ConnectivityStatus> {
        connectivity::observe_connectivity(Arc::clone(&self.backend))
    }

    /// Public internet reachability, one bounded probe per tick.
    pub fn internet_reachability(&self) -> Observable<bool> {
        reachability::observe_internet(Arc::clone(&self.probe), self.reachability)
    }

    /// Bucketed WiFi signal strength, one level per RSSI change.
    pub fn wifi_signal_level(&self) -> Observable<WifiSignalLevel> {
        signal_level::observe_wifi_signal_level(Arc::clone(&self.backend))
    }

    /// Visible access points, one full snapshot per completed scan.
    pub fn access_points(&self) -> Observable<Vec<AccessPoint>> {
        scan::observe_access_points(Arc::clone(&self.backend))
    }
}
