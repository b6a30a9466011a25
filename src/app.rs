use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use netpulse::{
    AccessPoint, ConnectivityStatus, ConsumerHandle, NetworkObserver, StreamError,
    SubscriptionSet, WifiSignalLevel, display_signal,
};

/// One delivered value, forwarded from the subscriber callbacks into the
/// frame loop's update channel.
#[derive(Debug)]
pub enum Update {
    Connectivity(ConnectivityStatus),
    Internet(bool),
    Signal(WifiSignalLevel),
    AccessPoints(Vec<AccessPoint>),
    StreamError(StreamError),
}

#[derive(Debug)]
pub struct AppState {
    pub connectivity: ConnectivityStatus,
    pub internet: Option<bool>,
    pub last_signal: WifiSignalLevel,
    pub access_points: Vec<AccessPoint>,
    pub observing: bool,
    pub last_error: Option<String>,
    pub events_seen: u64,
}

impl AppState {
    pub fn new() -> AppState {
        AppState {
            connectivity: ConnectivityStatus::Unknown,
            internet: None,
            // No reading yet; the display rule starts from "no signal".
            last_signal: WifiSignalLevel::NoSignal,
            access_points: Vec::new(),
            observing: false,
            last_error: None,
            events_seen: 0,
        }
    }

    pub fn apply(&mut self, update: Update) {
        self.events_seen += 1;
        match update {
            Update::Connectivity(status) => self.connectivity = status,
            Update::Internet(reachable) => self.internet = Some(reachable),
            Update::Signal(level) => self.last_signal = level,
            Update::AccessPoints(access_points) => self.access_points = access_points,
            Update::StreamError(error) => self.last_error = Some(error.to_string()),
        }
    }

    /// Signal level as shown on screen, with the cross-stream rule applied.
    pub fn shown_signal(&self) -> WifiSignalLevel {
        display_signal(self.connectivity, self.last_signal)
    }
}

/// Owns the four subscriptions for the lifetime of one "observing" phase,
/// the way a lifecycle-bound controller would across resume/pause.
pub struct ObservationController {
    observer: NetworkObserver,
    subs: SubscriptionSet,
    consumer: ConsumerHandle,
    updates: UnboundedSender<Update>,
}

impl ObservationController {
    pub fn new(
        observer: NetworkObserver,
        consumer: ConsumerHandle,
        updates: UnboundedSender<Update>,
    ) -> Self {
        Self {
            observer,
            subs: SubscriptionSet::new(),
            consumer,
            updates,
        }
    }

    /// Subscribe to all four streams. Starting while already active replaces
    /// the previous registrations instead of accumulating duplicates.
    pub fn start(&mut self) {
        if !self.subs.is_empty() {
            self.subs.stop_all();
        }
        let workers = Handle::current();

        let tx = self.updates.clone();
        let err = self.updates.clone();
        self.subs.insert(self.observer.connectivity().subscribe(
            &workers,
            &self.consumer,
            move |status| {
                let _ = tx.send(Update::Connectivity(status));
            },
            move |e| {
                let _ = err.send(Update::StreamError(e));
            },
        ));

        let tx = self.updates.clone();
        let err = self.updates.clone();
        self.subs.insert(self.observer.internet_reachability().subscribe(
            &workers,
            &self.consumer,
            move |reachable| {
                let _ = tx.send(Update::Internet(reachable));
            },
            move |e| {
                let _ = err.send(Update::StreamError(e));
            },
        ));

        let tx = self.updates.clone();
        let err = self.updates.clone();
        self.subs.insert(self.observer.wifi_signal_level().subscribe(
            &workers,
            &self.consumer,
            move |level| {
                let _ = tx.send(Update::Signal(level));
            },
            move |e| {
                let _ = err.send(Update::StreamError(e));
            },
        ));

        let tx = self.updates.clone();
        let err = self.updates.clone();
        self.subs.insert(self.observer.access_points().subscribe(
            &workers,
            &self.consumer,
            move |access_points| {
                let _ = tx.send(Update::AccessPoints(access_points));
            },
            move |e| {
                let _ = err.send(Update::StreamError(e));
            },
        ));
    }

    /// Cancel everything. Idempotent; fine to call when nothing is active.
    pub fn stop(&mut self) {
        self.subs.stop_all();
    }

    pub fn is_observing(&self) -> bool {
        !self.subs.is_empty()
    }
}
