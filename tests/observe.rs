//! End-to-end tests over the scripted backend: subscription lifecycle,
//! delivery/cancellation semantics and the per-adapter contracts.

use std::future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time;

use netpulse::net::probe::Probe;
use netpulse::net::sim::SimBackend;
use netpulse::{
    AccessPoint, BackendError, ConnectivityStatus, ConsumerHandle, NetworkObserver, Observable,
    ReachabilityPolicy, StreamError, Subscription, SubscriptionSet, WifiSignalLevel,
    consumer_queue,
};

struct FixedProbe(bool);

#[async_trait]
impl Probe for FixedProbe {
    async fn check(&self) -> bool {
        self.0
    }
}

/// Never answers; only the adapter's timeout can end a check.
struct StalledProbe;

#[async_trait]
impl Probe for StalledProbe {
    async fn check(&self) -> bool {
        future::pending().await
    }
}

fn start_consumer() -> ConsumerHandle {
    let (handle, consumer) = consumer_queue();
    tokio::spawn(consumer.run());
    handle
}

fn subscribe_into<T: Send + 'static>(
    observable: &Observable<T>,
    consumer: &ConsumerHandle,
) -> (
    Subscription,
    UnboundedReceiver<T>,
    UnboundedReceiver<StreamError>,
) {
    let (values_tx, values_rx) = mpsc::unbounded_channel();
    let (errors_tx, errors_rx) = mpsc::unbounded_channel();
    let subscription = observable.subscribe(
        &Handle::current(),
        consumer,
        move |value| {
            let _ = values_tx.send(value);
        },
        move |error| {
            let _ = errors_tx.send(error);
        },
    );
    (subscription, values_rx, errors_rx)
}

async fn recv<T>(rx: &mut UnboundedReceiver<T>) -> T {
    time::timeout(Duration::from_secs(10), rx.recv())
        .await
        .expect("timed out waiting for a delivery")
        .expect("stream side dropped")
}

async fn expect_silence<T: std::fmt::Debug>(rx: &mut UnboundedReceiver<T>) {
    if let Ok(Some(value)) = time::timeout(Duration::from_millis(200), rx.recv()).await {
        panic!("unexpected delivery: {value:?}");
    }
}

async fn eventually(mut condition: impl FnMut() -> bool, what: &str) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition never reached: {what}");
}

fn access_point(ssid: &str) -> AccessPoint {
    AccessPoint {
        ssid: ssid.to_string(),
        rssi_dbm: -60,
        frequency_mhz: 2412,
    }
}

#[tokio::test]
async fn connectivity_emits_current_state_on_subscribe() {
    let sim = SimBackend::new();
    sim.set_link(ConnectivityStatus::WifiConnected);
    let observer = NetworkObserver::new(Arc::new(sim));
    let consumer = start_consumer();

    let (_sub, mut values, _errors) = subscribe_into(&observer.connectivity(), &consumer);
    assert_eq!(recv(&mut values).await, ConnectivityStatus::WifiConnected);
}

#[tokio::test]
async fn connectivity_follows_change_marks() {
    let sim = SimBackend::new();
    sim.set_link(ConnectivityStatus::WifiConnected);
    let observer = NetworkObserver::new(Arc::new(sim.clone()));
    let consumer = start_consumer();

    let (_sub, mut values, _errors) = subscribe_into(&observer.connectivity(), &consumer);
    assert_eq!(recv(&mut values).await, ConnectivityStatus::WifiConnected);

    sim.set_link(ConnectivityStatus::Offline);
    assert_eq!(recv(&mut values).await, ConnectivityStatus::Offline);

    sim.set_link(ConnectivityStatus::MobileConnected);
    assert_eq!(recv(&mut values).await, ConnectivityStatus::MobileConnected);
}

#[tokio::test]
async fn no_delivery_after_stop_all() {
    let sim = SimBackend::new();
    let observer = NetworkObserver::new(Arc::new(sim.clone()));
    let consumer = start_consumer();

    let mut registry = SubscriptionSet::new();
    let (sub, mut values, _errors) = subscribe_into(&observer.connectivity(), &consumer);
    registry.insert(sub);
    recv(&mut values).await;

    registry.stop_all();
    registry.stop_all();
    assert!(registry.is_empty());

    // Teardown released the backend registration.
    eventually(|| sim.live_link_watchers() == 0, "link watcher released").await;

    sim.set_link(ConnectivityStatus::Offline);
    expect_silence(&mut values).await;
}

#[tokio::test]
async fn cancel_is_idempotent() {
    let sim = SimBackend::new();
    let observer = NetworkObserver::new(Arc::new(sim.clone()));
    let consumer = start_consumer();

    let (sub, mut values, _errors) = subscribe_into(&observer.connectivity(), &consumer);
    recv(&mut values).await;

    sub.cancel();
    assert!(sub.is_cancelled());
    sub.cancel();
    assert!(sub.is_cancelled());

    eventually(|| sub.is_finished(), "producer wound down").await;
}

#[tokio::test]
async fn independent_subscriptions_have_independent_registrations() {
    let sim = SimBackend::new();
    sim.set_link(ConnectivityStatus::WifiConnected);
    let observer = NetworkObserver::new(Arc::new(sim.clone()));
    let consumer = start_consumer();

    let stream = observer.connectivity();
    let (sub_a, mut values_a, _errors_a) = subscribe_into(&stream, &consumer);
    let (_sub_b, mut values_b, _errors_b) = subscribe_into(&stream, &consumer);
    recv(&mut values_a).await;
    recv(&mut values_b).await;
    assert_eq!(sim.live_link_watchers(), 2);

    sub_a.cancel();
    eventually(|| sim.live_link_watchers() == 1, "cancelled watcher released").await;

    sim.set_link(ConnectivityStatus::Offline);
    assert_eq!(recv(&mut values_b).await, ConnectivityStatus::Offline);
    expect_silence(&mut values_a).await;
}

#[tokio::test]
async fn registration_denial_surfaces_on_the_error_channel() {
    let sim = SimBackend::new();
    sim.deny_registrations(true);
    let observer = NetworkObserver::new(Arc::new(sim));
    let consumer = start_consumer();

    let (_sub, mut values, mut errors) = subscribe_into(&observer.connectivity(), &consumer);
    match recv(&mut errors).await {
        StreamError::Registration(BackendError::PermissionDenied(_)) => {}
        other => panic!("expected a registration error, got {other:?}"),
    }
    expect_silence(&mut values).await;
}

#[tokio::test]
async fn midstream_fault_terminates_with_one_adapter_error() {
    let sim = SimBackend::new();
    sim.set_link(ConnectivityStatus::WifiConnected);
    let observer = NetworkObserver::new(Arc::new(sim.clone()));
    let consumer = start_consumer();

    let (_sub, mut values, mut errors) = subscribe_into(&observer.connectivity(), &consumer);
    recv(&mut values).await;

    sim.fail_link_reads(true);
    sim.set_link(ConnectivityStatus::Offline);
    match recv(&mut errors).await {
        StreamError::Adapter(BackendError::LinkReadFailed(_)) => {}
        other => panic!("expected an adapter fault, got {other:?}"),
    }

    // The stream is over: a recovered backend changes nothing without a
    // fresh subscribe.
    eventually(|| sim.live_link_watchers() == 0, "faulted watcher released").await;
    sim.fail_link_reads(false);
    sim.set_link(ConnectivityStatus::WifiConnected);
    expect_silence(&mut values).await;
    expect_silence(&mut errors).await;
}

#[tokio::test(start_paused = true)]
async fn probe_timeout_emits_false_not_an_error() {
    let observer = NetworkObserver::new(Arc::new(SimBackend::new()))
        .with_probe(Arc::new(StalledProbe))
        .with_reachability_policy(ReachabilityPolicy {
            interval: Duration::from_secs(60),
            timeout: Duration::from_secs(2),
        });
    let consumer = start_consumer();

    let (_sub, mut values, mut errors) = subscribe_into(&observer.internet_reachability(), &consumer);
    assert!(!recv(&mut values).await);
    assert!(errors.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn probe_repeats_on_the_configured_interval() {
    let observer = NetworkObserver::new(Arc::new(SimBackend::new()))
        .with_probe(Arc::new(FixedProbe(true)))
        .with_reachability_policy(ReachabilityPolicy {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(2),
        });
    let consumer = start_consumer();

    let (_sub, mut values, _errors) = subscribe_into(&observer.internet_reachability(), &consumer);
    assert!(recv(&mut values).await);
    assert!(recv(&mut values).await);
    assert!(recv(&mut values).await);
}

#[tokio::test]
async fn wifi_signal_level_buckets_raw_readings() {
    let sim = SimBackend::new();
    let observer = NetworkObserver::new(Arc::new(sim.clone()));
    let consumer = start_consumer();

    let (_sub, mut values, _errors) = subscribe_into(&observer.wifi_signal_level(), &consumer);
    eventually(|| sim.live_rssi_watchers() == 1, "rssi watcher registered").await;

    sim.set_rssi(Some(-60));
    assert_eq!(recv(&mut values).await, WifiSignalLevel::Good);

    sim.set_rssi(Some(-85));
    assert_eq!(recv(&mut values).await, WifiSignalLevel::Poor);

    sim.set_rssi(None);
    assert_eq!(recv(&mut values).await, WifiSignalLevel::NoSignal);
}

#[tokio::test]
async fn scan_emissions_replace_the_previous_snapshot() {
    let sim = SimBackend::new();
    let observer = NetworkObserver::new(Arc::new(sim.clone()));
    let consumer = start_consumer();

    let (_sub, mut values, _errors) = subscribe_into(&observer.access_points(), &consumer);
    eventually(|| sim.live_scan_watchers() == 1, "scan watcher registered").await;
    assert!(sim.scan_requests() >= 1);

    sim.complete_scan(vec![access_point("alpha"), access_point("beta")]);
    let first = recv(&mut values).await;
    let ssids: Vec<_> = first.iter().map(|ap| ap.ssid.as_str()).collect();
    assert_eq!(ssids, vec!["alpha", "beta"]);

    sim.complete_scan(vec![access_point("gamma")]);
    let second = recv(&mut values).await;
    let ssids: Vec<_> = second.iter().map(|ap| ap.ssid.as_str()).collect();
    assert_eq!(ssids, vec!["gamma"]);
}

#[tokio::test]
async fn scan_adapter_keeps_requesting_scans() {
    let sim = SimBackend::new();
    let observer = NetworkObserver::new(Arc::new(sim.clone()));
    let consumer = start_consumer();

    let (_sub, mut values, _errors) = subscribe_into(&observer.access_points(), &consumer);
    eventually(|| sim.scan_requests() == 1, "initial scan requested").await;

    sim.complete_scan(vec![access_point("alpha")]);
    recv(&mut values).await;
    eventually(|| sim.scan_requests() == 2, "follow-up scan requested").await;
}

#[tokio::test]
async fn map_transforms_values_in_order() {
    let consumer = start_consumer();
    let doubled = Observable::new(|emitter| async move {
        for i in 1..=3 {
            if !emitter.next(i) {
                return;
            }
        }
        emitter.cancelled().await;
    })
    .map(|value: i32| value * 2);

    let (_sub, mut values, _errors) = subscribe_into(&doubled, &consumer);
    assert_eq!(recv(&mut values).await, 2);
    assert_eq!(recv(&mut values).await, 4);
    assert_eq!(recv(&mut values).await, 6);
}

#[tokio::test]
async fn restart_creates_fresh_registrations() {
    let sim = SimBackend::new();
    sim.set_link(ConnectivityStatus::Offline);
    let observer = NetworkObserver::new(Arc::new(sim.clone()));
    let consumer = start_consumer();

    let mut registry = SubscriptionSet::new();
    let (sub, mut values, _errors) = subscribe_into(&observer.connectivity(), &consumer);
    registry.insert(sub);
    assert_eq!(recv(&mut values).await, ConnectivityStatus::Offline);

    registry.stop_all();
    eventually(|| sim.live_link_watchers() == 0, "first watcher released").await;

    // Resume: a brand-new subscription, never a shared registration.
    sim.set_link(ConnectivityStatus::WifiConnected);
    let (sub, mut values, _errors) = subscribe_into(&observer.connectivity(), &consumer);
    registry.insert(sub);
    assert_eq!(recv(&mut values).await, ConnectivityStatus::WifiConnected);
    assert_eq!(sim.live_link_watchers(), 1);
}
