mod app;
mod event;
mod theme;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tokio::time;

use netpulse::net::probe::TcpProbe;
use netpulse::net::sim::SimBackend;
use netpulse::net::types::AccessPoint;
use netpulse::{ConnectivityStatus, NetworkObserver, ReachabilityPolicy, config, consumer_queue};

use crate::app::{AppState, ObservationController};
use crate::event::run;

/// Demo TUI showing the four observed network dimensions. Link state, RSSI
/// and scans come from a scripted backend; internet reachability is probed
/// for real over TCP.
#[derive(Parser, Debug)]
#[command(
    name = "netpulse",
    about = "Watch connectivity, internet reachability, WiFi signal level and access points.",
    long_about = None,
    version = env!("CARGO_PKG_VERSION")
)]
struct Args {
    /// Host probed for internet reachability
    #[arg(long, default_value = config::PROBE_HOST)]
    probe_host: String,

    /// Port probed for internet reachability
    #[arg(long, default_value_t = config::PROBE_PORT)]
    probe_port: u16,

    /// Seconds between reachability probes
    #[arg(long, default_value_t = config::PROBE_INTERVAL_SECS)]
    probe_interval: u64,

    /// Per-probe timeout in milliseconds
    #[arg(long, default_value_t = config::PROBE_TIMEOUT_MS)]
    probe_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    color_eyre::install()?;

    let sim = SimBackend::new();
    spawn_sim_driver(sim.clone());

    let observer = NetworkObserver::new(Arc::new(sim))
        .with_probe(Arc::new(TcpProbe::new(args.probe_host, args.probe_port)))
        .with_reachability_policy(ReachabilityPolicy {
            interval: Duration::from_secs(args.probe_interval),
            timeout: Duration::from_millis(args.probe_timeout),
        });

    let (consumer_handle, mut consumer_loop) = consumer_queue();
    let (updates_tx, mut updates_rx) = tokio::sync::mpsc::unbounded_channel();
    let mut controller = ObservationController::new(observer, consumer_handle, updates_tx);
    controller.start();

    let mut state = AppState::new();
    let terminal = ratatui::init();
    enable_raw_mode()?;
    let result = run(
        terminal,
        &mut state,
        &mut controller,
        &mut consumer_loop,
        &mut updates_rx,
    )
    .await;
    disable_raw_mode()?;

    ratatui::restore();
    result
}

/// Walk the scripted backend through a small scenario so every stream has
/// something to show.
fn spawn_sim_driver(sim: SimBackend) {
    tokio::spawn(async move {
        let mut step: usize = 0;
        loop {
            match step % 6 {
                0 => {
                    sim.set_link(ConnectivityStatus::WifiConnected);
                    sim.set_rssi(Some(-58));
                    sim.complete_scan(vec![
                        access_point("home-5g", -58, 5200),
                        access_point("cafe-guest", -74, 2412),
                    ]);
                }
                1 => sim.set_rssi(Some(-72)),
                2 => {
                    sim.set_link(ConnectivityStatus::Offline);
                    sim.set_rssi(None);
                    sim.complete_scan(Vec::new());
                }
                3 => sim.set_link(ConnectivityStatus::MobileConnected),
                4 => {
                    sim.set_link(ConnectivityStatus::WifiConnected);
                    sim.set_rssi(Some(-63));
                }
                _ => {
                    sim.complete_scan(vec![
                        access_point("home-5g", -61, 5200),
                        access_point("office-mesh", -80, 5745),
                    ]);
                }
            }
            step = step.wrapping_add(1);
            time::sleep(Duration::from_millis(config::SIM_STEP_MS)).await;
        }
    });
}

fn access_point(ssid: &str, rssi_dbm: i32, frequency_mhz: u32) -> AccessPoint {
    AccessPoint {
        ssid: ssid.to_string(),
        rssi_dbm,
        frequency_mhz,
    }
}
