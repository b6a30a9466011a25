//! Derived display policy.

use crate::net::types::{ConnectivityStatus, WifiSignalLevel};

/// Cross-stream rule for the signal-level readout: without WiFi-class
/// connectivity there is nothing the last WiFi reading could describe, so
/// offline and mobile-only force [`WifiSignalLevel::NoSignal`].
///
/// Stateless given both inputs. The caller tracks `last_signal` as the most
/// recent value from the signal-level stream, starting from `NoSignal` until
/// the first real reading arrives.
pub fn display_signal(
    connectivity: ConnectivityStatus,
    last_signal: WifiSignalLevel,
) -> WifiSignalLevel {
    match connectivity {
        ConnectivityStatus::Offline | ConnectivityStatus::MobileConnected => {
            WifiSignalLevel::NoSignal
        }
        ConnectivityStatus::WifiConnected | ConnectivityStatus::Unknown => last_signal,
    }
}
