use std::fmt;

use crate::config::{MAX_RSSI_DBM, MIN_RSSI_DBM};

/// Point-in-time snapshot of the link-layer connectivity class
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityStatus {
    #[default]
    Unknown,
    WifiConnected,
    MobileConnected,
    Offline,
}

impl ConnectivityStatus {
    pub fn description(&self) -> &'static str {
        match self {
            ConnectivityStatus::Unknown => "unknown",
            ConnectivityStatus::WifiConnected => "connected to WiFi",
            ConnectivityStatus::MobileConnected => "connected to mobile network",
            ConnectivityStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Discretized WiFi signal strength
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WifiSignalLevel {
    #[default]
    NoSignal,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl WifiSignalLevel {
    /// Bucket a raw RSSI reading. Linear five-level scale between
    /// [`MIN_RSSI_DBM`] and [`MAX_RSSI_DBM`].
    pub fn from_rssi(rssi_dbm: i32) -> Self {
        if rssi_dbm <= MIN_RSSI_DBM {
            return WifiSignalLevel::NoSignal;
        }
        if rssi_dbm >= MAX_RSSI_DBM {
            return WifiSignalLevel::Excellent;
        }
        let span = MAX_RSSI_DBM - MIN_RSSI_DBM;
        match (rssi_dbm - MIN_RSSI_DBM) * 4 / span {
            0 => WifiSignalLevel::NoSignal,
            1 => WifiSignalLevel::Poor,
            2 => WifiSignalLevel::Fair,
            3 => WifiSignalLevel::Good,
            _ => WifiSignalLevel::Excellent,
        }
    }

    /// Bucket an optional reading; `None` means not associated.
    pub fn from_reading(rssi_dbm: Option<i32>) -> Self {
        match rssi_dbm {
            Some(dbm) => Self::from_rssi(dbm),
            None => WifiSignalLevel::NoSignal,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WifiSignalLevel::NoSignal => "no signal",
            WifiSignalLevel::Poor => "poor",
            WifiSignalLevel::Fair => "fair",
            WifiSignalLevel::Good => "good",
            WifiSignalLevel::Excellent => "excellent",
        }
    }
}

impl fmt::Display for WifiSignalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One visible access point from a scan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    pub ssid: String,
    pub rssi_dbm: i32,
    pub frequency_mhz: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rssi_bucketing_covers_the_scale() {
        assert_eq!(WifiSignalLevel::from_rssi(-110), WifiSignalLevel::NoSignal);
        assert_eq!(WifiSignalLevel::from_rssi(-100), WifiSignalLevel::NoSignal);
        assert_eq!(WifiSignalLevel::from_rssi(-85), WifiSignalLevel::Poor);
        assert_eq!(WifiSignalLevel::from_rssi(-75), WifiSignalLevel::Fair);
        assert_eq!(WifiSignalLevel::from_rssi(-60), WifiSignalLevel::Good);
        assert_eq!(WifiSignalLevel::from_rssi(-55), WifiSignalLevel::Excellent);
        assert_eq!(WifiSignalLevel::from_rssi(-30), WifiSignalLevel::Excellent);
    }

    #[test]
    fn missing_reading_is_no_signal() {
        assert_eq!(
            WifiSignalLevel::from_reading(None),
            WifiSignalLevel::NoSignal
        );
        assert_eq!(
            WifiSignalLevel::from_reading(Some(-60)),
            WifiSignalLevel::Good
        );
    }

    #[test]
    fn levels_order_by_strength() {
        assert!(WifiSignalLevel::NoSignal < WifiSignalLevel::Poor);
        assert!(WifiSignalLevel::Good < WifiSignalLevel::Excellent);
    }
}
