/// Centralized configuration constants for netpulse

// Internet reachability probing
pub const PROBE_HOST: &str = "www.google.com";
pub const PROBE_PORT: u16 = 80;
pub const PROBE_INTERVAL_SECS: u64 = 5;
pub const PROBE_TIMEOUT_MS: u64 = 2000;

// RSSI bucketing bounds (dBm). Readings at or below MIN map to no signal,
// readings at or above MAX map to the top bucket.
pub const MIN_RSSI_DBM: i32 = -100;
pub const MAX_RSSI_DBM: i32 = -55;

// Demo UI timing
pub const EVENT_POLL_MS: u64 = 100;
pub const SIM_STEP_MS: u64 = 1500;
