/// Typed errors for network observation
use thiserror::Error;

/// Result type alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors reported by an OS network facade
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("No network interface found")]
    NoInterface,

    #[error("Failed to register notification (code: {code})")]
    RegistrationFailed { code: u32 },

    #[error("Failed to read link state: {0}")]
    LinkReadFailed(String),

    #[error("Failed to read RSSI: {0}")]
    RssiReadFailed(String),

    #[error("Failed to request scan: {0}")]
    ScanRequestFailed(String),

    #[error("Failed to read scan results: {0}")]
    ScanReadFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors surfaced on a stream's error channel.
///
/// Transient signal absence (internet unreachable, no WiFi signal) is never
/// an error; it is emitted as a regular value. A `StreamError` always means
/// the stream has terminated and will emit nothing further.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The OS registration could not be established at subscribe time.
    #[error("Registration failed: {0}")]
    Registration(#[source] BackendError),

    /// The backend reported an unexpected failure mid-stream.
    #[error("Adapter fault: {0}")]
    Adapter(#[source] BackendError),
}
