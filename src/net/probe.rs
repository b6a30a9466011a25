use async_trait::async_trait;

use tokio::net::TcpStream;

use crate::config::{PROBE_HOST, PROBE_PORT};

/// A single internet reachability check.
///
/// Implementations may take arbitrarily long; the reachability adapter
/// bounds every call with its configured timeout. A probe outcome is data,
/// not an error: anything short of a successful round trip is `false`.
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    async fn check(&self) -> bool;
}

/// Probes reachability by opening a TCP connection to a well-known host.
///
/// DNS failure, connection refusal and unreachable routes all come back as
/// `false`.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    host: String,
    port: u16,
}

impl TcpProbe {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(PROBE_HOST, PROBE_PORT)
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn check(&self) -> bool {
        match TcpStream::connect((self.host.as_str(), self.port)).await {
            Ok(_) => true,
            Err(e) => {
                tracing::trace!(host = %self.host, port = self.port, error = %e, "probe failed");
                false
            }
        }
    }
}
