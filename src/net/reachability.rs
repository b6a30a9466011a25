use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::config::{PROBE_INTERVAL_SECS, PROBE_TIMEOUT_MS};
use crate::stream::Observable;

use super::probe::Probe;

/// Cadence and bound for internet reachability probing.
#[derive(Debug, Clone, Copy)]
pub struct ReachabilityPolicy {
    /// Pause between the end of one probe and the start of the next.
    pub interval: Duration,
    /// Hard bound on a single probe; exceeding it counts as unreachable.
    pub timeout: Duration,
}

impl Default for ReachabilityPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(PROBE_INTERVAL_SECS),
            timeout: Duration::from_millis(PROBE_TIMEOUT_MS),
        }
    }
}

/// Internet reachability adapter: one bounded probe per tick, emitted as a
/// plain boolean. The first probe fires immediately on subscribe.
///
/// Probe failures of any kind are `false`, never stream errors; unreachable
/// internet is expected, recoverable information.
pub(crate) fn observe_internet(probe: Arc<dyn Probe>, policy: ReachabilityPolicy) -> Observable<bool> {
    Observable::new(move |emitter| {
        let probe = Arc::clone(&probe);
        async move {
            loop {
                let reachable = time::timeout(policy.timeout, probe.check())
                    .await
                    .unwrap_or(false);
                tracing::trace!(reachable, "reachability probe");
                if !emitter.next(reachable) {
                    break;
                }
                tokio::select! {
                    _ = emitter.cancelled() => break,
                    _ = time::sleep(policy.interval) => {}
                }
            }
        }
    })
}
