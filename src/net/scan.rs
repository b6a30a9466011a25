use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::StreamError;
use crate::stream::Observable;

use super::backend::NetworkBackend;
use super::types::AccessPoint;

/// Access point scan adapter: one full snapshot per completed scan.
///
/// A fresh scan is requested on subscribe and again after every completion,
/// so snapshots keep flowing for as long as the subscription lives. Each
/// emission replaces the previous list entirely; nothing accumulates.
pub(crate) fn observe_access_points(
    backend: Arc<dyn NetworkBackend>,
) -> Observable<Vec<AccessPoint>> {
    Observable::new(move |emitter| {
        let backend = Arc::clone(&backend);
        async move {
            let (marks_tx, mut marks) = mpsc::unbounded_channel();
            let _registration = match backend.watch_scans(marks_tx) {
                Ok(guard) => guard,
                Err(e) => {
                    emitter.error(StreamError::Registration(e));
                    return;
                }
            };

            if let Err(e) = backend.request_scan() {
                emitter.error(StreamError::Registration(e));
                return;
            }

            loop {
                tokio::select! {
                    _ = emitter.cancelled() => break,
                    mark = marks.recv() => match mark {
                        Some(()) => {
                            match backend.scan_results() {
                                Ok(snapshot) => {
                                    tracing::debug!(count = snapshot.len(), "scan completed");
                                    if !emitter.next(snapshot) {
                                        break;
                                    }
                                }
                                Err(e) => {
                                    emitter.error(StreamError::Adapter(e));
                                    break;
                                }
                            }
                            if let Err(e) = backend.request_scan() {
                                emitter.error(StreamError::Adapter(e));
                                break;
                            }
                        }
                        None => break,
                    },
                }
            }
        }
    })
}
