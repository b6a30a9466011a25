use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::StreamError;
use crate::stream::Observable;

use super::backend::NetworkBackend;
use super::types::ConnectivityStatus;

/// Connectivity adapter: one link-state registration per subscription, one
/// [`ConnectivityStatus`] snapshot per change mark.
///
/// The true current state goes out immediately on subscribe; consumers must
/// never start from an assumed "offline".
pub(crate) fn observe_connectivity(
    backend: Arc<dyn NetworkBackend>,
) -> Observable<ConnectivityStatus> {
    Observable::new(move |emitter| {
        let backend = Arc::clone(&backend);
        async move {
            let (marks_tx, mut marks) = mpsc::unbounded_channel();
            let _registration = match backend.watch_link(marks_tx) {
                Ok(guard) => guard,
                Err(e) => {
                    emitter.error(StreamError::Registration(e));
                    return;
                }
            };

            match backend.link_status() {
                Ok(status) => {
                    tracing::debug!(%status, "initial connectivity");
                    if !emitter.next(status) {
                        return;
                    }
                }
                Err(e) => {
                    emitter.error(StreamError::Adapter(e));
                    return;
                }
            }

            loop {
                tokio::select! {
                    _ = emitter.cancelled() => break,
                    mark = marks.recv() => match mark {
                        Some(()) => match backend.link_status() {
                            Ok(status) => {
                                tracing::debug!(%status, "connectivity changed");
                                if !emitter.next(status) {
                                    break;
                                }
                            }
                            Err(e) => {
                                emitter.error(StreamError::Adapter(e));
                                break;
                            }
                        },
                        // Backend dropped its sender: the registration is gone.
                        None => break,
                    },
                }
            }
        }
    })
}
