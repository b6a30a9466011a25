use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::StreamError;
use crate::stream::Observable;

use super::backend::NetworkBackend;
use super::types::WifiSignalLevel;

/// WiFi signal level adapter: per RSSI change mark, read the raw reading and
/// bucket it. The bucketing is a pure `map` over the raw stream.
pub(crate) fn observe_wifi_signal_level(
    backend: Arc<dyn NetworkBackend>,
) -> Observable<WifiSignalLevel> {
    observe_rssi(backend).map(WifiSignalLevel::from_reading)
}

/// Raw RSSI stream; `None` when not associated with any network.
fn observe_rssi(backend: Arc<dyn NetworkBackend>) -> Observable<Option<i32>> {
    Observable::new(move |emitter| {
        let backend = Arc::clone(&backend);
        async move {
            let (marks_tx, mut marks) = mpsc::unbounded_channel();
            let _registration = match backend.watch_wifi_rssi(marks_tx) {
                Ok(guard) => guard,
                Err(e) => {
                    emitter.error(StreamError::Registration(e));
                    return;
                }
            };

            loop {
                tokio::select! {
                    _ = emitter.cancelled() => break,
                    mark = marks.recv() => match mark {
                        Some(()) => match backend.wifi_rssi() {
                            Ok(reading) => {
                                tracing::trace!(?reading, "rssi changed");
                                if !emitter.next(reading) {
                                    break;
                                }
                            }
                            Err(e) => {
                                emitter.error(StreamError::Adapter(e));
                                break;
                            }
                        },
                        None => break,
                    },
                }
            }
        }
    })
}
