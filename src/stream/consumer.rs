//! Scheduling boundary between stream production and delivery.
//!
//! Producers run on the tokio runtime's worker threads. Deliveries are
//! marshaled through an unbounded FIFO queue and executed wherever the
//! consumer drains its [`ConsumerLoop`]: a frame loop calling [`drain`]
//! between redraws, or a dedicated task running [`run`].
//!
//! [`drain`]: ConsumerLoop::drain
//! [`run`]: ConsumerLoop::run

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

type Delivery = Box<dyn FnOnce() + Send>;

/// Create a linked consumer queue pair.
pub fn consumer_queue() -> (ConsumerHandle, ConsumerLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ConsumerHandle { tx }, ConsumerLoop { rx })
}

/// Posting half of the consumer queue. Cheap to clone; one handle is shared
/// by every subscription delivering to the same consumer context.
#[derive(Debug, Clone)]
pub struct ConsumerHandle {
    tx: UnboundedSender<Delivery>,
}

impl ConsumerHandle {
    pub(crate) fn post(&self, delivery: Delivery) {
        // A closed queue means the consumer is gone; deliveries are moot.
        let _ = self.tx.send(delivery);
    }
}

/// Draining half of the consumer queue. Owned by the one context that is
/// allowed to run subscriber callbacks.
#[derive(Debug)]
pub struct ConsumerLoop {
    rx: UnboundedReceiver<Delivery>,
}

impl ConsumerLoop {
    /// Run every delivery queued so far and return how many ran.
    /// Non-blocking; meant to be called from a frame/event loop.
    pub fn drain(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(delivery) = self.rx.try_recv() {
            delivery();
            ran += 1;
        }
        ran
    }

    /// Wait for and run a single delivery. Returns `false` once every
    /// [`ConsumerHandle`] is gone and the queue is empty.
    pub async fn run_one(&mut self) -> bool {
        match self.rx.recv().await {
            Some(delivery) => {
                delivery();
                true
            }
            None => false,
        }
    }

    /// Drive deliveries until all handles are dropped.
    pub async fn run(mut self) {
        while self.run_one().await {}
    }
}
