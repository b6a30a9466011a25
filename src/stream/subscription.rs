use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Shared cancellation state between a [`Subscription`](crate::stream::Subscription),
/// its producer task and the queued deliveries.
#[derive(Debug, Default)]
pub(crate) struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelState {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Flip to cancelled. Returns `true` only for the call that performed
    /// the transition, so the release work runs exactly once.
    pub(crate) fn cancel(&self) -> bool {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.notify.notify_waiters();
        true
    }

    /// Resolves once the subscription is cancelled.
    pub(crate) async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        let notified = self.notify.notified();
        tokio::pin!(notified);
        // Register interest before re-checking, so a cancel landing between
        // the check and the await is not missed.
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

/// Handle for one active observation of a stream.
///
/// Cancellation is one-way and idempotent: the second `cancel` call is a
/// no-op. Dropping the subscription cancels it as well, so holding it in a
/// [`SubscriptionSet`](crate::registry::SubscriptionSet) and draining the set
/// is enough to tear everything down.
#[derive(Debug)]
pub struct Subscription {
    cancel: Arc<CancelState>,
    // Kept so the producer task stays inspectable; cancellation is
    // cooperative, the task is never aborted out from under its teardown.
    producer: JoinHandle<()>,
}

impl Subscription {
    pub(crate) fn new(cancel: Arc<CancelState>, producer: JoinHandle<()>) -> Self {
        Self { cancel, producer }
    }

    /// Stop future deliveries and release the underlying OS registration.
    ///
    /// Safe to call from the consumer context while a background callback is
    /// in flight: a delivery already dispatched may complete, but no new one
    /// is scheduled after this returns.
    pub fn cancel(&self) {
        if self.cancel.cancel() {
            tracing::debug!("subscription cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether the producer task has fully wound down (registration
    /// released). Mostly useful in tests.
    pub fn is_finished(&self) -> bool {
        self.producer.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
