//! Subscription registry.

use crate::stream::Subscription;

/// The active subscriptions of one consumer.
///
/// Owned by a single consumer and driven from its lifecycle context; it is
/// not meant for unsynchronized start/stop from multiple threads. The usual
/// pattern is strict alternation: fill the set on resume, [`stop_all`] on
/// pause. Callers that may start while already active should `stop_all`
/// first so registrations never silently accumulate.
///
/// [`stop_all`]: SubscriptionSet::stop_all
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    active: Vec<Subscription>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a freshly created subscription.
    pub fn insert(&mut self, subscription: Subscription) {
        self.active.push(subscription);
    }

    /// Cancel and drop every held subscription. A no-op on an empty set and
    /// safe to call repeatedly.
    pub fn stop_all(&mut self) {
        if self.active.is_empty() {
            return;
        }
        tracing::debug!(count = self.active.len(), "stopping all subscriptions");
        for subscription in self.active.drain(..) {
            subscription.cancel();
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.stop_all();
    }
}
