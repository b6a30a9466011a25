//! Push-based observable streams.
//!
//! An [`Observable`] is a lazy, cold description of how to produce an
//! unbounded sequence of values: nothing runs until [`subscribe`] is called,
//! and every subscribe call re-runs the producer from scratch with its own
//! OS registration. Values are pushed by the producer into an [`Emitter`] and
//! marshaled across the [`consumer`] queue onto the consumer context.
//!
//! [`subscribe`]: Observable::subscribe

mod subscription;

pub mod consumer;

pub use subscription::Subscription;

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;

use crate::error::StreamError;
use consumer::ConsumerHandle;
use subscription::CancelState;

/// One item on a stream: either the next value or the terminal error.
#[derive(Debug)]
pub enum Event<T> {
    Next(T),
    Error(StreamError),
}

impl<T> Event<T> {
    fn map<U, F: Fn(T) -> U>(self, f: &F) -> Event<U> {
        match self {
            Event::Next(value) => Event::Next(f(value)),
            Event::Error(e) => Event::Error(e),
        }
    }
}

type ProducerFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
type Producer<T> = dyn Fn(Emitter<T>) -> ProducerFuture + Send + Sync;

/// A lazy, cold, cancellable stream of `T`.
pub struct Observable<T: Send + 'static> {
    producer: Arc<Producer<T>>,
}

impl<T: Send + 'static> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            producer: Arc::clone(&self.producer),
        }
    }
}

impl<T: Send + 'static> Observable<T> {
    /// Wrap a producer. The closure runs once per subscription, on the
    /// worker runtime, and owns the stream until it returns or is cancelled.
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: Fn(Emitter<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            producer: Arc::new(move |emitter| Box::pin(producer(emitter))),
        }
    }

    /// Pure per-value transformation. Applied on the producer side, before
    /// the scheduling boundary, so threading is unchanged.
    pub fn map<U, F>(self, f: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let inner = self.producer;
        let f = Arc::new(f);
        Observable {
            producer: Arc::new(move |emitter: Emitter<U>| {
                (inner)(emitter.via(Arc::clone(&f)))
            }),
        }
    }

    /// Start the stream: spawn the producer on the runtime behind `workers`
    /// and deliver events through `consumer`.
    ///
    /// `on_next` runs once per value on the consumer context. `on_error` is
    /// the distinct error channel; it runs at most once, after which the
    /// stream is terminated. The returned [`Subscription`] stops delivery
    /// and releases the producer's OS registration when cancelled.
    pub fn subscribe<N, E>(
        &self,
        workers: &Handle,
        consumer: &ConsumerHandle,
        on_next: N,
        on_error: E,
    ) -> Subscription
    where
        N: FnMut(T) + Send + 'static,
        E: FnOnce(StreamError) + Send + 'static,
    {
        let cancel = CancelState::new();
        let emitter = Emitter {
            sink: delivery_sink(consumer.clone(), Arc::clone(&cancel), on_next, on_error),
            cancel: Arc::clone(&cancel),
        };
        let producer = workers.spawn((self.producer)(emitter));
        Subscription::new(cancel, producer)
    }
}

type Sink<T> = Arc<dyn Fn(Event<T>) + Send + Sync>;

/// Producer-side handle for pushing events into a subscription.
pub struct Emitter<T> {
    sink: Sink<T>,
    cancel: Arc<CancelState>,
}

impl<T: Send + 'static> Emitter<T> {
    /// Push the next value. Returns `false` once the subscription is
    /// cancelled, at which point the producer should wind down.
    pub fn next(&self, value: T) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        (self.sink)(Event::Next(value));
        true
    }

    /// Surface a terminal error. The producer must emit nothing afterwards.
    pub fn error(&self, error: StreamError) {
        tracing::debug!(%error, "stream terminated with error");
        if self.cancel.is_cancelled() {
            return;
        }
        (self.sink)(Event::Error(error));
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves when the subscription is cancelled. Producers select on this
    /// alongside their notification source.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    /// Adapt this emitter to accept an upstream value type.
    fn via<S: Send + 'static>(self, f: Arc<impl Fn(S) -> T + Send + Sync + 'static>) -> Emitter<S> {
        let sink = self.sink;
        Emitter {
            sink: Arc::new(move |event: Event<S>| (sink)(event.map(f.as_ref()))),
            cancel: self.cancel,
        }
    }
}

/// Build the sink that carries events across the scheduling boundary.
///
/// Each event becomes one queued delivery. The cancel flag is re-checked at
/// execution time, closing the race between a cancel on the consumer thread
/// and an event already queued by the producer.
fn delivery_sink<T, N, E>(
    consumer: ConsumerHandle,
    cancel: Arc<CancelState>,
    on_next: N,
    on_error: E,
) -> Sink<T>
where
    T: Send + 'static,
    N: FnMut(T) + Send + 'static,
    E: FnOnce(StreamError) + Send + 'static,
{
    let on_next = Arc::new(Mutex::new(on_next));
    let on_error = Arc::new(Mutex::new(Some(on_error)));

    Arc::new(move |event: Event<T>| {
        let on_next = Arc::clone(&on_next);
        let on_error = Arc::clone(&on_error);
        let cancel = Arc::clone(&cancel);
        consumer.post(Box::new(move || {
            if cancel.is_cancelled() {
                return;
            }
            match event {
                Event::Next(value) => {
                    let mut on_next = on_next.lock().expect("on_next lock poisoned");
                    (*on_next)(value);
                }
                Event::Error(error) => {
                    if let Some(on_error) = on_error.lock().expect("on_error lock poisoned").take()
                    {
                        on_error(error);
                    }
                }
            }
        }));
    })
}
