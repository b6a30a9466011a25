//! Reactive observation of device network state.
//!
//! Four dimensions of network state change independently and asynchronously:
//! link-layer connectivity, public internet reachability, WiFi signal
//! strength and the set of visible access points. Each is exposed as a cold
//! [`Observable`] of typed values, produced on background tokio tasks and
//! delivered on the consumer's own context through a
//! [`consumer queue`](stream::consumer).
//!
//! ```no_run
//! use std::sync::Arc;
//! use netpulse::net::sim::SimBackend;
//! use netpulse::{NetworkObserver, SubscriptionSet, consumer_queue};
//!
//! # async fn example() {
//! let observer = NetworkObserver::new(Arc::new(SimBackend::new()));
//! let (handle, consumer) = consumer_queue();
//! tokio::spawn(consumer.run());
//!
//! let mut subs = SubscriptionSet::new();
//! subs.insert(observer.connectivity().subscribe(
//!     &tokio::runtime::Handle::current(),
//!     &handle,
//!     |status| println!("{status}"),
//!     |error| eprintln!("{error}"),
//! ));
//!
//! // ... later, on pause:
//! subs.stop_all();
//! # }
//! ```

pub mod config;
pub mod error;
pub mod net;
pub mod policy;
pub mod registry;
pub mod stream;

pub use error::{BackendError, StreamError};
pub use net::types::{AccessPoint, ConnectivityStatus, WifiSignalLevel};
pub use net::{NetworkObserver, ReachabilityPolicy};
pub use policy::display_signal;
pub use registry::SubscriptionSet;
pub use stream::consumer::{ConsumerHandle, ConsumerLoop, consumer_queue};
pub use stream::{Observable, Subscription};
