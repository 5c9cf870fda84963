//! Infinite-scroll feed: the synchronous [`FeedController`], its proximity
//! [`observer`], and the task-based [`FeedRuntime`] that drives the delays.

pub mod controller;
pub mod observer;
pub mod runtime;

pub use controller::{
    FeedConfig, FeedController, FeedPhase, FeedSnapshot, IgnoreReason, LoadMoreTicket, PostCollection,
    RevealOutcome, FEED_LOAD_FAILED,
};
pub use observer::{ItemHandle, ProximityObserver, Subscription, SubscriptionId};
pub use runtime::{FeedCommand, FeedHandle, FeedRuntime};
