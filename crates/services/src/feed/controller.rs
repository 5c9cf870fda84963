//! # FeedController
//!
//! Incremental pagination over a read-only post collection.
//!
//! ```text
//!   Empty ──first non-empty source──▶ Loaded ──reveal (authenticated)──▶ LoadingMore
//!                                       ▲  │                                 │
//!                                       │  └─reveal (anonymous)─▶ prompt     │
//!                                       └──────────── page appended ─────────┘
//! ```
//!
//! The controller is synchronous. Delays are the caller's business: a reveal
//! hands out a [`LoadMoreTicket`] which must be redeemed with
//! [`FeedController::complete_load`] once the delay has elapsed.

use std::sync::Arc;
use std::time::Duration;

use domains::{Post, ProviderError, QueryState};
use tracing::{debug, info, warn};

use super::observer::{ItemHandle, ProximityObserver, Subscription, SubscriptionId};
use crate::gate::{AuthGate, GateSignal};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_LOAD_MORE_DELAY: Duration = Duration::from_millis(300);

/// Static text shown instead of any provider error.
pub const FEED_LOAD_FAILED: &str = "Failed to load posts";

/// Shared, read-only post collection.
pub type PostCollection = Arc<[Post]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    pub page_size: usize,
    pub load_more_delay: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            load_more_delay: DEFAULT_LOAD_MORE_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// The provider is still fetching the collection.
    Loading,
    /// The provider reported an error; pagination is halted.
    Failed,
    Empty,
    Loaded,
    LoadingMore,
}

/// Proof that a page advance was granted. Stale tickets are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMoreTicket {
    generation: u64,
    page: usize,
}

impl LoadMoreTicket {
    pub fn page(&self) -> usize {
        self.page
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The event came from a subscription that has since been replaced.
    StaleSubscription,
    /// No usable collection (still loading, or failed).
    Unavailable,
    Exhausted,
    AlreadyLoading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    Advanced(LoadMoreTicket),
    Blocked(GateSignal),
    Ignored(IgnoreReason),
}

/// Everything the presentation layer needs to render the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub phase: FeedPhase,
    pub visible: Vec<Post>,
    pub page: usize,
    pub has_more: bool,
    pub is_loading_more: bool,
    /// Set when a reveal was blocked; cleared by dismissing the prompt.
    pub auth_prompt: bool,
    pub end_of_content: bool,
    pub error_message: Option<&'static str>,
    pub subscription: Option<Subscription>,
    /// Bumped by the runtime for every processed command.
    pub revision: u64,
}

pub struct FeedController {
    config: FeedConfig,
    source: Option<PostCollection>,
    source_loading: bool,
    error: Option<ProviderError>,
    visible: Vec<Post>,
    page: usize,
    has_more: bool,
    loading_more: bool,
    auth_prompt: bool,
    generation: u64,
    observer: ProximityObserver,
}

impl FeedController {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config: FeedConfig {
                page_size: config.page_size.max(1),
                ..config
            },
            source: None,
            source_loading: false,
            error: None,
            visible: Vec::new(),
            page: 1,
            has_more: true,
            loading_more: false,
            auth_prompt: false,
            generation: 0,
            observer: ProximityObserver::default(),
        }
    }

    pub fn config(&self) -> FeedConfig {
        self.config
    }

    /// Feeds the latest provider state into the controller.
    ///
    /// The first page is taken only once, from the first non-empty collection
    /// seen while nothing is visible. Later collections are used for further
    /// pages but never rebuild what is already shown.
    pub fn sync_source(&mut self, query: &QueryState<PostCollection>) {
        self.source_loading = query.is_loading;

        if let Some(error) = &query.error {
            warn!(%error, "post collection unavailable");
            self.error = Some(error.clone());
            self.abandon_load();
            return;
        }

        let Some(collection) = &query.data else {
            return;
        };
        self.error = None;
        self.source = Some(collection.clone());

        if self.visible.is_empty() && !collection.is_empty() {
            let end = self.config.page_size.min(collection.len());
            self.visible = collection[..end].to_vec();
            self.has_more = collection.len() > self.config.page_size;
            debug!(shown = end, total = collection.len(), "first page loaded");
        }
    }

    /// Re-arms the proximity observer on the current last item.
    ///
    /// Skipped while a page is loading, mirroring a trigger that is not
    /// rebuilt mid-load. Returns the subscription when a new one was attached.
    pub fn observe_last(&mut self) -> Option<Subscription> {
        if self.loading_more {
            return None;
        }
        let target = self.visible.last().map(|post| ItemHandle {
            index: self.visible.len() - 1,
            post_id: post.id,
        });
        self.observer.observe(target)
    }

    /// Handles a proximity event for subscription `id`.
    pub fn on_intersect(&mut self, id: SubscriptionId, gate: &AuthGate) -> RevealOutcome {
        if !self.observer.is_current(id) {
            return RevealOutcome::Ignored(IgnoreReason::StaleSubscription);
        }
        if self.error.is_some() || self.source.is_none() {
            return RevealOutcome::Ignored(IgnoreReason::Unavailable);
        }
        if !self.has_more {
            return RevealOutcome::Ignored(IgnoreReason::Exhausted);
        }
        if self.loading_more {
            return RevealOutcome::Ignored(IgnoreReason::AlreadyLoading);
        }

        gate.guard(
            self,
            |feed| feed.advance(),
            |feed, signal| {
                info!(page = feed.page, "reveal blocked until sign-in");
                feed.auth_prompt = true;
                RevealOutcome::Blocked(signal)
            },
        )
    }

    fn advance(&mut self) -> RevealOutcome {
        self.page += 1;
        self.loading_more = true;
        debug!(page = self.page, "loading next page");
        RevealOutcome::Advanced(LoadMoreTicket {
            generation: self.generation,
            page: self.page,
        })
    }

    /// Appends the page granted by `ticket`. Returns `false` for stale tickets.
    pub fn complete_load(&mut self, ticket: LoadMoreTicket) -> bool {
        let current = ticket.generation == self.generation && ticket.page == self.page;
        let Some(source) = self.source.as_ref().filter(|_| current && self.loading_more) else {
            debug!(page = ticket.page, "discarding stale page");
            return false;
        };

        let start = ((ticket.page - 1) * self.config.page_size).min(source.len());
        let end = (start + self.config.page_size).min(source.len());
        self.visible.extend_from_slice(&source[start..end]);
        self.has_more = source.len() > self.visible.len();
        self.loading_more = false;
        debug!(page = ticket.page, shown = self.visible.len(), has_more = self.has_more, "page appended");
        true
    }

    /// Shows the sign-in prompt on behalf of another gated entry point.
    pub fn raise_auth_prompt(&mut self) {
        self.auth_prompt = true;
    }

    pub fn dismiss_auth_prompt(&mut self) {
        self.auth_prompt = false;
    }

    /// Drops an in-flight page so the page counter stays in step with what is shown.
    fn abandon_load(&mut self) {
        self.generation += 1;
        if self.loading_more {
            self.loading_more = false;
            self.page -= 1;
        }
    }

    pub fn phase(&self) -> FeedPhase {
        if self.error.is_some() {
            FeedPhase::Failed
        } else if self.source_loading {
            FeedPhase::Loading
        } else if self.loading_more {
            FeedPhase::LoadingMore
        } else if self.visible.is_empty() {
            FeedPhase::Empty
        } else {
            FeedPhase::Loaded
        }
    }

    pub fn visible(&self) -> &[Post] {
        &self.visible
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn auth_prompt(&self) -> bool {
        self.auth_prompt
    }

    pub fn active_subscription(&self) -> Option<Subscription> {
        self.observer.active()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let phase = self.phase();
        FeedSnapshot {
            phase,
            visible: self.visible.clone(),
            page: self.page,
            has_more: self.has_more,
            is_loading_more: self.loading_more,
            auth_prompt: self.auth_prompt,
            end_of_content: !self.has_more && !self.visible.is_empty(),
            error_message: (phase == FeedPhase::Failed).then_some(FEED_LOAD_FAILED),
            subscription: self.observer.active(),
            revision: 0,
        }
    }
}
