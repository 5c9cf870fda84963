//! Proximity subscription for the last visible feed item.
//!
//! At most one subscription is active. Re-observing the same item is a no-op;
//! observing a different item tears the old subscription down first, so an
//! intersection event can always be matched to the item it was armed for.

use domains::PostId;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Identity of a rendered item: its position plus the post it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemHandle {
    pub index: usize,
    pub post_id: PostId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub target: ItemHandle,
}

#[derive(Debug, Default)]
pub struct ProximityObserver {
    active: Option<Subscription>,
    next_id: u64,
}

impl ProximityObserver {
    /// Arms the observer for `target`. Returns the new subscription only when
    /// one was actually attached.
    pub fn observe(&mut self, target: Option<ItemHandle>) -> Option<Subscription> {
        if self.active.map(|sub| sub.target) == target {
            return None;
        }
        self.disconnect();

        let target = target?;
        self.next_id += 1;
        let subscription = Subscription {
            id: SubscriptionId(self.next_id),
            target,
        };
        trace!(id = self.next_id, index = target.index, post_id = target.post_id, "observer attached");
        self.active = Some(subscription);
        Some(subscription)
    }

    pub fn disconnect(&mut self) -> Option<Subscription> {
        let old = self.active.take();
        if let Some(sub) = old {
            trace!(id = sub.id.0, "observer detached");
        }
        old
    }

    pub fn active(&self) -> Option<Subscription> {
        self.active
    }

    pub fn is_current(&self, id: SubscriptionId) -> bool {
        self.active.is_some_and(|sub| sub.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(index: usize, post_id: PostId) -> ItemHandle {
        ItemHandle { index, post_id }
    }

    #[test]
    fn test_same_target_is_armed_once() {
        let mut observer = ProximityObserver::default();
        let first = observer.observe(Some(handle(9, 10)));
        assert!(first.is_some());
        assert!(observer.observe(Some(handle(9, 10))).is_none());
        assert_eq!(observer.active(), first);
    }

    #[test]
    fn test_new_target_replaces_old_subscription() {
        let mut observer = ProximityObserver::default();
        let old = observer.observe(Some(handle(9, 10))).unwrap();
        let new = observer.observe(Some(handle(19, 20))).unwrap();

        assert_ne!(old.id, new.id);
        assert!(!observer.is_current(old.id));
        assert!(observer.is_current(new.id));
    }

    #[test]
    fn test_observing_nothing_tears_down() {
        let mut observer = ProximityObserver::default();
        let sub = observer.observe(Some(handle(0, 1))).unwrap();
        assert!(observer.observe(None).is_none());
        assert!(!observer.is_current(sub.id));
        assert!(observer.active().is_none());
    }
}
