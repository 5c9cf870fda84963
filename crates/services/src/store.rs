//! Watchable state container shared by every store.
//!
//! A store holds one immutable snapshot of its state. Each dispatched event
//! produces a complete next state through [`Reducer::reduce`] and replaces
//! the old one in a single step, so observers never see a half-applied
//! transition.

use tokio::sync::watch;

/// A state type that knows how to fold its own events.
pub trait Reducer: Clone + Send + Sync + 'static {
    type Event;

    fn reduce(&self, event: &Self::Event) -> Self;
}

pub struct Store<S: Reducer> {
    tx: watch::Sender<S>,
}

impl<S: Reducer> Store<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Folds `event` into the current state and returns the new snapshot.
    pub fn apply(&self, event: S::Event) -> S {
        let mut applied = None;
        self.tx.send_modify(|state| {
            *state = state.reduce(&event);
            applied = Some(state.clone());
        });
        applied.unwrap_or_else(|| self.snapshot())
    }

    pub fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    /// Reads the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Observers are woken after every applied event.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Counter(u32);

    impl Reducer for Counter {
        type Event = u32;

        fn reduce(&self, event: &u32) -> Self {
            Counter(self.0 + event)
        }
    }

    #[test]
    fn test_apply_returns_new_snapshot() {
        let store = Store::new(Counter(1));
        assert_eq!(store.apply(2), Counter(3));
        assert_eq!(store.read(|c| c.0), 3);
    }

    #[tokio::test]
    async fn test_subscribers_see_each_transition() {
        let store = Store::new(Counter(0));
        let mut rx = store.subscribe();

        store.apply(5);
        tokio_test::assert_ok!(rx.changed().await);
        assert_eq!(*rx.borrow_and_update(), Counter(5));
    }

    #[test]
    fn test_late_subscriber_only_sees_later_changes() {
        let store = Store::new(Counter(0));
        store.apply(1);
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.apply(2);
        tokio_test::block_on(async { tokio_test::assert_ok!(rx.changed().await) });
        assert_eq!(*rx.borrow(), Counter(3));
    }
}
