//! Settles raw search-box input before it reaches the [`SearchStore`].
//!
//! Each keystroke restarts the quiet window; only the last value of a burst
//! becomes the query. Input still pending when the debouncer is dropped is
//! discarded.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::store::SearchStore;

pub struct QueryDebouncer {
    tx: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl QueryDebouncer {
    /// Must be called from within a tokio runtime.
    pub fn spawn(store: Arc<SearchStore>, delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(settle(rx, store, delay));
        Self { tx, task }
    }

    pub fn input(&self, value: impl Into<String>) {
        // The task only stops once `self` is dropped.
        let _ = self.tx.send(value.into());
    }
}

impl Drop for QueryDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn settle(mut rx: mpsc::UnboundedReceiver<String>, store: Arc<SearchStore>, delay: Duration) {
    let mut pending: Option<String> = None;
    loop {
        match pending.take() {
            None => match rx.recv().await {
                Some(value) => pending = Some(value),
                None => break,
            },
            Some(value) => {
                tokio::select! {
                    next = rx.recv() => match next {
                        Some(newer) => pending = Some(newer),
                        None => break,
                    },
                    _ = tokio::time::sleep(delay) => {
                        debug!(query = %value, "search input settled");
                        store.set_query(value);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_value_of_burst_is_applied() {
        let store = Arc::new(SearchStore::new());
        let debouncer = QueryDebouncer::spawn(store.clone(), Duration::from_millis(300));

        debouncer.input("r");
        debouncer.input("ru");
        debouncer.input("rust");

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(store.snapshot().query, "");

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(store.snapshot().query, "rust");
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_keystroke_restarts_window() {
        let store = Arc::new(SearchStore::new());
        let debouncer = QueryDebouncer::spawn(store.clone(), Duration::from_millis(300));

        debouncer.input("a");
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.input("ab");
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(store.snapshot().query, "");

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(store.snapshot().query, "ab");
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_input_is_dropped_with_debouncer() {
        let store = Arc::new(SearchStore::new());
        let debouncer = QueryDebouncer::spawn(store.clone(), Duration::from_millis(300));

        debouncer.input("gone");
        tokio::task::yield_now().await;
        drop(debouncer);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(store.snapshot().query, "");
    }
}
