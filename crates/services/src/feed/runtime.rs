//! # FeedRuntime
//!
//! Owns a [`FeedController`] on a single task and processes commands one at
//! a time, so every transition happens on one logical thread. The load-more
//! delay runs as a detached sleep that posts the granted ticket back into the
//! same loop. Each processed command publishes a fresh [`FeedSnapshot`].

use domains::QueryState;
use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use super::controller::{FeedConfig, FeedController, FeedSnapshot, LoadMoreTicket, PostCollection, RevealOutcome};
use super::observer::SubscriptionId;
use crate::error::ServiceError;
use crate::gate::AuthGate;

#[derive(Debug)]
pub enum FeedCommand {
    SyncSource(QueryState<PostCollection>),
    Intersect(SubscriptionId),
    RaisePrompt,
    DismissPrompt,
}

pub struct FeedRuntime;

impl FeedRuntime {
    /// Starts the feed task. Must be called from within a tokio runtime.
    /// The task ends once every [`FeedHandle`] is dropped.
    pub fn spawn(config: FeedConfig, gate: AuthGate) -> FeedHandle {
        let controller = FeedController::new(config);
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());

        tokio::spawn(run(controller, gate, commands_rx, snapshot_tx));

        FeedHandle {
            commands: commands_tx,
            snapshots: snapshot_rx,
        }
    }
}

#[instrument(skip_all)]
async fn run(
    mut controller: FeedController,
    gate: AuthGate,
    mut commands: mpsc::UnboundedReceiver<FeedCommand>,
    snapshots: watch::Sender<FeedSnapshot>,
) {
    let (ready_tx, mut ready_rx) = mpsc::unbounded_channel::<LoadMoreTicket>();
    let delay = controller.config().load_more_delay;
    let mut revision = 0u64;

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else { break };
                match command {
                    FeedCommand::SyncSource(query) => controller.sync_source(&query),
                    FeedCommand::Intersect(id) => {
                        if let RevealOutcome::Advanced(ticket) = controller.on_intersect(id, &gate) {
                            let ready_tx = ready_tx.clone();
                            tokio::spawn(async move {
                                tokio::time::sleep(delay).await;
                                let _ = ready_tx.send(ticket);
                            });
                        }
                    }
                    FeedCommand::RaisePrompt => controller.raise_auth_prompt(),
                    FeedCommand::DismissPrompt => controller.dismiss_auth_prompt(),
                }
            }
            Some(ticket) = ready_rx.recv() => {
                controller.complete_load(ticket);
            }
        }

        controller.observe_last();
        revision += 1;
        let mut snapshot = controller.snapshot();
        snapshot.revision = revision;
        snapshots.send_replace(snapshot);
    }
    debug!("feed runtime stopped");
}

/// Cheap, cloneable front end to a running feed.
#[derive(Clone)]
pub struct FeedHandle {
    commands: mpsc::UnboundedSender<FeedCommand>,
    snapshots: watch::Receiver<FeedSnapshot>,
}

impl FeedHandle {
    pub fn send(&self, command: FeedCommand) -> Result<(), ServiceError> {
        self.commands
            .send(command)
            .map_err(|_| ServiceError::FeedStopped)
    }

    pub fn sync_source(&self, query: QueryState<PostCollection>) -> Result<(), ServiceError> {
        self.send(FeedCommand::SyncSource(query))
    }

    pub fn intersect(&self, id: SubscriptionId) -> Result<(), ServiceError> {
        self.send(FeedCommand::Intersect(id))
    }

    pub fn raise_prompt(&self) -> Result<(), ServiceError> {
        self.send(FeedCommand::RaisePrompt)
    }

    pub fn dismiss_prompt(&self) -> Result<(), ServiceError> {
        self.send(FeedCommand::DismissPrompt)
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshots.clone()
    }

    /// Waits for the first snapshot satisfying `done`.
    pub async fn wait_for(&self, done: impl FnMut(&FeedSnapshot) -> bool) -> Result<FeedSnapshot, ServiceError> {
        let mut rx = self.snapshots.clone();
        let snapshot = rx.wait_for(done).await.map_err(|_| ServiceError::FeedStopped)?;
        Ok(snapshot.clone())
    }

    /// Sends `command`, then waits until the runtime has processed it and no
    /// page load is in flight.
    pub async fn settle(&self, command: FeedCommand) -> Result<FeedSnapshot, ServiceError> {
        let seen = self.snapshots.borrow().revision;
        self.send(command)?;
        self.wait_for(|s| s.revision > seen && !s.is_loading_more).await
    }

    /// Fires the proximity trigger for whatever item is currently observed.
    pub async fn reveal_more(&self) -> Result<FeedSnapshot, ServiceError> {
        match self.snapshot().subscription {
            Some(sub) => self.settle(FeedCommand::Intersect(sub.id)).await,
            None => Ok(self.snapshot()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use domains::{Post, ProviderError};

    use super::*;
    use crate::directory::{UserDirectory, SEEDED_EMAIL, SEEDED_PASSWORD};
    use crate::feed::controller::FeedPhase;
    use crate::session::SessionStore;

    fn posts(len: u64) -> PostCollection {
        (1..=len)
            .map(|id| Post {
                id,
                user_id: 1,
                title: format!("t{id}"),
                body: format!("b{id}"),
            })
            .collect()
    }

    fn setup(signed_in: bool) -> (FeedHandle, Arc<SessionStore>) {
        let session = Arc::new(SessionStore::new(Arc::new(UserDirectory::new())));
        if signed_in {
            session.login(SEEDED_EMAIL, SEEDED_PASSWORD);
        }
        let config = FeedConfig {
            page_size: 10,
            load_more_delay: Duration::from_millis(300),
        };
        (FeedRuntime::spawn(config, AuthGate::new(session.clone())), session)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_page_and_subscription_published() {
        let (feed, _) = setup(true);
        let snapshot = feed
            .settle(FeedCommand::SyncSource(QueryState::ready(posts(25))))
            .await
            .unwrap();

        assert_eq!(snapshot.visible.len(), 10);
        assert!(snapshot.has_more);
        assert_eq!(snapshot.subscription.unwrap().target.index, 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_arrives_only_after_delay() {
        let (feed, _) = setup(true);
        feed.settle(FeedCommand::SyncSource(QueryState::ready(posts(25))))
            .await
            .unwrap();

        let sub = feed.snapshot().subscription.unwrap();
        feed.intersect(sub.id).unwrap();
        let loading = feed.wait_for(|s| s.is_loading_more).await.unwrap();
        assert_eq!(loading.phase, FeedPhase::LoadingMore);
        assert_eq!(loading.visible.len(), 10);

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(feed.snapshot().visible.len(), 10);

        let done = feed.wait_for(|s| !s.is_loading_more).await.unwrap();
        assert_eq!(done.visible.len(), 20);
        assert_eq!(done.page, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_until_exhausted() {
        let (feed, _) = setup(true);
        feed.settle(FeedCommand::SyncSource(QueryState::ready(posts(25))))
            .await
            .unwrap();

        feed.reveal_more().await.unwrap();
        let last = feed.reveal_more().await.unwrap();
        assert_eq!(last.visible.len(), 25);
        assert!(last.end_of_content);

        let after = feed.reveal_more().await.unwrap();
        assert_eq!(after.visible.len(), 25);
        assert_eq!(after.page, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_anonymous_reveal_raises_prompt() {
        let (feed, session) = setup(false);
        feed.settle(FeedCommand::SyncSource(QueryState::ready(posts(25))))
            .await
            .unwrap();

        let blocked = feed.reveal_more().await.unwrap();
        assert!(blocked.auth_prompt);
        assert_eq!(blocked.page, 1);
        assert_eq!(blocked.visible.len(), 10);

        let dismissed = feed.settle(FeedCommand::DismissPrompt).await.unwrap();
        assert!(!dismissed.auth_prompt);

        session.login(SEEDED_EMAIL, SEEDED_PASSWORD);
        let grown = feed.reveal_more().await.unwrap();
        assert_eq!(grown.visible.len(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_error_is_surfaced() {
        let (feed, _) = setup(true);
        let failed = feed
            .settle(FeedCommand::SyncSource(QueryState::failed(ProviderError::Status {
                status: 500,
                url: "posts".into(),
            })))
            .await
            .unwrap();
        assert_eq!(failed.phase, FeedPhase::Failed);
        assert!(failed.subscription.is_none());
    }
}
