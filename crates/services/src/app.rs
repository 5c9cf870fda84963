//! # App
//!
//! Composition root. Builds the directory, session, gate and search stores
//! once and hands out the per-page pieces (login form, feed, comment thread)
//! already wired to them.

use std::sync::Arc;
use std::time::Duration;

use domains::{Comment, KeyValueStore, Navigator, Post, PostId};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::comments::{CommentThread, PostRejected, DEFAULT_COMMENT_DELAY};
use crate::directory::UserDirectory;
use crate::error::ServiceError;
use crate::feed::{FeedConfig, FeedHandle, FeedRuntime};
use crate::gate::{AuthGate, GateSignal};
use crate::home::{select_view, HomeView};
use crate::login::LoginForm;
use crate::search::{QueryDebouncer, SearchStore};
use crate::session::SessionStore;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub comment_delay: Duration,
    pub debounce: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            comment_delay: DEFAULT_COMMENT_DELAY,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

pub struct App {
    config: AppConfig,
    session: Arc<SessionStore>,
    gate: AuthGate,
    search: Arc<SearchStore>,
    storage: Arc<dyn KeyValueStore>,
    navigator: Arc<dyn Navigator>,
}

impl App {
    /// App over the seeded directory.
    pub fn new(config: AppConfig, storage: Arc<dyn KeyValueStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_directory(config, Arc::new(UserDirectory::new()), storage, navigator)
    }

    pub fn with_directory(
        config: AppConfig,
        directory: Arc<UserDirectory>,
        storage: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(directory));
        Self {
            config,
            gate: AuthGate::new(session.clone()),
            session,
            search: Arc::new(SearchStore::new()),
            storage,
            navigator,
        }
    }

    pub fn login_form(&self) -> LoginForm {
        LoginForm::open(self.session.clone(), self.storage.clone(), self.navigator.clone())
    }

    pub fn logout(&self) {
        self.session.logout();
        info!("signed out");
        self.navigator.push(LOGIN_PATH);
    }

    /// The user chose to sign in from the feed's prompt.
    pub fn acknowledge_auth_prompt(&self, feed: &FeedHandle) -> Result<(), ServiceError> {
        self.navigator.push(LOGIN_PATH);
        feed.dismiss_prompt()
    }

    /// Must be called from within a tokio runtime.
    pub fn spawn_feed(&self) -> FeedHandle {
        FeedRuntime::spawn(self.config.feed, self.gate.clone())
    }

    /// Must be called from within a tokio runtime.
    pub fn spawn_debouncer(&self) -> QueryDebouncer {
        QueryDebouncer::spawn(self.search.clone(), self.config.debounce)
    }

    pub async fn post_comment(&self, thread: &Mutex<CommentThread>, draft: &str) -> Result<Option<Comment>, PostRejected> {
        CommentThread::submit(thread, draft, &self.gate, self.config.comment_delay).await
    }

    /// Gated entry into a post's comments. An anonymous reader gets the
    /// feed's sign-in prompt instead of a thread.
    pub fn open_comments(&self, post_id: PostId, feed: &FeedHandle) -> Result<Mutex<CommentThread>, GateSignal> {
        self.gate.guard(
            feed,
            |_| Ok(self.comment_thread(post_id)),
            |feed, signal| {
                if let Err(e) = feed.raise_prompt() {
                    warn!(error = %e, "could not show sign-in prompt");
                }
                Err(signal)
            },
        )
    }

    pub fn comment_thread(&self, post_id: PostId) -> Mutex<CommentThread> {
        Mutex::new(CommentThread::new(post_id))
    }

    pub fn home_view<'a>(&self, posts: Option<&'a [Post]>) -> HomeView<'a> {
        select_view(posts, &self.search.snapshot())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn search(&self) -> &Arc<SearchStore> {
        &self.search
    }
}

#[cfg(test)]
mod tests {
    use domains::{MockKeyValueStore, MockNavigator, QueryState};
    use mockall::predicate::eq;

    use super::*;
    use crate::directory::{SEEDED_EMAIL, SEEDED_PASSWORD};
    use crate::feed::FeedCommand;

    fn app(navigator: MockNavigator) -> App {
        App::new(AppConfig::default(), Arc::new(MockKeyValueStore::new()), Arc::new(navigator))
    }

    #[test]
    fn test_logout_returns_to_login_page() {
        let mut navigator = MockNavigator::new();
        navigator.expect_push().with(eq(LOGIN_PATH)).times(1).return_const(());

        let app = app(navigator);
        app.session().login(SEEDED_EMAIL, SEEDED_PASSWORD);
        app.logout();
        assert!(!app.session().is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_prompt_acknowledgement_navigates_and_dismisses() {
        let mut navigator = MockNavigator::new();
        navigator.expect_push().with(eq(LOGIN_PATH)).times(1).return_const(());
        let app = app(navigator);

        let feed = app.spawn_feed();
        let posts: Vec<Post> = (1..=15)
            .map(|id| Post {
                id,
                user_id: 1,
                title: String::new(),
                body: String::new(),
            })
            .collect();
        feed.settle(FeedCommand::SyncSource(QueryState::ready(posts.into())))
            .await
            .unwrap();
        assert!(feed.reveal_more().await.unwrap().auth_prompt);

        app.acknowledge_auth_prompt(&feed).unwrap();
        let snapshot = feed.wait_for(|s| !s.auth_prompt).await.unwrap();
        assert_eq!(snapshot.visible.len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_query_drives_home_view() {
        let app = app(MockNavigator::new());
        let posts = vec![Post {
            id: 1,
            user_id: 3,
            title: "hello".into(),
            body: "world".into(),
        }];
        let debouncer = app.spawn_debouncer();

        assert_eq!(app.home_view(Some(&posts)), HomeView::Feed);
        debouncer.input("user3");
        tokio::time::sleep(app.config().debounce + Duration::from_millis(1)).await;

        let HomeView::Search(page) = app.home_view(Some(&posts)) else {
            panic!("expected search view");
        };
        assert_eq!(page.results.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_anonymous_open_comments_raises_prompt() {
        let app = app(MockNavigator::new());
        let feed = app.spawn_feed();

        let blocked = app.open_comments(3, &feed);
        assert_eq!(blocked.err(), Some(GateSignal::AuthenticationRequired));
        let snapshot = feed.wait_for(|s| s.auth_prompt).await.unwrap();
        assert!(snapshot.visible.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_signed_in_open_comments_returns_thread() {
        let app = app(MockNavigator::new());
        app.session().login(SEEDED_EMAIL, SEEDED_PASSWORD);
        let feed = app.spawn_feed();

        let thread = app.open_comments(3, &feed).unwrap();
        assert_eq!(thread.lock().await.post_id(), 3);
        let snapshot = feed.settle(FeedCommand::DismissPrompt).await.unwrap();
        assert!(!snapshot.auth_prompt);
    }

    #[tokio::test(start_paused = true)]
    async fn test_post_comment_uses_configured_delay() {
        let app = app(MockNavigator::new());
        app.session().login(SEEDED_EMAIL, SEEDED_PASSWORD);

        let thread = app.comment_thread(4);
        thread.lock().await.sync_source(&QueryState::ready(Vec::new()));
        let posted = app.post_comment(&thread, "nice").await.unwrap().unwrap();
        assert_eq!(posted.post_id, 4);
        assert_eq!(posted.id, 1);
    }
}
