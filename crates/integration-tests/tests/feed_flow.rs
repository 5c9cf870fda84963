use std::sync::Arc;

use domains::{ContentProvider, QueryState};
use integration_tests::{numbered_posts, RecordingNavigator, StaticProvider};
use services::directory::{SEEDED_EMAIL, SEEDED_PASSWORD};
use services::feed::{FeedCommand, PostCollection};
use services::{App, AppConfig, GateSignal, HomeView};
use storage_adapters::InMemoryKeyValueStore;

fn app() -> (App, Arc<RecordingNavigator>) {
    let navigator = RecordingNavigator::new();
    let app = App::new(
        AppConfig::default(),
        Arc::new(InMemoryKeyValueStore::new()),
        navigator.clone(),
    );
    (app, navigator)
}

#[tokio::test(start_paused = true)]
async fn pagination_follows_min_of_pages_and_total() {
    let (app, _) = app();
    app.session().login(SEEDED_EMAIL, SEEDED_PASSWORD);
    let feed = app.spawn_feed();
    let page = app.config().feed.page_size;

    let first = feed
        .settle(FeedCommand::SyncSource(QueryState::ready(numbered_posts(37))))
        .await
        .unwrap();
    assert_eq!(first.visible.len(), page.min(37));

    for k in 1..=5 {
        let snapshot = feed.reveal_more().await.unwrap();
        assert_eq!(snapshot.visible.len(), ((k + 1) * page).min(37));
        assert_eq!(snapshot.has_more, 37 > snapshot.visible.len());
    }
}

#[tokio::test(start_paused = true)]
async fn anonymous_reader_hits_prompt_then_signs_in() {
    let (app, navigator) = app();
    let feed = app.spawn_feed();

    let provider = StaticProvider {
        posts: numbered_posts(12).to_vec(),
        ..StaticProvider::default()
    };
    let source = QueryState::from_result(provider.fetch_posts().await).map(PostCollection::from);
    feed.settle(FeedCommand::SyncSource(source)).await.unwrap();

    let blocked = feed.reveal_more().await.unwrap();
    assert!(blocked.auth_prompt);
    assert_eq!((blocked.page, blocked.visible.len()), (1, 10));

    app.acknowledge_auth_prompt(&feed).unwrap();
    feed.wait_for(|s| !s.auth_prompt).await.unwrap();
    assert_eq!(navigator.history(), vec!["push:/login".to_string()]);

    let mut form = app.login_form();
    form.submit(services::LoginFormData::login(SEEDED_EMAIL, SEEDED_PASSWORD));
    assert_eq!(navigator.history().last().map(String::as_str), Some("replace:/"));

    let grown = feed.reveal_more().await.unwrap();
    assert_eq!(grown.visible.len(), 12);
    assert!(grown.end_of_content);
}

#[tokio::test(start_paused = true)]
async fn anonymous_comments_raise_prompt_until_signed_in() {
    let (app, navigator) = app();
    let feed = app.spawn_feed();
    feed.settle(FeedCommand::SyncSource(QueryState::ready(numbered_posts(12))))
        .await
        .unwrap();

    assert_eq!(app.open_comments(4, &feed).err(), Some(GateSignal::AuthenticationRequired));
    let prompted = feed.wait_for(|s| s.auth_prompt).await.unwrap();
    assert_eq!(prompted.visible.len(), 10);
    assert!(navigator.history().is_empty());

    app.acknowledge_auth_prompt(&feed).unwrap();
    feed.wait_for(|s| !s.auth_prompt).await.unwrap();
    app.session().login(SEEDED_EMAIL, SEEDED_PASSWORD);

    let thread = app.open_comments(4, &feed).unwrap();
    assert_eq!(thread.lock().await.post_id(), 4);
}

#[tokio::test(start_paused = true)]
async fn search_takes_over_home_view_and_hands_back() {
    let (app, _) = app();
    let posts = numbered_posts(30);
    let debouncer = app.spawn_debouncer();

    assert_eq!(app.home_view(None), HomeView::Pending);
    assert_eq!(app.home_view(Some(&posts)), HomeView::Feed);

    debouncer.input("post 2");
    tokio::time::sleep(app.config().debounce * 2).await;
    let HomeView::Search(page) = app.home_view(Some(&posts)) else {
        panic!("search should be active");
    };
    // "post 2", "post 20" ... "post 29"
    assert_eq!(page.results.len(), 11);

    app.search().clear_query();
    assert_eq!(app.home_view(Some(&posts)), HomeView::Feed);
}
