//! # feedboard
//!
//! Terminal front end: wires the configured adapters into the services and
//! drives them from stdin, one command per line.

mod commands;
mod render;
mod telemetry;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use api_adapters::{AuthInterceptor, HttpContentProvider};
use clap::Parser;
use commands::{Command, ParseError, HELP};
use configs::{LogFormat, Settings};
use domains::{ContentProvider, KeyValueStore, PostId, QueryState};
use services::comments::CommentThread;
use services::feed::PostCollection;
use services::login::LoginFormData;
use services::{App, AppConfig, FeedConfig, FeedHandle, QueryDebouncer};
use storage_adapters::{InMemoryKeyValueStore, JsonFileStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "feedboard")]
#[command(about = "Browse posts and comments from the terminal", long_about = None)]
struct Args {
    #[arg(long, help = "Settings file (defaults to ./feedboard.toml if present)")]
    config: Option<PathBuf>,

    #[arg(long, help = "Log output: pretty or json")]
    log_format: Option<LogFormat>,
}

struct Terminal {
    app: App,
    provider: Arc<dyn ContentProvider>,
    feed: FeedHandle,
    debouncer: QueryDebouncer,
    posts: Option<PostCollection>,
    threads: HashMap<PostId, Mutex<CommentThread>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref()).context("loading settings")?;
    telemetry::init_logging(args.log_format.unwrap_or(settings.log.format), &settings.log.filter);

    let storage: Arc<dyn KeyValueStore> = match settings.storage_path() {
        Some(path) => Arc::new(JsonFileStore::open(path).context("opening local storage")?),
        None => Arc::new(InMemoryKeyValueStore::new()),
    };

    let config = AppConfig {
        feed: FeedConfig {
            page_size: settings.feed.page_size,
            load_more_delay: settings.load_more_delay(),
        },
        comment_delay: settings.comment_delay(),
        debounce: settings.debounce(),
    };
    let app = App::new(config, storage, Arc::new(render::ConsoleNavigator));

    let http = HttpContentProvider::new(settings.api.base_url.clone(), settings.api_timeout())?;
    let provider: Arc<dyn ContentProvider> = Arc::new(AuthInterceptor::new(http, app.session().clone()));
    info!(base_url = %settings.api.base_url, "feedboard starting");

    let mut terminal = Terminal {
        feed: app.spawn_feed(),
        debouncer: app.spawn_debouncer(),
        app,
        provider,
        posts: None,
        threads: HashMap::new(),
    };
    terminal.load_posts().await?;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => terminal.run(command).await?,
            Err(ParseError::Empty) => {}
            Err(e) => println!("{e}"),
        }
    }

    info!("feedboard stopped");
    Ok(())
}

impl Terminal {
    async fn load_posts(&mut self) -> anyhow::Result<()> {
        self.feed.sync_source(QueryState::loading())?;
        let source = QueryState::from_result(self.provider.fetch_posts().await).map(PostCollection::from);
        if let Some(error) = &source.error {
            warn!(%error, "could not load posts");
        }
        self.posts = source.data.clone();
        self.feed.settle(services::feed::FeedCommand::SyncSource(source)).await?;
        Ok(())
    }

    async fn run(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Login {
                email,
                password,
                remember,
            } => {
                let mut form = self.app.login_form();
                form.set_remember_me(remember);
                let outcome = form.submit(LoginFormData::login(email, password));
                render::login_outcome(&outcome, &form);
            }
            Command::Register {
                email,
                password,
                confirm,
            } => {
                let mut form = self.app.login_form();
                form.toggle_mode();
                let outcome = form.submit(LoginFormData::register(email, password, confirm));
                render::login_outcome(&outcome, &form);
            }
            Command::Logout => self.app.logout(),
            Command::Scroll => {
                let snapshot = self.feed.reveal_more().await?;
                render::feed(&snapshot);
            }
            Command::SignIn => {
                self.app.acknowledge_auth_prompt(&self.feed)?;
                println!("Use `login <email> <password>` to sign in.");
            }
            Command::Dismiss => {
                self.feed.dismiss_prompt()?;
            }
            Command::Search(text) => {
                let mut changes = self.app.search().subscribe();
                self.debouncer.input(text);
                let wait = self.app.config().debounce + Duration::from_millis(50);
                if tokio::time::timeout(wait, changes.changed()).await.is_ok() {
                    self.show();
                }
            }
            Command::Toggle(field) => {
                let fields = self.app.search().toggle_field(field);
                println!("Searching in: {}", fields.iter().map(|f| f.label()).collect::<Vec<_>>().join(", "));
                self.show();
            }
            Command::Clear => {
                self.debouncer.input("");
                self.app.search().clear_query();
                self.show();
            }
            Command::Comments(post_id) => {
                let Ok(opened) = self.app.open_comments(post_id, &self.feed) else {
                    println!("Sign in to read comments. Type `signin` to go to the login page or `dismiss`.");
                    return Ok(());
                };
                let thread = self.threads.entry(post_id).or_insert(opened);
                thread.lock().await.sync_source(&QueryState::loading());
                let fetched = QueryState::from_result(self.provider.fetch_comments(post_id).await);
                if let Some(error) = &fetched.error {
                    warn!(%error, post_id, "could not load comments");
                }
                let mut thread = thread.lock().await;
                thread.sync_source(&fetched);
                render::thread(&thread);
            }
            Command::Comment { post_id, body } => {
                let thread = thread_entry(&mut self.threads, &self.app, post_id);
                match self.app.post_comment(thread, &body).await {
                    Ok(Some(comment)) => println!("Comment #{} posted.", comment.id),
                    Ok(None) => {}
                    Err(rejected) => println!("{rejected}"),
                }
            }
            Command::Show => self.show(),
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
        Ok(())
    }

    fn show(&self) {
        let view = self.app.home_view(self.posts.as_deref());
        render::home(&view, &self.feed.snapshot());
    }
}

fn thread_entry<'a>(
    threads: &'a mut HashMap<PostId, Mutex<CommentThread>>,
    app: &App,
    post_id: PostId,
) -> &'a Mutex<CommentThread> {
    threads
        .entry(post_id)
        .or_insert_with(|| app.comment_thread(post_id))
}
