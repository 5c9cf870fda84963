//! Plain-text views for the terminal.

use domains::{Navigator, Post};
use services::comments::CommentThread;
use services::feed::FeedPhase;
use services::login::LoginForm;
use services::{FeedSnapshot, HomeView, SearchPage, SubmitOutcome};
use tracing::debug;

/// Prints route changes instead of switching pages.
#[derive(Debug, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn push(&self, path: &str) {
        debug!(path, "navigate (push)");
        println!("-> {path}");
    }

    fn replace(&self, path: &str) {
        debug!(path, "navigate (replace)");
        println!("=> {path}");
    }
}

fn post_line(post: &Post) {
    println!("  #{:<3} @{:<8} {}", post.id, post.username(), post.title);
}

pub fn home(view: &HomeView<'_>, feed: &FeedSnapshot) {
    match view {
        HomeView::Pending => println!("(posts are still loading)"),
        HomeView::Search(page) => search(page),
        HomeView::Feed => self::feed(feed),
    }
}

pub fn feed(snapshot: &FeedSnapshot) {
    match snapshot.phase {
        FeedPhase::Loading => println!("Loading posts..."),
        FeedPhase::Failed => println!("{}", snapshot.error_message.unwrap_or_default()),
        FeedPhase::Empty => println!("No posts yet"),
        FeedPhase::Loaded | FeedPhase::LoadingMore => {
            snapshot.visible.iter().for_each(post_line);
            if snapshot.is_loading_more {
                println!("  Loading more posts...");
            }
            if snapshot.end_of_content {
                println!("  You've reached the end.");
            }
        }
    }
    if snapshot.auth_prompt {
        println!("Sign in to see more posts. Type `signin` to go to the login page or `dismiss`.");
    }
}

pub fn search(page: &SearchPage<'_>) {
    println!("{}", page.summary);
    println!("Search Results for \"{}\"", page.query);
    println!("{}", page.fields_caption());
    match page.empty_message() {
        Some(message) => println!("{message}"),
        None => page.results.iter().copied().for_each(post_line),
    }
}

pub fn thread(thread: &CommentThread) {
    if thread.is_loading() {
        println!("Loading comments...");
        return;
    }
    if let Some(error) = thread.error() {
        println!("{error}");
        return;
    }
    if thread.comments().is_empty() {
        println!("No comments yet for this post");
    }
    for comment in thread.comments() {
        println!("  [{}] {}: {}", comment.id, comment.email, comment.body);
    }
}

pub fn login_outcome(outcome: &SubmitOutcome, form: &LoginForm) {
    match outcome {
        SubmitOutcome::Invalid(errors) => errors.iter().for_each(|e| println!("  {e}")),
        SubmitOutcome::LoggedIn => println!("Signed in."),
        SubmitOutcome::Rejected => println!("{}", form.login_error().unwrap_or_default()),
        SubmitOutcome::Failed => println!("Something went wrong, see the log."),
    }
}
