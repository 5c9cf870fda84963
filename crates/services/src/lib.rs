//! # services
//!
//! Client-side state for feedboard: the mock user directory and session,
//! the authentication gate, search filtering, the infinite-scroll feed and
//! the comment and login flows.
//!
//! Every store is an explicitly constructed container. The [`app::App`]
//! composition root wires them together; nothing here is a global.

pub mod app;
pub mod comments;
pub mod directory;
pub mod error;
pub mod feed;
pub mod gate;
pub mod home;
pub mod login;
pub mod search;
pub mod session;
pub mod store;

pub use app::{App, AppConfig, HOME_PATH, LOGIN_PATH};
pub use comments::{CommentThread, PendingComment, PostRejected};
pub use directory::UserDirectory;
pub use error::ServiceError;
pub use feed::{FeedConfig, FeedController, FeedHandle, FeedRuntime, FeedSnapshot};
pub use gate::{AuthGate, GateSignal};
pub use home::{select_view, HomeView, SearchPage};
pub use login::{FormMode, LoginForm, LoginFormData, SubmitOutcome};
pub use search::{filter_posts, FilterFields, QueryDebouncer, SearchField, SearchState, SearchStore};
pub use session::{SessionAction, SessionState, SessionStore, INVALID_CREDENTIALS};
