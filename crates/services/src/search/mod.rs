//! Multi-field post search.
//!
//! [`engine`] is the pure filter; [`store`] holds the query and the active
//! fields; [`debounce`] settles raw keystrokes into queries.

pub mod debounce;
pub mod engine;
pub mod store;

pub use debounce::QueryDebouncer;
pub use engine::{filter_posts, FilterFields, SearchField, UnknownField};
pub use store::{SearchEvent, SearchState, SearchStore};
