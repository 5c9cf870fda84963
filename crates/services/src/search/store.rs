//! Query text plus active fields. Fields persist across query changes.

use domains::Post;
use tokio::sync::watch;
use tracing::debug;

use super::engine::{filter_posts, FilterFields, SearchField};
use crate::store::{Reducer, Store};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub fields: FilterFields,
}

impl SearchState {
    /// Whether the home view should show search results instead of the feed.
    /// Whitespace counts: such a query shows an empty result list.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn results<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        filter_posts(posts, &self.query, self.fields)
    }

    /// Header line above the result list.
    pub fn summary(&self, total: usize, matched: usize) -> String {
        if self.is_active() {
            format!("{matched} results found")
        } else {
            format!("{total} total posts")
        }
    }
}

#[derive(Debug)]
pub enum SearchEvent {
    QuerySet(String),
    QueryCleared,
    FieldToggled(SearchField),
}

impl Reducer for SearchState {
    type Event = SearchEvent;

    fn reduce(&self, event: &SearchEvent) -> Self {
        match event {
            SearchEvent::QuerySet(query) => SearchState {
                query: query.clone(),
                fields: self.fields,
            },
            SearchEvent::QueryCleared => SearchState {
                query: String::new(),
                fields: self.fields,
            },
            SearchEvent::FieldToggled(field) => SearchState {
                query: self.query.clone(),
                fields: self.fields.toggled(*field),
            },
        }
    }
}

pub struct SearchStore {
    store: Store<SearchState>,
}

impl Default for SearchStore {
    fn default() -> Self {
        Self {
            store: Store::new(SearchState::default()),
        }
    }
}

impl SearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self, event: SearchEvent) -> SearchState {
        debug!(?event, "search transition");
        self.store.apply(event)
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.dispatch(SearchEvent::QuerySet(query.into()));
    }

    pub fn clear_query(&self) {
        self.dispatch(SearchEvent::QueryCleared);
    }

    pub fn toggle_field(&self, field: SearchField) -> FilterFields {
        self.dispatch(SearchEvent::FieldToggled(field)).fields
    }

    pub fn snapshot(&self) -> SearchState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.store.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_empty_query_and_all_fields() {
        let state = SearchStore::new().snapshot();
        assert_eq!(state.query, "");
        assert_eq!(state.fields, FilterFields::all());
        assert!(!state.is_active());
    }

    #[test]
    fn test_fields_survive_query_changes() {
        let store = SearchStore::new();
        store.toggle_field(SearchField::Title);
        store.set_query("rust");
        store.clear_query();
        store.set_query("again");

        let state = store.snapshot();
        assert_eq!(state.query, "again");
        assert!(!state.fields.contains(SearchField::Title));
        assert!(state.fields.contains(SearchField::Post));
    }

    #[test]
    fn test_toggle_twice_restores_field() {
        let store = SearchStore::new();
        store.toggle_field(SearchField::Username);
        assert_eq!(store.toggle_field(SearchField::Username), FilterFields::all());
    }

    #[test]
    fn test_summary_switches_on_query() {
        let store = SearchStore::new();
        assert_eq!(store.snapshot().summary(100, 0), "100 total posts");
        store.set_query("x");
        assert_eq!(store.snapshot().summary(100, 4), "4 results found");
    }

    #[test]
    fn test_whitespace_query_is_active_but_matches_nothing() {
        let store = SearchStore::new();
        store.set_query("  ");
        let state = store.snapshot();
        let posts = vec![Post {
            id: 1,
            user_id: 1,
            title: " ".into(),
            body: " ".into(),
        }];
        assert!(state.is_active());
        assert!(state.results(&posts).is_empty());
    }
}
