//! Chooses what the home page body shows for the current collection and
//! search state.

use domains::Post;

use crate::search::{FilterFields, SearchState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeView<'a> {
    /// The collection has not arrived yet.
    Pending,
    Search(SearchPage<'a>),
    Feed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage<'a> {
    pub query: String,
    pub fields: FilterFields,
    pub results: Vec<&'a Post>,
    pub summary: String,
}

impl SearchPage<'_> {
    /// `Searching in: Post, Title` style caption.
    pub fn fields_caption(&self) -> String {
        let labels: Vec<_> = self.fields.iter().map(|f| f.label()).collect();
        format!("Searching in: {}", labels.join(", "))
    }

    pub fn empty_message(&self) -> Option<String> {
        self.results
            .is_empty()
            .then(|| format!("No posts found matching \"{}\"", self.query))
    }
}

pub fn select_view<'a>(posts: Option<&'a [Post]>, search: &SearchState) -> HomeView<'a> {
    let Some(posts) = posts else {
        return HomeView::Pending;
    };
    if !search.is_active() {
        return HomeView::Feed;
    }

    let results = search.results(posts);
    HomeView::Search(SearchPage {
        query: search.query.clone(),
        fields: search.fields,
        summary: search.summary(posts.len(), results.len()),
        results,
    })
}
