//! Case-insensitive substring search over a post collection.
//!
//! The collection is always passed in; the engine owns no state. Results
//! keep the input order and are never ranked or truncated.

use std::fmt;
use std::str::FromStr;

use domains::Post;
use thiserror::Error;

/// A post field the search can look into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// The post body.
    Post,
    Title,
    /// The derived `user{id}` handle.
    Username,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [SearchField::Post, SearchField::Title, SearchField::Username];

    pub fn label(self) -> &'static str {
        match self {
            SearchField::Post => "Post",
            SearchField::Title => "Title",
            SearchField::Username => "Username",
        }
    }

    fn bit(self) -> u8 {
        match self {
            SearchField::Post => 0b001,
            SearchField::Title => 0b010,
            SearchField::Username => 0b100,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown search field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for SearchField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchField::ALL
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// The set of active fields. Defaults to every field.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterFields(u8);

impl FilterFields {
    pub const fn all() -> Self {
        FilterFields(0b111)
    }

    pub const fn none() -> Self {
        FilterFields(0)
    }

    pub fn only(field: SearchField) -> Self {
        FilterFields(field.bit())
    }

    pub fn contains(self, field: SearchField) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, field: SearchField) {
        self.0 |= field.bit();
    }

    pub fn remove(&mut self, field: SearchField) {
        self.0 &= !field.bit();
    }

    pub fn toggled(self, field: SearchField) -> Self {
        FilterFields(self.0 ^ field.bit())
    }

    pub fn iter(self) -> impl Iterator<Item = SearchField> {
        SearchField::ALL
            .into_iter()
            .filter(move |field| self.contains(*field))
    }
}

impl Default for FilterFields {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Debug for FilterFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<SearchField> for FilterFields {
    fn from_iter<I: IntoIterator<Item = SearchField>>(iter: I) -> Self {
        let mut fields = FilterFields::none();
        for field in iter {
            fields.insert(field);
        }
        fields
    }
}

/// Returns every post matching `query` in at least one active field.
///
/// A blank query yields nothing, and so does an empty field set: neither
/// case means "show everything".
pub fn filter_posts<'a>(posts: &'a [Post], query: &str, fields: FilterFields) -> Vec<&'a Post> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || fields.is_empty() {
        return Vec::new();
    }

    posts
        .iter()
        .filter(|post| matches(post, &needle, fields))
        .collect()
}

fn matches(post: &Post, needle: &str, fields: FilterFields) -> bool {
    fields.iter().any(|field| match field {
        SearchField::Post => post.body.to_lowercase().contains(needle),
        SearchField::Title => post.title.to_lowercase().contains(needle),
        SearchField::Username => post.username().to_lowercase().contains(needle),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, user_id: u64, title: &str, body: &str) -> Post {
        Post {
            id,
            user_id,
            title: title.into(),
            body: body.into(),
        }
    }

    fn fixture() -> Vec<Post> {
        vec![
            post(1, 1, "test1", "body test1"),
            post(2, 2, "test2", "body test2"),
            post(3, 1, "test3", "body test3"),
            post(4, 3, "test4", "body test4"),
        ]
    }

    fn ids(posts: &[&Post]) -> Vec<u64> {
        posts.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let posts = fixture();
        assert!(filter_posts(&posts, "", FilterFields::all()).is_empty());
        assert!(filter_posts(&posts, "   ", FilterFields::all()).is_empty());
    }

    #[test]
    fn test_no_active_fields_matches_nothing() {
        let posts = fixture();
        assert!(filter_posts(&posts, "test", FilterFields::none()).is_empty());
    }

    #[test]
    fn test_username_matches_derived_handle_only() {
        let posts = fixture();
        let found = filter_posts(&posts, "user1", FilterFields::only(SearchField::Username));
        assert_eq!(ids(&found), vec![1, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let posts = fixture();
        let upper = filter_posts(&posts, "TEST1", FilterFields::all());
        let lower = filter_posts(&posts, "  test1 ", FilterFields::all());
        assert_eq!(ids(&upper), ids(&lower));
        assert_eq!(ids(&upper), vec![1]);
    }

    #[test]
    fn test_title_and_body_fields_are_independent() {
        let posts = vec![post(1, 9, "alpha", "beta"), post(2, 9, "beta", "gamma")];

        let title = filter_posts(&posts, "beta", FilterFields::only(SearchField::Title));
        assert_eq!(ids(&title), vec![2]);

        let body = filter_posts(&posts, "beta", FilterFields::only(SearchField::Post));
        assert_eq!(ids(&body), vec![1]);

        let both: FilterFields = [SearchField::Title, SearchField::Post].into_iter().collect();
        assert_eq!(ids(&filter_posts(&posts, "beta", both)), vec![1, 2]);
    }

    #[test]
    fn test_results_keep_source_order() {
        let posts = vec![post(9, 1, "x", "match"), post(2, 1, "x", "match"), post(5, 1, "x", "nope")];
        let found = filter_posts(&posts, "match", FilterFields::all());
        assert_eq!(ids(&found), vec![9, 2]);
    }

    #[test]
    fn test_every_result_satisfies_an_active_predicate() {
        let posts = fixture();
        let fields = FilterFields::only(SearchField::Title).toggled(SearchField::Username);
        for post in filter_posts(&posts, "3", fields) {
            assert!(post.title.contains('3') || post.username().contains('3'));
        }
    }

    #[test]
    fn test_field_parsing_and_toggling() {
        assert_eq!("username".parse::<SearchField>(), Ok(SearchField::Username));
        assert_eq!(" Title ".parse::<SearchField>(), Ok(SearchField::Title));
        assert!("author".parse::<SearchField>().is_err());

        let fields = FilterFields::all().toggled(SearchField::Post);
        assert!(!fields.contains(SearchField::Post));
        assert!(fields.toggled(SearchField::Post).contains(SearchField::Post));
    }
}
