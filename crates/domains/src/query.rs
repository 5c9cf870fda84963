//! The three observable fields every fetched resource exposes to the core.

use crate::errors::ProviderError;

/// Loading / data / error triple for one fetched resource.
///
/// `Default` is the idle state: nothing requested yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState<T> {
    pub is_loading: bool,
    pub data: Option<T>,
    pub error: Option<ProviderError>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            is_loading: false,
            data: None,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    pub fn ready(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn failed(error: ProviderError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Settles a finished fetch into a query state.
    pub fn from_result(result: Result<T, ProviderError>) -> Self {
        match result {
            Ok(data) => Self::ready(data),
            Err(error) => Self::failed(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        QueryState {
            is_loading: self.is_loading,
            data: self.data.map(f),
            error: self.error,
        }
    }
}
