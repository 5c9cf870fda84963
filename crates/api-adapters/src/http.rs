//! # HttpContentProvider
//!
//! Plain JSON GETs against the REST backend. Every failure is folded into a
//! [`ProviderError`]; callers never see reqwest types.

use std::time::Duration;

use async_trait::async_trait;
use domains::{Comment, ContentProvider, Post, PostId, ProviderError, User};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::urls::ApiUrls;

pub struct HttpContentProvider {
    client: Client,
    urls: ApiUrls,
}

impl HttpContentProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            urls: ApiUrls::new(base_url),
        })
    }

    pub fn urls(&self) -> &ApiUrls {
        &self.urls
    }

    #[instrument(skip(self))]
    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "backend returned an error status");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        debug!("response decoded");
        Ok(body)
    }
}

#[async_trait]
impl ContentProvider for HttpContentProvider {
    async fn fetch_posts(&self) -> Result<Vec<Post>, ProviderError> {
        self.get_json(self.urls.all_posts()).await
    }

    async fn fetch_post(&self, id: PostId) -> Result<Post, ProviderError> {
        self.get_json(self.urls.post(id)).await
    }

    async fn fetch_comments(&self, post_id: PostId) -> Result<Vec<Comment>, ProviderError> {
        self.get_json(self.urls.post_comments(post_id)).await
    }

    async fn fetch_users(&self) -> Result<Vec<User>, ProviderError> {
        self.get_json(self.urls.all_users()).await
    }
}
