//! # api-adapters
//!
//! The HTTP [`ContentProvider`](domains::ContentProvider) for the public REST
//! backend, and the interceptor that blocks gated requests for anonymous
//! sessions.

pub mod http;
pub mod interceptor;
pub mod urls;

pub use http::HttpContentProvider;
pub use interceptor::AuthInterceptor;
pub use urls::{ApiEntity, ApiUrls, DEFAULT_BASE_URL};
