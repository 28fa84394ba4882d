use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog client is not configured")]
    NotConfigured,

    #[error("invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote store rejected the call; status and body are passed through
    /// untouched so the caller can render them.
    #[error("catalog API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Distinct rate-limit condition carrying the store's retry-after hint.
    /// Absorbed inside pagination, never surfaced to planner callers.
    #[error("rate limited by the catalog store")]
    RateLimited { retry_after: Option<Duration> },

    #[error("still rate limited after {attempts} attempts at offset {offset}")]
    RateLimitExhausted { attempts: u32, offset: usize },

    #[error("collection {collection_id} is not owned by the current user")]
    NotOwned { collection_id: String },

    #[error("the recently played window is read-only")]
    RecentWindowReadOnly,
}
