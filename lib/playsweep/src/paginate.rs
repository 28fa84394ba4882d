use std::future::Future;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::model::Page;

/// Largest page the remote store serves per call.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Backoff applied when the store rate-limits without saying for how long.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(2);

/// Retry cap per page, so a store that rate-limits forever cannot block the
/// calling task forever.
pub const MAX_RATE_LIMIT_RETRIES: u32 = 5;

/// Drains an arbitrarily large remote collection through a page-fetch
/// capability `(offset, limit) -> Page`, without assuming the collection
/// size up front. Rate limiting is absorbed here; every other fetch error
/// propagates unchanged.
pub async fn fetch_all<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut offset = 0;
    loop {
        let page = fetch_with_backoff(&mut fetch_page, offset, DEFAULT_PAGE_SIZE).await?;
        items.extend(page.items);
        if !page.has_more {
            break;
        }
        // Offset advances by the page size, never by decoded item count;
        // dropped malformed slots must not re-offset the scan.
        offset += DEFAULT_PAGE_SIZE;
    }
    debug!("scan finished with {} item(s)", items.len());
    Ok(items)
}

/// Fetches one page, sleeping through rate-limit responses. The same offset
/// is retried each time; a rate-limited page is never skipped.
async fn fetch_with_backoff<T, F, Fut>(
    fetch_page: &mut F,
    offset: usize,
    limit: usize,
) -> Result<Page<T>>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    for _ in 0..MAX_RATE_LIMIT_RETRIES {
        match fetch_page(offset, limit).await {
            Err(CatalogError::RateLimited { retry_after }) => {
                let wait = retry_after.unwrap_or(DEFAULT_RETRY_AFTER);
                info!("rate limited at offset {offset}, waiting {wait:?}");
                tokio::time::sleep(wait).await;
            }
            other => return other,
        }
    }
    Err(CatalogError::RateLimitExhausted {
        attempts: MAX_RATE_LIMIT_RETRIES,
        offset,
    })
}
