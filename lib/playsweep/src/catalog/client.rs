use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::RETRY_AFTER, Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use url::Url;

use super::models::{
    CollectionRecord, CollectionPageResponse, RecentResponse, RemovalEntry, RemovalRequest,
    SnapshotAck, TrackPageResponse, UserRecord,
};
use crate::error::{CatalogError, Result};
use crate::model::{CollectionInfo, Item, OccurrenceRemoval, Page, UserProfile};
use crate::traits::{CollectionStore, Session};

/// HTTP client for the remote catalog store. Credentials are not held here;
/// every call takes the acting principal's [`Session`].
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: Url,
    client: Client,
}

#[derive(Default)]
pub struct CatalogClientBuilder {
    base_url: Option<String>,
}

impl CatalogClientBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn build(self) -> Result<CatalogClient> {
        let base_url_str = self.base_url.ok_or(CatalogError::NotConfigured)?;
        let base_url = Url::parse(base_url_str.trim_end_matches('/'))?;
        Ok(CatalogClient {
            base_url,
            client: Client::new(),
        })
    }
}

impl CatalogClient {
    async fn make_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        session: &Session,
        body: Option<B>,
    ) -> Result<T> {
        let url = self.base_url.join(&format!("v1/{endpoint}"))?;
        debug!("request: {} {}", method, url);
        let mut request = self.client.request(method, url).bearer_auth(session.token());
        if let Some(b) = body {
            request = request.json(&b);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = parse_retry_after(
                response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok()),
            );
            return Err(CatalogError::RateLimited { retry_after });
        }
        if status.is_success() {
            let text = response.text().await?;
            if text.trim().is_empty() {
                serde_json::from_str("null").map_err(|e| CatalogError::Api {
                    status: status.as_u16(),
                    message: format!("JSON parse error: {e}"),
                })
            } else {
                serde_json::from_str(&text).map_err(|e| CatalogError::Api {
                    status: status.as_u16(),
                    message: format!("JSON parse error: {e}"),
                })
            }
        } else {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "could not read error body".to_string());
            Err(CatalogError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

fn parse_retry_after(header: Option<&str>) -> Option<Duration> {
    header
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[async_trait]
impl CollectionStore for CatalogClient {
    async fn fetch_page(
        &self,
        session: &Session,
        collection_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Page<Item>> {
        let endpoint = format!("playlists/{collection_id}/tracks?offset={offset}&limit={limit}");
        let page: TrackPageResponse = self
            .make_request(Method::GET, &endpoint, session, None::<()>)
            .await?;
        Ok(page.into_page(offset))
    }

    async fn fetch_recent(&self, session: &Session, limit: usize) -> Result<Vec<Item>> {
        let endpoint = format!("me/player/recently-played?limit={limit}");
        let recent: RecentResponse = self
            .make_request(Method::GET, &endpoint, session, None::<()>)
            .await?;
        Ok(recent.into_items())
    }

    async fn fetch_collection(
        &self,
        session: &Session,
        collection_id: &str,
    ) -> Result<CollectionInfo> {
        let endpoint = format!("playlists/{collection_id}");
        let mut record: CollectionRecord = self
            .make_request(Method::GET, &endpoint, session, None::<()>)
            .await?;
        if record.id.is_none() {
            record.id = Some(collection_id.to_string());
        }
        record.into_info().ok_or_else(|| CatalogError::Api {
            status: 502,
            message: format!("unreadable metadata for collection {collection_id}"),
        })
    }

    async fn fetch_collections_page(
        &self,
        session: &Session,
        offset: usize,
        limit: usize,
    ) -> Result<Page<CollectionInfo>> {
        let endpoint = format!("me/playlists?offset={offset}&limit={limit}");
        let page: CollectionPageResponse = self
            .make_request(Method::GET, &endpoint, session, None::<()>)
            .await?;
        Ok(page.into_page())
    }

    async fn current_user(&self, session: &Session) -> Result<UserProfile> {
        let user: UserRecord = self
            .make_request(Method::GET, "me", session, None::<()>)
            .await?;
        Ok(UserProfile {
            id: user.id,
            display_name: user.display_name,
        })
    }

    async fn remove_occurrences(
        &self,
        session: &Session,
        collection_id: &str,
        entries: &[OccurrenceRemoval],
    ) -> Result<()> {
        let body = RemovalRequest {
            tracks: entries
                .iter()
                .map(|entry| RemovalEntry {
                    uri: &entry.identifier,
                    positions: Some(&entry.positions),
                })
                .collect(),
        };
        let endpoint = format!("playlists/{collection_id}/tracks");
        let _ack: Option<SnapshotAck> = self
            .make_request(Method::DELETE, &endpoint, session, Some(&body))
            .await?;
        Ok(())
    }

    async fn remove_all(
        &self,
        session: &Session,
        collection_id: &str,
        identifiers: &[String],
    ) -> Result<()> {
        let body = RemovalRequest {
            tracks: identifiers
                .iter()
                .map(|identifier| RemovalEntry {
                    uri: identifier,
                    positions: None,
                })
                .collect(),
        };
        let endpoint = format!("playlists/{collection_id}/tracks");
        let _ack: Option<SnapshotAck> = self
            .make_request(Method::DELETE, &endpoint, session, Some(&body))
            .await?;
        Ok(())
    }
}
