use async_trait::async_trait;

use crate::error::Result;
use crate::model::{CollectionInfo, Item, OccurrenceRemoval, Page, UserProfile};

/// Credential handle for one acting principal, passed explicitly into every
/// remote call. Obtaining and refreshing the token is the caller's job.
#[derive(Debug, Clone)]
pub struct Session {
    access_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.access_token
    }
}

/// The remote paginated collection store the engine reconciles against.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// One page of a collection, items carrying their snapshot positions.
    async fn fetch_page(
        &self,
        session: &Session,
        collection_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Page<Item>>;

    /// The fixed-size recently-played window. Bounded, not paginated.
    async fn fetch_recent(&self, session: &Session, limit: usize) -> Result<Vec<Item>>;

    async fn fetch_collection(
        &self,
        session: &Session,
        collection_id: &str,
    ) -> Result<CollectionInfo>;

    /// One page of the acting principal's collections.
    async fn fetch_collections_page(
        &self,
        session: &Session,
        offset: usize,
        limit: usize,
    ) -> Result<Page<CollectionInfo>>;

    async fn current_user(&self, session: &Session) -> Result<UserProfile>;

    /// Remove specific occurrences, at most [`crate::remover::MAX_BATCH`]
    /// entries per call. Removing an already-absent occurrence is not an
    /// error under the remote contract.
    async fn remove_occurrences(
        &self,
        session: &Session,
        collection_id: &str,
        entries: &[OccurrenceRemoval],
    ) -> Result<()>;

    /// Remove every occurrence of each identifier, same batch ceiling.
    async fn remove_all(
        &self,
        session: &Session,
        collection_id: &str,
        identifiers: &[String],
    ) -> Result<()>;
}
