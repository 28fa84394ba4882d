use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{CatalogError, Result};
use crate::model::{CollectionInfo, Item, OccurrenceRemoval, Page, UserProfile};
use crate::traits::{CollectionStore, Session};

pub(crate) fn item(position: usize, identifier: Option<&str>, title: &str, artists: &[&str]) -> Item {
    Item {
        position,
        identifier: identifier.map(str::to_string),
        title: title.to_string(),
        artist_names: artists.iter().map(|s| s.to_string()).collect(),
    }
}

pub(crate) fn session() -> Session {
    Session::new("test-token")
}

struct StoredCollection {
    info: CollectionInfo,
    items: Vec<Item>,
}

/// In-memory [`CollectionStore`] for planner, mutator and service tests.
/// Records the size of every removal batch and counts fetch calls.
pub(crate) struct MemoryStore {
    user_id: String,
    collections: Mutex<Vec<StoredCollection>>,
    recent: Mutex<Vec<Item>>,
    removal_batches: Mutex<Vec<usize>>,
    fetch_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            collections: Mutex::new(Vec::new()),
            recent: Mutex::new(Vec::new()),
            removal_batches: Mutex::new(Vec::new()),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn add_collection(&self, id: &str, name: &str, owner_id: &str, items: Vec<Item>) {
        self.collections.lock().unwrap().push(StoredCollection {
            info: CollectionInfo {
                id: id.to_string(),
                name: name.to_string(),
                owner_id: owner_id.to_string(),
                owner_name: None,
            },
            items,
        });
    }

    pub fn set_recent(&self, items: Vec<Item>) {
        *self.recent.lock().unwrap() = items;
    }

    /// Identifiers currently left in a collection, in storage order.
    pub fn identifiers(&self, id: &str) -> Vec<String> {
        self.collections
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.info.id == id)
            .map(|c| c.items.iter().filter_map(|i| i.identifier.clone()).collect())
            .unwrap_or_default()
    }

    /// Entry count of every removal call issued so far.
    pub fn removal_batches(&self) -> Vec<usize> {
        self.removal_batches.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn count_fetch(&self) {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn fetch_page(
        &self,
        _session: &Session,
        collection_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Page<Item>> {
        self.count_fetch();
        let collections = self.collections.lock().unwrap();
        let collection = collections
            .iter()
            .find(|c| c.info.id == collection_id)
            .ok_or_else(|| CatalogError::Api {
                status: 404,
                message: format!("unknown collection {collection_id}"),
            })?;
        let end = (offset + limit).min(collection.items.len());
        let items = collection.items.get(offset..end).unwrap_or(&[]).to_vec();
        Ok(Page {
            items,
            has_more: end < collection.items.len(),
        })
    }

    async fn fetch_recent(&self, _session: &Session, limit: usize) -> Result<Vec<Item>> {
        self.count_fetch();
        let mut items = self.recent.lock().unwrap().clone();
        items.truncate(limit);
        Ok(items)
    }

    async fn fetch_collection(
        &self,
        _session: &Session,
        collection_id: &str,
    ) -> Result<CollectionInfo> {
        self.count_fetch();
        self.collections
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.info.id == collection_id)
            .map(|c| c.info.clone())
            .ok_or_else(|| CatalogError::Api {
                status: 404,
                message: format!("unknown collection {collection_id}"),
            })
    }

    async fn fetch_collections_page(
        &self,
        _session: &Session,
        offset: usize,
        limit: usize,
    ) -> Result<Page<CollectionInfo>> {
        self.count_fetch();
        let collections = self.collections.lock().unwrap();
        let infos: Vec<CollectionInfo> = collections.iter().map(|c| c.info.clone()).collect();
        let end = (offset + limit).min(infos.len());
        Ok(Page {
            items: infos.get(offset..end).unwrap_or(&[]).to_vec(),
            has_more: end < infos.len(),
        })
    }

    async fn current_user(&self, _session: &Session) -> Result<UserProfile> {
        self.count_fetch();
        Ok(UserProfile {
            id: self.user_id.clone(),
            display_name: Some("Test User".to_string()),
        })
    }

    async fn remove_occurrences(
        &self,
        _session: &Session,
        collection_id: &str,
        entries: &[OccurrenceRemoval],
    ) -> Result<()> {
        self.removal_batches.lock().unwrap().push(entries.len());
        let mut collections = self.collections.lock().unwrap();
        if let Some(collection) = collections.iter_mut().find(|c| c.info.id == collection_id) {
            collection.items.retain(|item| {
                !entries.iter().any(|entry| {
                    item.identifier.as_deref() == Some(entry.identifier.as_str())
                        && entry.positions.contains(&item.position)
                })
            });
        }
        Ok(())
    }

    async fn remove_all(
        &self,
        _session: &Session,
        collection_id: &str,
        identifiers: &[String],
    ) -> Result<()> {
        self.removal_batches.lock().unwrap().push(identifiers.len());
        let mut collections = self.collections.lock().unwrap();
        if let Some(collection) = collections.iter_mut().find(|c| c.info.id == collection_id) {
            collection.items.retain(|item| {
                item.identifier
                    .as_ref()
                    .map(|id| !identifiers.contains(id))
                    .unwrap_or(true)
            });
        }
        Ok(())
    }
}
