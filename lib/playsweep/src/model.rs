use serde::{Deserialize, Serialize};

/// One entry of a remote collection snapshot.
///
/// `position` is the slot index in the snapshot at scan time, not a stable
/// identity; every removal shifts the positions after it. An item without an
/// identifier cannot be removed and is excluded from all planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub position: usize,
    pub identifier: Option<String>,
    pub title: String,
    pub artist_names: Vec<String>,
}

impl Item {
    /// Artist credits as displayed, credit order preserved.
    pub fn display_artists(&self) -> String {
        self.artist_names.join(", ")
    }
}

/// One page of a remote scan. `has_more` is the store's own signal; item
/// counts are never used to decide termination.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

/// Collection metadata, read live for ownership checks.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionInfo {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub owner_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
}

/// Exact occurrences of one identifier scheduled for removal. Removal is by
/// position, not by identifier alone: the same identifier can sit at several
/// positions and only some of them are up for removal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccurrenceRemoval {
    pub identifier: String,
    pub positions: Vec<usize>,
}
