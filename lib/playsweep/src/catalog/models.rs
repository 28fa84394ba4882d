//! Wire types for the remote catalog, decoded once at this boundary. The
//! rest of the crate only ever sees fully-typed items.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{CollectionInfo, Item, Page};

#[derive(Deserialize, Debug, Default)]
pub(crate) struct TrackPageResponse {
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Deserialize, Debug)]
struct PlaylistEntry {
    #[serde(default)]
    track: Option<TrackRecord>,
}

#[derive(Deserialize, Debug)]
struct TrackRecord {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    artists: Vec<ArtistRecord>,
}

#[derive(Deserialize, Debug)]
struct ArtistRecord {
    #[serde(default)]
    name: Option<String>,
}

/// Reads one raw page slot. A slot that is not a record, or that carries no
/// readable track, yields `None`; one corrupt entry never aborts a scan.
fn decode_entry(slot: Value) -> Option<(Option<String>, String, Vec<String>)> {
    let entry: PlaylistEntry = serde_json::from_value(slot).ok()?;
    let track = entry.track?;
    Some((
        track.uri,
        track.name.unwrap_or_default(),
        track.artists.into_iter().filter_map(|a| a.name).collect(),
    ))
}

impl TrackPageResponse {
    /// Positions are `offset + slot index` over the raw page, so a dropped
    /// slot never shifts the positions of the entries after it.
    pub fn into_page(self, offset: usize) -> Page<Item> {
        let has_more = self.next.is_some();
        let items = self
            .items
            .into_iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                decode_entry(slot).map(|(identifier, title, artist_names)| Item {
                    position: offset + index,
                    identifier,
                    title,
                    artist_names,
                })
            })
            .collect();
        Page { items, has_more }
    }
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct RecentResponse {
    #[serde(default)]
    pub items: Vec<Value>,
}

impl RecentResponse {
    pub fn into_items(self) -> Vec<Item> {
        self.items
            .into_iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                decode_entry(slot).map(|(identifier, title, artist_names)| Item {
                    position: index,
                    identifier,
                    title,
                    artist_names,
                })
            })
            .collect()
    }
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct OwnerRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct CollectionRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<OwnerRecord>,
}

impl CollectionRecord {
    /// Listing decode; a record without an id cannot be referenced later and
    /// is dropped.
    pub fn into_info(self) -> Option<CollectionInfo> {
        let id = self.id?;
        let (owner_id, owner_name) = self
            .owner
            .map(|o| (o.id.unwrap_or_default(), o.display_name))
            .unwrap_or_default();
        Some(CollectionInfo {
            id,
            name: self.name.unwrap_or_default(),
            owner_id,
            owner_name,
        })
    }
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct CollectionPageResponse {
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub next: Option<String>,
}

impl CollectionPageResponse {
    pub fn into_page(self) -> Page<CollectionInfo> {
        let has_more = self.next.is_some();
        let items = self
            .items
            .into_iter()
            .filter_map(|slot| serde_json::from_value::<CollectionRecord>(slot).ok())
            .filter_map(CollectionRecord::into_info)
            .collect();
        Page { items, has_more }
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Serialize, Debug)]
pub(crate) struct RemovalRequest<'a> {
    pub tracks: Vec<RemovalEntry<'a>>,
}

#[derive(Serialize, Debug)]
pub(crate) struct RemovalEntry<'a> {
    pub uri: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<&'a [usize]>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct SnapshotAck {
    #[serde(default)]
    #[allow(dead_code)]
    pub snapshot_id: Option<String>,
}
