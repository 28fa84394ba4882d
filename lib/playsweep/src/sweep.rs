use std::collections::HashSet;

use tracing::info;

use shared::report::SweepOutcome;

use crate::error::{CatalogError, Result};
use crate::model::CollectionInfo;
use crate::paginate;
use crate::remover;
use crate::traits::{CollectionStore, Session};

/// Synthetic identifier for the fixed-size recently-played window. Valid
/// only as a reference source, never as a removal target.
pub const RECENT_ID: &str = "__recent__";

/// Largest recently-played view the remote store serves.
pub const RECENT_WINDOW_LIMIT: usize = 50;

pub(crate) fn normalized(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Checks the acting principal against the live owner field of the
/// collection. Bulk removal is destructive, so a cached owner is not enough.
pub(crate) async fn verify_owner(
    store: &dyn CollectionStore,
    session: &Session,
    collection_id: &str,
) -> Result<CollectionInfo> {
    let info = store.fetch_collection(session, collection_id).await?;
    let me = store.current_user(session).await?;
    if normalized(&info.owner_id) != normalized(&me.id) {
        return Err(CatalogError::NotOwned {
            collection_id: collection_id.to_string(),
        });
    }
    Ok(info)
}

async fn collect_identifiers(
    store: &dyn CollectionStore,
    session: &Session,
    collection_id: &str,
) -> Result<Vec<String>> {
    let items =
        paginate::fetch_all(move |offset, limit| {
            store.fetch_page(session, collection_id, offset, limit)
        })
        .await?;
    Ok(items.into_iter().filter_map(|item| item.identifier).collect())
}

async fn reference_identifiers(
    store: &dyn CollectionStore,
    session: &Session,
    reference_id: &str,
) -> Result<Vec<String>> {
    if reference_id == RECENT_ID {
        let items = store.fetch_recent(session, RECENT_WINDOW_LIMIT).await?;
        Ok(items.into_iter().filter_map(|item| item.identifier).collect())
    } else {
        collect_identifiers(store, session, reference_id).await
    }
}

/// Removes from the target collection every entry whose identifier also
/// appears in any of the reference sources.
///
/// Preconditions are checked before the first remote call. Unlike dedup
/// planning this removes by identifier, not position: every occurrence of a
/// referenced track is unwanted.
pub async fn filter_sweep(
    store: &dyn CollectionStore,
    session: &Session,
    target_id: &str,
    reference_ids: &[String],
) -> Result<SweepOutcome> {
    if reference_ids.is_empty() {
        return Ok(SweepOutcome::NoReferences);
    }
    if reference_ids.iter().any(|id| id == target_id) {
        return Ok(SweepOutcome::TargetInReferences);
    }
    if target_id == RECENT_ID {
        return Err(CatalogError::RecentWindowReadOnly);
    }

    let info = verify_owner(store, session, target_id).await?;

    let target_ids: HashSet<String> = collect_identifiers(store, session, target_id)
        .await?
        .into_iter()
        .collect();
    if target_ids.is_empty() {
        info!("'{}' has no tracks, nothing to sweep", info.name);
        return Ok(SweepOutcome::EmptyTarget);
    }

    let mut reference_set: HashSet<String> = HashSet::new();
    for reference_id in reference_ids {
        reference_set.extend(reference_identifiers(store, session, reference_id).await?);
    }

    let mut to_remove: Vec<String> = target_ids.intersection(&reference_set).cloned().collect();
    if to_remove.is_empty() {
        info!("no overlap with references, nothing to remove from '{}'", info.name);
        return Ok(SweepOutcome::NoOverlap);
    }
    to_remove.sort_unstable();

    let removed_count = remover::remove_identifiers(store, session, target_id, &to_remove).await?;
    info!("filter sweep removed {removed_count} track(s) from '{}'", info.name);
    Ok(SweepOutcome::Removed { removed_count })
}
