use tracing::info;

use shared::collection::{CollectionIndex, CollectionSummary};
use shared::report::{DedupOutcome, DedupReport};

use crate::dedup;
use crate::error::Result;
use crate::model::{CollectionInfo, Item};
use crate::paginate;
use crate::remover;
use crate::sweep::{self, RECENT_ID};
use crate::traits::{CollectionStore, Session};

async fn scan_items(
    store: &dyn CollectionStore,
    session: &Session,
    collection_id: &str,
) -> Result<Vec<Item>> {
    paginate::fetch_all(move |offset, limit| {
        store.fetch_page(session, collection_id, offset, limit)
    })
    .await
}

/// Scans an owned collection and reports its duplicate groups without
/// touching anything.
pub async fn check_duplicates(
    store: &dyn CollectionStore,
    session: &Session,
    collection_id: &str,
) -> Result<DedupReport> {
    let info = sweep::verify_owner(store, session, collection_id).await?;
    let items = scan_items(store, session, collection_id).await?;
    let plan = dedup::plan_removals(&items);
    Ok(DedupReport {
        has_duplicates: !plan.groups.is_empty(),
        duplicate_count: plan.removed_count(),
        collection_name: info.name,
        groups: plan.groups,
    })
}

/// Scans an owned collection, then removes every duplicate occurrence while
/// keeping the earliest copy of each recording. The plan is fully computed
/// against the scan snapshot before the first removal call goes out.
pub async fn remove_duplicates(
    store: &dyn CollectionStore,
    session: &Session,
    collection_id: &str,
) -> Result<DedupOutcome> {
    let info = sweep::verify_owner(store, session, collection_id).await?;
    let items = scan_items(store, session, collection_id).await?;
    let plan = dedup::plan_removals(&items);

    if plan.is_empty() {
        return Ok(DedupOutcome {
            removed_count: 0,
            collection_name: info.name,
            details: Vec::new(),
        });
    }

    let removed_count =
        remover::remove_occurrences(store, session, collection_id, &plan.removals).await?;
    info!("removed {removed_count} duplicate occurrence(s) from '{}'", info.name);
    Ok(DedupOutcome {
        removed_count,
        collection_name: info.name,
        details: plan.groups,
    })
}

fn summary(info: &CollectionInfo) -> CollectionSummary {
    CollectionSummary {
        id: info.id.clone(),
        name: info.name.clone(),
        owner_id: info.owner_id.clone(),
        owner_name: info.owner_name.clone(),
    }
}

/// Lists the acting principal's collections: the full list (with the
/// synthetic recently-played entry) for reference pickers, and the owned
/// subset for removal targets. Both A–Z.
pub async fn list_collections(
    store: &dyn CollectionStore,
    session: &Session,
) -> Result<CollectionIndex> {
    let me = store.current_user(session).await?;
    let collections =
        paginate::fetch_all(move |offset, limit| {
            store.fetch_collections_page(session, offset, limit)
        })
        .await?;

    let me_id = sweep::normalized(&me.id);
    let mut owned: Vec<CollectionSummary> = collections
        .iter()
        .filter(|info| sweep::normalized(&info.owner_id) == me_id)
        .map(summary)
        .collect();

    let mut all: Vec<CollectionSummary> = collections.iter().map(summary).collect();
    all.push(CollectionSummary {
        id: RECENT_ID.to_string(),
        name: "Recently Played".to_string(),
        owner_id: me.id.clone(),
        owner_name: me.display_name.clone().or_else(|| Some("You".to_string())),
    });

    owned.sort_by_key(|c| c.name.to_lowercase());
    all.sort_by_key(|c| c.name.to_lowercase());
    Ok(CollectionIndex { all, owned })
}
