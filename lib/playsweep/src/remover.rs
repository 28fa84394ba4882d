use tracing::debug;

use crate::error::Result;
use crate::model::OccurrenceRemoval;
use crate::traits::{CollectionStore, Session};

/// Most removal entries the remote store accepts per call.
pub const MAX_BATCH: usize = 100;

/// Applies a position-indexed removal plan in batches of at most
/// [`MAX_BATCH`] entries. Returns the number of positions removed.
///
/// Retrying a whole plan after a partial failure is safe: the remote
/// contract treats removal of an already-absent occurrence as a no-op, and
/// nothing is deduplicated here beyond what the planner guaranteed.
pub async fn remove_occurrences(
    store: &dyn CollectionStore,
    session: &Session,
    collection_id: &str,
    plan: &[OccurrenceRemoval],
) -> Result<usize> {
    let mut removed = 0;
    for batch in plan.chunks(MAX_BATCH) {
        debug!("removing {} entr(ies) from {collection_id}", batch.len());
        store.remove_occurrences(session, collection_id, batch).await?;
        removed += batch.iter().map(|entry| entry.positions.len()).sum::<usize>();
    }
    Ok(removed)
}

/// Removes every occurrence of each identifier, same batch ceiling. Returns
/// the number of identifiers removed.
pub async fn remove_identifiers(
    store: &dyn CollectionStore,
    session: &Session,
    collection_id: &str,
    identifiers: &[String],
) -> Result<usize> {
    let mut removed = 0;
    for batch in identifiers.chunks(MAX_BATCH) {
        debug!("removing {} identifier(s) from {collection_id}", batch.len());
        store.remove_all(session, collection_id, batch).await?;
        removed += batch.len();
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{item, session, MemoryStore};

    #[tokio::test]
    async fn identifier_removal_is_batched_at_the_ceiling() {
        let store = MemoryStore::new("me");
        let items: Vec<_> = (0..250)
            .map(|i| item(i, Some(&format!("uri:{i}")), &format!("T{i}"), &["A"]))
            .collect();
        store.add_collection("a", "Target", "me", items);

        let identifiers: Vec<String> = (0..250).map(|i| format!("uri:{i}")).collect();
        let removed = remove_identifiers(&store, &session(), "a", &identifiers)
            .await
            .unwrap();

        assert_eq!(removed, 250);
        assert_eq!(store.removal_batches(), vec![100, 100, 50]);
        assert!(store.identifiers("a").is_empty());
    }

    #[tokio::test]
    async fn occurrence_removal_counts_positions_not_entries() {
        let store = MemoryStore::new("me");
        store.add_collection(
            "a",
            "Target",
            "me",
            vec![
                item(0, Some("uri:a"), "T", &["A"]),
                item(1, Some("uri:a"), "T", &["A"]),
                item(2, Some("uri:b"), "U", &["A"]),
                item(3, Some("uri:a"), "T", &["A"]),
            ],
        );

        let plan = vec![
            OccurrenceRemoval {
                identifier: "uri:a".to_string(),
                positions: vec![1, 3],
            },
            OccurrenceRemoval {
                identifier: "uri:b".to_string(),
                positions: vec![2],
            },
        ];
        let removed = remove_occurrences(&store, &session(), "a", &plan)
            .await
            .unwrap();

        assert_eq!(removed, 3);
        assert_eq!(store.removal_batches(), vec![2]);
        assert_eq!(store.identifiers("a"), vec!["uri:a"]);
    }

    #[tokio::test]
    async fn occurrence_batches_respect_the_ceiling() {
        let store = MemoryStore::new("me");
        let items: Vec<_> = (0..150)
            .map(|i| item(i, Some(&format!("uri:{i}")), &format!("T{i}"), &["A"]))
            .collect();
        store.add_collection("a", "Target", "me", items);

        let plan: Vec<OccurrenceRemoval> = (0..150)
            .map(|i| OccurrenceRemoval {
                identifier: format!("uri:{i}"),
                positions: vec![i],
            })
            .collect();
        let removed = remove_occurrences(&store, &session(), "a", &plan)
            .await
            .unwrap();

        assert_eq!(removed, 150);
        assert_eq!(store.removal_batches(), vec![100, 50]);
    }

    #[tokio::test]
    async fn empty_plan_issues_no_calls() {
        let store = MemoryStore::new("me");
        store.add_collection("a", "Target", "me", vec![]);

        let removed = remove_occurrences(&store, &session(), "a", &[]).await.unwrap();
        assert_eq!(removed, 0);
        assert!(store.removal_batches().is_empty());
    }
}
