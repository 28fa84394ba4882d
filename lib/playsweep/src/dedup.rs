use std::collections::HashMap;

use itertools::Itertools;
use shared::report::{DuplicateGroup, TrackRef};

use crate::canonical::canonical_key;
use crate::model::{Item, OccurrenceRemoval};

/// Removal plan for one collection, computed against a point-in-time scan.
#[derive(Debug, Default)]
pub struct DedupPlan {
    /// Exact occurrences to remove, one entry per identifier.
    pub removals: Vec<OccurrenceRemoval>,
    /// Per-group summary: the kept occurrence and every removed one.
    pub groups: Vec<DuplicateGroup>,
}

impl DedupPlan {
    pub fn removed_count(&self) -> usize {
        self.removals.iter().map(|entry| entry.positions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.removals.is_empty()
    }
}

fn track_ref(item: &Item, identifier: &str) -> TrackRef {
    TrackRef {
        position: item.position,
        identifier: identifier.to_string(),
        name: item.title.clone(),
        artists: item.display_artists(),
    }
}

/// Groups the scanned items by canonical key and plans the removal of every
/// occurrence but the earliest per group ("first added wins").
///
/// Items without an identifier cannot be removed and are left out before
/// grouping; items whose canonical key is empty never group at all. Removal
/// is recorded per exact position: the same identifier can legitimately sit
/// at several positions, and only the non-survivor ones may go.
pub fn plan_removals(items: &[Item]) -> DedupPlan {
    let grouped: HashMap<String, Vec<&Item>> = items
        .iter()
        .filter(|item| item.identifier.is_some())
        .filter_map(|item| canonical_key(&item.title, &item.artist_names).map(|key| (key, item)))
        .into_group_map();

    let mut duplicate_groups: Vec<Vec<&Item>> = grouped
        .into_values()
        .filter(|occurrences| occurrences.len() > 1)
        .collect();
    for occurrences in &mut duplicate_groups {
        occurrences.sort_by_key(|item| item.position);
    }
    duplicate_groups.sort_by_key(|occurrences| occurrences[0].position);

    let mut removal_map: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut groups = Vec::new();
    for occurrences in &duplicate_groups {
        let kept = occurrences[0];
        let mut removed = Vec::new();
        for item in &occurrences[1..] {
            if let Some(identifier) = item.identifier.as_deref() {
                removal_map.entry(identifier).or_default().push(item.position);
                removed.push(track_ref(item, identifier));
            }
        }
        let kept_id = kept.identifier.as_deref().unwrap_or_default();
        groups.push(DuplicateGroup {
            kept: track_ref(kept, kept_id),
            removed,
        });
    }

    let mut removals: Vec<OccurrenceRemoval> = removal_map
        .into_iter()
        .map(|(identifier, mut positions)| {
            positions.sort_unstable();
            OccurrenceRemoval {
                identifier: identifier.to_string(),
                positions,
            }
        })
        .collect();
    removals.sort_by(|a, b| a.identifier.cmp(&b.identifier));

    DedupPlan { removals, groups }
}
