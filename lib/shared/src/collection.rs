use serde::{Deserialize, Serialize};

/// A remote collection as shown in pickers: the full list may include the
/// synthetic recently-played entry, the owned list never does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub owner_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionIndex {
    pub all: Vec<CollectionSummary>,
    pub owned: Vec<CollectionSummary>,
}
