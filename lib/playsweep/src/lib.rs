pub mod canonical;
pub mod catalog;
pub mod dedup;
pub mod error;
pub mod model;
pub mod paginate;
pub mod remover;
pub mod service;
pub mod sweep;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use catalog::{CatalogClient, CatalogClientBuilder};
pub use service::{check_duplicates, list_collections, remove_duplicates};
pub use sweep::{filter_sweep, RECENT_ID, RECENT_WINDOW_LIMIT};
pub use traits::{CollectionStore, Session};
