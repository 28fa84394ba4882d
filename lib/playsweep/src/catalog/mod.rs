mod client;
mod models;

pub use client::{CatalogClient, CatalogClientBuilder};
