//! Pairwise garment compatibility scoring and dimension-constrained look
//! generation.
//!
//! [`compatibility`] builds and queries the scored pair graph, [`looks`]
//! assembles outfits around a base item from it, and [`service`] ties both
//! to an item source behind one shared object.

pub mod catalog;
pub mod compatibility;
pub mod config;
pub mod error;
pub mod looks;
pub mod service;
pub mod telemetry;

pub use catalog::{Catalog, Item, ItemFetcher, Sku, Slot};
pub use compatibility::{build_index, CompatibilityIndex};
pub use error::AppError;
pub use looks::{GeneratedLooks, Look, LookGenerator};
pub use service::{LookbookService, OutfitScore, OutfitScoreError};
