//! Dimension-constrained look generation.
//!
//! A request pulls the base item's ranked candidates and their cross scores
//! from the index, fetches every candidate's attributes in one call, then
//! assembles looks in memory. Each look stays coherent along one dimension
//! (aesthetic, occasion or color strategy) and looks within one request avoid
//! reusing an item in the same slot where the catalog allows it.

pub mod assembler;
pub(crate) mod classify;
pub mod cluster;
pub mod colors;
pub mod domain;
pub mod generator;
pub mod silhouette;
pub(crate) mod tables;

#[cfg(test)]
mod tests;

pub use assembler::{LookAssembler, FILL_ORDER, MANDATORY_SLOTS};
pub use classify::is_wearable_accessory;
pub use cluster::{Cluster, DimensionClusterer, Partition, Partitions};
pub use domain::{Dimension, Look, LookItem};
pub use generator::{GeneratedLooks, GenerationError, GenerationSettings, LookGenerator};
pub use silhouette::{
    PairValidator, PairVerdict, SilhouetteConflict, SilhouettePolicy, StatementTopAthleisureRule,
};
pub use tables::TABLES_VERSION;
