//! Backing stores for the compatibility index.
//!
//! Both backings answer the same queries with the same ordering: per slot,
//! score descending then sku ascending.

pub mod memory;
pub mod sqlite;

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::edges::{CrossScores, EdgeSet, SlotEdges};
use crate::catalog::{Sku, Slot};

pub use memory::InMemoryEdgeStore;
pub use sqlite::SqliteEdgeStore;

/// Filters for a per-sku ranked query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedQuery {
    pub slot: Option<Slot>,
    /// Maximum neighbours per slot; `None` returns every edge.
    pub limit: Option<usize>,
    pub min_score: f64,
}

impl RankedQuery {
    /// Every edge of the sku, all slots.
    pub const ALL: RankedQuery = RankedQuery {
        slot: None,
        limit: None,
        min_score: 0.0,
    };
}

/// Diagnostic summary of an edge set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Undirected pairs.
    pub edge_count: usize,
    pub distinct_skus: usize,
    pub mean_score: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("edge store query failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("edge store holds an unreadable row: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait EdgeStore: Send + Sync {
    /// Short name for logs.
    fn backend(&self) -> &'static str;

    /// Replace every stored edge with the given set.
    async fn replace_edges(&self, edges: Arc<EdgeSet>) -> Result<(), StoreError>;

    /// Ranked neighbours of `sku`; unknown skus yield an empty map.
    async fn ranked(&self, sku: &Sku, query: RankedQuery) -> Result<SlotEdges, StoreError>;

    /// Score of the pair in either orientation.
    async fn pair_score(&self, a: &Sku, b: &Sku) -> Result<Option<f64>, StoreError>;

    /// Every stored score among `skus`.
    async fn cross_scores(&self, skus: &BTreeSet<Sku>) -> Result<CrossScores, StoreError>;

    async fn stats(&self) -> Result<IndexStats, StoreError>;
}
