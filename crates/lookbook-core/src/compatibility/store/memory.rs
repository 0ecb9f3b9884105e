use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{EdgeStore, IndexStats, RankedQuery, StoreError};
use crate::catalog::Sku;
use crate::compatibility::edges::{self, CrossScores, EdgeSet, SlotEdges};
use crate::compatibility::scoring::round3;

/// Edge store kept entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryEdgeStore {
    edges: RwLock<Arc<EdgeSet>>,
}

impl InMemoryEdgeStore {
    pub fn new(edges: EdgeSet) -> Self {
        Self {
            edges: RwLock::new(Arc::new(edges)),
        }
    }

    fn snapshot(&self) -> Arc<EdgeSet> {
        Arc::clone(&self.edges.read())
    }
}

#[async_trait]
impl EdgeStore for InMemoryEdgeStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn replace_edges(&self, edges: Arc<EdgeSet>) -> Result<(), StoreError> {
        *self.edges.write() = edges;
        Ok(())
    }

    async fn ranked(&self, sku: &Sku, query: RankedQuery) -> Result<SlotEdges, StoreError> {
        let edges = self.snapshot();
        Ok(edges
            .neighbours(sku)
            .map(|neighbours| edges::select(neighbours, query.slot, query.limit, query.min_score))
            .unwrap_or_default())
    }

    async fn pair_score(&self, a: &Sku, b: &Sku) -> Result<Option<f64>, StoreError> {
        Ok(self.snapshot().pair_score(a, b))
    }

    async fn cross_scores(&self, skus: &BTreeSet<Sku>) -> Result<CrossScores, StoreError> {
        Ok(self.snapshot().cross_scores(skus))
    }

    async fn stats(&self) -> Result<IndexStats, StoreError> {
        let edges = self.snapshot();
        let edge_count = edges.pair_count();
        let mean_score = if edge_count == 0 {
            0.0
        } else {
            round3(edges.pair_scores().sum::<f64>() / edge_count as f64)
        };
        Ok(IndexStats {
            edge_count,
            distinct_skus: edges.sku_count(),
            mean_score,
        })
    }
}
