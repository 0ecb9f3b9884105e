use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use super::cache::TtlCache;
use super::edges::{self, CrossScores, EdgeSet, SlotEdges};
use super::report::BuildReport;
use super::store::{EdgeStore, InMemoryEdgeStore, IndexStats, RankedQuery, StoreError};
use crate::catalog::{Item, Sku, Slot};

/// Default number of ranked candidates per slot fed into look assembly.
pub const DEFAULT_CANDIDATES_PER_SLOT: usize = 25;

/// Result of a batch build: the edges plus the diagnostic report.
#[derive(Debug, Clone)]
pub struct IndexBuild {
    pub edges: EdgeSet,
    pub report: BuildReport,
}

/// Score every admissible pair of `items`. CPU-bound and quadratic; run it
/// on a blocking thread or offline.
pub fn build_index(items: &[Item], rows_skipped: usize) -> IndexBuild {
    let started = Instant::now();
    info!(items = items.len(), "building compatibility index");
    let edges = EdgeSet::build(items);
    let report = BuildReport::from_edges(&edges, items.len(), rows_skipped, started.elapsed());
    info!(
        pairs = report.pair_count,
        skus = report.skus_with_edges,
        mean_score = report.mean_score,
        elapsed_ms = report.elapsed_ms,
        "compatibility index built"
    );
    IndexBuild { edges, report }
}

/// A sku's ranked candidates per slot and every pair score among them.
#[derive(Debug, Clone, Default)]
pub struct CrossScoreBatch {
    pub candidates: SlotEdges,
    /// Scores among the candidates and the source sku.
    pub scores: CrossScores,
}

impl CrossScoreBatch {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The source sku's ranked list for one slot.
    pub fn ranked(&self, slot: Slot) -> &[edges::ScoredSku] {
        self.candidates.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Read-only query surface over one immutable edge set.
///
/// Rebuilds produce a new index; the service swaps the whole value.
pub struct CompatibilityIndex {
    store: Arc<dyn EdgeStore>,
    cache: Option<TtlCache<Sku, Arc<SlotEdges>>>,
}

impl std::fmt::Debug for CompatibilityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompatibilityIndex")
            .field("backend", &self.store.backend())
            .field("cached", &self.cached_entries())
            .finish()
    }
}

impl CompatibilityIndex {
    pub fn new(store: Arc<dyn EdgeStore>) -> Self {
        Self { store, cache: None }
    }

    pub fn in_memory(edges: EdgeSet) -> Self {
        Self::new(Arc::new(InMemoryEdgeStore::new(edges)))
    }

    /// Put a per-sku cache in front of ranked queries.
    pub fn with_cache(mut self, cache: TtlCache<Sku, Arc<SlotEdges>>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Ranked neighbours of `sku`, optionally one slot only, capped per slot.
    /// An unknown sku yields an empty map.
    pub async fn compatible_by_slot(
        &self,
        sku: &Sku,
        slot: Option<Slot>,
        limit: Option<usize>,
        min_score: f64,
    ) -> Result<SlotEdges, StoreError> {
        let Some(cache) = &self.cache else {
            return self
                .store
                .ranked(
                    sku,
                    RankedQuery {
                        slot,
                        limit,
                        min_score,
                    },
                )
                .await;
        };

        let all = match cache.get(sku) {
            Some(hit) => hit,
            None => {
                let fetched = Arc::new(self.store.ranked(sku, RankedQuery::ALL).await?);
                cache.insert(sku.clone(), Arc::clone(&fetched));
                fetched
            }
        };
        Ok(edges::select(&all, slot, limit, min_score))
    }

    pub async fn pair_score(&self, a: &Sku, b: &Sku) -> Result<Option<f64>, StoreError> {
        self.store.pair_score(a, b).await
    }

    /// Top `per_slot` candidates in every slot plus the full score submatrix
    /// among them and `sku`.
    #[instrument(skip(self, sku), fields(sku = %sku))]
    pub async fn batch_cross_scores(
        &self,
        sku: &Sku,
        per_slot: usize,
    ) -> Result<CrossScoreBatch, StoreError> {
        let candidates = self
            .compatible_by_slot(sku, None, Some(per_slot), 0.0)
            .await?;
        if candidates.is_empty() {
            return Ok(CrossScoreBatch::default());
        }

        let mut members: BTreeSet<Sku> = candidates
            .values()
            .flatten()
            .map(|neighbour| neighbour.sku.clone())
            .collect();
        members.insert(sku.clone());

        let scores = self.store.cross_scores(&members).await?;
        debug!(members = members.len(), pairs = scores.len(), "loaded cross scores");
        Ok(CrossScoreBatch { candidates, scores })
    }

    /// Every score among `skus`, in either orientation.
    pub async fn cross_scores(&self, skus: &BTreeSet<Sku>) -> Result<CrossScores, StoreError> {
        self.store.cross_scores(skus).await
    }

    pub async fn stats(&self) -> Result<IndexStats, StoreError> {
        self.store.stats().await
    }

    /// Per-sku lists currently held by the cache; zero without one.
    pub fn cached_entries(&self) -> u64 {
        self.cache.as_ref().map(TtlCache::len).unwrap_or(0)
    }

    /// Drop cached per-sku lists, e.g. after the backing store was rewritten.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}
