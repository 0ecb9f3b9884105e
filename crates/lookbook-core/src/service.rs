//! The service object request handlers share: one fetcher, one swappable
//! index snapshot, one generator.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::catalog::{FetchError, ItemFetcher, Sku, Slot};
use crate::compatibility::scoring::round3;
use crate::compatibility::{CompatibilityIndex, IndexStats, SlotEdges, StoreError};
use crate::looks::{GeneratedLooks, GenerationError, GenerationSettings, LookGenerator};

/// Pairwise breakdown for a set of items worn together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutfitScore {
    /// Keyed `"<sku>:<sku>"`, smaller sku first. Pairs without an edge are absent.
    pub pair_scores: BTreeMap<String, f64>,
    pub total_score: f64,
    pub average_score: f64,
    pub pair_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum OutfitScoreError {
    #[error("an outfit needs at least two distinct items, got {0}")]
    TooFewItems(usize),
    #[error("items not found: {}", listed(.0))]
    UnknownItems(Vec<Sku>),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

fn listed(skus: &[Sku]) -> String {
    skus.iter()
        .map(Sku::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct LookbookService<F: ?Sized> {
    index: RwLock<Arc<CompatibilityIndex>>,
    generator: LookGenerator,
    fetcher: Arc<F>,
}

impl<F> LookbookService<F>
where
    F: ItemFetcher + ?Sized,
{
    pub fn new(
        fetcher: Arc<F>,
        index: Arc<CompatibilityIndex>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            index: RwLock::new(index),
            generator: LookGenerator::new(settings),
            fetcher,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The current index. Callers keep a consistent view for as long as they
    /// hold the returned snapshot, even across a concurrent swap.
    pub fn index(&self) -> Arc<CompatibilityIndex> {
        Arc::clone(&self.index.read())
    }

    /// Swap in a rebuilt index and return the one it replaced.
    pub fn replace_index(&self, index: Arc<CompatibilityIndex>) -> Arc<CompatibilityIndex> {
        let previous = std::mem::replace(&mut *self.index.write(), index);
        info!(backend = previous.backend(), "compatibility index replaced");
        previous
    }

    pub async fn compatible_items(
        &self,
        sku: &Sku,
        slot: Option<Slot>,
        limit: Option<usize>,
        min_score: f64,
    ) -> Result<SlotEdges, StoreError> {
        self.index()
            .compatible_by_slot(sku, slot, limit, min_score)
            .await
    }

    pub async fn pair_score(&self, a: &Sku, b: &Sku) -> Result<Option<f64>, StoreError> {
        self.index().pair_score(a, b).await
    }

    /// Score every pair among `skus`. Every sku must exist in the catalog.
    pub async fn score_outfit(&self, skus: &[Sku]) -> Result<OutfitScore, OutfitScoreError> {
        let wanted: BTreeSet<Sku> = skus.iter().cloned().collect();
        if wanted.len() < 2 {
            return Err(OutfitScoreError::TooFewItems(wanted.len()));
        }

        let found: BTreeSet<Sku> = self
            .fetcher
            .get_items(&wanted)
            .await?
            .into_iter()
            .map(|item| item.sku)
            .collect();
        let missing: Vec<Sku> = wanted.difference(&found).cloned().collect();
        if !missing.is_empty() {
            return Err(OutfitScoreError::UnknownItems(missing));
        }

        let scores = self.index().cross_scores(&wanted).await?;
        let mut pair_scores = BTreeMap::new();
        let mut total_score = 0.0;
        for (pair, score) in scores.sorted() {
            pair_scores.insert(format!("{}:{}", pair.first(), pair.second()), score);
            total_score += score;
        }
        let pair_count = pair_scores.len();
        let average_score = if pair_count == 0 {
            0.0
        } else {
            round3(total_score / pair_count as f64)
        };

        Ok(OutfitScore {
            pair_scores,
            total_score,
            average_score,
            pair_count,
        })
    }

    /// Up to `num_looks` looks around `base_sku`. Diversity bookkeeping is
    /// private to this call.
    pub async fn generate_looks(
        &self,
        base_sku: &Sku,
        num_looks: usize,
    ) -> Result<GeneratedLooks, GenerationError> {
        let index = self.index();
        self.generator
            .generate(&index, self.fetcher.as_ref(), base_sku, num_looks)
            .await
    }

    pub async fn stats(&self) -> Result<IndexStats, StoreError> {
        self.index().stats().await
    }
}
