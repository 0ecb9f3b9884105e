use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use serde::Serialize;
use tracing::{info, instrument};

use super::assembler::LookAssembler;
use super::domain::Look;
use super::silhouette::SilhouettePolicy;
use crate::catalog::{FetchError, Item, ItemFetcher, Sku};
use crate::compatibility::{CompatibilityIndex, StoreError, DEFAULT_CANDIDATES_PER_SLOT};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("base item {0} not found")]
    NotFound(Sku),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    /// Ranked candidates per slot pulled from the index for each request.
    pub candidates_per_slot: usize,
    pub policy: SilhouettePolicy,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            candidates_per_slot: DEFAULT_CANDIDATES_PER_SLOT,
            policy: SilhouettePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedLooks {
    pub base: Item,
    pub looks: Vec<Look>,
}

/// Request-level driver: one index batch, one attribute fetch, then
/// in-memory assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookGenerator {
    settings: GenerationSettings,
    assembler: LookAssembler,
}

impl LookGenerator {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            settings,
            assembler: LookAssembler::new(settings.policy),
        }
    }

    #[instrument(skip(self, index, fetcher, base_sku), fields(base = %base_sku))]
    pub async fn generate<F>(
        &self,
        index: &CompatibilityIndex,
        fetcher: &F,
        base_sku: &Sku,
        num_looks: usize,
    ) -> Result<GeneratedLooks, GenerationError>
    where
        F: ItemFetcher + ?Sized,
    {
        let started = Instant::now();
        let base = fetcher
            .get_item(base_sku)
            .await?
            .ok_or_else(|| GenerationError::NotFound(base_sku.clone()))?;

        let batch = index
            .batch_cross_scores(base_sku, self.settings.candidates_per_slot)
            .await?;
        if batch.is_empty() {
            info!("base item has no compatible candidates");
            return Ok(GeneratedLooks {
                base,
                looks: Vec::new(),
            });
        }

        let wanted: BTreeSet<Sku> = batch
            .candidates
            .values()
            .flatten()
            .map(|neighbour| neighbour.sku.clone())
            .collect();
        let products: HashMap<Sku, Item> = fetcher
            .get_items(&wanted)
            .await?
            .into_iter()
            .map(|item| (item.sku.clone(), item))
            .collect();

        let looks = self.assembler.assemble(&base, &products, &batch, num_looks);
        info!(
            requested = num_looks,
            produced = looks.len(),
            candidates = products.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generated looks"
        );
        Ok(GeneratedLooks { base, looks })
    }
}
