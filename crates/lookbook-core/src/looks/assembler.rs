//! Dimension-constrained look assembly.
//!
//! Everything here works on data already in memory: the base item, the
//! fetched candidate records and the cross-score batch for the base. The
//! used-items bookkeeping lives in a per-call [`Assembly`] and is dropped with it.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use super::classify::is_wearable_accessory;
use super::cluster::{DimensionClusterer, Partitions};
use super::colors::{self, ColorSet};
use super::domain::{Dimension, Look};
use super::silhouette::{PairValidator, SilhouettePolicy};
use super::tables::EXTENDED_LOOKS;
use crate::catalog::{Item, Sku, Slot};
use crate::compatibility::CrossScoreBatch;

/// Slots a look tries to fill, in order. The base item's slot is skipped.
pub const FILL_ORDER: [Slot; 5] = [
    Slot::BaseTop,
    Slot::Outerwear,
    Slot::PrimaryBottom,
    Slot::Footwear,
    Slot::Accessory,
];

/// Slots every look must fill when the index has any candidate for them.
pub const MANDATORY_SLOTS: [Slot; 2] = [Slot::Footwear, Slot::Accessory];

/// How far down the base's ranked list an empty cluster slot may widen.
pub const WIDEN_DEPTH: usize = 50;
/// Ranked depth for the first two mandatory-slot fallback tiers.
pub const FALLBACK_DEPTH: usize = 30;
/// Ranked depth for the reuse tier.
pub const REUSE_DEPTH: usize = 10;

pub const HARMONY_BONUS: f64 = 0.05;

#[derive(Debug, Clone, Copy, Default)]
pub struct LookAssembler {
    validator: PairValidator,
    clusterer: DimensionClusterer,
}

impl LookAssembler {
    pub fn new(policy: SilhouettePolicy) -> Self {
        Self {
            validator: PairValidator::new(policy),
            clusterer: DimensionClusterer,
        }
    }

    /// Up to `num_looks` looks around `base`. `products` holds the candidate
    /// records fetched for `batch`; the base itself need not be in it.
    pub fn assemble(
        &self,
        base: &Item,
        products: &HashMap<Sku, Item>,
        batch: &CrossScoreBatch,
        num_looks: usize,
    ) -> Vec<Look> {
        let mut assembly = Assembly::new(self, base, products, batch);
        if assembly.valid.is_empty() || num_looks == 0 {
            return Vec::new();
        }

        let partitions = self.clusterer.partition(base, &assembly.valid);
        assembly.cluster_phase(&partitions, num_looks);
        assembly.fallback_phase(num_looks);
        assembly.looks
    }
}

/// State for one assembly call.
struct Assembly<'a> {
    validator: &'a PairValidator,
    base: &'a Item,
    products: &'a HashMap<Sku, Item>,
    batch: &'a CrossScoreBatch,
    base_scores: HashMap<&'a Sku, f64>,
    /// Valid candidates ordered by base score descending, then sku.
    valid: Vec<&'a Item>,
    used: HashMap<Slot, BTreeSet<Sku>>,
    looks: Vec<Look>,
}

impl<'a> Assembly<'a> {
    fn new(
        assembler: &'a LookAssembler,
        base: &'a Item,
        products: &'a HashMap<Sku, Item>,
        batch: &'a CrossScoreBatch,
    ) -> Self {
        let mut base_scores = HashMap::new();
        for neighbour in batch.candidates.values().flatten() {
            base_scores.entry(&neighbour.sku).or_insert(neighbour.score);
        }

        let mut assembly = Self {
            validator: &assembler.validator,
            base,
            products,
            batch,
            base_scores,
            valid: Vec::new(),
            used: HashMap::new(),
            looks: Vec::new(),
        };

        let mut valid: Vec<&'a Item> = products
            .values()
            .filter(|item| item.sku != base.sku)
            .filter(|item| assembly.validator.is_valid_pair(base, item))
            .collect();
        valid.sort_by(|a, b| assembly.rank(a, b));
        assembly.valid = valid;
        assembly
    }

    fn base_score(&self, sku: &Sku) -> f64 {
        self.base_scores.get(sku).copied().unwrap_or(0.0)
    }

    fn rank(&self, a: &Item, b: &Item) -> Ordering {
        self.base_score(&b.sku)
            .total_cmp(&self.base_score(&a.sku))
            .then_with(|| a.sku.cmp(&b.sku))
    }

    fn is_used(&self, slot: Slot, sku: &Sku) -> bool {
        self.used.get(&slot).is_some_and(|used| used.contains(sku))
    }

    fn eligible(&self, slot: Slot, item: &Item) -> bool {
        item.slot == slot
            && !self.is_used(slot, &item.sku)
            && (slot != Slot::Accessory || is_wearable_accessory(item))
    }

    fn open_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        FILL_ORDER
            .into_iter()
            .filter(move |slot| *slot != self.base.slot)
    }

    /// Phase 1: one look per unused cluster, largest first.
    fn cluster_phase(&mut self, partitions: &Partitions, num_looks: usize) {
        let mut spent: HashSet<(Dimension, String)> = HashSet::new();

        while self.looks.len() < num_looks {
            let mut best: Option<(Dimension, &str, &[Sku])> = None;
            let mut best_size = 0;
            for (dimension, partition) in partitions.by_priority() {
                for cluster in partition.clusters() {
                    if spent.contains(&(dimension, cluster.value.clone())) {
                        continue;
                    }
                    if cluster.members.len() > best_size {
                        best_size = cluster.members.len();
                        best = Some((dimension, &cluster.value, &cluster.members));
                    }
                }
            }
            let Some((dimension, value, members)) = best else {
                break;
            };

            let mut pool: Vec<&'a Item> = members
                .iter()
                .filter_map(|sku| self.products.get(sku))
                .collect();
            pool.sort_by(|a, b| self.rank(a, b));

            let (name, description) = dimension.describe(value);
            let look = self.build_look(&pool, dimension, value, name, description);
            self.record(look);
            spent.insert((dimension, value.to_string()));
        }
    }

    /// Phase 2: fixed fallback labels over the whole valid pool.
    fn fallback_phase(&mut self, num_looks: usize) {
        for (dimension, value, name, description) in EXTENDED_LOOKS {
            if self.looks.len() >= num_looks {
                break;
            }

            let fillable = self
                .open_slots()
                .filter(|slot| self.valid.iter().any(|item| self.eligible(*slot, item)))
                .count();
            if fillable < 2 {
                continue;
            }

            let look = self.build_look(
                &self.valid,
                *dimension,
                value,
                (*name).to_string(),
                (*description).to_string(),
            );
            self.record(look);
        }
    }

    fn record(&mut self, look: Look) {
        for (slot, item) in &look.items {
            if *slot != self.base.slot {
                self.used.entry(*slot).or_default().insert(item.sku.clone());
            }
        }
        debug!(
            look = %look.id,
            dimension = %look.dimension,
            value = %look.dimension_value,
            slots = look.items.len(),
            "assembled look"
        );
        self.looks.push(look);
    }

    fn build_look(
        &self,
        pool: &[&'a Item],
        dimension: Dimension,
        value: &str,
        name: String,
        description: String,
    ) -> Look {
        let id = format!("look_{}", self.looks.len() + 1);
        let mut look = Look::new(id, dimension, value, name, description);
        look.place(self.base);
        let mut placed: Vec<&'a Item> = vec![self.base];

        for slot in self.open_slots() {
            let mut candidates: Vec<&'a Item> = pool
                .iter()
                .copied()
                .filter(|item| self.eligible(slot, item))
                .collect();

            if candidates.is_empty() {
                candidates = self
                    .batch
                    .ranked(slot)
                    .iter()
                    .take(WIDEN_DEPTH)
                    .filter_map(|neighbour| self.products.get(&neighbour.sku))
                    .filter(|item| self.eligible(slot, item))
                    .filter(|item| self.validator.is_valid_pair(self.base, item))
                    .collect();
            }
            if candidates.is_empty() {
                continue;
            }

            candidates.sort_by(|a, b| self.rank(a, b));
            if let Some(chosen) = self.select_best(slot, candidates, &placed) {
                look.place(chosen);
                placed.push(chosen);
            }
        }

        for slot in MANDATORY_SLOTS {
            if look.has(slot) {
                continue;
            }
            if let Some(chosen) = self.fill_required(slot, &placed) {
                look.place(chosen);
                placed.push(chosen);
            }
        }

        look
    }

    /// Best candidate for `slot` given what is already in the look.
    fn select_best(
        &self,
        slot: Slot,
        mut candidates: Vec<&'a Item>,
        placed: &[&'a Item],
    ) -> Option<&'a Item> {
        let outfit = outfit_colors(placed);

        if matches!(slot, Slot::Accessory | Slot::Footwear) && !outfit.is_empty() {
            let matched: Vec<&'a Item> = candidates
                .iter()
                .copied()
                .filter(|item| colors::fits_outfit(&colors::item_colors(item), &outfit, slot))
                .collect();
            if !matched.is_empty() {
                candidates = matched;
            }
        }

        if placed.len() <= 1 {
            return candidates.first().copied();
        }

        let mut best: Option<&'a Item> = None;
        let mut best_score = f64::NEG_INFINITY;
        for candidate in candidates {
            let total: f64 = placed
                .iter()
                .map(|existing| {
                    self.batch
                        .scores
                        .get(&candidate.sku, &existing.sku)
                        .unwrap_or(0.0)
                })
                .sum();
            let mut score = total / placed.len() as f64;
            if colors::fits_outfit(&colors::item_colors(candidate), &outfit, slot) {
                score += HARMONY_BONUS;
            }
            if score > best_score {
                best_score = score;
                best = Some(candidate);
            }
        }
        best
    }

    /// Mandatory-slot fallback over the base's ranked list: unused and
    /// harmonious, then unused, then reuse.
    fn fill_required(&self, slot: Slot, placed: &[&'a Item]) -> Option<&'a Item> {
        let ranked: Vec<&'a Item> = self
            .batch
            .ranked(slot)
            .iter()
            .filter_map(|neighbour| self.products.get(&neighbour.sku))
            .filter(|item| item.slot == slot)
            .filter(|item| slot != Slot::Accessory || is_wearable_accessory(item))
            .collect();
        let outfit = outfit_colors(placed);

        let unused = |item: &&'a Item| !self.is_used(slot, &item.sku);
        ranked
            .iter()
            .take(FALLBACK_DEPTH)
            .copied()
            .filter(unused)
            .find(|item| colors::fits_outfit(&colors::item_colors(item), &outfit, slot))
            .or_else(|| {
                ranked
                    .iter()
                    .take(FALLBACK_DEPTH)
                    .copied()
                    .find(|item| unused(item))
            })
            .or_else(|| ranked.iter().take(REUSE_DEPTH).next().copied())
    }
}

fn outfit_colors(placed: &[&Item]) -> ColorSet {
    placed
        .iter()
        .flat_map(|item| colors::item_colors(item))
        .collect()
}
