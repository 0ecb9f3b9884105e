use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::gate::CompatibilityGate;
use super::scoring::PairScorer;
use crate::catalog::{Item, Sku, Slot};

/// A compatible item and its pair score, as seen from some source sku.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSku {
    pub sku: Sku,
    pub score: f64,
}

/// Ranked neighbours of one sku grouped by the neighbour's slot.
pub type SlotEdges = BTreeMap<Slot, Vec<ScoredSku>>;

/// One directed edge. Every edge is stored alongside its mirror with the same score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityEdge {
    pub source: Sku,
    pub target: Sku,
    pub target_slot: Slot,
    pub score: f64,
}

/// Unordered pair of skus, stored smallest first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(Sku, Sku);

impl PairKey {
    pub fn new(a: &Sku, b: &Sku) -> Self {
        if a <= b {
            Self(a.clone(), b.clone())
        } else {
            Self(b.clone(), a.clone())
        }
    }

    pub fn first(&self) -> &Sku {
        &self.0
    }

    pub fn second(&self) -> &Sku {
        &self.1
    }
}

/// Pairwise score lookup among a bounded set of skus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossScores {
    scores: HashMap<PairKey, f64>,
}

impl CrossScores {
    pub fn insert(&mut self, a: &Sku, b: &Sku, score: f64) {
        self.scores.insert(PairKey::new(a, b), score);
    }

    /// Score for the pair in either orientation.
    pub fn get(&self, a: &Sku, b: &Sku) -> Option<f64> {
        self.scores.get(&PairKey::new(a, b)).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Pairs ordered by their smaller sku, then the larger.
    pub fn sorted(&self) -> Vec<(&PairKey, f64)> {
        let mut pairs: Vec<(&PairKey, f64)> =
            self.scores.iter().map(|(key, score)| (key, *score)).collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}

/// Canonical ranking: score descending, then sku ascending.
pub fn rank_order(a: &ScoredSku, b: &ScoredSku) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.sku.cmp(&b.sku))
}

/// Every admissible pair of a catalog, scored and ranked.
///
/// Immutable once built; a catalog change produces a new set.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    adjacency: HashMap<Sku, SlotEdges>,
    pairs: HashMap<PairKey, f64>,
}

impl EdgeSet {
    /// Gate and score every unordered pair. Quadratic in the item count, so
    /// this belongs at startup or in a batch job.
    pub fn build(items: &[Item]) -> Self {
        let gate = CompatibilityGate;
        let scorer = PairScorer;

        let mut ordered: Vec<&Item> = items.iter().collect();
        ordered.sort_by(|a, b| a.sku.cmp(&b.sku));

        let mut edges = Self::default();
        for (index, a) in ordered.iter().enumerate() {
            for b in &ordered[index + 1..] {
                if !gate.admits(a, b) {
                    continue;
                }
                let score = scorer.score(a, b);
                edges.push_pair(a, b, score);
            }
            if (index + 1) % 1000 == 0 {
                debug!(processed = index + 1, total = ordered.len(), "scoring catalog pairs");
            }
        }
        edges.sort();
        edges
    }

    fn push_pair(&mut self, a: &Item, b: &Item, score: f64) {
        self.pairs.insert(PairKey::new(&a.sku, &b.sku), score);
        self.link(&a.sku, &b.sku, b.slot, score);
        self.link(&b.sku, &a.sku, a.slot, score);
    }

    fn link(&mut self, source: &Sku, target: &Sku, target_slot: Slot, score: f64) {
        self.adjacency
            .entry(source.clone())
            .or_default()
            .entry(target_slot)
            .or_default()
            .push(ScoredSku {
                sku: target.clone(),
                score,
            });
    }

    fn sort(&mut self) {
        for slots in self.adjacency.values_mut() {
            for ranked in slots.values_mut() {
                ranked.sort_by(rank_order);
            }
        }
    }

    pub fn neighbours(&self, sku: &Sku) -> Option<&SlotEdges> {
        self.adjacency.get(sku)
    }

    pub fn pair_score(&self, a: &Sku, b: &Sku) -> Option<f64> {
        self.pairs.get(&PairKey::new(a, b)).copied()
    }

    /// Number of undirected pairs.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Skus that have at least one edge.
    pub fn sku_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pair_scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.pairs.values().copied()
    }

    /// Each sku's `n` best scores across all slots.
    pub fn sku_top_scores(&self, n: usize) -> Vec<Vec<f64>> {
        self.adjacency
            .values()
            .map(|slots| {
                let mut scores: Vec<f64> = slots
                    .values()
                    .flat_map(|ranked| ranked.iter().map(|neighbour| neighbour.score))
                    .collect();
                scores.sort_by(|a, b| b.total_cmp(a));
                scores.truncate(n);
                scores
            })
            .collect()
    }

    /// Scores among the given skus; pairs without an edge are absent.
    pub fn cross_scores(&self, skus: &BTreeSet<Sku>) -> CrossScores {
        let members: Vec<&Sku> = skus.iter().collect();
        let mut cross = CrossScores::default();
        for (index, a) in members.iter().enumerate() {
            for b in &members[index + 1..] {
                if let Some(score) = self.pair_score(a, b) {
                    cross.insert(a, b, score);
                }
            }
        }
        cross
    }

    /// All directed edges, ordered by source sku then the ranking order.
    pub fn directed_edges(&self) -> Vec<CompatibilityEdge> {
        let mut sources: Vec<&Sku> = self.adjacency.keys().collect();
        sources.sort();
        sources
            .into_iter()
            .flat_map(|source| {
                self.adjacency[source].iter().flat_map(move |(slot, ranked)| {
                    ranked.iter().map(move |neighbour| CompatibilityEdge {
                        source: source.clone(),
                        target: neighbour.sku.clone(),
                        target_slot: *slot,
                        score: neighbour.score,
                    })
                })
            })
            .collect()
    }
}

/// Filter and cap a sku's ranked neighbours. `limit` applies per slot.
pub fn select(
    edges: &SlotEdges,
    slot: Option<Slot>,
    limit: Option<usize>,
    min_score: f64,
) -> SlotEdges {
    edges
        .iter()
        .filter(|(edge_slot, _)| slot.map_or(true, |wanted| wanted == **edge_slot))
        .filter_map(|(edge_slot, ranked)| {
            let kept: Vec<ScoredSku> = ranked
                .iter()
                .filter(|neighbour| neighbour.score >= min_score)
                .take(limit.unwrap_or(usize::MAX))
                .cloned()
                .collect();
            (!kept.is_empty()).then_some((*edge_slot, kept))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sku: &str, slot: Slot, color: &str) -> Item {
        let mut item = Item::new(sku, slot, "piece");
        item.primary_color = Some(color.to_string());
        item
    }

    #[test]
    fn pairs_are_mirrored_with_identical_scores() {
        let items = vec![
            item("TOP", Slot::BaseTop, "blue"),
            item("SHOE", Slot::Footwear, "orange"),
        ];
        let edges = EdgeSet::build(&items);

        let from_top = &edges.neighbours(&Sku::from("TOP")).expect("top edges")[&Slot::Footwear];
        let from_shoe = &edges.neighbours(&Sku::from("SHOE")).expect("shoe edges")[&Slot::BaseTop];
        assert_eq!(from_top[0].score, from_shoe[0].score);
        assert_eq!(edges.pair_count(), 1);
        assert_eq!(edges.directed_edges().len(), 2);
    }

    #[test]
    fn ties_rank_by_sku() {
        let items = vec![
            item("TOP", Slot::BaseTop, "black"),
            item("SHOE-B", Slot::Footwear, "white"),
            item("SHOE-A", Slot::Footwear, "white"),
            item("SHOE-C", Slot::Footwear, "red"),
        ];
        let edges = EdgeSet::build(&items);
        let ranked: Vec<&str> = edges.neighbours(&Sku::from("TOP")).expect("edges")[&Slot::Footwear]
            .iter()
            .map(|neighbour| neighbour.sku.as_str())
            .collect();
        assert_eq!(ranked, vec!["SHOE-A", "SHOE-B", "SHOE-C"]);
    }

    #[test]
    fn rejected_pairs_have_no_edge() {
        let mut top = item("TOP", Slot::BaseTop, "black");
        top.formality_score = 0;
        let mut shoe = item("SHOE", Slot::Footwear, "black");
        shoe.formality_score = 3;
        let edges = EdgeSet::build(&[top, shoe]);
        assert!(edges.is_empty());
        assert_eq!(edges.pair_score(&Sku::from("TOP"), &Sku::from("SHOE")), None);
    }

    #[test]
    fn select_applies_slot_filter_limit_and_floor() {
        let mut edges = SlotEdges::new();
        edges.insert(
            Slot::Footwear,
            vec![
                ScoredSku { sku: Sku::from("F1"), score: 0.9 },
                ScoredSku { sku: Sku::from("F2"), score: 0.8 },
                ScoredSku { sku: Sku::from("F3"), score: 0.4 },
            ],
        );
        edges.insert(
            Slot::Accessory,
            vec![ScoredSku { sku: Sku::from("A1"), score: 0.3 }],
        );

        let picked = select(&edges, None, Some(1), 0.5);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[&Slot::Footwear][0].sku, Sku::from("F1"));

        let only_accessories = select(&edges, Some(Slot::Accessory), None, 0.0);
        assert_eq!(only_accessories.keys().copied().collect::<Vec<_>>(), vec![Slot::Accessory]);
    }
}
