use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::palette;
use crate::catalog::Item;

/// Fixed contribution of each signal to the pair score; sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub color: f64,
    pub style: f64,
    pub formality: f64,
    pub statement: f64,
    pub occasion: f64,
    pub season: f64,
}

pub const WEIGHTS: ScoreWeights = ScoreWeights {
    color: 0.25,
    style: 0.25,
    formality: 0.20,
    statement: 0.15,
    occasion: 0.10,
    season: 0.05,
};

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.color + self.style + self.formality + self.statement + self.occasion + self.season
    }
}

/// Per-signal sub-scores behind a pair score, kept for audits and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub color: f64,
    pub style: f64,
    pub formality: f64,
    pub statement: f64,
    pub occasion: f64,
    pub season: f64,
}

impl ScoreBreakdown {
    /// Weighted sum rounded to three decimals.
    pub fn total(&self) -> f64 {
        let raw = self.color * WEIGHTS.color
            + self.style * WEIGHTS.style
            + self.formality * WEIGHTS.formality
            + self.statement * WEIGHTS.statement
            + self.occasion * WEIGHTS.occasion
            + self.season * WEIGHTS.season;
        round3(raw.clamp(0.0, 1.0))
    }
}

/// Round to 3 decimals from the exact binary value, so 0.4325 (stored as
/// 0.43249999...) becomes 0.432.
pub fn round3(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}

/// Stateless pairwise compatibility scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairScorer;

impl PairScorer {
    pub fn score(&self, a: &Item, b: &Item) -> f64 {
        self.breakdown(a, b).total()
    }

    pub fn breakdown(&self, a: &Item, b: &Item) -> ScoreBreakdown {
        ScoreBreakdown {
            color: palette::harmony(a.primary_color.as_deref(), b.primary_color.as_deref()),
            style: overlap(&style_tags(a), &style_tags(b)),
            formality: formality_alignment(a.formality_score, b.formality_score),
            statement: statement_balance(a.statement_piece, b.statement_piece),
            occasion: overlap(&tag_set(&a.occasions), &tag_set(&b.occasions)),
            season: overlap(&tag_set(&a.seasons), &tag_set(&b.seasons)),
        }
    }
}

fn style_tags(item: &Item) -> BTreeSet<&str> {
    item.style
        .as_deref()
        .filter(|style| !style.is_empty())
        .into_iter()
        .chain(item.aesthetics.iter().map(String::as_str))
        .collect()
}

fn tag_set(tags: &[String]) -> BTreeSet<&str> {
    tags.iter().map(String::as_str).collect()
}

/// |A ∩ B| / max(|A|, |B|), or 0.5 when either side has no tags.
fn overlap(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.5;
    }
    let shared = a.intersection(b).count();
    shared as f64 / a.len().max(b.len()) as f64
}

fn formality_alignment(a: u8, b: u8) -> f64 {
    match a.abs_diff(b) {
        0 => 1.0,
        1 => 0.75,
        _ => 0.0,
    }
}

fn statement_balance(a: bool, b: bool) -> f64 {
    match (a, b) {
        (true, true) => 0.30,
        (true, false) | (false, true) => 1.0,
        (false, false) => 0.75,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Slot;

    fn item(sku: &str, slot: Slot) -> Item {
        Item::new(sku, slot, "piece")
    }

    #[test]
    fn weights_sum_to_one() {
        assert!((WEIGHTS.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn blank_items_score_with_permissive_defaults() {
        let a = item("A", Slot::BaseTop);
        let b = item("B", Slot::Footwear);
        let breakdown = PairScorer.breakdown(&a, &b);
        assert_eq!(breakdown.color, 0.7);
        assert_eq!(breakdown.style, 0.5);
        assert_eq!(breakdown.formality, 1.0);
        assert_eq!(breakdown.statement, 0.75);
        assert_eq!(breakdown.total(), 0.688);
    }

    #[test]
    fn total_rounds_the_exact_sum_not_a_scaled_copy() {
        let breakdown = ScoreBreakdown {
            color: 0.7,
            style: 0.0,
            formality: 1.0,
            statement: 0.3,
            occasion: 0.0,
            season: 0.25,
        };
        assert_eq!(breakdown.total(), 0.432);
        assert_eq!(round3(0.1235), 0.123);
        assert_eq!(round3(0.9996), 1.0);
    }

    #[test]
    fn style_overlap_counts_style_tag_with_aesthetics() {
        let mut a = item("A", Slot::BaseTop);
        a.style = Some("streetwear".into());
        a.aesthetics = vec!["urban".into()];
        let mut b = item("B", Slot::PrimaryBottom);
        b.aesthetics = vec!["streetwear".into(), "y2k".into(), "urban".into()];

        assert_eq!(PairScorer.breakdown(&a, &b).style, 2.0 / 3.0);
    }

    #[test]
    fn statement_pieces_clash() {
        let mut a = item("A", Slot::BaseTop);
        let mut b = item("B", Slot::Outerwear);
        a.statement_piece = true;
        assert_eq!(PairScorer.breakdown(&a, &b).statement, 1.0);
        b.statement_piece = true;
        assert_eq!(PairScorer.breakdown(&a, &b).statement, 0.30);
    }

    #[test]
    fn score_is_symmetric() {
        let mut a = item("A", Slot::BaseTop);
        a.primary_color = Some("light blue".into());
        a.occasions = vec!["casual".into(), "work".into()];
        a.formality_score = 2;
        let mut b = item("B", Slot::Footwear);
        b.primary_color = Some("rust".into());
        b.occasions = vec!["casual".into()];
        b.seasons = vec!["fall".into()];
        b.statement_piece = true;

        assert_eq!(PairScorer.score(&a, &b), PairScorer.score(&b, &a));
    }
}
