use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::edges::EdgeSet;
use super::scoring::round3;

/// Histogram buckets, highest first: (label, inclusive lower bound).
const BUCKETS: [(&str, f64); 6] = [
    ("0.9-1.0", 0.9),
    ("0.8-0.9", 0.8),
    ("0.7-0.8", 0.7),
    ("0.6-0.7", 0.6),
    ("0.5-0.6", 0.5),
    ("0.0-0.5", 0.0),
];

const TOP_N: usize = 5;
const STRONG_SCORE: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub range: String,
    pub count: usize,
}

/// Summary of one index build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub items_indexed: usize,
    pub rows_skipped: usize,
    pub pair_count: usize,
    pub skus_with_edges: usize,
    pub mean_score: f64,
    /// Mean over skus of the mean of each sku's five best scores.
    pub mean_top5_score: f64,
    /// Share of pairs scoring at least 0.7.
    pub strong_share: f64,
    pub histogram: Vec<ScoreBucket>,
    pub built_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl BuildReport {
    pub fn from_edges(
        edges: &EdgeSet,
        items_indexed: usize,
        rows_skipped: usize,
        elapsed: Duration,
    ) -> Self {
        let scores: Vec<f64> = edges.pair_scores().collect();
        let pair_count = scores.len();

        let mut histogram: Vec<ScoreBucket> = BUCKETS
            .iter()
            .map(|(label, _)| ScoreBucket {
                range: (*label).to_string(),
                count: 0,
            })
            .collect();
        for score in &scores {
            if let Some(index) = BUCKETS.iter().position(|(_, floor)| *score >= *floor) {
                histogram[index].count += 1;
            }
        }

        let (mean_score, strong_share) = if pair_count == 0 {
            (0.0, 0.0)
        } else {
            let strong = scores.iter().filter(|score| **score >= STRONG_SCORE).count();
            (
                round3(scores.iter().sum::<f64>() / pair_count as f64),
                round3(strong as f64 / pair_count as f64),
            )
        };

        Self {
            items_indexed,
            rows_skipped,
            pair_count,
            skus_with_edges: edges.sku_count(),
            mean_score,
            mean_top5_score: mean_top_scores(edges),
            strong_share,
            histogram,
            built_at: Utc::now(),
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }
}

fn mean_top_scores(edges: &EdgeSet) -> f64 {
    let per_sku: Vec<f64> = edges
        .sku_top_scores(TOP_N)
        .into_iter()
        .filter(|top| !top.is_empty())
        .map(|top| top.iter().sum::<f64>() / top.len() as f64)
        .collect();
    if per_sku.is_empty() {
        return 0.0;
    }
    round3(per_sku.iter().sum::<f64>() / per_sku.len() as f64)
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compatibility index built at {}", self.built_at.to_rfc3339())?;
        writeln!(
            f,
            "  items indexed: {} (skipped rows: {})",
            self.items_indexed, self.rows_skipped
        )?;
        writeln!(f, "  compatible pairs: {}", self.pair_count)?;
        writeln!(f, "  skus with edges: {}", self.skus_with_edges)?;
        writeln!(f, "  mean score: {:.3}", self.mean_score)?;
        writeln!(f, "  mean top-{TOP_N} score: {:.3}", self.mean_top5_score)?;
        writeln!(f, "  pairs >= {STRONG_SCORE}: {:.1}%", self.strong_share * 100.0)?;
        writeln!(f, "  score distribution:")?;
        for bucket in &self.histogram {
            writeln!(f, "    {}: {}", bucket.range, bucket.count)?;
        }
        write!(f, "  elapsed: {} ms", self.elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Item, Slot};

    #[test]
    fn histogram_counts_every_pair_once() {
        let mut top = Item::new("TOP", Slot::BaseTop, "tee");
        top.primary_color = Some("black".into());
        let shoe = Item::new("SHOE", Slot::Footwear, "sneakers");
        let bag = Item::new("BAG", Slot::Accessory, "tote");
        let edges = EdgeSet::build(&[top, shoe, bag]);

        let report = BuildReport::from_edges(&edges, 3, 1, Duration::from_millis(12));
        let counted: usize = report.histogram.iter().map(|bucket| bucket.count).sum();
        assert_eq!(counted, report.pair_count);
        assert_eq!(report.pair_count, 3);
        assert_eq!(report.skus_with_edges, 3);
        assert_eq!(report.rows_skipped, 1);
        assert!(report.mean_top5_score > 0.0);
        assert!(report.to_string().contains("compatible pairs: 3"));
    }

    #[test]
    fn empty_build_reports_zeroes() {
        let report = BuildReport::from_edges(&EdgeSet::default(), 0, 0, Duration::ZERO);
        assert_eq!(report.mean_score, 0.0);
        assert_eq!(report.strong_share, 0.0);
        assert_eq!(report.histogram.len(), 6);
    }
}
