use serde::Serialize;

use super::colors::{self, NEUTRAL};
use super::domain::Dimension;
use crate::catalog::{Item, Sku};

const CASUAL: &str = "casual";
const EVERYDAY: &str = "everyday";

pub const MONOCHROME: &str = "monochrome";
pub const ACCENT: &str = "accent";

/// Candidates sharing one value along a dimension, in candidate order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    pub value: String,
    pub members: Vec<Sku>,
}

/// Clusters keyed by value, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    clusters: Vec<Cluster>,
}

impl Partition {
    fn with_values(values: &[&str]) -> Self {
        Self {
            clusters: values
                .iter()
                .map(|value| Cluster {
                    value: (*value).to_string(),
                    members: Vec::new(),
                })
                .collect(),
        }
    }

    fn add(&mut self, value: &str, sku: &Sku) {
        match self.clusters.iter_mut().find(|cluster| cluster.value == value) {
            Some(cluster) => {
                if !cluster.members.contains(sku) {
                    cluster.members.push(sku.clone());
                }
            }
            None => self.clusters.push(Cluster {
                value: value.to_string(),
                members: vec![sku.clone()],
            }),
        }
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn get(&self, value: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.value == value)
    }
}

/// The three independent partitions of a candidate pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partitions {
    pub occasion: Partition,
    pub aesthetic: Partition,
    pub color: Partition,
}

impl Partitions {
    /// Partitions in tie-break priority order.
    pub fn by_priority(&self) -> [(Dimension, &Partition); 3] {
        [
            (Dimension::Aesthetic, &self.aesthetic),
            (Dimension::Occasion, &self.occasion),
            (Dimension::Color, &self.color),
        ]
    }
}

/// Groups valid candidates around a base item by occasion, aesthetic and
/// color strategy. Membership is not exclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionClusterer;

impl DimensionClusterer {
    pub fn partition(&self, base: &Item, candidates: &[&Item]) -> Partitions {
        Partitions {
            occasion: self.by_occasion(base, candidates),
            aesthetic: self.by_aesthetic(base, candidates),
            color: self.by_color(base, candidates),
        }
    }

    /// One bucket per occasion shared with the base. Items without occasion
    /// tags count as casual; a casual or everyday base collects the rest
    /// under "casual".
    pub fn by_occasion(&self, base: &Item, candidates: &[&Item]) -> Partition {
        let base_tags = occasions_or_casual(base);
        let casual_base = base_tags.iter().any(|tag| *tag == CASUAL || *tag == EVERYDAY);

        let mut partition = Partition::default();
        for candidate in candidates {
            let shared: Vec<&str> = occasions_or_casual(candidate)
                .into_iter()
                .filter(|tag| base_tags.contains(tag))
                .collect();
            if shared.is_empty() {
                if casual_base {
                    partition.add(CASUAL, &candidate.sku);
                }
                continue;
            }
            for tag in shared {
                partition.add(tag, &candidate.sku);
            }
        }
        partition
    }

    /// One bucket per aesthetic shared with the base, or per the candidate's
    /// own aesthetics when the base has none. Untagged candidates join the
    /// base's first aesthetic.
    pub fn by_aesthetic(&self, base: &Item, candidates: &[&Item]) -> Partition {
        let mut partition = Partition::default();
        for candidate in candidates {
            if candidate.aesthetics.is_empty() {
                if let Some(first) = base.aesthetics.first() {
                    partition.add(first, &candidate.sku);
                }
                continue;
            }
            for tag in &candidate.aesthetics {
                if base.aesthetics.is_empty() || base.aesthetics.contains(tag) {
                    partition.add(tag, &candidate.sku);
                }
            }
        }
        partition
    }

    /// Fixed monochrome / neutral / accent buckets by primary color family.
    pub fn by_color(&self, base: &Item, candidates: &[&Item]) -> Partition {
        let base_family = colors::primary_family(base);
        let mut partition = Partition::with_values(&[MONOCHROME, NEUTRAL, ACCENT]);
        for candidate in candidates {
            let family = colors::primary_family(candidate);
            if family == base_family {
                partition.add(MONOCHROME, &candidate.sku);
            }
            if family == NEUTRAL {
                partition.add(NEUTRAL, &candidate.sku);
            } else if family != base_family {
                partition.add(ACCENT, &candidate.sku);
            }
        }
        partition
    }
}

fn occasions_or_casual(item: &Item) -> Vec<&str> {
    if item.occasions.is_empty() {
        vec![CASUAL]
    } else {
        item.occasions.iter().map(String::as_str).collect()
    }
}
