use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::classify::{
    has_feminine_aesthetic, has_statement_details, has_statement_sleeves,
    has_streetwear_aesthetic, is_athleisure_bottom, is_athletic_top, is_closed_outerwear,
    is_fashion_bottom, is_knitwear, is_statement_outerwear, is_statement_top,
};
use crate::catalog::{Item, Slot};
use crate::compatibility::CompatibilityGate;

/// Why a candidate cannot be worn with the base garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SilhouetteConflict {
    StatementOuterwear,
    ClosedOuterwearHidesDetails,
    ClosedOuterwearOverKnit,
    AthleisureUnderStatementTop,
    AthleisureUnderDressyTop,
    FashionBottomUnderAthleticTop,
}

impl SilhouetteConflict {
    pub fn summary(&self) -> &'static str {
        match self {
            SilhouetteConflict::StatementOuterwear => "statement outerwear competes with the base",
            SilhouetteConflict::ClosedOuterwearHidesDetails => {
                "closed outerwear would hide statement details"
            }
            SilhouetteConflict::ClosedOuterwearOverKnit => "closed outerwear over knitwear is too bulky",
            SilhouetteConflict::AthleisureUnderStatementTop => {
                "athleisure bottom under a statement top"
            }
            SilhouetteConflict::AthleisureUnderDressyTop => "athleisure bottom under a dressy top",
            SilhouetteConflict::FashionBottomUnderAthleticTop => {
                "fashion bottom under an athletic top"
            }
        }
    }
}

impl fmt::Display for SilhouetteConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.summary())
    }
}

/// Outcome of pairing a candidate with the base garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairVerdict {
    Valid,
    Gate,
    SameSlot,
    Silhouette(SilhouetteConflict),
}

impl PairVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, PairVerdict::Valid)
    }
}

/// Statement or cropped tops normally reject athleisure bottoms. An athletic
/// top is always exempt; a streetwear-tagged top is exempt only when
/// `streetwear_exempts` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementTopAthleisureRule {
    pub streetwear_exempts: bool,
}

impl StatementTopAthleisureRule {
    pub fn rejects(&self, base: &Item, candidate: &Item) -> bool {
        if !(is_statement_top(base) || has_statement_details(base)) {
            return false;
        }
        if !is_athleisure_bottom(candidate) {
            return false;
        }
        if is_athletic_top(base) {
            return false;
        }
        !(self.streetwear_exempts && has_streetwear_aesthetic(base))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilhouettePolicy {
    pub streetwear_exempts_statement_top: bool,
}

impl Default for SilhouettePolicy {
    fn default() -> Self {
        Self {
            streetwear_exempts_statement_top: true,
        }
    }
}

impl SilhouettePolicy {
    pub fn statement_top_rule(&self) -> StatementTopAthleisureRule {
        StatementTopAthleisureRule {
            streetwear_exempts: self.streetwear_exempts_statement_top,
        }
    }

    /// First silhouette conflict between the base and an outerwear or
    /// primary-bottom candidate. Other slots never conflict.
    pub fn conflict(&self, base: &Item, candidate: &Item) -> Option<SilhouetteConflict> {
        match candidate.slot {
            Slot::Outerwear => {
                if is_statement_outerwear(candidate) {
                    return Some(SilhouetteConflict::StatementOuterwear);
                }
                let closed = is_closed_outerwear(candidate);
                if closed && (has_statement_details(base) || has_statement_sleeves(base)) {
                    return Some(SilhouetteConflict::ClosedOuterwearHidesDetails);
                }
                if closed && is_knitwear(base) {
                    return Some(SilhouetteConflict::ClosedOuterwearOverKnit);
                }
                None
            }
            Slot::PrimaryBottom => {
                if self.statement_top_rule().rejects(base, candidate) {
                    return Some(SilhouetteConflict::AthleisureUnderStatementTop);
                }
                if has_feminine_aesthetic(base) && is_athleisure_bottom(candidate) {
                    return Some(SilhouetteConflict::AthleisureUnderDressyTop);
                }
                if is_athletic_top(base) && is_fashion_bottom(candidate) {
                    return Some(SilhouetteConflict::FashionBottomUnderAthleticTop);
                }
                None
            }
            _ => None,
        }
    }
}

/// Pair validity used ahead of clustering: the compatibility gate, distinct
/// slots, and the silhouette rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairValidator {
    gate: CompatibilityGate,
    policy: SilhouettePolicy,
}

impl PairValidator {
    pub fn new(policy: SilhouettePolicy) -> Self {
        Self {
            gate: CompatibilityGate,
            policy,
        }
    }

    pub fn verdict(&self, base: &Item, candidate: &Item) -> PairVerdict {
        if base.slot == candidate.slot {
            return PairVerdict::SameSlot;
        }
        if !self.gate.admits(base, candidate) {
            return PairVerdict::Gate;
        }
        match self.policy.conflict(base, candidate) {
            Some(conflict) => {
                trace!(
                    base = %base.sku,
                    candidate = %candidate.sku,
                    %conflict,
                    "silhouette conflict"
                );
                PairVerdict::Silhouette(conflict)
            }
            None => PairVerdict::Valid,
        }
    }

    pub fn is_valid_pair(&self, base: &Item, candidate: &Item) -> bool {
        self.verdict(base, candidate).is_valid()
    }
}
