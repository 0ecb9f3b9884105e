use std::fmt;

use crate::catalog::{Gender, Item, Slot};

/// Tag that matches any occasion.
pub const WILDCARD_OCCASION: &str = "everyday";

/// The hard filter that failed for a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    SameSlot(Slot),
    GenderMismatch,
    NoSharedOccasion,
    NoSharedSeason,
    FormalityGap(u8),
}

impl fmt::Display for GateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateRejection::SameSlot(slot) => write!(f, "both items fill {slot}"),
            GateRejection::GenderMismatch => f.write_str("items target different genders"),
            GateRejection::NoSharedOccasion => f.write_str("no shared occasion"),
            GateRejection::NoSharedSeason => f.write_str("no shared season"),
            GateRejection::FormalityGap(gap) => write!(f, "formality differs by {gap}"),
        }
    }
}

/// Admissibility rules applied before any pair is scored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityGate;

impl CompatibilityGate {
    pub fn admits(&self, a: &Item, b: &Item) -> bool {
        self.check(a, b).is_ok()
    }

    /// First failing rule, checked in slot, gender, occasion, season, formality order.
    pub fn check(&self, a: &Item, b: &Item) -> Result<(), GateRejection> {
        if a.slot == b.slot && a.slot != Slot::Accessory {
            return Err(GateRejection::SameSlot(a.slot));
        }

        if a.gender != Gender::Unisex && b.gender != Gender::Unisex && a.gender != b.gender {
            return Err(GateRejection::GenderMismatch);
        }

        let bypass = a.slot.bypasses_tag_filters() || b.slot.bypasses_tag_filters();

        if !bypass && !occasions_compatible(&a.occasions, &b.occasions) {
            return Err(GateRejection::NoSharedOccasion);
        }

        if !bypass && !shares_tag_or_empty(&a.seasons, &b.seasons) {
            return Err(GateRejection::NoSharedSeason);
        }

        let gap = a.formality_score.abs_diff(b.formality_score);
        if gap > 1 {
            return Err(GateRejection::FormalityGap(gap));
        }

        Ok(())
    }
}

fn occasions_compatible(a: &[String], b: &[String]) -> bool {
    let wildcard = |tags: &[String]| tags.iter().any(|tag| tag == WILDCARD_OCCASION);
    wildcard(a) || wildcard(b) || shares_tag_or_empty(a, b)
}

fn shares_tag_or_empty(a: &[String], b: &[String]) -> bool {
    a.is_empty() || b.is_empty() || a.iter().any(|tag| b.contains(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(sku: &str, slot: Slot, occasions: &[&str], seasons: &[&str]) -> Item {
        let mut item = Item::new(sku, slot, "piece");
        item.occasions = occasions.iter().map(|tag| tag.to_string()).collect();
        item.seasons = seasons.iter().map(|tag| tag.to_string()).collect();
        item
    }

    #[test]
    fn same_slot_rejected_except_accessories() {
        let gate = CompatibilityGate;
        let a = Item::new("A", Slot::Footwear, "sneakers");
        let b = Item::new("B", Slot::Footwear, "boots");
        assert_eq!(gate.check(&a, &b), Err(GateRejection::SameSlot(Slot::Footwear)));

        let ring = Item::new("R", Slot::Accessory, "ring");
        let watch = Item::new("W", Slot::Accessory, "watch");
        assert!(gate.admits(&ring, &watch));
    }

    #[test]
    fn gender_rule_only_rejects_explicit_mismatch() {
        let gate = CompatibilityGate;
        let mut a = Item::new("A", Slot::BaseTop, "tee");
        let mut b = Item::new("B", Slot::PrimaryBottom, "jeans");
        a.gender = Gender::Men;
        assert!(gate.admits(&a, &b));
        b.gender = Gender::Women;
        assert_eq!(gate.check(&a, &b), Err(GateRejection::GenderMismatch));
    }

    #[test]
    fn occasion_rule_accepts_wildcard_and_bypass_slots() {
        let gate = CompatibilityGate;
        let top = tagged("A", Slot::BaseTop, &["work"], &[]);
        let jeans = tagged("B", Slot::PrimaryBottom, &["party"], &[]);
        assert_eq!(gate.check(&top, &jeans), Err(GateRejection::NoSharedOccasion));

        let everyday = tagged("C", Slot::PrimaryBottom, &["party", "everyday"], &[]);
        assert!(gate.admits(&top, &everyday));

        let skirt = tagged("D", Slot::SecondaryBottom, &["party"], &["summer"]);
        let winter_top = tagged("E", Slot::BaseTop, &["work"], &["winter"]);
        assert!(gate.admits(&winter_top, &skirt));
    }

    #[test]
    fn season_rule_requires_overlap() {
        let gate = CompatibilityGate;
        let a = tagged("A", Slot::BaseTop, &[], &["summer"]);
        let b = tagged("B", Slot::Footwear, &[], &["winter"]);
        assert_eq!(gate.check(&a, &b), Err(GateRejection::NoSharedSeason));
        let c = tagged("C", Slot::Footwear, &[], &[]);
        assert!(gate.admits(&a, &c));
    }

    #[test]
    fn formality_gap_above_one_rejected() {
        let gate = CompatibilityGate;
        let mut a = Item::new("A", Slot::BaseTop, "tee");
        let mut b = Item::new("B", Slot::Footwear, "oxford");
        a.formality_score = 0;
        b.formality_score = 3;
        assert_eq!(gate.check(&a, &b), Err(GateRejection::FormalityGap(3)));
        b.formality_score = 1;
        assert!(gate.admits(&a, &b));
    }
}
