//! Outfit-level color families.
//!
//! Coarser than the pair scorer's palette: every color collapses to one of
//! eight families, `neutral`, or `other`.

use std::collections::BTreeSet;

use crate::catalog::{Item, Slot};

pub const NEUTRAL: &str = "neutral";
pub const OTHER: &str = "other";

const NEUTRALS: &[&str] = &[
    "black", "white", "gray", "grey", "beige", "cream", "navy", "brown", "tan", "charcoal",
    "ivory", "off-white", "khaki",
];

const FAMILIES: &[(&str, &[&str])] = &[
    ("red", &["red", "burgundy", "maroon", "wine", "coral", "crimson"]),
    ("blue", &["blue", "navy", "cobalt", "azure", "teal", "turquoise"]),
    ("green", &["green", "olive", "forest", "mint", "sage", "emerald"]),
    ("yellow", &["yellow", "gold", "mustard", "amber", "honey"]),
    ("orange", &["orange", "coral", "peach", "tangerine", "rust"]),
    ("pink", &["pink", "blush", "rose", "magenta", "fuchsia", "salmon"]),
    ("purple", &["purple", "violet", "lavender", "plum", "lilac"]),
    ("brown", &["brown", "tan", "camel", "chocolate", "coffee", "mocha"]),
];

const COMPLEMENTARY: &[(&str, &str)] = &[
    ("blue", "orange"),
    ("red", "green"),
    ("yellow", "purple"),
    ("pink", "green"),
    ("blue", "brown"),
    ("red", "brown"),
];

pub type ColorSet = BTreeSet<&'static str>;

/// Family of one color; empty colors count as neutral.
pub fn family(color: &str) -> &'static str {
    let lower = color.trim().to_lowercase();
    if lower.is_empty() || NEUTRALS.iter().any(|neutral| lower.contains(neutral)) {
        return NEUTRAL;
    }
    FAMILIES
        .iter()
        .find(|(_, members)| members.iter().any(|member| lower.contains(member)))
        .map(|(name, _)| *name)
        .unwrap_or(OTHER)
}

/// Family of the item's primary color.
pub fn primary_family(item: &Item) -> &'static str {
    family(item.primary_color.as_deref().unwrap_or(""))
}

/// Families of the primary and every secondary color.
pub fn item_colors(item: &Item) -> ColorSet {
    item.primary_color
        .iter()
        .chain(item.secondary_colors.iter())
        .filter(|color| !color.trim().is_empty())
        .map(|color| family(color))
        .collect()
}

pub fn harmonious(a: &ColorSet, b: &ColorSet) -> bool {
    if a.is_empty() || b.is_empty() {
        return true;
    }
    let only_neutral = |set: &ColorSet| set.len() == 1 && set.contains(NEUTRAL);
    if only_neutral(a) || only_neutral(b) {
        return true;
    }
    if a.intersection(b).next().is_some() {
        return true;
    }

    let vivid_a: Vec<&str> = a.iter().copied().filter(|c| *c != NEUTRAL).collect();
    let vivid_b: Vec<&str> = b.iter().copied().filter(|c| *c != NEUTRAL).collect();
    if vivid_a.is_empty() || vivid_b.is_empty() {
        return true;
    }

    vivid_a.iter().any(|x| {
        vivid_b.iter().any(|y| {
            COMPLEMENTARY
                .iter()
                .any(|&(p, q)| (p == *x && q == *y) || (p == *y && q == *x))
        })
    })
}

/// Whether a candidate's colors work with the outfit so far, as judged for
/// `slot`. Footwear also passes when it is all-neutral.
pub fn fits_outfit(candidate: &ColorSet, outfit: &ColorSet, slot: Slot) -> bool {
    if candidate.is_empty() || outfit.is_empty() {
        return true;
    }
    if slot == Slot::Footwear && candidate.iter().all(|color| *color == NEUTRAL) {
        return true;
    }
    harmonious(candidate, outfit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(colors: &[&'static str]) -> ColorSet {
        colors.iter().copied().collect()
    }

    #[test]
    fn families_resolve_neutral_before_hue() {
        assert_eq!(family("Navy Blue"), NEUTRAL);
        assert_eq!(family(""), NEUTRAL);
        assert_eq!(family("burgundy"), "red");
        assert_eq!(family("chartreuse"), OTHER);
    }

    #[test]
    fn harmony_rules() {
        assert!(harmonious(&set(&["red"]), &set(&[])));
        assert!(harmonious(&set(&["red"]), &set(&["neutral"])));
        assert!(harmonious(&set(&["red", "blue"]), &set(&["blue"])));
        assert!(harmonious(&set(&["blue", "neutral"]), &set(&["orange"])));
        assert!(harmonious(&set(&["brown"]), &set(&["red"])));
        assert!(!harmonious(&set(&["red"]), &set(&["purple"])));
    }

    #[test]
    fn only_footwear_gets_the_neutral_pass() {
        let outfit = set(&["red"]);
        assert!(fits_outfit(&set(&["neutral"]), &outfit, Slot::Footwear));
        assert!(!fits_outfit(&set(&["purple"]), &outfit, Slot::Footwear));
        assert!(!fits_outfit(&set(&["purple"]), &outfit, Slot::Accessory));
        assert!(!fits_outfit(&set(&["purple"]), &outfit, Slot::Outerwear));
        assert!(fits_outfit(&set(&["purple"]), &set(&[]), Slot::Accessory));
    }
}
