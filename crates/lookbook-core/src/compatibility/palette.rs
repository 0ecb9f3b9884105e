//! Pairwise color vocabulary used by the scorer.
//!
//! These tables are recommendation data: changing a member changes which
//! families a color lands in and therefore edge scores across the catalog.

const NEUTRALS: &[&str] = &[
    "black", "white", "gray", "grey", "beige", "cream", "navy", "brown", "tan", "taupe",
    "charcoal", "ivory", "off-white", "khaki", "camel", "nude", "silver", "gold", "bone",
    "oatmeal",
];

/// Checked in order; the first family with a member contained in the color wins.
const COLOR_FAMILIES: &[(&str, &[&str])] = &[
    (
        "red",
        &["red", "burgundy", "maroon", "wine", "coral", "crimson", "scarlet", "rose", "berry"],
    ),
    (
        "blue",
        &["blue", "navy", "cobalt", "azure", "teal", "turquoise", "aqua", "sky", "slate"],
    ),
    (
        "green",
        &["green", "olive", "forest", "mint", "sage", "emerald", "lime", "teal", "eucalyptus"],
    ),
    (
        "yellow",
        &["yellow", "gold", "mustard", "amber", "honey", "lemon", "cream"],
    ),
    (
        "orange",
        &["orange", "coral", "peach", "tangerine", "rust", "terracotta", "copper"],
    ),
    (
        "pink",
        &["pink", "blush", "rose", "magenta", "fuchsia", "salmon", "mauve", "flamingo"],
    ),
    (
        "purple",
        &["purple", "violet", "lavender", "plum", "lilac", "mauve", "grape"],
    ),
    (
        "brown",
        &["brown", "tan", "camel", "chocolate", "coffee", "mocha", "cognac", "cinder"],
    ),
];

const COMPLEMENTARY: &[(&str, &str)] = &[
    ("blue", "orange"),
    ("red", "green"),
    ("yellow", "purple"),
    ("pink", "green"),
    ("navy", "orange"),
];

const ANALOGOUS: &[&[&str]] = &[
    &["red", "orange", "yellow"],
    &["yellow", "green", "blue"],
    &["blue", "purple", "pink"],
    &["pink", "red", "orange"],
];

const INTENSITY_MODIFIERS: &[&str] = &[
    "light", "dark", "bright", "pale", "deep", "soft", "muted", "dusty",
];

/// Lowercase, drop intensity modifiers and keep the part before any `/`.
pub fn normalize(color: &str) -> String {
    let mut normalized = color.trim().to_lowercase();
    for modifier in INTENSITY_MODIFIERS {
        normalized = normalized.replace(modifier, "").trim().to_string();
    }
    match normalized.split_once('/') {
        Some((head, _)) => head.trim().to_string(),
        None => normalized,
    }
}

/// Family name for a color; unmatched colors are their own family.
pub fn family(color: &str) -> String {
    let normalized = normalize(color);
    COLOR_FAMILIES
        .iter()
        .find(|(_, members)| members.iter().any(|member| normalized.contains(member)))
        .map(|(name, _)| (*name).to_string())
        .unwrap_or(normalized)
}

pub fn is_neutral(color: &str) -> bool {
    let normalized = normalize(color);
    normalized.is_empty() || NEUTRALS.iter().any(|neutral| normalized.contains(neutral))
}

fn complementary(a: &str, b: &str) -> bool {
    COMPLEMENTARY
        .iter()
        .any(|&(x, y)| (a == x && b == y) || (a == y && b == x))
}

fn analogous(a: &str, b: &str) -> bool {
    ANALOGOUS
        .iter()
        .any(|group| group.contains(&a) && group.contains(&b))
}

/// Color-harmony sub-score for two primary colors.
pub fn harmony(a: Option<&str>, b: Option<&str>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.7;
    };
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.7;
    }
    if is_neutral(a) || is_neutral(b) {
        return 1.0;
    }

    let family_a = family(a);
    let family_b = family(b);
    if family_a == family_b {
        0.95
    } else if complementary(&family_a, &family_b) {
        0.80
    } else if analogous(&family_a, &family_b) {
        0.70
    } else {
        0.50
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_modifiers_and_slash_suffix() {
        assert_eq!(normalize("Light Blue"), "blue");
        assert_eq!(normalize("dusty rose/white"), "rose");
        assert_eq!(normalize("  Deep  Olive "), "olive");
    }

    #[test]
    fn unmatched_color_is_its_own_family() {
        assert_eq!(family("cobalt"), "blue");
        assert_eq!(family("chartreuse"), "chartreuse");
    }

    #[test]
    fn harmony_levels() {
        assert_eq!(harmony(None, Some("red")), 0.7);
        assert_eq!(harmony(Some("black"), Some("red")), 1.0);
        assert_eq!(harmony(Some("burgundy"), Some("crimson")), 0.95);
        assert_eq!(harmony(Some("blue"), Some("orange")), 0.80);
        assert_eq!(harmony(Some("orange"), Some("blue")), 0.80);
        assert_eq!(harmony(Some("purple"), Some("pink")), 0.70);
        assert_eq!(harmony(Some("purple"), Some("chartreuse")), 0.50);
    }
}
