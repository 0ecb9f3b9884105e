use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog items.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(pub String);

impl Sku {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sku {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The outfit role a garment fills. At most one item per slot per look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    BaseTop,
    Outerwear,
    PrimaryBottom,
    SecondaryBottom,
    Footwear,
    Accessory,
}

impl Slot {
    pub const fn key(self) -> &'static str {
        match self {
            Slot::BaseTop => "base_top",
            Slot::Outerwear => "outerwear",
            Slot::PrimaryBottom => "primary_bottom",
            Slot::SecondaryBottom => "secondary_bottom",
            Slot::Footwear => "footwear",
            Slot::Accessory => "accessory",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Slot::BaseTop => "Base Top",
            Slot::Outerwear => "Outerwear",
            Slot::PrimaryBottom => "Primary Bottom",
            Slot::SecondaryBottom => "Secondary Bottom",
            Slot::Footwear => "Footwear",
            Slot::Accessory => "Accessory",
        }
    }

    /// Slots that skip the occasion and season hard filters.
    pub const fn bypasses_tag_filters(self) -> bool {
        matches!(self, Slot::Accessory | Slot::SecondaryBottom)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized functional slot '{0}'")]
pub struct UnknownSlot(pub String);

impl FromStr for Slot {
    type Err = UnknownSlot;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw
            .trim()
            .to_ascii_lowercase()
            .replace(|c: char| c == '_' || c == '-', " ");
        match normalized.as_str() {
            "base top" => Ok(Slot::BaseTop),
            "outerwear" => Ok(Slot::Outerwear),
            "primary bottom" => Ok(Slot::PrimaryBottom),
            "secondary bottom" => Ok(Slot::SecondaryBottom),
            "footwear" => Ok(Slot::Footwear),
            "accessory" => Ok(Slot::Accessory),
            _ => Err(UnknownSlot(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Men => "men",
            Gender::Women => "women",
            Gender::Unisex => "unisex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized gender '{0}'")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "men" | "man" | "male" | "mens" => Ok(Gender::Men),
            "women" | "woman" | "female" | "womens" => Ok(Gender::Women),
            "unisex" => Ok(Gender::Unisex),
            _ => Err(UnknownGender(raw.to_string())),
        }
    }
}

/// Read-only attribute record for one catalog product.
///
/// Text attributes are trimmed and lowercased at load time (title and brand
/// keep their case for display); list attributes
/// keep their declared order (first-seen order matters for clustering) and
/// default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub sku: Sku,
    pub slot: Slot,
    pub gender: Gender,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub image_url: String,
    pub item_type: String,
    pub category: String,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub secondary_colors: Vec<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub fit: Option<String>,
    #[serde(default)]
    pub design_elements: Vec<String>,
    pub formality_score: u8,
    #[serde(default)]
    pub statement_piece: bool,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub aesthetics: Vec<String>,
    #[serde(default)]
    pub occasions: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<String>,
}

impl Item {
    /// Minimal item with permissive defaults; remaining attributes are set by the caller.
    pub fn new(sku: impl Into<String>, slot: Slot, item_type: impl Into<String>) -> Self {
        Self {
            sku: Sku(sku.into()),
            slot,
            gender: Gender::Unisex,
            title: None,
            brand: None,
            image_url: String::new(),
            item_type: item_type.into(),
            category: slot.key().to_string(),
            sub_category: None,
            primary_color: None,
            secondary_colors: Vec::new(),
            pattern: None,
            material: None,
            fit: None,
            design_elements: Vec::new(),
            formality_score: 1,
            statement_piece: false,
            style: None,
            aesthetics: Vec::new(),
            occasions: Vec::new(),
            seasons: Vec::new(),
        }
    }

    /// Title for display, falling back to the product type.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(&self.item_type)
    }

    pub fn sub_category_text(&self) -> &str {
        self.sub_category.as_deref().unwrap_or("")
    }

    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn material_text(&self) -> &str {
        self.material.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_parses_labels_keys_and_mixed_case() {
        assert_eq!("Base Top".parse::<Slot>(), Ok(Slot::BaseTop));
        assert_eq!("primary_bottom".parse::<Slot>(), Ok(Slot::PrimaryBottom));
        assert_eq!(" SECONDARY-BOTTOM ".parse::<Slot>(), Ok(Slot::SecondaryBottom));
        assert!("hat rack".parse::<Slot>().is_err());
    }

    #[test]
    fn gender_accepts_common_spellings() {
        assert_eq!("Men".parse::<Gender>(), Ok(Gender::Men));
        assert_eq!("female".parse::<Gender>(), Ok(Gender::Women));
        assert_eq!("UNISEX".parse::<Gender>(), Ok(Gender::Unisex));
        assert!("kids".parse::<Gender>().is_err());
    }

    #[test]
    fn display_title_falls_back_to_type() {
        let mut item = Item::new("sku-1", Slot::Footwear, "sneakers");
        assert_eq!(item.display_title(), "sneakers");
        item.title = Some("court classic".to_string());
        assert_eq!(item.display_title(), "court classic");
    }
}
