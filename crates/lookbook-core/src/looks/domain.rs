use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::tables::LOOK_NAMES;
use crate::catalog::{Item, Sku, Slot};

/// The axis a look is coherent along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Occasion,
    Aesthetic,
    Color,
    Style,
}

impl Dimension {
    pub const fn key(self) -> &'static str {
        match self {
            Dimension::Occasion => "occasion",
            Dimension::Aesthetic => "aesthetic",
            Dimension::Color => "color",
            Dimension::Style => "style",
        }
    }

    /// Display name and description for a value along this dimension.
    pub fn describe(self, value: &str) -> (String, String) {
        let value = value.to_lowercase();
        LOOK_NAMES
            .iter()
            .find(|(dimension, _)| *dimension == self.key())
            .and_then(|(_, names)| names.iter().find(|(key, _, _)| *key == value))
            .map(|(_, name, description)| (name.to_string(), description.to_string()))
            .unwrap_or_else(|| {
                (
                    format!("{} Look", title_case(&value)),
                    format!("A {value} focused outfit"),
                )
            })
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Snapshot of an item's display fields taken when the look is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookItem {
    pub sku: Sku,
    pub title: String,
    pub brand: String,
    pub image_url: String,
    pub item_type: String,
    pub color: String,
    pub slot: Slot,
}

impl LookItem {
    pub fn snapshot(item: &Item) -> Self {
        Self {
            sku: item.sku.clone(),
            title: item.display_title().to_string(),
            brand: item.brand.clone().unwrap_or_default(),
            image_url: item.image_url.clone(),
            item_type: item.item_type.clone(),
            color: item.primary_color.clone().unwrap_or_default(),
            slot: item.slot,
        }
    }
}

/// One complete outfit around the base item. At most one item per slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Look {
    pub id: String,
    pub name: String,
    pub description: String,
    pub dimension: Dimension,
    pub dimension_value: String,
    pub items: BTreeMap<Slot, LookItem>,
}

impl Look {
    pub fn new(
        id: String,
        dimension: Dimension,
        value: &str,
        name: String,
        description: String,
    ) -> Self {
        Self {
            id,
            name,
            description,
            dimension,
            dimension_value: value.to_string(),
            items: BTreeMap::new(),
        }
    }

    pub fn place(&mut self, item: &Item) {
        self.items.insert(item.slot, LookItem::snapshot(item));
    }

    pub fn has(&self, slot: Slot) -> bool {
        self.items.contains_key(&slot)
    }

    pub fn sku_in(&self, slot: Slot) -> Option<&Sku> {
        self.items.get(&slot).map(|item| &item.sku)
    }

    pub fn slots_filled(&self) -> Vec<Slot> {
        self.items.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values_use_the_name_table() {
        let (name, description) = Dimension::Aesthetic.describe("Streetwear");
        assert_eq!(name, "Street Style");
        assert_eq!(description, "Urban edge meets comfort");
    }

    #[test]
    fn unknown_values_get_a_generated_name() {
        let (name, description) = Dimension::Occasion.describe("beach day");
        assert_eq!(name, "Beach Day Look");
        assert_eq!(description, "A beach day focused outfit");
    }
}
