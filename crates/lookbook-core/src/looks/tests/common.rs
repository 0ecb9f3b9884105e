use std::collections::{BTreeSet, HashMap};

use crate::catalog::{Item, Sku, Slot};
use crate::compatibility::edges::select;
use crate::compatibility::{CrossScoreBatch, EdgeSet, DEFAULT_CANDIDATES_PER_SLOT};

pub(super) fn item(sku: &str, slot: Slot, item_type: &str) -> Item {
    Item::new(sku, slot, item_type)
}

pub(super) fn colored(sku: &str, slot: Slot, item_type: &str, color: &str) -> Item {
    let mut item = item(sku, slot, item_type);
    item.primary_color = Some(color.to_string());
    item
}

pub(super) fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Plain white tee with a streetwear, casual profile.
pub(super) fn white_tee() -> Item {
    let mut tee = colored("TOP", Slot::BaseTop, "t-shirt", "white");
    tee.aesthetics = tags(&["streetwear"]);
    tee.occasions = tags(&["casual"]);
    tee
}

/// Small streetwear catalog around [`white_tee`]: one hoodie, two bottoms,
/// one sneaker, a cap and a phone case.
pub(super) fn streetwear_catalog() -> Vec<Item> {
    let mut jeans = colored("JEANS", Slot::PrimaryBottom, "jeans", "blue");
    jeans.aesthetics = tags(&["streetwear"]);
    let mut chinos = colored("CHINO", Slot::PrimaryBottom, "chinos", "khaki");
    chinos.aesthetics = tags(&["classic"]);
    let mut sneaker = colored("SNEAK", Slot::Footwear, "sneakers", "white");
    sneaker.aesthetics = tags(&["streetwear"]);
    let mut cap = colored("CAP", Slot::Accessory, "baseball cap", "black");
    cap.aesthetics = tags(&["streetwear"]);
    let mut phone = colored("PHONE", Slot::Accessory, "phone case", "black");
    phone.aesthetics = tags(&["streetwear"]);
    let hoodie = colored("HOOD", Slot::Outerwear, "hoodie", "gray");

    vec![white_tee(), jeans, chinos, sneaker, cap, phone, hoodie]
}

/// What the generator would hand the assembler for `base`: the ranked
/// candidates, their records and the cross scores among them.
pub(super) fn batch_for(base: &Item, catalog: &[Item]) -> (HashMap<Sku, Item>, CrossScoreBatch) {
    let edges = EdgeSet::build(catalog);
    let candidates = edges
        .neighbours(&base.sku)
        .map(|ranked| select(ranked, None, Some(DEFAULT_CANDIDATES_PER_SLOT), 0.0))
        .unwrap_or_default();

    let mut members: BTreeSet<Sku> = candidates
        .values()
        .flatten()
        .map(|neighbour| neighbour.sku.clone())
        .collect();
    let products = catalog
        .iter()
        .filter(|item| members.contains(&item.sku))
        .map(|item| (item.sku.clone(), item.clone()))
        .collect();
    members.insert(base.sku.clone());
    let scores = edges.cross_scores(&members);

    (products, CrossScoreBatch { candidates, scores })
}
