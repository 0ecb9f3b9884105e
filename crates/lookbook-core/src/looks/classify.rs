//! Garment classification by keyword lookup over free-text attributes.

use super::tables::{
    mentions, tagged, ATHLEISURE_BOTTOMS, ATHLETIC_AESTHETICS, ATHLETIC_TOPS, CLOSED_OUTERWEAR,
    FASHION_BOTTOMS, FEMININE_DRESSY_AESTHETICS, KNITWEAR, KNIT_MATERIALS, STATEMENT_DETAILS,
    STATEMENT_OUTERWEAR_ELEMENTS, STATEMENT_SLEEVES, STATEMENT_TOPS, STREETWEAR_AESTHETICS,
    UNWEARABLE_ACCESSORIES, WEARABLE_ACCESSORIES,
};
use crate::catalog::Item;

fn design_text(item: &Item) -> String {
    item.design_elements.join(" ").to_lowercase()
}

fn joined(parts: &[&str]) -> String {
    parts.join(" ").to_lowercase()
}

fn type_and_sub(item: &Item) -> String {
    joined(&[&item.item_type, item.sub_category_text()])
}

fn type_sub_title(item: &Item) -> String {
    joined(&[&item.item_type, item.sub_category_text(), item.title_text()])
}

/// Lace, cutouts, statement sleeves and similar details meant to stay visible.
pub fn has_statement_details(item: &Item) -> bool {
    let design = design_text(item);
    mentions(&design, STATEMENT_DETAILS) || mentions(&design, STATEMENT_SLEEVES)
}

pub fn has_statement_sleeves(item: &Item) -> bool {
    mentions(&design_text(item), STATEMENT_SLEEVES)
}

/// Hoodies, pullovers, puffers: outerwear that hides the top underneath.
pub fn is_closed_outerwear(item: &Item) -> bool {
    mentions(&type_sub_title(item), CLOSED_OUTERWEAR)
}

pub fn is_statement_outerwear(item: &Item) -> bool {
    mentions(&design_text(item), STATEMENT_OUTERWEAR_ELEMENTS)
}

pub fn is_statement_top(item: &Item) -> bool {
    mentions(&type_and_sub(item), STATEMENT_TOPS)
}

pub fn is_athleisure_bottom(item: &Item) -> bool {
    mentions(&type_and_sub(item), ATHLEISURE_BOTTOMS)
}

pub fn has_feminine_aesthetic(item: &Item) -> bool {
    tagged(&item.aesthetics, FEMININE_DRESSY_AESTHETICS)
}

pub fn has_streetwear_aesthetic(item: &Item) -> bool {
    tagged(&item.aesthetics, STREETWEAR_AESTHETICS)
}

pub fn is_athletic_top(item: &Item) -> bool {
    mentions(&type_sub_title(item), ATHLETIC_TOPS) || tagged(&item.aesthetics, ATHLETIC_AESTHETICS)
}

pub fn is_knitwear(item: &Item) -> bool {
    let material = item.material_text().to_lowercase();
    mentions(&joined(&[&item.item_type, item.sub_category_text(), &material]), KNITWEAR)
        || mentions(&material, KNIT_MATERIALS)
}

/// Jeans, chinos, trousers, cargo: bottoms that clash with gym tops.
pub fn is_fashion_bottom(item: &Item) -> bool {
    mentions(&type_sub_title(item), FASHION_BOTTOMS)
}

/// Whether an accessory can be worn with an outfit.
///
/// The deny table wins over the allow table. Types matching neither are not
/// wearable.
pub fn is_wearable_accessory(item: &Item) -> bool {
    let text = type_sub_title(item);
    if mentions(&text, UNWEARABLE_ACCESSORIES) {
        return false;
    }
    mentions(&text, WEARABLE_ACCESSORIES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Slot;

    fn accessory(item_type: &str) -> Item {
        Item::new("ACC", Slot::Accessory, item_type)
    }

    #[test]
    fn deny_list_beats_allow_list() {
        // "keychain" also matches "chain" on the allow list
        assert!(!is_wearable_accessory(&accessory("phone case")));
        assert!(!is_wearable_accessory(&accessory("keychain")));
        assert!(is_wearable_accessory(&accessory("bucket hat")));
    }

    #[test]
    fn unmatched_accessory_is_not_wearable() {
        assert!(!is_wearable_accessory(&accessory("accessory")));
        assert!(!is_wearable_accessory(&accessory("gadget")));
    }

    #[test]
    fn knitwear_by_type_or_material() {
        let mut top = Item::new("TOP", Slot::BaseTop, "top");
        assert!(!is_knitwear(&top));
        top.material = Some("merino wool".into());
        assert!(is_knitwear(&top));
        assert!(is_knitwear(&Item::new("CARD", Slot::BaseTop, "cardigan")));
    }

    #[test]
    fn athletic_top_by_keyword_or_aesthetic() {
        let mut tee = Item::new("TEE", Slot::BaseTop, "t-shirt");
        assert!(!is_athletic_top(&tee));
        tee.aesthetics = vec!["fitness".into()];
        assert!(is_athletic_top(&tee));
        let mut tank = Item::new("TANK", Slot::BaseTop, "top");
        tank.title = Some("Ribbed Tank Top".into());
        assert!(is_athletic_top(&tank));
    }

    #[test]
    fn statement_details_include_sleeves() {
        let mut blouse = Item::new("B", Slot::BaseTop, "blouse");
        blouse.design_elements = vec!["puff sleeves".into()];
        assert!(has_statement_sleeves(&blouse));
        assert!(has_statement_details(&blouse));
    }
}
