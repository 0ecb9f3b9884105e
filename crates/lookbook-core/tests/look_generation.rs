use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use lookbook_core::catalog::{Catalog, FetchError, Item, ItemFetcher, Sku, Slot};
use lookbook_core::compatibility::{build_index, CompatibilityIndex};
use lookbook_core::looks::{GenerationError, LookGenerator};

fn garment(sku: &str, slot: Slot, item_type: &str, color: &str) -> Item {
    let mut item = Item::new(sku, slot, item_type);
    item.primary_color = Some(color.to_string());
    item
}

/// Counts batched attribute fetches.
struct CountingFetcher {
    catalog: Catalog,
    batches: AtomicUsize,
}

impl CountingFetcher {
    fn new(items: Vec<Item>) -> Self {
        Self {
            catalog: Catalog::from_items(items).catalog,
            batches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ItemFetcher for CountingFetcher {
    async fn get_item(&self, sku: &Sku) -> Result<Option<Item>, FetchError> {
        self.catalog.get_item(sku).await
    }

    async fn get_items(&self, skus: &BTreeSet<Sku>) -> Result<Vec<Item>, FetchError> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        self.catalog.get_items(skus).await
    }
}

fn wardrobe() -> Vec<Item> {
    let mut top = garment("TOP", Slot::BaseTop, "t-shirt", "blue");
    top.aesthetics = vec!["streetwear".to_string()];
    let mut items = vec![top];
    for (sku, color) in [("JEANS-1", "black"), ("JEANS-2", "gray"), ("JEANS-3", "navy")] {
        items.push(garment(sku, Slot::PrimaryBottom, "jeans", color));
    }
    items.push(garment("SNEAKER", Slot::Footwear, "sneakers", "white"));
    items.push(garment("PHONE", Slot::Accessory, "phone case", "black"));
    items.push(garment("WATCH", Slot::Accessory, "watch", "silver"));
    items.push(garment("TOTE", Slot::Accessory, "tote", "orange"));
    items
}

fn index_for(items: &[Item]) -> CompatibilityIndex {
    CompatibilityIndex::in_memory(build_index(items, 0).edges)
}

#[tokio::test]
async fn unknown_base_is_not_found() {
    let items = wardrobe();
    let fetcher = CountingFetcher::new(items.clone());
    let result = LookGenerator::default()
        .generate(&index_for(&items), &fetcher, &Sku::from("UNKNOWN-SKU"), 3)
        .await;
    assert!(matches!(result, Err(GenerationError::NotFound(sku)) if sku.as_str() == "UNKNOWN-SKU"));
}

#[tokio::test]
async fn isolated_base_yields_no_looks() {
    let mut items = wardrobe();
    let mut gown = garment("GOWN", Slot::BaseTop, "blouse", "red");
    gown.formality_score = 4;
    items.push(gown);

    let fetcher = CountingFetcher::new(items.clone());
    let generated = LookGenerator::default()
        .generate(&index_for(&items), &fetcher, &Sku::from("GOWN"), 3)
        .await
        .expect("known sku");
    assert_eq!(generated.base.sku, Sku::from("GOWN"));
    assert!(generated.looks.is_empty());
}

#[tokio::test]
async fn single_footwear_item_is_reused_across_looks() {
    let items = wardrobe();
    let fetcher = CountingFetcher::new(items.clone());
    let generated = LookGenerator::default()
        .generate(&index_for(&items), &fetcher, &Sku::from("TOP"), 2)
        .await
        .expect("looks");

    assert_eq!(generated.looks.len(), 2);
    for look in &generated.looks {
        assert_eq!(look.sku_in(Slot::Footwear), Some(&Sku::from("SNEAKER")));
    }
    let bottoms: BTreeSet<&Sku> = generated
        .looks
        .iter()
        .filter_map(|look| look.sku_in(Slot::PrimaryBottom))
        .collect();
    assert_eq!(bottoms.len(), 2);
    assert_eq!(fetcher.batches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn phone_cases_never_reach_the_accessory_slot() {
    let items = wardrobe();
    let fetcher = CountingFetcher::new(items.clone());
    let generated = LookGenerator::default()
        .generate(&index_for(&items), &fetcher, &Sku::from("TOP"), 6)
        .await
        .expect("looks");

    assert!(!generated.looks.is_empty());
    for look in &generated.looks {
        let accessory = look.sku_in(Slot::Accessory).expect("accessory is mandatory");
        assert_ne!(accessory.as_str(), "PHONE");
    }
}

#[tokio::test]
async fn generation_is_deterministic() {
    let items = wardrobe();
    let index = index_for(&items);
    let generator = LookGenerator::default();

    let mut rendered = Vec::new();
    for _ in 0..3 {
        let fetcher = CountingFetcher::new(items.clone());
        let generated = generator
            .generate(&index, &fetcher, &Sku::from("TOP"), 4)
            .await
            .expect("looks");
        rendered.push(serde_json::to_string(&generated.looks).expect("serialize"));
    }
    assert!(rendered.windows(2).all(|pair| pair[0] == pair[1]));
}
