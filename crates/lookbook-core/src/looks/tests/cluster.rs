use super::common::*;
use crate::catalog::{Item, Slot};
use crate::looks::cluster::{ACCENT, MONOCHROME};
use crate::looks::{Dimension, DimensionClusterer};

fn members(partition: &crate::looks::Partition, value: &str) -> Vec<String> {
    partition
        .get(value)
        .map(|cluster| cluster.members.iter().map(|sku| sku.to_string()).collect())
        .unwrap_or_default()
}

fn with_occasions(sku: &str, slot: Slot, occasions: &[&str]) -> Item {
    let mut item = item(sku, slot, "piece");
    item.occasions = tags(occasions);
    item
}

#[test]
fn occasions_cluster_on_shared_tags_with_a_casual_fallback() {
    let base = with_occasions("BASE", Slot::BaseTop, &["casual", "date"]);
    let date = with_occasions("DATE", Slot::PrimaryBottom, &["date"]);
    let work = with_occasions("WORK", Slot::Footwear, &["work"]);
    let untagged = with_occasions("NONE", Slot::Accessory, &[]);

    let partition = DimensionClusterer.by_occasion(&base, &[&date, &work, &untagged]);
    let values: Vec<&str> = partition
        .clusters()
        .iter()
        .map(|cluster| cluster.value.as_str())
        .collect();

    assert_eq!(values, vec!["date", "casual"]);
    assert_eq!(members(&partition, "casual"), vec!["WORK", "NONE"]);
}

#[test]
fn unshared_occasions_are_dropped_for_a_dressy_base() {
    let base = with_occasions("BASE", Slot::BaseTop, &["work"]);
    let party = with_occasions("PARTY", Slot::PrimaryBottom, &["party"]);

    let partition = DimensionClusterer.by_occasion(&base, &[&party]);
    assert!(partition.clusters().is_empty());
}

#[test]
fn aesthetics_follow_the_base_or_the_candidates_own_tags() {
    let base = white_tee();
    let mut shared = item("SHARED", Slot::PrimaryBottom, "jeans");
    shared.aesthetics = tags(&["minimalist", "streetwear"]);
    let untagged = item("PLAIN", Slot::Footwear, "sneakers");
    let mut classic = item("CLASSIC", Slot::Outerwear, "blazer");
    classic.aesthetics = tags(&["classic"]);

    let partition = DimensionClusterer.by_aesthetic(&base, &[&shared, &untagged, &classic]);
    assert_eq!(partition.clusters().len(), 1);
    assert_eq!(members(&partition, "streetwear"), vec!["SHARED", "PLAIN"]);

    let plain_base = item("BASE", Slot::BaseTop, "t-shirt");
    let partition = DimensionClusterer.by_aesthetic(&plain_base, &[&shared, &untagged, &classic]);
    assert_eq!(members(&partition, "minimalist"), vec!["SHARED"]);
    assert_eq!(members(&partition, "classic"), vec!["CLASSIC"]);
    assert!(partition.get("streetwear").is_some());
}

#[test]
fn color_strategy_buckets_against_the_base_family() {
    let base = colored("BASE", Slot::BaseTop, "t-shirt", "light blue");
    let cobalt = colored("COBALT", Slot::PrimaryBottom, "jeans", "cobalt");
    let black = colored("BLACK", Slot::Footwear, "boots", "black");
    let red = colored("RED", Slot::Accessory, "scarf", "crimson");

    let partition = DimensionClusterer.by_color(&base, &[&cobalt, &black, &red]);
    assert_eq!(members(&partition, MONOCHROME), vec!["COBALT"]);
    assert_eq!(members(&partition, "neutral"), vec!["BLACK"]);
    assert_eq!(members(&partition, ACCENT), vec!["RED"]);
}

#[test]
fn neutral_base_puts_neutral_candidates_in_both_buckets() {
    let base = colored("BASE", Slot::BaseTop, "t-shirt", "white");
    let black = colored("BLACK", Slot::Footwear, "boots", "black");

    let partition = DimensionClusterer.by_color(&base, &[&black]);
    assert_eq!(members(&partition, MONOCHROME), vec!["BLACK"]);
    assert_eq!(members(&partition, "neutral"), vec!["BLACK"]);
    assert!(members(&partition, ACCENT).is_empty());
}

#[test]
fn priority_order_is_aesthetic_occasion_color() {
    let base = white_tee();
    let partitions = DimensionClusterer.partition(&base, &[]);
    let order: Vec<Dimension> = partitions
        .by_priority()
        .iter()
        .map(|(dimension, _)| *dimension)
        .collect();
    assert_eq!(
        order,
        vec![Dimension::Aesthetic, Dimension::Occasion, Dimension::Color]
    );
    assert!(partitions.color.clusters().iter().all(|cluster| cluster.members.is_empty()));
}
