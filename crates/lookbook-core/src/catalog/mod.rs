//! Product catalog access: the item attribute records the core scores, and
//! the fetcher seam through which look generation pulls them.

pub mod domain;
pub mod loader;

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use async_trait::async_trait;
use tracing::{info, warn};

pub use domain::{Gender, Item, Sku, Slot, UnknownGender, UnknownSlot};
pub use loader::{CatalogRow, RejectReason, RowBatch, RowRejection};

/// Attribute lookup consumed by look generation.
///
/// `get_items` is a single batched call: skus that do not exist are simply
/// absent from the result.
#[async_trait]
pub trait ItemFetcher: Send + Sync {
    async fn get_item(&self, sku: &Sku) -> Result<Option<Item>, FetchError>;
    async fn get_items(&self, skus: &BTreeSet<Sku>) -> Result<Vec<Item>, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("item source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog JSON must be an array of rows or an object with a `products` array")]
    Shape,
}

/// Immutable in-memory catalog keyed by sku.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<Sku, Item>,
}

/// Outcome of loading a catalog: rows kept and rows skipped.
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub rejected: Vec<RowRejection>,
}

impl Catalog {
    /// Build from already-validated items. A repeated sku keeps the first row
    /// and reports the later ones as duplicates.
    pub fn from_items(items: Vec<Item>) -> CatalogLoad {
        Self::from_numbered(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index + 1, item))
                .collect(),
        )
    }

    fn from_numbered(items: Vec<(usize, Item)>) -> CatalogLoad {
        let mut map = HashMap::with_capacity(items.len());
        let mut rejected = Vec::new();

        for (row, item) in items {
            if map.contains_key(&item.sku) {
                rejected.push(RowRejection {
                    row,
                    sku: Some(item.sku.0.clone()),
                    reason: RejectReason::DuplicateSku,
                });
                continue;
            }
            map.insert(item.sku.clone(), item);
        }

        CatalogLoad {
            catalog: Self { items: map },
            rejected,
        }
    }

    /// Load a `.json` or `.csv` catalog file. Malformed rows are skipped and
    /// returned alongside the catalog rather than failing the load.
    pub fn load(path: impl AsRef<Path>) -> Result<CatalogLoad, CatalogError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        let batch = if is_csv {
            loader::parse_csv(reader)?
        } else {
            loader::parse_json(reader)?
        };

        let load = Self::from_batch(batch);
        for rejection in &load.rejected {
            warn!(%rejection, "skipping catalog row");
        }
        info!(
            path = %path.display(),
            items = load.catalog.len(),
            skipped = load.rejected.len(),
            "catalog loaded"
        );
        Ok(load)
    }

    pub fn from_batch(batch: RowBatch) -> CatalogLoad {
        let RowBatch { items, rejected } = batch;
        let mut load = Self::from_numbered(items);
        let mut all_rejected = rejected;
        all_rejected.append(&mut load.rejected);
        all_rejected.sort_by_key(|rejection| rejection.row);
        load.rejected = all_rejected;
        load
    }

    pub fn get(&self, sku: &Sku) -> Option<&Item> {
        self.items.get(sku)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items ordered by sku, the order the index builder walks them in.
    pub fn sorted_items(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.items.values().cloned().collect();
        items.sort_by(|a, b| a.sku.cmp(&b.sku));
        items
    }
}

#[async_trait]
impl ItemFetcher for Catalog {
    async fn get_item(&self, sku: &Sku) -> Result<Option<Item>, FetchError> {
        Ok(self.items.get(sku).cloned())
    }

    async fn get_items(&self, skus: &BTreeSet<Sku>) -> Result<Vec<Item>, FetchError> {
        Ok(skus
            .iter()
            .filter_map(|sku| self.items.get(sku).cloned())
            .collect())
    }
}
