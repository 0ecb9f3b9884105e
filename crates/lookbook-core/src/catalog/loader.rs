use std::fmt;
use std::io::Read;

use serde::Deserialize;
use serde_json::Value;

use super::domain::{Gender, Item, Sku, Slot};
use super::CatalogError;

/// Loosely typed catalog row as exported by the product store.
///
/// Field aliases accept both the exported column names (`sku_id`,
/// `functional_slot`, `fashion_aesthetics`, ...) and the crate's own names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogRow {
    #[serde(default, alias = "sku_id")]
    pub sku: Option<String>,
    #[serde(default, alias = "image_file")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, rename = "type", alias = "item_type")]
    pub item_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub secondary_colors: Option<Vec<String>>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default, alias = "material_appearance")]
    pub material: Option<String>,
    #[serde(default)]
    pub fit: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub design_elements: Option<Vec<String>>,
    #[serde(default)]
    pub statement_piece: Option<bool>,
    #[serde(default, alias = "functional_slot")]
    pub slot: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default, alias = "fashion_aesthetics")]
    pub aesthetics: Option<Vec<String>>,
    #[serde(default, alias = "occasion")]
    pub occasions: Option<Vec<String>>,
    #[serde(default)]
    pub formality_score: Option<i64>,
    #[serde(default, alias = "season")]
    pub seasons: Option<Vec<String>>,
}

/// Flat CSV row; list columns are `|`-separated.
#[derive(Debug, Clone, Default, Deserialize)]
struct CsvCatalogRow {
    #[serde(default, alias = "sku")]
    sku_id: Option<String>,
    #[serde(default, alias = "image_file")]
    image_url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default, rename = "type", alias = "item_type")]
    item_type: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    sub_category: Option<String>,
    #[serde(default)]
    primary_color: Option<String>,
    #[serde(default)]
    secondary_colors: Option<String>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default, alias = "material")]
    material_appearance: Option<String>,
    #[serde(default)]
    fit: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    design_elements: Option<String>,
    #[serde(default)]
    statement_piece: Option<String>,
    #[serde(default, alias = "slot")]
    functional_slot: Option<String>,
    #[serde(default)]
    style: Option<String>,
    #[serde(default, alias = "aesthetics")]
    fashion_aesthetics: Option<String>,
    #[serde(default, alias = "occasions")]
    occasion: Option<String>,
    #[serde(default)]
    formality_score: Option<String>,
    #[serde(default, alias = "seasons")]
    season: Option<String>,
}

impl CsvCatalogRow {
    fn into_row(self) -> Result<CatalogRow, RejectReason> {
        let formality_score = match self.formality_score.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| RejectReason::InvalidFormality(raw.to_string()))?,
            ),
        };

        Ok(CatalogRow {
            sku: self.sku_id,
            image_url: self.image_url,
            title: self.title,
            brand: self.brand,
            item_type: self.item_type,
            category: self.category,
            sub_category: self.sub_category,
            primary_color: self.primary_color,
            secondary_colors: self.secondary_colors.map(split_list),
            pattern: self.pattern,
            material: self.material_appearance,
            fit: self.fit,
            gender: self.gender,
            design_elements: self.design_elements.map(split_list),
            statement_piece: self.statement_piece.map(|raw| parse_flag(&raw)),
            slot: self.functional_slot,
            style: self.style,
            aesthetics: self.fashion_aesthetics.map(split_list),
            occasions: self.occasion.map(split_list),
            formality_score,
            seasons: self.season.map(split_list),
        })
    }
}

fn split_list(raw: String) -> Vec<String> {
    raw.split('|').map(str::to_string).collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

/// Why a catalog row was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Malformed(String),
    MissingField(&'static str),
    UnknownSlot(String),
    UnknownGender(String),
    InvalidFormality(String),
    FormalityOutOfRange(i64),
    DuplicateSku,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Malformed(detail) => write!(f, "malformed row: {detail}"),
            RejectReason::MissingField(field) => write!(f, "missing {field}"),
            RejectReason::UnknownSlot(raw) => write!(f, "unrecognized functional slot '{raw}'"),
            RejectReason::UnknownGender(raw) => write!(f, "unrecognized gender '{raw}'"),
            RejectReason::InvalidFormality(raw) => {
                write!(f, "formality score '{raw}' is not an integer")
            }
            RejectReason::FormalityOutOfRange(value) => {
                write!(f, "formality score {value} outside 0-4")
            }
            RejectReason::DuplicateSku => write!(f, "duplicate sku"),
        }
    }
}

/// A skipped row with enough context to report it back to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    /// 1-based position of the row in the source document.
    pub row: usize,
    pub sku: Option<String>,
    pub reason: RejectReason,
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sku {
            Some(sku) => write!(f, "row {} ({sku}): {}", self.row, self.reason),
            None => write!(f, "row {}: {}", self.row, self.reason),
        }
    }
}

/// Parsed rows split into valid items (with their row numbers) and per-row rejections.
#[derive(Debug, Clone, Default)]
pub struct RowBatch {
    pub items: Vec<(usize, Item)>,
    pub rejected: Vec<RowRejection>,
}

impl RowBatch {
    fn push(&mut self, row: usize, outcome: Result<Item, (Option<String>, RejectReason)>) {
        match outcome {
            Ok(item) => self.items.push((row, item)),
            Err((sku, reason)) => self.rejected.push(RowRejection { row, sku, reason }),
        }
    }
}

/// Parse a JSON catalog: either an array of rows or `{"products": [...]}`.
pub fn parse_json<R: Read>(reader: R) -> Result<RowBatch, CatalogError> {
    let document: Value = serde_json::from_reader(reader)?;
    let rows = match document {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("products") {
            Some(Value::Array(rows)) => rows,
            _ => return Err(CatalogError::Shape),
        },
        _ => return Err(CatalogError::Shape),
    };

    let mut batch = RowBatch::default();
    for (index, value) in rows.into_iter().enumerate() {
        let outcome = serde_json::from_value::<CatalogRow>(value)
            .map_err(|err| (None, RejectReason::Malformed(err.to_string())))
            .and_then(item_from_row);
        batch.push(index + 1, outcome);
    }
    Ok(batch)
}

/// Parse a CSV catalog with a header row.
pub fn parse_csv<R: Read>(reader: R) -> Result<RowBatch, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut batch = RowBatch::default();
    for (index, record) in csv_reader.deserialize::<CsvCatalogRow>().enumerate() {
        let outcome = record
            .map_err(|err| (None, RejectReason::Malformed(err.to_string())))
            .and_then(|raw| {
                let sku = raw.sku_id.clone();
                raw.into_row().map_err(|reason| (sku, reason))
            })
            .and_then(item_from_row);
        batch.push(index + 1, outcome);
    }
    Ok(batch)
}

/// Validate and normalize one row into an [`Item`].
pub fn item_from_row(row: CatalogRow) -> Result<Item, (Option<String>, RejectReason)> {
    let sku = row
        .sku
        .as_deref()
        .map(str::trim)
        .filter(|sku| !sku.is_empty())
        .map(str::to_string);
    let reject = |reason| (sku.clone(), reason);

    let sku_value = sku
        .clone()
        .ok_or_else(|| reject(RejectReason::MissingField("sku")))?;
    let slot_raw = normalize_text(row.slot)
        .ok_or_else(|| reject(RejectReason::MissingField("functional slot")))?;
    let slot = slot_raw
        .parse::<Slot>()
        .map_err(|err| reject(RejectReason::UnknownSlot(err.0)))?;
    let gender_raw =
        normalize_text(row.gender).ok_or_else(|| reject(RejectReason::MissingField("gender")))?;
    let gender = gender_raw
        .parse::<Gender>()
        .map_err(|err| reject(RejectReason::UnknownGender(err.0)))?;
    let item_type =
        normalize_text(row.item_type).ok_or_else(|| reject(RejectReason::MissingField("type")))?;
    let category = normalize_text(row.category)
        .ok_or_else(|| reject(RejectReason::MissingField("category")))?;

    let formality_score = match row.formality_score {
        None => 1,
        Some(score) if (0..=4).contains(&score) => score as u8,
        Some(score) => return Err(reject(RejectReason::FormalityOutOfRange(score))),
    };

    Ok(Item {
        sku: Sku(sku_value),
        slot,
        gender,
        title: trimmed(row.title),
        brand: trimmed(row.brand),
        image_url: row
            .image_url
            .map(|url| url.trim().to_string())
            .unwrap_or_default(),
        item_type,
        category,
        sub_category: normalize_text(row.sub_category),
        primary_color: normalize_text(row.primary_color),
        secondary_colors: normalize_list(row.secondary_colors),
        pattern: normalize_text(row.pattern),
        material: normalize_text(row.material),
        fit: normalize_text(row.fit),
        design_elements: normalize_list(row.design_elements),
        formality_score,
        statement_piece: row.statement_piece.unwrap_or(false),
        style: normalize_text(row.style),
        aesthetics: normalize_list(row.aesthetics),
        occasions: normalize_list(row.occasions),
        seasons: normalize_list(row.seasons),
    })
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_lowercase())
        .filter(|normalized| !normalized.is_empty())
}

/// Display text keeps its case.
fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Trim, lowercase and de-duplicate while keeping first-seen order.
fn normalize_list(values: Option<Vec<String>>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for value in values.unwrap_or_default() {
        let value = value.trim().to_lowercase();
        if !value.is_empty() && !normalized.contains(&value) {
            normalized.push(value);
        }
    }
    normalized
}
