use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::item::{Condition, GuideType, ItemIdentifier};
use super::price::{MonthlyAverage, PriceRecord};

/// Key of one (guide type, condition) slot in a [`CombinedResult`]:
/// "stock_N", "stock_U", "sold_N" or "sold_U".
pub fn result_key(guide_type: GuideType, condition: Condition) -> String {
    format!("{}_{}", guide_type.as_str(), condition.as_str())
}

/// Collected result for one (guide type, condition) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideResult {
    pub average_price: f64,

    #[serde(default)]
    pub price_detail: Vec<PriceRecord>,

    /// Only populated for the sold guide — stock listings are current
    /// inventory, not a time series.
    #[serde(default, skip_serializing_if = "MonthlyAverage::is_empty")]
    pub monthly_averages: MonthlyAverage,
}

/// Result-key → [`GuideResult`] mapping. A full collection populates
/// exactly the four keys of the (guide type × condition) grid.
pub type CombinedResult = BTreeMap<String, GuideResult>;

/// Local interchange format: one JSON file per item, written by `collect`
/// and consumed by `sync`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceExport {
    pub item_type: String,
    pub item_no: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,

    #[serde(default)]
    pub results: CombinedResult,
}

impl PriceExport {
    pub fn new(
        item: &ItemIdentifier,
        currency_code: Option<String>,
        results: CombinedResult,
    ) -> Self {
        Self {
            item_type: item.item_type().to_string(),
            item_no: item.item_no().to_string(),
            currency_code,
            results,
        }
    }

    /// The (already normalized) identifier this export belongs to.
    pub fn identifier(&self) -> ItemIdentifier {
        ItemIdentifier::new(&self.item_type, &self.item_no)
    }
}

/// One item's record in the document store: the latest merged results plus
/// provenance. The unit of merge during sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedDocument {
    pub item_type: String,
    pub item_no: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,

    #[serde(default)]
    pub results: CombinedResult,

    /// Name of the export file the last sync came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}
