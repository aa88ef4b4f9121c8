use serde::{Deserialize, Serialize};

/// Which price guide to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideType {
    /// Current asking prices of open stock listings.
    Stock,
    /// Historical completed sales ("sold lots").
    Sold,
}

impl GuideType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuideType::Stock => "stock",
            GuideType::Sold => "sold",
        }
    }
}

impl std::fmt::Display for GuideType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item condition filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "N")]
    New,
    #[serde(rename = "U")]
    Used,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "N",
            Condition::Used => "U",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized BrickLink catalog item reference.
///
/// Normalization happens exactly once, in the constructor — the fields are
/// private so no un-normalized identifier can exist:
/// - `item_type` is upper-cased (PART, SET, MINIFIG, BOOK, GEAR, ...).
/// - A SET number without a `-` sequence suffix gets `-1` appended
///   ("75257" → "75257-1"); numbers that already carry one are unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemIdentifier {
    item_type: String,
    item_no: String,
}

impl ItemIdentifier {
    pub fn new(item_type: impl Into<String>, item_no: impl Into<String>) -> Self {
        let item_type = item_type.into().trim().to_uppercase();
        let mut item_no = item_no.into().trim().to_string();
        if item_type == "SET" && !item_no.contains('-') {
            item_no.push_str("-1");
        }
        Self { item_type, item_no }
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn item_no(&self) -> &str {
        &self.item_no
    }

    /// Deterministic document-store key: `{type}_{no}` with path-unsafe
    /// `/` replaced by `-` and stray leading/trailing `_` trimmed.
    pub fn document_id(&self) -> String {
        let safe_type = self.item_type.replace('/', "-");
        let safe_no = self.item_no.replace('/', "-");
        format!("{safe_type}_{safe_no}")
            .trim_matches('_')
            .to_string()
    }
}

impl std::fmt::Display for ItemIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.item_type, self.item_no)
    }
}
