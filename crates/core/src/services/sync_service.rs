use std::collections::HashSet;
use std::path::Path;

use crate::errors::CoreError;
use crate::models::document::{PersistedDocument, PriceExport};
use crate::models::price::PriceRecord;
use crate::storage::export;
use crate::storage::store::DocumentStore;

/// Reconciles freshly collected exports against previously persisted
/// documents.
///
/// Merge rules:
/// - `sold*` keys: `price_detail` lists are merged by `date_ordered` —
///   the persisted history is authoritative over re-fetched duplicates.
/// - all other keys: the incoming value replaces the persisted one (stock
///   data is a point-in-time snapshot with no append semantics).
/// - persisted keys absent from the incoming run survive untouched.
/// - top-level metadata is overwritten by the incoming run.
pub struct SyncService;

impl SyncService {
    /// Merge one incoming export into the persisted document, if any.
    ///
    /// Idempotent: merging the same export twice produces the same set of
    /// detail records as merging it once.
    pub fn merge(
        existing: Option<PersistedDocument>,
        incoming: &PriceExport,
        source_file: &str,
    ) -> PersistedDocument {
        let existing_results = existing.map(|doc| doc.results).unwrap_or_default();
        let mut merged_results = existing_results.clone();

        for (key, payload) in &incoming.results {
            let mut payload = payload.clone();
            if key.starts_with("sold") {
                let persisted_detail = existing_results
                    .get(key)
                    .map(|result| result.price_detail.as_slice())
                    .unwrap_or(&[]);
                payload.price_detail =
                    Self::merge_sold_details(persisted_detail, &payload.price_detail);
            }
            merged_results.insert(key.clone(), payload);
        }

        PersistedDocument {
            item_type: incoming.item_type.clone(),
            item_no: incoming.item_no.clone(),
            currency_code: incoming.currency_code.clone(),
            results: merged_results,
            source_file: Some(source_file.to_string()),
        }
    }

    /// Merge sold price details ensuring unique `date_ordered` entries.
    ///
    /// First occurrence wins, with the persisted list walked first.
    /// Entries without a `date_ordered` cannot be deduplicated or ordered
    /// and are dropped entirely. The result is sorted ascending by date
    /// (a missing date would sort first, as the empty string).
    pub fn merge_sold_details(
        existing: &[PriceRecord],
        incoming: &[PriceRecord],
    ) -> Vec<PriceRecord> {
        let mut merged: Vec<PriceRecord> = Vec::new();
        let mut seen_dates: HashSet<String> = HashSet::new();

        for entry in existing.iter().chain(incoming.iter()) {
            let Some(date) = entry.date_ordered.as_deref() else {
                continue;
            };
            if seen_dates.insert(date.to_string()) {
                merged.push(entry.clone());
            }
        }

        merged.sort_by_key(|entry| entry.date_ordered.clone().unwrap_or_default());
        merged
    }

    /// get → merge → set for one export.
    pub async fn sync_export(
        store: &dyn DocumentStore,
        incoming: &PriceExport,
        source_file: &str,
    ) -> Result<(), CoreError> {
        if incoming.item_type.trim().is_empty() || incoming.item_no.trim().is_empty() {
            return Err(CoreError::InvalidExport {
                file: source_file.to_string(),
                reason: "missing item_type/item_no".into(),
            });
        }

        let document_id = incoming.identifier().document_id();
        let existing = store.get(&document_id).await?;
        let merged = Self::merge(existing, incoming, source_file);
        store.set(&document_id, &merged).await
    }

    /// Load every `*.json` export under `dir` (sorted by file name, so sync
    /// order is stable) and merge each into the store. Returns the number
    /// of files synchronized.
    pub async fn sync_directory(
        store: &dyn DocumentStore,
        dir: &Path,
    ) -> Result<usize, CoreError> {
        let exports = export::load_directory(dir)?;
        for (file_name, incoming) in &exports {
            Self::sync_export(store, incoming, file_name).await?;
        }
        Ok(exports.len())
    }
}
