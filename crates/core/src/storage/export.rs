use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use crate::models::document::PriceExport;

/// Write `export` as pretty-printed JSON into `dir`, named by the
/// sanitized document id (`SET_75257-1.json`). Returns the path written.
pub fn write_export(dir: &Path, export: &PriceExport) -> Result<PathBuf, CoreError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", export.identifier().document_id()));
    let json = serde_json::to_string_pretty(export)
        .map_err(|e| CoreError::Serialization(e.to_string()))?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Load one export file. JSON or shape failures name the offending file.
pub fn load_export(path: &Path) -> Result<PriceExport, CoreError> {
    let file = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("<unnamed>")
        .to_string();
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| CoreError::InvalidExport {
        file,
        reason: e.to_string(),
    })
}

/// Load every `*.json` file in `dir`, sorted by file name.
/// Returns (file name, export) pairs.
pub fn load_directory(dir: &Path) -> Result<Vec<(String, PriceExport)>, CoreError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut exports = Vec::with_capacity(paths.len());
    for path in paths {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("<unnamed>")
            .to_string();
        exports.push((file_name, load_export(&path)?));
    }
    Ok(exports)
}
