use async_trait::async_trait;
use std::path::PathBuf;

use crate::errors::CoreError;
use crate::models::document::PersistedDocument;

/// Key-value view of the document store.
///
/// The real backend is an external collaborator; this trait is the whole
/// contract the sync pipeline needs. `set` is a plain overwrite — merging
/// happens in `SyncService` before a document ever reaches the store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, document_id: &str) -> Result<Option<PersistedDocument>, CoreError>;

    async fn set(
        &self,
        document_id: &str,
        document: &PersistedDocument,
    ) -> Result<(), CoreError>;
}

/// Directory-backed store: one pretty-printed JSON file per document id.
pub struct JsonDocumentStore {
    dir: PathBuf,
}

impl JsonDocumentStore {
    /// Opens (and creates, if needed) the store directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, document_id: &str) -> PathBuf {
        self.dir.join(format!("{document_id}.json"))
    }
}

#[async_trait]
impl DocumentStore for JsonDocumentStore {
    async fn get(&self, document_id: &str) -> Result<Option<PersistedDocument>, CoreError> {
        let path = self.path_for(document_id);
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&path)?;
        let document = serde_json::from_str(&text)
            .map_err(|e| CoreError::Deserialization(format!("document {document_id}: {e}")))?;
        Ok(Some(document))
    }

    async fn set(
        &self,
        document_id: &str,
        document: &PersistedDocument,
    ) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        std::fs::write(self.path_for(document_id), json)?;
        Ok(())
    }
}
