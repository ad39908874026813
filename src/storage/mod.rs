//! On-disk document store.
//!
//! Uploaded files are persisted write-once under the configured document
//! directory as `{uuid}_{filename}`, independent of whether text extraction
//! later succeeds, so documents can be re-processed.

use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::types::AppResult;

#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: Uuid,
    pub filename: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Open (creating if needed) the store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist one uploaded file under a generated unique name.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> AppResult<StoredDocument> {
        // Keep only the final path component of client-supplied names.
        let safe_name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");

        let id = Uuid::new_v4();
        let path = self.root.join(format!("{}_{}", id, safe_name));
        tokio::fs::write(&path, bytes).await?;

        debug!(path = %path.display(), "Stored uploaded document");
        Ok(StoredDocument {
            id,
            filename: safe_name.to_string(),
            path,
        })
    }
}
