//! Workspace files: the set of open documents plus which one is active.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::tree::Document;
use super::DocumentError;

/// Open documents, as persisted in a workspace JSON file.
///
/// ```json
/// { "active": 0, "documents": [ { "name": "poster", "layers": [] } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub documents: Vec<Document>,
    /// Index of the active document. Absent means the first one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<usize>,
}

impl Workspace {
    #[must_use]
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            active: None,
        }
    }

    /// Index of the document the host considers active, if any.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        let index = self.active.unwrap_or(0);
        (index < self.documents.len()).then_some(index)
    }

    #[must_use]
    pub fn active_document(&self) -> Option<&Document> {
        self.active_index().map(|i| &self.documents[i])
    }

    pub fn active_document_mut(&mut self) -> Option<&mut Document> {
        self.active_index().map(move |i| &mut self.documents[i])
    }

    /// Parse a workspace, assign missing ids and validate every document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Parse` for malformed JSON and the
    /// validation errors of [`Document::validate`].
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let mut workspace: Self = serde_json::from_str(json).map_err(DocumentError::Parse)?;
        for doc in &mut workspace.documents {
            doc.assign_ids();
            doc.validate()?;
        }
        log::debug!(
            "Parsed workspace with {} document(s)",
            workspace.documents.len()
        );
        Ok(workspace)
    }

    /// # Errors
    ///
    /// Returns `DocumentError::Serialize` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::Serialize)
    }

    /// Load a workspace file from disk.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Io` if the file cannot be read, otherwise the
    /// errors of [`Workspace::from_json`].
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let workspace = Self::from_json(&content)?;
        log::info!(
            "Loaded {} document(s) from {}",
            workspace.documents.len(),
            path.display()
        );
        Ok(workspace)
    }

    /// Write the workspace to disk as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Io` on write failure.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Wrote workspace to {}", path.display());
        Ok(())
    }
}
