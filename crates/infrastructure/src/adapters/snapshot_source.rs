//! Offline content source reading a snapshot file.

use std::path::PathBuf;

use lexicon_application::ports::{ContentSource, SourceError};
use lexicon_domain::ContentSnapshot;
use tracing::debug;

use crate::serialization::from_json;

/// Content source backed by a JSON or YAML file shaped like
/// `{ "sections": [...], "entries": [...] }`.
#[derive(Debug, Clone)]
pub struct SnapshotFileSource {
    path: PathBuf,
}

impl SnapshotFileSource {
    /// Creates a source for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_yaml(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
    }

    /// Parses snapshot text according to the file extension.
    ///
    /// # Errors
    ///
    /// Returns `Decode` if the text does not match the snapshot shape.
    pub fn parse(&self, text: &str) -> Result<ContentSnapshot, SourceError> {
        if self.is_yaml() {
            serde_yaml::from_str(text).map_err(|e| SourceError::Decode(e.to_string()))
        } else {
            from_json(text).map_err(|e| SourceError::Decode(e.to_string()))
        }
    }
}

impl ContentSource for SnapshotFileSource {
    async fn fetch_snapshot(&self) -> Result<ContentSnapshot, SourceError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Io(format!("{}: {e}", self.path.display())))?;
        let snapshot = self.parse(&text)?;
        debug!(
            path = %self.path.display(),
            sections = snapshot.sections.len(),
            entries = snapshot.entries.len(),
            "read snapshot file"
        );
        Ok(snapshot)
    }
}
