//! Export infrastructure.
//!
//! Writes generated artifacts to disk: enum sources with their helpers and
//! per-locale JSON bundles.

mod json;

pub use json::{render_locale_bundle, write_locale_bundle};

use std::path::{Path, PathBuf};

use lexicon_domain::GeneratedCode;
use thiserror::Error;
use tracing::info;

use crate::serialization::SerializationError;

/// Export error type.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),
    /// A file could not be written.
    #[error("cannot write {path}: {source}")]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

pub(crate) async fn write_file(path: PathBuf, content: &str) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| ExportError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(&path, content)
        .await
        .map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Writes every generated file into `dir`, primary first.
///
/// # Errors
///
/// Returns an error if a file cannot be written.
pub async fn write_generated_code(
    code: &GeneratedCode,
    dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::new();
    for file in code.files() {
        written.push(write_file(dir.join(&file.file_name), &file.content).await?);
    }
    info!(
        dialect = %code.dialect,
        cases = code.case_count,
        files = written.len(),
        dir = %dir.display(),
        "wrote generated code"
    );
    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lexicon_domain::{Dialect, GeneratedFile};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_generated_code() {
        let dir = TempDir::new().unwrap();
        let code = GeneratedCode {
            dialect: Dialect::Swift,
            primary: GeneratedFile::new("Localizations.swift", "text/x-swift", "public enum Localizations {\n}\n"),
            auxiliary: Some(GeneratedFile::new("LocalizationsTesting.swift", "text/x-swift", "// helper\n")),
            case_count: 0,
        };
        let out = dir.path().join("out");
        let written = write_generated_code(&code, &out).await.unwrap();

        assert_eq!(written.len(), 2);
        let text = std::fs::read_to_string(out.join("Localizations.swift")).unwrap();
        assert_eq!(text, "public enum Localizations {\n}\n");
        assert!(out.join("LocalizationsTesting.swift").exists());
    }
}
