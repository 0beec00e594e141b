//! Per-locale JSON bundle export.

use std::path::{Path, PathBuf};

use lexicon_application::LocaleBundle;
use tracing::info;

use super::{ExportError, write_file};
use crate::serialization::to_json_stable;

/// Renders a bundle as stable JSON including the `__generatedAt` key.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_locale_bundle(bundle: &LocaleBundle) -> Result<String, ExportError> {
    Ok(to_json_stable(&bundle.document())?)
}

/// Writes a bundle to `dir/<sectionKey>_<locale>.json`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub async fn write_locale_bundle(bundle: &LocaleBundle, dir: &Path) -> Result<PathBuf, ExportError> {
    let json = render_locale_bundle(bundle)?;
    let path = write_file(dir.join(&bundle.file_name), &json).await?;
    info!(path = %path.display(), values = bundle.values.len(), "wrote locale bundle");
    Ok(path)
}
