//! Load section tree use case.

use lexicon_domain::{BuildOutcome, WarningSeverity, WarningStats, build_section_tree};
use tracing::{info, warn};

use crate::error::ApplicationResult;
use crate::ports::ContentSource;

/// Use case for fetching raw records and normalizing them into a tree.
///
/// The fetch is awaited first; the build itself is synchronous.
pub struct LoadSectionTree<S: ContentSource> {
    source: S,
}

impl<S: ContentSource> LoadSectionTree<S> {
    /// Creates a new `LoadSectionTree` use case.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetches one snapshot and builds the section tree.
    ///
    /// Structural warnings are logged and returned with the tree.
    ///
    /// # Errors
    /// - `UpstreamUnavailable` if the source fails
    /// - `Domain` if a record is malformed
    pub async fn execute(&self) -> ApplicationResult<BuildOutcome> {
        let snapshot = self.source.fetch_snapshot().await?;
        info!(
            sections = snapshot.sections.len(),
            entries = snapshot.entries.len(),
            "fetched content snapshot"
        );

        let outcome = build_section_tree(&snapshot)?;
        for warning in &outcome.warnings {
            match warning.severity() {
                WarningSeverity::Info => info!(path = %warning.path, "{}", warning.message),
                WarningSeverity::Warning => warn!(path = %warning.path, "{}", warning.message),
            }
        }

        let summary = outcome.summary();
        let stats = WarningStats::from_warnings(&outcome.warnings);
        info!(
            roots = summary.root_count,
            sections = summary.section_count,
            entries = summary.entry_count,
            warnings = stats.total(),
            cycles = stats.cycle_count,
            "built section tree"
        );
        Ok(outcome)
    }
}
