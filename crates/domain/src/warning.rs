//! Structural warnings
//!
//! Non-fatal anomalies found while building the section tree. They are
//! returned next to the (possibly partial) tree and never stop the pipeline.

use serde::{Deserialize, Serialize};

/// Warning severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    /// Informational - the tree is complete but was reshaped
    Info,
    /// Warning - something referenced upstream is missing from the tree
    Warning,
}

impl std::fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// What kind of anomaly was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A section references an entry id that has no record.
    UnresolvedEntry,
    /// A section references a child id that has no record.
    UnresolvedSection,
    /// A child reference points back to a section on the current path.
    CycleDetected,
    /// Two records share an upstream id; the first one wins.
    DuplicateId,
    /// Two sibling sections share a key; the first one wins.
    DuplicateSiblingKey,
    /// Two entries of one section share a key; the first one wins.
    DuplicateEntryKey,
    /// A section listed by more than one parent; only the first one keeps it.
    SharedSubsection,
    /// A section not reachable from any root was promoted to a root.
    PromotedRoot,
}

impl WarningKind {
    /// Severity of this kind.
    #[must_use]
    pub const fn severity(self) -> WarningSeverity {
        match self {
            Self::PromotedRoot => WarningSeverity::Info,
            _ => WarningSeverity::Warning,
        }
    }
}

/// A structural warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralWarning {
    /// Path of the section where the issue was found (e.g. "home/banner")
    pub path: String,
    /// Kind of issue
    pub kind: WarningKind,
    /// Human-readable description of the issue
    pub message: String,
}

impl StructuralWarning {
    /// Create a new warning
    pub fn new(path: impl Into<String>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    /// Severity level
    #[must_use]
    pub const fn severity(&self) -> WarningSeverity {
        self.kind.severity()
    }
}

impl std::fmt::Display for StructuralWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.path, self.message)
    }
}

/// Aggregate statistics from warnings
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WarningStats {
    /// Count of informational warnings
    pub info_count: usize,
    /// Count of warning-level warnings
    pub warning_count: usize,
    /// Count of pruned cycle edges
    pub cycle_count: usize,
}

impl WarningStats {
    /// Calculate stats from a list of warnings
    #[must_use]
    pub fn from_warnings(warnings: &[StructuralWarning]) -> Self {
        let mut stats = Self::default();
        for w in warnings {
            match w.severity() {
                WarningSeverity::Info => stats.info_count += 1,
                WarningSeverity::Warning => stats.warning_count += 1,
            }
            if w.kind == WarningKind::CycleDetected {
                stats.cycle_count += 1;
            }
        }
        stats
    }

    /// Total count of all warnings
    #[must_use]
    pub const fn total(&self) -> usize {
        self.info_count + self.warning_count
    }
}
