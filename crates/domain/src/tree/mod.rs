//! The normalized section tree.

mod builder;

use serde::{Deserialize, Serialize};

use crate::section::{FlatEntry, Section};
use crate::warning::StructuralWarning;

pub use builder::build_section_tree;

/// Ordered root sections of one fetch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTree {
    /// Root sections, in upstream order.
    pub roots: Vec<Section>,
}

impl SectionTree {
    /// Creates a tree from its roots.
    #[must_use]
    pub const fn new(roots: Vec<Section>) -> Self {
        Self { roots }
    }

    /// Whether the tree has no sections at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of sections in the tree.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.roots.iter().map(Section::section_count).sum()
    }

    /// Number of entries in the tree, all depths included.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.roots.iter().map(Section::total_value_count).sum()
    }

    /// Finds a section by its `/`-separated key path (e.g. `home/banner`).
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Section> {
        let mut keys = path.split('/').filter(|k| !k.is_empty());
        let first = keys.next()?;
        let mut current = self.roots.iter().find(|s| s.key == first)?;
        for key in keys {
            current = current.subsection(key)?;
        }
        Some(current)
    }

    /// Calls `visit` for every entry, roots first, depth first.
    pub fn for_each_entry<F>(&self, mut visit: F)
    where
        F: FnMut(FlatEntry<'_>),
    {
        for root in &self.roots {
            root.for_each_entry(&mut visit);
        }
    }

    /// Counts for summaries. The warning count is zero; see
    /// [`BuildOutcome::summary`].
    #[must_use]
    pub fn summary(&self) -> TreeSummary {
        TreeSummary {
            root_count: self.roots.len(),
            section_count: self.section_count(),
            entry_count: self.entry_count(),
            warning_count: 0,
        }
    }
}

/// Counts describing a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSummary {
    /// Number of root sections.
    pub root_count: usize,
    /// Number of sections at all depths.
    pub section_count: usize,
    /// Number of entries at all depths.
    pub entry_count: usize,
    /// Number of structural warnings recorded while building.
    pub warning_count: usize,
}

/// A built tree and the warnings collected while building it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutcome {
    /// The tree; partial when warnings were recorded.
    pub tree: SectionTree,
    /// Non-fatal issues, in the order they were found.
    pub warnings: Vec<StructuralWarning>,
}

impl BuildOutcome {
    /// Whether the build recorded no warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Tree counts including the warning count.
    #[must_use]
    pub fn summary(&self) -> TreeSummary {
        TreeSummary {
            warning_count: self.warnings.len(),
            ..self.tree.summary()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use crate::warning::WarningKind;

    fn tree() -> SectionTree {
        let mut banner = Section::new("s2", "Banner", "banner");
        banner.path = "home/banner".into();
        banner.entries.push(Entry::new("e2", "title"));

        let mut home = Section::new("s1", "Home", "home");
        home.entries.push(Entry::new("e1", "welcome_msg"));
        home.subsections.push(banner);
        SectionTree::new(vec![home, Section::new("s3", "Empty", "empty")])
    }

    #[test]
    fn test_find_by_path() {
        let tree = tree();
        assert_eq!(tree.find("home/banner").map(|s| s.id.as_str()), Some("s2"));
        assert_eq!(tree.find("empty").map(|s| s.id.as_str()), Some("s3"));
        assert!(tree.find("home/missing").is_none());
        assert!(tree.find("").is_none());
    }

    #[test]
    fn test_for_each_entry_reports_ancestors() {
        let mut seen = Vec::new();
        tree().for_each_entry(|flat| {
            seen.push(format!("{}.{}", flat.sections.join("."), flat.entry.key));
        });
        assert_eq!(seen, vec!["home.welcome_msg", "home.banner.title"]);
    }

    #[test]
    fn test_outcome_summary_counts_warnings() {
        let outcome = BuildOutcome {
            tree: tree(),
            warnings: vec![StructuralWarning::new(
                "home",
                WarningKind::UnresolvedEntry,
                "entry e9 not found",
            )],
        };
        let summary = outcome.summary();
        assert_eq!(summary.root_count, 2);
        assert_eq!(summary.section_count, 3);
        assert_eq!(summary.entry_count, 2);
        assert_eq!(summary.warning_count, 1);
        assert!(!outcome.is_clean());
    }
}
