//! Sections: named groups of entries with nested subsections.

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// A node of the section tree.
///
/// The tree owns its entries and children; there are no back references.
/// `path` is a display label made of the ancestor keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Upstream id.
    pub id: String,
    /// Human label.
    pub title: String,
    /// Upstream key; sanitized at generation time.
    pub key: String,
    /// Ancestor keys plus this key, joined with `/`.
    pub path: String,
    /// Entries owned directly by this section, in upstream order.
    pub entries: Vec<Entry>,
    /// Child sections, in upstream order.
    pub subsections: Vec<Self>,
}

/// An entry together with the keys of the sections above it.
#[derive(Debug, Clone, Copy)]
pub struct FlatEntry<'a> {
    /// Keys from the root section down to the owning section.
    pub sections: &'a [&'a str],
    /// The entry.
    pub entry: &'a Entry,
}

impl Section {
    /// Creates an empty root section.
    pub fn new(id: impl Into<String>, title: impl Into<String>, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            id: id.into(),
            title: title.into(),
            path: key.clone(),
            key,
            entries: Vec::new(),
            subsections: Vec::new(),
        }
    }

    /// Number of entries owned directly by this section.
    ///
    /// Subsection entries are not counted; see [`Self::total_value_count`].
    #[must_use]
    pub fn effective_value_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries in this section and all of its descendants.
    #[must_use]
    pub fn total_value_count(&self) -> usize {
        self.entries.len()
            + self
                .subsections
                .iter()
                .map(Self::total_value_count)
                .sum::<usize>()
    }

    /// Number of sections in this subtree, including this one.
    #[must_use]
    pub fn section_count(&self) -> usize {
        1 + self.subsections.iter().map(Self::section_count).sum::<usize>()
    }

    /// Direct child with the given key.
    #[must_use]
    pub fn subsection(&self, key: &str) -> Option<&Self> {
        self.subsections.iter().find(|s| s.key == key)
    }

    /// Direct entry with the given key.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Calls `visit` for every entry in this subtree, depth first, with the
    /// keys of the sections from this one down to the owner.
    pub fn for_each_entry<F>(&self, visit: &mut F)
    where
        F: FnMut(FlatEntry<'_>),
    {
        let mut stack = Vec::new();
        self.walk_entries(&mut stack, visit);
    }

    fn walk_entries<'a, F>(&'a self, stack: &mut Vec<&'a str>, visit: &mut F)
    where
        F: FnMut(FlatEntry<'_>),
    {
        stack.push(&self.key);
        for entry in &self.entries {
            visit(FlatEntry {
                sections: stack.as_slice(),
                entry,
            });
        }
        for child in &self.subsections {
            child.walk_entries(stack, visit);
        }
        stack.pop();
    }
}
