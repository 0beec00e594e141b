//! Raw records as delivered by the content source.
//!
//! Required fields are optional here so a missing `id` or `key` can be
//! reported as a malformed record instead of a deserialization failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A section record with references to its entries and children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSectionRecord {
    /// Upstream id.
    #[serde(default)]
    pub id: Option<String>,
    /// Human label.
    #[serde(default)]
    pub title: Option<String>,
    /// Machine key.
    #[serde(default)]
    pub key: Option<String>,
    /// Ordered entry ids; absent means none.
    #[serde(default)]
    pub entry_ids: Option<Vec<String>>,
    /// Ordered child section ids; absent means none.
    #[serde(default)]
    pub subsection_ids: Option<Vec<String>>,
}

impl RawSectionRecord {
    /// Creates a record with an id, title and key and no references.
    pub fn new(id: impl Into<String>, title: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            key: Some(key.into()),
            entry_ids: None,
            subsection_ids: None,
        }
    }

    /// Sets the entry references.
    #[must_use]
    pub fn with_entries(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.entry_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the child section references.
    #[must_use]
    pub fn with_subsections(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.subsection_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Entry references, empty when absent.
    #[must_use]
    pub fn entry_refs(&self) -> &[String] {
        self.entry_ids.as_deref().unwrap_or_default()
    }

    /// Child references, empty when absent.
    #[must_use]
    pub fn subsection_refs(&self) -> &[String] {
        self.subsection_ids.as_deref().unwrap_or_default()
    }
}

/// An entry record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntryRecord {
    /// Upstream id.
    #[serde(default)]
    pub id: Option<String>,
    /// Key within the owning section.
    #[serde(default)]
    pub key: Option<String>,
    /// Legacy key.
    #[serde(default)]
    pub original_key: Option<String>,
    /// Android-safe key.
    #[serde(default)]
    pub android_key: Option<String>,
    /// Line in the legacy source file.
    #[serde(default)]
    pub line_number: Option<u32>,
    /// Locale code to text.
    #[serde(default)]
    pub values_by_locale: BTreeMap<String, String>,
}

impl RawEntryRecord {
    /// Creates a record with an id and key and no values.
    pub fn new(id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Adds text for a locale.
    #[must_use]
    pub fn with_value(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.values_by_locale.insert(locale.into(), text.into());
        self
    }

    /// Sets the legacy key.
    #[must_use]
    pub fn with_original_key(mut self, original_key: impl Into<String>) -> Self {
        self.original_key = Some(original_key.into());
        self
    }
}

/// Everything fetched in one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    /// Section records in upstream order.
    #[serde(default)]
    pub sections: Vec<RawSectionRecord>,
    /// Entry records in upstream order.
    #[serde(default)]
    pub entries: Vec<RawEntryRecord>,
}

impl ContentSnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(sections: Vec<RawSectionRecord>, entries: Vec<RawEntryRecord>) -> Self {
        Self { sections, entries }
    }
}
