//! Localization entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::locale::{LocaleConfig, LocaleFallback};
use crate::parameter::{ParameterKind, extract_parameters};

/// One localizable string with its per-locale text.
///
/// Entries are built once per fetch cycle and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Upstream id.
    pub id: String,
    /// Key, unique within the owning section.
    pub key: String,
    /// Key used by the legacy source files, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_key: Option<String>,
    /// Android-safe variant of the key, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_key: Option<String>,
    /// Line in the legacy source file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    /// Locale code to text.
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl Entry {
    /// Creates an entry with no values.
    pub fn new(id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
            original_key: None,
            platform_key: None,
            line_number: None,
            values: BTreeMap::new(),
        }
    }

    /// Adds text for a locale.
    #[must_use]
    pub fn with_value(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.values.insert(locale.into(), text.into());
        self
    }

    /// Sets the legacy key.
    #[must_use]
    pub fn with_original_key(mut self, original_key: impl Into<String>) -> Self {
        self.original_key = Some(original_key.into());
        self
    }

    /// Raw text for `locale`; empty when missing.
    #[must_use]
    pub fn value(&self, locale: &str) -> &str {
        self.values.get(locale).map_or("", String::as_str)
    }

    /// Text for `locale` after applying the configured fallback policy.
    #[must_use]
    pub fn localized<'a>(&'a self, locale: &str, config: &LocaleConfig) -> &'a str {
        let text = self.value(locale);
        if text.is_empty() && config.fallback() == LocaleFallback::Primary {
            return self.value(config.primary());
        }
        text
    }

    /// Text that defines the entry's parameters: the primary locale, or the
    /// first recognized locale with text when the primary one is empty.
    #[must_use]
    pub fn reference_text<'a>(&'a self, config: &LocaleConfig) -> &'a str {
        let primary = self.value(config.primary());
        if !primary.is_empty() {
            return primary;
        }
        config
            .locales()
            .iter()
            .map(|l| self.value(l))
            .find(|text| !text.is_empty())
            .unwrap_or("")
    }

    /// Substitution parameters of this entry.
    #[must_use]
    pub fn parameters(&self, config: &LocaleConfig) -> Vec<ParameterKind> {
        extract_parameters(self.reference_text(config))
    }

    /// Legacy key when present and not blank.
    #[must_use]
    pub fn legacy_key(&self) -> Option<&str> {
        self.original_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
