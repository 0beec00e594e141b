//! Per-locale key/value bundle for one section.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use indexmap::map::Entry as MapEntry;
use lexicon_domain::{LocaleConfig, SectionTree};
use tracing::info;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::Clock;

/// Key under which the generation timestamp is stored.
pub const GENERATED_AT_KEY: &str = "__generatedAt";

/// Flat translations of one section in one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleBundle {
    /// Suggested file name, `<sectionKey>_<locale>.json`.
    pub file_name: String,
    /// Locale of the values.
    pub locale: String,
    /// `<sectionKey>.<entryKey>` to text, in entry order.
    pub values: IndexMap<String, String>,
    /// When the bundle was built.
    pub generated_at: DateTime<Utc>,
}

impl LocaleBundle {
    /// The values followed by the timestamp key, ready to serialize.
    #[must_use]
    pub fn document(&self) -> IndexMap<String, String> {
        let mut doc = self.values.clone();
        doc.insert(
            GENERATED_AT_KEY.to_string(),
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        doc
    }
}

/// Use case for flattening one section's own entries for one locale.
pub struct BuildLocaleBundle<C: Clock> {
    clock: C,
}

impl<C: Clock> BuildLocaleBundle<C> {
    /// Creates a new `BuildLocaleBundle` use case.
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Builds the bundle for the section at `section_path` (e.g. `home` or
    /// `home/banner`). Descendant entries are not included.
    ///
    /// # Errors
    /// - `Export` if the section does not exist
    /// - `Export` if the locale is not recognized
    /// - `Export` if two entries of the section share a key
    pub fn execute(
        &self,
        tree: &SectionTree,
        section_path: &str,
        locale: &str,
        locales: &LocaleConfig,
    ) -> ApplicationResult<LocaleBundle> {
        let section = tree
            .find(section_path)
            .ok_or_else(|| ApplicationError::Export(format!("no section at {section_path}")))?;
        if !locales.is_recognized(locale) {
            return Err(ApplicationError::Export(format!(
                "locale {locale} is not one of {}",
                locales.locales().join(", ")
            )));
        }

        let mut values = IndexMap::with_capacity(section.entries.len());
        for entry in &section.entries {
            match values.entry(format!("{}.{}", section.key, entry.key)) {
                MapEntry::Vacant(slot) => {
                    slot.insert(entry.localized(locale, locales).to_string());
                }
                MapEntry::Occupied(slot) => {
                    return Err(ApplicationError::Export(format!(
                        "section {} has more than one entry keyed {}",
                        section.path,
                        slot.key()
                    )));
                }
            }
        }

        info!(section = %section.path, locale, values = values.len(), "built locale bundle");
        Ok(LocaleBundle {
            file_name: format!("{}_{locale}.json", section.key),
            locale: locale.to_string(),
            values,
            generated_at: self.clock.now(),
        })
    }
}
