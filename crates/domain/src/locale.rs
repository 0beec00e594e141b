//! Locale configuration.
//!
//! Generated code only knows the locales listed here. A runtime locale that is
//! not recognized resolves to the primary locale.

use serde::{Deserialize, Serialize};

/// What a lookup returns when an entry has no text for a recognized locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocaleFallback {
    /// Missing text is the empty string.
    #[default]
    Empty,
    /// Missing text falls back to the primary locale value, then empty.
    Primary,
}

impl std::str::FromStr for LocaleFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "primary" => Ok(Self::Primary),
            other => Err(format!("unknown locale fallback: {other}")),
        }
    }
}

/// Recognized locales and the primary (default) one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Recognized locale codes, in output order.
    locales: Vec<String>,
    /// Locale used when the runtime locale is unsupported.
    primary: String,
    /// Policy for missing values.
    #[serde(default)]
    fallback: LocaleFallback,
}

impl LocaleConfig {
    /// Creates a config. The primary locale is always recognized and listed first
    /// when it was not part of `locales`. Duplicates and blank codes are dropped.
    pub fn new(locales: impl IntoIterator<Item = impl Into<String>>, primary: impl Into<String>) -> Self {
        let primary = primary.into().trim().to_string();
        let mut ordered: Vec<String> = Vec::new();
        for locale in locales {
            let locale = locale.into().trim().to_string();
            if !locale.is_empty() && !ordered.contains(&locale) {
                ordered.push(locale);
            }
        }
        if !ordered.contains(&primary) {
            ordered.insert(0, primary.clone());
        }
        Self {
            locales: ordered,
            primary,
            fallback: LocaleFallback::Empty,
        }
    }

    /// Sets the fallback policy.
    #[must_use]
    pub const fn with_fallback(mut self, fallback: LocaleFallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Recognized locales.
    #[must_use]
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// The primary locale.
    #[must_use]
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// The fallback policy.
    #[must_use]
    pub const fn fallback(&self) -> LocaleFallback {
        self.fallback
    }

    /// Whether `locale` is recognized.
    #[must_use]
    pub fn is_recognized(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    /// Recognized locales other than the primary one.
    pub fn secondary(&self) -> impl Iterator<Item = &str> {
        self.locales
            .iter()
            .map(String::as_str)
            .filter(move |l| *l != self.primary)
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::new(["en", "fr"], "en")
    }
}
