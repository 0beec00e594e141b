//! Runtime configuration.
//!
//! Values come from an optional `lexicon.toml` (or the file passed with
//! `--config`), overridden by `LEXICON_*` environment variables.

use std::collections::HashMap;
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use lexicon_domain::{LocaleConfig, LocaleFallback};
use lexicon_infrastructure::ContentfulSettings;
use lexicon_infrastructure::adapters::DEFAULT_BASE_URL;
use serde::Deserialize;

fn default_environment() -> String {
    "master".to_string()
}

fn default_locales() -> Vec<String> {
    vec!["en".to_string(), "fr".to_string()]
}

fn default_primary() -> String {
    "en".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconConfig {
    /// Contentful space id.
    #[serde(default)]
    pub space_id: String,
    /// Contentful environment id.
    #[serde(default = "default_environment")]
    pub environment_id: String,
    /// Contentful delivery token.
    #[serde(default)]
    pub access_token: String,
    /// GraphQL host.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Recognized locales.
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    /// Locale used for unsupported runtime locales.
    #[serde(default = "default_primary")]
    pub primary_locale: String,
    /// Policy for missing values.
    #[serde(default)]
    pub fallback: LocaleFallback,
    /// Package declaration for Kotlin output.
    #[serde(default)]
    pub kotlin_package: Option<String>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            space_id: String::new(),
            environment_id: default_environment(),
            access_token: String::new(),
            base_url: default_base_url(),
            locales: default_locales(),
            primary_locale: default_primary(),
            fallback: LocaleFallback::default(),
            kotlin_package: None,
        }
    }
}

impl LexiconConfig {
    /// Loads the configuration from the file and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(file, None)
    }

    /// Same as [`Self::load`] with an explicit environment map instead of
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load_with_env(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let builder = match file {
            Some(path) => Config::builder().add_source(File::from(path).required(true)),
            None => Config::builder().add_source(File::with_name("lexicon").required(false)),
        };
        builder
            .add_source(
                Environment::with_prefix("LEXICON")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("locales")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }

    /// Locale settings for building and generation.
    #[must_use]
    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::new(self.locales.iter().cloned(), self.primary_locale.as_str())
            .with_fallback(self.fallback)
    }

    /// Connection settings for the Contentful source.
    #[must_use]
    pub fn contentful_settings(&self) -> ContentfulSettings {
        let mut settings = ContentfulSettings::new(
            self.space_id.as_str(),
            self.environment_id.as_str(),
            self.access_token.as_str(),
            self.locale_config(),
        );
        settings.base_url.clone_from(&self.base_url);
        settings
    }
}
