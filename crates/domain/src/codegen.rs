//! Code generation types for turning a section tree into enum source files.
//!
//! This module provides the option and artifact types shared by the
//! generator implementations in the infrastructure layer.

use serde::{Deserialize, Serialize};

use crate::locale::LocaleConfig;

/// Target code-generation dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Swift: nested enums mirroring the section tree
    #[default]
    Swift,
    /// Kotlin: one flat enum class with a companion lookup table
    Kotlin,
}

impl Dialect {
    /// Get display name for the dialect.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Swift => "Swift (nested enums)",
            Self::Kotlin => "Kotlin (flat enum)",
        }
    }

    /// Get file extension for the dialect.
    #[must_use]
    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::Swift => "swift",
            Self::Kotlin => "kt",
        }
    }

    /// Get the MIME type hint for generated source.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Swift => "text/x-swift",
            Self::Kotlin => "text/x-kotlin",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "swift" | "ios" => Ok(Self::Swift),
            "kotlin" | "kt" | "android" => Ok(Self::Kotlin),
            other => Err(format!("unknown dialect: {other}")),
        }
    }
}

/// Which auxiliary file to generate next to the enum source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    /// Enum source only.
    #[default]
    Plain,
    /// Enum source plus a smoke-test file invoking every case.
    WithTestingHelper,
    /// Enum source plus a legacy-literal to identifier mapping.
    WithMigrationHelper,
}

impl std::str::FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "testing-helper" | "testing" => Ok(Self::WithTestingHelper),
            "migration-helper" | "migration" => Ok(Self::WithMigrationHelper),
            other => Err(format!("unknown generation mode: {other}")),
        }
    }
}

/// Options for code generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeGenOptions {
    /// Target dialect.
    pub dialect: Dialect,
    /// Auxiliary output.
    #[serde(default)]
    pub mode: GenerationMode,
    /// Recognized locales.
    #[serde(default)]
    pub locales: LocaleConfig,
    /// Seed for the testing helper's argument picks.
    #[serde(default)]
    pub seed: u64,
    /// Kotlin package declaration, if any.
    #[serde(default)]
    pub kotlin_package: Option<String>,
    /// Indent size (spaces).
    #[serde(default = "default_indent")]
    pub indent_size: usize,
}

const fn default_indent() -> usize {
    4
}

impl Default for CodeGenOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            mode: GenerationMode::default(),
            locales: LocaleConfig::default(),
            seed: 0,
            kotlin_package: None,
            indent_size: default_indent(),
        }
    }
}

impl CodeGenOptions {
    /// Create options for a specific dialect with defaults.
    #[must_use]
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Default::default()
        }
    }

    /// Sets the generation mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the locale configuration.
    #[must_use]
    pub fn with_locales(mut self, locales: LocaleConfig) -> Self {
        self.locales = locales;
        self
    }

    /// Get indentation string for `level` levels.
    #[must_use]
    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_size * level)
    }
}

/// One generated text file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Suggested file name.
    pub file_name: String,
    /// MIME type hint.
    pub mime_type: String,
    /// File contents.
    pub content: String,
}

impl GeneratedFile {
    /// Create a new file.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    /// Extension of the suggested file name.
    #[must_use]
    pub fn extension(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map_or("", |(_, ext)| ext)
    }
}

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Dialect of the primary file.
    pub dialect: Dialect,
    /// The enum source.
    pub primary: GeneratedFile,
    /// Testing or migration helper, depending on the mode.
    pub auxiliary: Option<GeneratedFile>,
    /// Number of leaf cases emitted.
    pub case_count: usize,
}

impl GeneratedCode {
    /// All files, primary first.
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        std::iter::once(&self.primary).chain(self.auxiliary.as_ref())
    }
}
