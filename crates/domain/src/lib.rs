//! Lexicon Domain - Core localization types
//!
//! This crate defines the localization model: raw upstream records, the
//! normalized section tree built from them, and the identifier rules shared by
//! the code generators. All types here are pure Rust with no I/O dependencies.

pub mod codegen;
pub mod entry;
pub mod error;
pub mod identifier;
pub mod locale;
pub mod parameter;
pub mod record;
pub mod section;
pub mod tree;
pub mod warning;

pub use codegen::{CodeGenOptions, Dialect, GeneratedCode, GeneratedFile, GenerationMode};
pub use entry::Entry;
pub use error::{DomainError, DomainResult};
pub use identifier::{IdentifierCase, IdentifierRole, IdentifierScope};
pub use locale::{LocaleConfig, LocaleFallback};
pub use parameter::{ParameterKind, extract_parameters};
pub use record::{ContentSnapshot, RawEntryRecord, RawSectionRecord};
pub use section::{FlatEntry, Section};
pub use tree::{BuildOutcome, SectionTree, TreeSummary, build_section_tree};
pub use warning::{StructuralWarning, WarningKind, WarningSeverity, WarningStats};
