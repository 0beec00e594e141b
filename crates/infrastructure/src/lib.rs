//! Lexicon Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, the enum code generators and the
//! file exporters.

pub mod adapters;
pub mod codegen;
pub mod export;
pub mod serialization;

pub use adapters::{
    ContentfulGraphQlSource, ContentfulSettings, FixedClock, SnapshotFileSource, SystemClock,
};
pub use codegen::{CodeGenerator, generate_code};
pub use export::{ExportError, render_locale_bundle, write_generated_code, write_locale_bundle};
pub use serialization::{SerializationError, from_json, to_json_stable};
