//! Lexicon Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the content source and the clock)
//! - Use case orchestration (fetch, build, bundle)
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{Clock, ContentSource, SourceError};
pub use use_cases::{BuildLocaleBundle, LoadSectionTree, LocaleBundle};
