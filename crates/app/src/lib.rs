//! Lexicon command-line application.
//!
//! Wires the Contentful or snapshot content source, the section tree builder,
//! the enum generators and the JSON exporter behind a small CLI.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command};
pub use config::LexiconConfig;
