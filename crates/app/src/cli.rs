//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lexicon_domain::{Dialect, GenerationMode};

/// Lexicon - turn Contentful localizations into Swift and Kotlin enums
#[derive(Parser, Debug)]
#[command(name = "lexicon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./lexicon.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the normalized section tree and its summary
    Tree(SourceArgs),
    /// Generate enum source for one dialect
    Generate(GenerateArgs),
    /// Export one section's entries as per-locale JSON
    ExportJson(ExportJsonArgs),
}

/// Where raw records come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read records from a JSON or YAML snapshot instead of Contentful
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,
}

/// Arguments of `generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Raw record source
    #[command(flatten)]
    pub source: SourceArgs,

    /// Target dialect: swift or kotlin
    #[arg(long, default_value = "swift")]
    pub dialect: Dialect,

    /// Auxiliary output: plain, testing-helper or migration-helper
    #[arg(long, default_value = "plain")]
    pub mode: GenerationMode,

    /// Seed for the testing helper's sample arguments
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Package declaration for Kotlin output (overrides the configuration)
    #[arg(long, value_name = "PACKAGE")]
    pub kotlin_package: Option<String>,

    /// Output directory
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub out: PathBuf,
}

/// Arguments of `export-json`.
#[derive(Args, Debug, Clone)]
pub struct ExportJsonArgs {
    /// Raw record source
    #[command(flatten)]
    pub source: SourceArgs,

    /// Section key path, e.g. `home` or `home/banner`
    #[arg(long, value_name = "KEY")]
    pub section: String,

    /// Locale to export; every recognized locale when omitted
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<String>,

    /// Output directory
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub out: PathBuf,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "lexicon",
            "generate",
            "--dialect",
            "kotlin",
            "--mode",
            "migration-helper",
            "--seed",
            "9",
            "--snapshot",
            "snap.json",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.dialect, Dialect::Kotlin);
        assert_eq!(args.mode, GenerationMode::WithMigrationHelper);
        assert_eq!(args.seed, 9);
        assert_eq!(args.source.snapshot, Some(PathBuf::from("snap.json")));
        assert_eq!(args.out, PathBuf::from("."));
    }

    #[test]
    fn test_parse_export_json() {
        let cli = Cli::try_parse_from([
            "lexicon",
            "--config",
            "lexicon.toml",
            "export-json",
            "--section",
            "home/banner",
            "--locale",
            "fr",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("lexicon.toml")));
        let Command::ExportJson(args) = cli.command else {
            panic!("expected export-json");
        };
        assert_eq!(args.section, "home/banner");
        assert_eq!(args.locale.as_deref(), Some("fr"));
    }

    #[test]
    fn test_unknown_dialect_rejected() {
        assert!(Cli::try_parse_from(["lexicon", "generate", "--dialect", "java"]).is_err());
    }
}
