//! Command handlers.

use anyhow::{Context, Result};
use lexicon_application::{BuildLocaleBundle, LoadSectionTree};
use lexicon_domain::{BuildOutcome, CodeGenOptions, Section, SectionTree};
use lexicon_infrastructure::{
    ContentfulGraphQlSource, SnapshotFileSource, SystemClock, generate_code,
    write_generated_code, write_locale_bundle,
};
use tracing::info;

use crate::cli::{Command, ExportJsonArgs, GenerateArgs, SourceArgs};
use crate::config::LexiconConfig;

/// Runs one command.
///
/// # Errors
///
/// Returns an error if fetching, building, generation or writing fails.
pub async fn run(command: Command, config: &LexiconConfig) -> Result<()> {
    match command {
        Command::Tree(source) => tree(&source, config).await,
        Command::Generate(args) => generate(&args, config).await,
        Command::ExportJson(args) => export_json(&args, config).await,
    }
}

/// Fetches raw records from the snapshot file or Contentful and builds the tree.
///
/// # Errors
///
/// Returns an error if the source fails or a record is malformed.
pub async fn load_tree(source: &SourceArgs, config: &LexiconConfig) -> Result<BuildOutcome> {
    let outcome = if let Some(path) = &source.snapshot {
        LoadSectionTree::new(SnapshotFileSource::new(path))
            .execute()
            .await
            .with_context(|| format!("loading snapshot {}", path.display()))?
    } else {
        let contentful = ContentfulGraphQlSource::new(config.contentful_settings())
            .context("creating Contentful client")?;
        LoadSectionTree::new(contentful)
            .execute()
            .await
            .context("loading content from Contentful")?
    };
    Ok(outcome)
}

/// Renders the tree as an indented outline.
#[must_use]
pub fn render_tree(tree: &SectionTree) -> String {
    fn render(out: &mut String, section: &Section, depth: usize) {
        out.push_str(&format!(
            "{}{} \"{}\" entries={} total={}\n",
            "  ".repeat(depth),
            section.key,
            section.title,
            section.effective_value_count(),
            section.total_value_count()
        ));
        for child in &section.subsections {
            render(out, child, depth + 1);
        }
    }

    if tree.is_empty() {
        return "(no sections)\n".to_string();
    }
    let mut out = String::new();
    for root in &tree.roots {
        render(&mut out, root, 0);
    }
    out
}

async fn tree(source: &SourceArgs, config: &LexiconConfig) -> Result<()> {
    let outcome = load_tree(source, config).await?;
    print!("{}", render_tree(&outcome.tree));

    let summary = outcome.summary();
    println!(
        "roots={} sections={} entries={} warnings={}",
        summary.root_count, summary.section_count, summary.entry_count, summary.warning_count
    );
    for warning in &outcome.warnings {
        println!("{warning}");
    }
    Ok(())
}

/// Generation options from the configuration and command arguments.
#[must_use]
pub fn generation_options(args: &GenerateArgs, config: &LexiconConfig) -> CodeGenOptions {
    let mut options = CodeGenOptions::for_dialect(args.dialect)
        .with_mode(args.mode)
        .with_locales(config.locale_config());
    options.seed = args.seed;
    options.kotlin_package = args
        .kotlin_package
        .clone()
        .or_else(|| config.kotlin_package.clone());
    options
}

async fn generate(args: &GenerateArgs, config: &LexiconConfig) -> Result<()> {
    let outcome = load_tree(&args.source, config).await?;
    let options = generation_options(args, config);
    let code = generate_code(&outcome.tree, &options)
        .with_context(|| format!("generating {}", args.dialect))?;

    let written = write_generated_code(&code, &args.out).await?;
    for path in &written {
        println!("{}", path.display());
    }
    info!(cases = code.case_count, "generation complete");
    Ok(())
}

async fn export_json(args: &ExportJsonArgs, config: &LexiconConfig) -> Result<()> {
    let outcome = load_tree(&args.source, config).await?;
    let locales = config.locale_config();
    let targets: Vec<String> = match &args.locale {
        Some(locale) => vec![locale.clone()],
        None => locales.locales().to_vec(),
    };

    let use_case = BuildLocaleBundle::new(SystemClock::new());
    for locale in &targets {
        let bundle = use_case.execute(&outcome.tree, &args.section, locale, &locales)?;
        let path = write_locale_bundle(&bundle, &args.out).await?;
        println!("{}", path.display());
    }
    Ok(())
}
