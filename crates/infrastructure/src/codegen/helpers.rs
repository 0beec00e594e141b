//! Auxiliary files: the testing helper and the migration mapping.

use std::collections::HashSet;

use lexicon_domain::{CodeGenOptions, Dialect, GeneratedFile, ParameterKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::kotlin::escape_kotlin;
use super::plan::{PlannedCase, ROOT_TYPE};
use super::swift::escape_swift;

const STRING_POOL: &[&str] = &["Alice", "Bob", "Paris", "Zoë", "42 Main St"];
const INT_POOL: &[i64] = &[0, 1, 2, 7, 42, 100];
const DOUBLE_POOL: &[f64] = &[0.5, 1.5, 3.25, 99.99];

/// Picks one sample argument literal per parameter.
fn sample_arguments(parameters: &[ParameterKind], rng: &mut StdRng, dialect: Dialect) -> Vec<String> {
    parameters
        .iter()
        .map(|kind| match kind {
            ParameterKind::String => {
                let value = STRING_POOL[rng.random_range(0..STRING_POOL.len())];
                match dialect {
                    Dialect::Swift => format!("\"{}\"", escape_swift(value)),
                    Dialect::Kotlin => format!("\"{}\"", escape_kotlin(value)),
                }
            }
            ParameterKind::Int => INT_POOL[rng.random_range(0..INT_POOL.len())].to_string(),
            ParameterKind::Double => {
                format!("{:?}", DOUBLE_POOL[rng.random_range(0..DOUBLE_POOL.len())])
            }
        })
        .collect()
}

/// Builds the testing helper: one invocation per case with seeded sample
/// arguments.
#[must_use]
pub fn testing_helper(cases: &[&PlannedCase<'_>], options: &CodeGenOptions) -> GeneratedFile {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let pad = options.indent(1);
    let pad2 = options.indent(2);
    let dialect = options.dialect;

    let mut code = String::new();
    code.push_str("// Generated by Lexicon. Do not edit.\n");
    code.push_str(&format!("// Seed: {}\n", options.seed));
    code.push_str(&format!("// Total test cases: {}\n\n", cases.len()));

    match dialect {
        Dialect::Swift => {
            code.push_str("import Foundation\n\n#if DEBUG\n");
            code.push_str(&format!("extension {ROOT_TYPE} {{\n"));
            code.push_str(&format!(
                "{pad}public static let testCases: [any LocalizationKey] = ["
            ));
            if cases.is_empty() {
                code.push_str("]\n");
            } else {
                code.push('\n');
                for case in cases {
                    let args = sample_arguments(&case.parameters, &mut rng, dialect);
                    if args.is_empty() {
                        code.push_str(&format!("{pad2}{},\n", case.reference));
                    } else {
                        code.push_str(&format!("{pad2}{}({}),\n", case.reference, args.join(", ")));
                    }
                }
                code.push_str(&format!("{pad}]\n"));
            }
            code.push_str(&format!(
                "\n{pad}public static func allLocalizedStrings(locale: String) -> [String] {{\n"
            ));
            code.push_str(&format!("{pad2}testCases.map {{ $0.localized(locale: locale) }}\n"));
            code.push_str(&format!("{pad}}}\n}}\n#endif\n"));
            GeneratedFile::new(format!("{ROOT_TYPE}Testing.swift"), dialect.mime_type(), code)
        }
        Dialect::Kotlin => {
            if let Some(package) = &options.kotlin_package {
                code.push_str(&format!("package {package}\n\n"));
            }
            code.push_str(&format!("object {ROOT_TYPE}TestCases {{\n"));
            code.push_str(&format!(
                "{pad}val invocations: List<Pair<{ROOT_TYPE}, Array<Any>>> = listOf("
            ));
            if cases.is_empty() {
                code.push_str(")\n");
            } else {
                code.push('\n');
                for case in cases {
                    let args = sample_arguments(&case.parameters, &mut rng, dialect);
                    code.push_str(&format!(
                        "{pad2}{} to arrayOf<Any>({}),\n",
                        case.reference,
                        args.join(", ")
                    ));
                }
                code.push_str(&format!("{pad})\n"));
            }
            code.push_str(&format!(
                "\n{pad}fun allLocalizedStrings(locale: String): List<String> =\n"
            ));
            code.push_str(&format!(
                "{pad2}invocations.map {{ (key, args) -> key.localized(locale, *args) }}\n"
            ));
            code.push_str("}\n");
            GeneratedFile::new(format!("{ROOT_TYPE}TestCases.kt"), dialect.mime_type(), code)
        }
    }
}

/// Double-quotes a legacy literal, escaping backslashes before quotes.
fn quote_literal(literal: &str) -> String {
    format!("\"{}\"", literal.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Builds the migration mapping: one line per legacy literal, first
/// occurrence wins.
#[must_use]
pub fn migration_helper(cases: &[&PlannedCase<'_>], options: &CodeGenOptions) -> GeneratedFile {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    for case in cases {
        let Some(legacy) = case.entry.legacy_key() else {
            continue;
        };
        if !seen.insert(legacy) {
            continue;
        }
        let placeholders: Vec<_> = case.parameters.iter().map(|p| p.placeholder()).collect();
        let target = match options.dialect {
            Dialect::Swift if placeholders.is_empty() => case.reference.clone(),
            Dialect::Swift => format!("{}({})", case.reference, placeholders.join(", ")),
            Dialect::Kotlin => {
                let mut args = vec!["locale"];
                args.extend(placeholders);
                format!("{}.localized({})", case.reference, args.join(", "))
            }
        };
        lines.push(format!("{} -> {target}", quote_literal(legacy)));
    }

    let mut text = String::new();
    text.push_str("# Generated by Lexicon. Do not edit.\n");
    text.push_str(&format!("# {}: legacy literal -> generated identifier\n", options.dialect));
    text.push_str(&format!("# Total mappings: {}\n", lines.len()));
    for line in &lines {
        text.push_str(line);
        text.push('\n');
    }
    GeneratedFile::new(
        format!("{ROOT_TYPE}Migration.{}.txt", options.dialect.file_extension()),
        "text/plain",
        text,
    )
}
