//! Identifier sanitization shared by all dialects.
//!
//! A key becomes an identifier in three steps: characters outside
//! `[A-Za-z0-9_]` become `_`, the words are re-cased for the target
//! convention, and a leading digit gets a `_` prefix. Collisions inside one
//! scope are resolved by [`IdentifierScope`] with `_2`, `_3`, ... suffixes in
//! first-seen order.

use std::collections::HashSet;

use crate::codegen::Dialect;
use crate::error::{DomainError, DomainResult};

/// Casing convention of a generated identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierCase {
    /// `WelcomeMessage`
    UpperCamel,
    /// `welcomeMessage`
    LowerCamel,
    /// `WELCOME_MESSAGE`
    UpperSnake,
}

/// Where an identifier is declared in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierRole {
    /// A type, e.g. a nested enum per section.
    TypeName,
    /// An enum case.
    CaseName,
}

/// Replaces characters outside `[A-Za-z0-9_]` with `_` and prefixes a leading
/// digit with `_`. An empty key becomes `_`.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    let mut out: String = raw
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() {
        out.push('_');
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Splits a sanitized key into words on `_` and camel-case boundaries.
fn split_words(sanitized: &str) -> Vec<String> {
    let mut words = Vec::new();
    for chunk in sanitized.split('_').filter(|c| !c.is_empty()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut current = String::new();
        for (i, &c) in chars.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if c.is_ascii_uppercase() => {
                    p.is_ascii_lowercase()
                        || p.is_ascii_digit()
                        || (p.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase()))
                }
                _ => false,
            };
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }
    words
}

fn capitalize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    let mut chars = lower.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

/// Converts a raw key to an identifier in the given casing.
#[must_use]
pub fn to_identifier(raw: &str, case: IdentifierCase) -> String {
    let sanitized = sanitize(raw);
    let words = split_words(&sanitized);
    if words.is_empty() {
        return sanitized;
    }

    let mut ident = match case {
        IdentifierCase::UpperCamel => words.iter().map(|w| capitalize(w)).collect(),
        IdentifierCase::LowerCamel => {
            let mut out = words[0].to_ascii_lowercase();
            for word in &words[1..] {
                out.push_str(&capitalize(word));
            }
            out
        }
        IdentifierCase::UpperSnake => words
            .iter()
            .map(|w| w.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join("_"),
    };

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Identifiers already used in one generated scope.
#[derive(Debug, Default, Clone)]
pub struct IdentifierScope {
    taken: HashSet<String>,
}

impl IdentifierScope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `base` if unused, otherwise the first free `base_N` with N >= 2,
    /// and marks the result as used.
    pub fn claim(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{base}_{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

const SWIFT_KEYWORDS: &[&str] = &[
    "associatedtype", "class", "deinit", "enum", "extension", "fileprivate", "func", "import",
    "inout", "internal", "let", "open", "operator", "private", "protocol", "public", "rethrows",
    "static", "struct", "subscript", "typealias", "var", "break", "case", "continue", "default",
    "defer", "do", "else", "fallthrough", "for", "guard", "if", "in", "repeat", "return",
    "switch", "where", "while", "as", "catch", "false", "is", "nil", "super", "throw", "throws",
    "true", "try", "await",
];

/// Case names that would clash with members every generated enum declares.
const SWIFT_FORBIDDEN_CASES: &[&str] = &[
    "_", "self", "Self", "init", "Type", "Protocol", "key", "filename", "localized",
    "hasParameters", "parameters",
];

const SWIFT_FORBIDDEN_TYPES: &[&str] = &[
    "_", "Self", "Type", "Protocol", "Any", "String", "Int", "Double", "Bool", "Localizations",
    "LocalizationKey", "Foundation",
];

/// Constant names that would clash with the generated companion object.
const KOTLIN_FORBIDDEN_CONSTANTS: &[&str] = &["_", "PRIMARY_LOCALE", "SUPPORTED_LOCALES", "BY_KEY"];

/// Checks an identifier against the dialect's reserved words.
///
/// Escapable keywords are wrapped in backticks. Names that cannot be used at
/// all fail.
///
/// # Errors
///
/// Returns [`DomainError::ReservedIdentifier`] naming `key` when the
/// identifier can never be declared in that position.
pub fn check_reserved(
    identifier: String,
    key: &str,
    dialect: Dialect,
    role: IdentifierRole,
) -> DomainResult<String> {
    let forbidden = match (dialect, role) {
        (Dialect::Swift, IdentifierRole::CaseName) => SWIFT_FORBIDDEN_CASES,
        (Dialect::Swift, IdentifierRole::TypeName) => SWIFT_FORBIDDEN_TYPES,
        (Dialect::Kotlin, _) => KOTLIN_FORBIDDEN_CONSTANTS,
    };
    let underscores_only = identifier.chars().all(|c| c == '_');
    let reserved_underscores = dialect == Dialect::Kotlin && underscores_only;
    if forbidden.contains(&identifier.as_str()) || reserved_underscores {
        return Err(DomainError::ReservedIdentifier {
            key: key.to_string(),
            identifier,
            dialect: dialect.display_name().to_string(),
        });
    }
    if dialect == Dialect::Swift && SWIFT_KEYWORDS.contains(&identifier.as_str()) {
        return Ok(format!("`{identifier}`"));
    }
    Ok(identifier)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("foo-bar"), "foo_bar");
        assert_eq!(sanitize("foo bar"), "foo_bar");
        assert_eq!(sanitize("9lives"), "_9lives");
        assert_eq!(sanitize("café"), "caf_");
        assert_eq!(sanitize(""), "_");
    }

    #[test]
    fn test_casing() {
        assert_eq!(to_identifier("welcome_msg", IdentifierCase::LowerCamel), "welcomeMsg");
        assert_eq!(to_identifier("welcome_msg", IdentifierCase::UpperCamel), "WelcomeMsg");
        assert_eq!(to_identifier("welcome_msg", IdentifierCase::UpperSnake), "WELCOME_MSG");
        assert_eq!(to_identifier("loginScreen", IdentifierCase::UpperSnake), "LOGIN_SCREEN");
        assert_eq!(to_identifier("URLPath", IdentifierCase::LowerCamel), "urlPath");
        assert_eq!(to_identifier("home.title", IdentifierCase::LowerCamel), "homeTitle");
    }

    #[test]
    fn test_leading_digit_prefixed() {
        assert_eq!(to_identifier("404_title", IdentifierCase::LowerCamel), "_404Title");
        assert_eq!(to_identifier("404_title", IdentifierCase::UpperSnake), "_404_TITLE");
    }

    #[test]
    fn test_only_separators() {
        assert_eq!(to_identifier("---", IdentifierCase::LowerCamel), "___");
        assert_eq!(to_identifier("", IdentifierCase::UpperSnake), "_");
    }

    #[test]
    fn test_collisions_resolved_in_first_seen_order() {
        let mut scope = IdentifierScope::new();
        let a = scope.claim(&to_identifier("foo-bar", IdentifierCase::LowerCamel));
        let b = scope.claim(&to_identifier("foo bar", IdentifierCase::LowerCamel));
        let c = scope.claim(&to_identifier("foo_bar", IdentifierCase::LowerCamel));
        assert_eq!(a, "fooBar");
        assert_eq!(b, "fooBar_2");
        assert_eq!(c, "fooBar_3");
    }

    #[test]
    fn test_suffix_skips_existing_identifier() {
        let mut scope = IdentifierScope::new();
        scope.claim("title_2");
        scope.claim("title");
        assert_eq!(scope.claim("title"), "title_3");
    }

    #[test]
    fn test_swift_keyword_escaped() {
        let ident = check_reserved("default".into(), "default", Dialect::Swift, IdentifierRole::CaseName);
        assert_eq!(ident.unwrap(), "`default`");
    }

    #[test]
    fn test_swift_forbidden_case() {
        let err = check_reserved("key".into(), "key", Dialect::Swift, IdentifierRole::CaseName)
            .unwrap_err();
        assert!(matches!(err, DomainError::ReservedIdentifier { ref key, .. } if key == "key"));
    }

    #[test]
    fn test_swift_forbidden_type() {
        assert!(
            check_reserved("String".into(), "string", Dialect::Swift, IdentifierRole::TypeName)
                .is_err()
        );
    }

    #[test]
    fn test_kotlin_rules() {
        assert_eq!(
            check_reserved("DEFAULT".into(), "default", Dialect::Kotlin, IdentifierRole::CaseName)
                .unwrap(),
            "DEFAULT"
        );
        assert!(check_reserved("_".into(), "-", Dialect::Kotlin, IdentifierRole::CaseName).is_err());
        assert!(check_reserved("___".into(), "---", Dialect::Kotlin, IdentifierRole::CaseName).is_err());
    }
}
