//! Substitution parameters embedded in localized text.
//!
//! A value such as `"Hello %@, you have %d messages"` takes a `String` and an
//! `Int`, in that order. `%%` is a literal percent sign.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(%|@|d|f)").expect("valid regex"));

/// Type of a single substitution parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// `%@`
    String,
    /// `%d`
    Int,
    /// `%f`
    Double,
}

impl ParameterKind {
    /// Swift type name.
    #[must_use]
    pub const fn swift_type(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Int => "Int",
            Self::Double => "Double",
        }
    }

    /// Placeholder shown in migration mappings.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::String => "<string>",
            Self::Int => "<int>",
            Self::Double => "<double>",
        }
    }
}

/// Extracts parameters from `value` in order of appearance.
#[must_use]
pub fn extract_parameters(value: &str) -> Vec<ParameterKind> {
    PLACEHOLDER
        .captures_iter(value)
        .filter_map(|caps| match &caps[1] {
            "@" => Some(ParameterKind::String),
            "d" => Some(ParameterKind::Int),
            "f" => Some(ParameterKind::Double),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_parameters() {
        assert!(extract_parameters("Welcome").is_empty());
        assert!(extract_parameters("").is_empty());
    }

    #[test]
    fn test_parameters_in_order() {
        assert_eq!(
            extract_parameters("%d items for %@ at %f"),
            vec![ParameterKind::Int, ParameterKind::String, ParameterKind::Double]
        );
    }

    #[test]
    fn test_escaped_percent_is_not_a_parameter() {
        assert_eq!(extract_parameters("100%% of %@"), vec![ParameterKind::String]);
        assert!(extract_parameters("%%d").is_empty());
    }

    #[test]
    fn test_unknown_specifier_ignored() {
        assert!(extract_parameters("50% off %s").is_empty());
    }
}
