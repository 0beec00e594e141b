//! Swift emitter: one nested enum per section.

use lexicon_domain::{CodeGenOptions, LocaleConfig};

use super::plan::{PlannedCase, ROOT_TYPE, SwiftEnum};

/// Escapes text for a Swift string literal.
pub fn escape_swift(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out
}

/// Writes the Swift source for planned enums.
pub struct SwiftEmitter<'a> {
    options: &'a CodeGenOptions,
}

impl<'a> SwiftEmitter<'a> {
    /// Create an emitter with the given options.
    #[must_use]
    pub const fn new(options: &'a CodeGenOptions) -> Self {
        Self { options }
    }

    fn locales(&self) -> &LocaleConfig {
        &self.options.locales
    }

    /// Emit the enum source.
    #[must_use]
    pub fn emit(&self, enums: &[SwiftEnum<'_>]) -> String {
        let case_count: usize = enums.iter().map(SwiftEnum::case_count).sum();
        let indent = self.options.indent(1);

        let mut code = String::new();
        code.push_str("// Generated by Lexicon. Do not edit.\n");
        code.push_str(&format!("// Total cases: {case_count}\n\n"));
        code.push_str("import Foundation\n\n");

        code.push_str("public protocol LocalizationKey {\n");
        code.push_str(&format!("{indent}var key: String {{ get }}\n"));
        code.push_str(&format!("{indent}var filename: String {{ get }}\n"));
        code.push_str(&format!("{indent}var hasParameters: Bool {{ get }}\n"));
        code.push_str(&format!("{indent}var parameters: [any CVarArg]? {{ get }}\n"));
        code.push_str(&format!("{indent}func localized(locale: String) -> String\n"));
        code.push_str("}\n\n");

        code.push_str(&format!("public enum {ROOT_TYPE} {{\n"));
        for (i, item) in enums.iter().enumerate() {
            if i > 0 {
                code.push('\n');
            }
            self.emit_enum(&mut code, item, 1);
        }
        code.push_str("}\n");
        code
    }

    fn emit_enum(&self, code: &mut String, item: &SwiftEnum<'_>, level: usize) {
        let pad = self.options.indent(level);
        if item.cases.is_empty() {
            code.push_str(&format!("{pad}public enum {} {{\n", item.type_name));
        } else {
            code.push_str(&format!(
                "{pad}public enum {}: LocalizationKey {{\n",
                item.type_name
            ));
            self.emit_cases(code, item, level + 1);
        }

        for (i, child) in item.children.iter().enumerate() {
            if i > 0 || !item.cases.is_empty() {
                code.push('\n');
            }
            self.emit_enum(code, child, level + 1);
        }
        code.push_str(&format!("{pad}}}\n"));
    }

    fn emit_cases(&self, code: &mut String, item: &SwiftEnum<'_>, level: usize) {
        let pad = self.options.indent(level);
        let pad1 = self.options.indent(level + 1);
        let pad2 = self.options.indent(level + 2);

        for case in &item.cases {
            if case.parameters.is_empty() {
                code.push_str(&format!("{pad}case {}\n", case.identifier));
            } else {
                let types: Vec<_> = case.parameters.iter().map(|p| p.swift_type()).collect();
                code.push_str(&format!(
                    "{pad}case {}({})\n",
                    case.identifier,
                    types.join(", ")
                ));
            }
        }

        code.push_str(&format!(
            "\n{pad}public var filename: String {{ \"{}\" }}\n",
            escape_swift(&item.section.key)
        ));

        code.push_str(&format!("\n{pad}public var key: String {{\n"));
        code.push_str(&format!("{pad1}switch self {{\n"));
        for case in &item.cases {
            code.push_str(&format!(
                "{pad1}case .{}: return \"{}\"\n",
                case.identifier,
                escape_swift(&case.entry.key)
            ));
        }
        code.push_str(&format!("{pad1}}}\n{pad}}}\n"));

        let with_params: Vec<&PlannedCase<'_>> =
            item.cases.iter().filter(|c| !c.parameters.is_empty()).collect();

        code.push_str(&format!("\n{pad}public var hasParameters: Bool {{\n"));
        if with_params.is_empty() {
            code.push_str(&format!("{pad1}false\n"));
        } else if with_params.len() == item.cases.len() {
            code.push_str(&format!("{pad1}true\n"));
        } else {
            let list: Vec<_> = with_params
                .iter()
                .map(|c| format!(".{}", c.identifier))
                .collect();
            code.push_str(&format!("{pad1}switch self {{\n"));
            code.push_str(&format!("{pad1}case {}:\n{pad2}return true\n", list.join(", ")));
            code.push_str(&format!("{pad1}default:\n{pad2}return false\n"));
            code.push_str(&format!("{pad1}}}\n"));
        }
        code.push_str(&format!("{pad}}}\n"));

        code.push_str(&format!("\n{pad}public var parameters: [any CVarArg]? {{\n"));
        if with_params.is_empty() {
            code.push_str(&format!("{pad1}nil\n"));
        } else {
            code.push_str(&format!("{pad1}switch self {{\n"));
            for case in &with_params {
                let names = argument_names(case.parameters.len());
                code.push_str(&format!(
                    "{pad1}case let .{}({}):\n{pad2}return [{}]\n",
                    case.identifier,
                    names.join(", "),
                    names.join(", ")
                ));
            }
            if with_params.len() < item.cases.len() {
                code.push_str(&format!("{pad1}default:\n{pad2}return nil\n"));
            }
            code.push_str(&format!("{pad1}}}\n"));
        }
        code.push_str(&format!("{pad}}}\n"));

        self.emit_localized(code, item, level);
    }

    fn emit_localized(&self, code: &mut String, item: &SwiftEnum<'_>, level: usize) {
        let pad = self.options.indent(level);
        let pad1 = self.options.indent(level + 1);
        let pad2 = self.options.indent(level + 2);
        let locales = self.locales();

        code.push_str(&format!(
            "\n{pad}public func localized(locale: String) -> String {{\n"
        ));
        code.push_str(&format!("{pad1}let format: String\n"));
        code.push_str(&format!("{pad1}switch self {{\n"));
        for case in &item.cases {
            code.push_str(&format!("{pad1}case .{}:\n", case.identifier));
            code.push_str(&format!("{pad2}switch locale {{\n"));
            for locale in locales.secondary() {
                code.push_str(&format!(
                    "{pad2}case \"{}\": format = \"{}\"\n",
                    escape_swift(locale),
                    escape_swift(&case.literal_text(locale, locales))
                ));
            }
            code.push_str(&format!(
                "{pad2}default: format = \"{}\"\n",
                escape_swift(&case.literal_text(locales.primary(), locales))
            ));
            code.push_str(&format!("{pad2}}}\n"));
        }
        code.push_str(&format!("{pad1}}}\n"));
        code.push_str(&format!(
            "{pad1}guard let arguments = parameters else {{ return format }}\n"
        ));
        code.push_str(&format!(
            "{pad1}return String(format: format, arguments: arguments)\n"
        ));
        code.push_str(&format!("{pad}}}\n"));
    }
}

fn argument_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("arg{i}")).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codegen::plan::plan_swift;
    use lexicon_domain::{Entry, Section, SectionTree};
    use pretty_assertions::assert_eq;

    fn emit(tree: &SectionTree) -> String {
        let options = CodeGenOptions::default();
        let enums = plan_swift(tree, &options.locales).unwrap();
        SwiftEmitter::new(&options).emit(&enums)
    }

    #[test]
    fn test_escape_swift() {
        assert_eq!(escape_swift("say \"hi\"\n"), "say \\\"hi\\\"\\n");
        assert_eq!(escape_swift("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_single_case_enum() {
        let mut home = Section::new("s1", "Home", "home");
        home.entries.push(
            Entry::new("e1", "welcome_msg")
                .with_value("en", "Welcome")
                .with_value("fr", "Bienvenue"),
        );
        let code = emit(&SectionTree::new(vec![home]));

        let expected = r#"public enum Localizations {
    public enum Home: LocalizationKey {
        case welcomeMsg

        public var filename: String { "home" }

        public var key: String {
            switch self {
            case .welcomeMsg: return "welcome_msg"
            }
        }

        public var hasParameters: Bool {
            false
        }

        public var parameters: [any CVarArg]? {
            nil
        }

        public func localized(locale: String) -> String {
            let format: String
            switch self {
            case .welcomeMsg:
                switch locale {
                case "fr": format = "Bienvenue"
                default: format = "Welcome"
                }
            }
            guard let arguments = parameters else { return format }
            return String(format: format, arguments: arguments)
        }
    }
}
"#;
        let body = &code[code.find("public enum Localizations").unwrap()..];
        assert_eq!(body, expected);
    }

    #[test]
    fn test_parameters_become_associated_values() {
        let mut home = Section::new("s1", "Home", "home");
        home.entries.push(Entry::new("e1", "title").with_value("en", "Home"));
        home.entries.push(
            Entry::new("e2", "greeting")
                .with_value("en", "Hello %@, you have %d messages")
                .with_value("fr", "Bonjour %@, %d messages"),
        );
        let code = emit(&SectionTree::new(vec![home]));

        assert!(code.contains("        case greeting(String, Int)\n"));
        assert!(code.contains("            case let .greeting(arg1, arg2):\n                return [arg1, arg2]\n"));
        assert!(code.contains("            case .greeting:\n                return true\n"));
        assert!(code.contains("            default:\n                return nil\n"));
        assert!(code.contains("case \"fr\": format = \"Bonjour %@, %d messages\""));
    }

    #[test]
    fn test_missing_locale_is_empty_literal() {
        let mut home = Section::new("s1", "Home", "home");
        home.entries.push(Entry::new("e1", "title").with_value("en", "Home"));
        let code = emit(&SectionTree::new(vec![home]));
        assert!(code.contains("case \"fr\": format = \"\"\n"));
    }

    #[test]
    fn test_percent_literal_unescaped_without_parameters() {
        let mut home = Section::new("s1", "Sale", "sale");
        home.entries.push(Entry::new("e1", "discount").with_value("en", "50%% off"));
        let code = emit(&SectionTree::new(vec![home]));
        assert!(code.contains("default: format = \"50% off\""));
    }

    #[test]
    fn test_nested_sections_and_grouping_only_enum() {
        let mut banner = Section::new("s2", "Banner", "banner");
        banner.path = "home/banner".into();
        banner.entries.push(Entry::new("e1", "title").with_value("en", "Hi"));
        let mut home = Section::new("s1", "Home", "home");
        home.subsections.push(banner);
        let code = emit(&SectionTree::new(vec![home]));

        assert!(code.contains("    public enum Home {\n        public enum Banner: LocalizationKey {\n"));
        assert!(code.contains("public var filename: String { \"banner\" }"));
    }

    #[test]
    fn test_empty_tree() {
        let code = emit(&SectionTree::default());
        assert!(code.ends_with("public enum Localizations {\n}\n"));
        assert!(code.contains("// Total cases: 0\n"));
    }

    #[test]
    fn test_keyword_case_is_escaped() {
        let mut home = Section::new("s1", "Home", "home");
        home.entries.push(Entry::new("e1", "default").with_value("en", "Default"));
        let code = emit(&SectionTree::new(vec![home]));
        assert!(code.contains("        case `default`\n"));
        assert!(code.contains("case .`default`: return \"default\""));
    }
}
