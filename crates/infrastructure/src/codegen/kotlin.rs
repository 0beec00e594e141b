//! Kotlin emitter: one flat enum class with a companion lookup table.

use lexicon_domain::CodeGenOptions;

use super::plan::{PlannedCase, ROOT_TYPE};

/// Escapes text for a Kotlin string literal.
pub fn escape_kotlin(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Maps `%@` to `%s` so `String.format` accepts the text.
fn to_java_format(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '%' {
            match chars.peek() {
                Some('@') => {
                    chars.next();
                    out.push_str("%s");
                }
                Some('%') => {
                    chars.next();
                    out.push_str("%%");
                }
                _ => out.push('%'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Writes the Kotlin source for planned constants.
pub struct KotlinEmitter<'a> {
    options: &'a CodeGenOptions,
}

impl<'a> KotlinEmitter<'a> {
    /// Create an emitter with the given options.
    #[must_use]
    pub const fn new(options: &'a CodeGenOptions) -> Self {
        Self { options }
    }

    /// Emit the enum source.
    #[must_use]
    pub fn emit(&self, cases: &[PlannedCase<'_>]) -> String {
        let pad = self.options.indent(1);
        let pad2 = self.options.indent(2);
        let pad3 = self.options.indent(3);
        let locales = &self.options.locales;

        let mut code = String::new();
        code.push_str("// Generated by Lexicon. Do not edit.\n");
        code.push_str(&format!("// Total cases: {}\n\n", cases.len()));
        if let Some(package) = &self.options.kotlin_package {
            code.push_str(&format!("package {package}\n\n"));
        }

        code.push_str(&format!("enum class {ROOT_TYPE}(\n"));
        code.push_str(&format!("{pad}val key: String,\n"));
        code.push_str(&format!("{pad}val filename: String,\n"));
        code.push_str(&format!("{pad}val parameterCount: Int,\n"));
        code.push_str(&format!("{pad}private val values: Map<String, String>,\n"));
        code.push_str(") {\n");

        for case in cases {
            code.push_str(&format!("{pad}{}(\n", case.identifier));
            code.push_str(&format!(
                "{pad2}\"{}\",\n{pad2}\"{}\",\n{pad2}{},\n",
                escape_kotlin(&case.qualified_key),
                escape_kotlin(&case.filename),
                case.parameters.len()
            ));
            code.push_str(&format!("{pad2}mapOf(\n"));
            for locale in locales.locales() {
                let text = case.literal_text(locale, locales);
                let text = if case.parameters.is_empty() {
                    text
                } else {
                    to_java_format(&text)
                };
                code.push_str(&format!(
                    "{pad3}\"{}\" to \"{}\",\n",
                    escape_kotlin(locale),
                    escape_kotlin(&text)
                ));
            }
            code.push_str(&format!("{pad2}),\n{pad}),\n"));
        }
        code.push_str(&format!("{pad};\n\n"));

        code.push_str(&format!("{pad}val hasParameters: Boolean\n"));
        code.push_str(&format!("{pad2}get() = parameterCount > 0\n\n"));

        code.push_str(&format!(
            "{pad}fun localized(locale: String, vararg args: Any): String {{\n"
        ));
        code.push_str(&format!(
            "{pad2}val resolved = if (locale in SUPPORTED_LOCALES) locale else PRIMARY_LOCALE\n"
        ));
        code.push_str(&format!("{pad2}val text = values[resolved] ?: \"\"\n"));
        code.push_str(&format!(
            "{pad2}return if (parameterCount == 0) text else String.format(text, *args)\n"
        ));
        code.push_str(&format!("{pad}}}\n\n"));

        let supported: Vec<_> = locales
            .locales()
            .iter()
            .map(|l| format!("\"{}\"", escape_kotlin(l)))
            .collect();
        code.push_str(&format!("{pad}companion object {{\n"));
        code.push_str(&format!(
            "{pad2}const val PRIMARY_LOCALE: String = \"{}\"\n",
            escape_kotlin(locales.primary())
        ));
        code.push_str(&format!(
            "{pad2}val SUPPORTED_LOCALES: List<String> = listOf({})\n\n",
            supported.join(", ")
        ));
        code.push_str(&format!(
            "{pad2}private val BY_KEY: Map<String, {ROOT_TYPE}> = entries.associateBy {{ it.key }}\n\n"
        ));
        code.push_str(&format!(
            "{pad2}fun fromKey(key: String): {ROOT_TYPE}? = BY_KEY[key]\n"
        ));
        code.push_str(&format!("{pad}}}\n"));
        code.push_str("}\n");
        code
    }
}
