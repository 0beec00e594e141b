//! Code generator entry point.

use lexicon_domain::{
    CodeGenOptions, Dialect, DomainResult, GeneratedCode, GeneratedFile, GenerationMode,
    SectionTree,
};

use super::helpers::{migration_helper, testing_helper};
use super::kotlin::KotlinEmitter;
use super::plan::{PlannedCase, ROOT_TYPE, flatten_swift, plan_kotlin, plan_swift};
use super::swift::SwiftEmitter;

/// Generate enum source for a tree in the configured dialect.
///
/// # Errors
///
/// Returns `ReservedIdentifier` if a key cannot be declared in the dialect.
pub fn generate_code(tree: &SectionTree, options: &CodeGenOptions) -> DomainResult<GeneratedCode> {
    let generator = CodeGenerator::new(options);
    generator.generate(tree)
}

/// Code generator that produces enum sources from section trees.
pub struct CodeGenerator<'a> {
    options: &'a CodeGenOptions,
}

impl<'a> CodeGenerator<'a> {
    /// Create a new code generator with the given options.
    #[must_use]
    pub const fn new(options: &'a CodeGenOptions) -> Self {
        Self { options }
    }

    /// Generate code for the given tree.
    ///
    /// # Errors
    ///
    /// Returns `ReservedIdentifier` if a key cannot be declared in the dialect.
    pub fn generate(&self, tree: &SectionTree) -> DomainResult<GeneratedCode> {
        match self.options.dialect {
            Dialect::Swift => self.generate_swift(tree),
            Dialect::Kotlin => self.generate_kotlin(tree),
        }
    }

    fn generate_swift(&self, tree: &SectionTree) -> DomainResult<GeneratedCode> {
        let enums = plan_swift(tree, &self.options.locales)?;
        let content = SwiftEmitter::new(self.options).emit(&enums);
        let cases = flatten_swift(&enums);
        Ok(self.assemble(content, &cases))
    }

    fn generate_kotlin(&self, tree: &SectionTree) -> DomainResult<GeneratedCode> {
        let planned = plan_kotlin(tree, &self.options.locales)?;
        let content = KotlinEmitter::new(self.options).emit(&planned);
        let cases: Vec<&PlannedCase<'_>> = planned.iter().collect();
        Ok(self.assemble(content, &cases))
    }

    fn assemble(&self, content: String, cases: &[&PlannedCase<'_>]) -> GeneratedCode {
        let dialect = self.options.dialect;
        let primary = GeneratedFile::new(
            format!("{ROOT_TYPE}.{}", dialect.file_extension()),
            dialect.mime_type(),
            content,
        );
        let auxiliary = match self.options.mode {
            GenerationMode::Plain => None,
            GenerationMode::WithTestingHelper => Some(testing_helper(cases, self.options)),
            GenerationMode::WithMigrationHelper => Some(migration_helper(cases, self.options)),
        };
        GeneratedCode {
            dialect,
            primary,
            auxiliary,
            case_count: cases.len(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lexicon_domain::{DomainError, Entry, Section};
    use pretty_assertions::assert_eq;

    fn tree() -> SectionTree {
        let mut banner = Section::new("s2", "Banner", "banner");
        banner.path = "home/banner".into();
        banner.entries.push(Entry::new("e2", "title").with_value("en", "Hi"));
        banner.entries.push(Entry::new("e3", "title ").with_value("en", "Hi again"));

        let mut home = Section::new("s1", "Home", "home");
        home.entries.push(Entry::new("e1", "welcome_msg").with_value("en", "Welcome"));
        home.subsections.push(banner);
        SectionTree::new(vec![home, Section::new("s4", "Empty", "empty")])
    }

    #[test]
    fn test_dialects_report_same_case_count() {
        let tree = tree();
        let swift = generate_code(&tree, &CodeGenOptions::for_dialect(Dialect::Swift)).unwrap();
        let kotlin = generate_code(&tree, &CodeGenOptions::for_dialect(Dialect::Kotlin)).unwrap();
        assert_eq!(swift.case_count, 3);
        assert_eq!(swift.case_count, kotlin.case_count);
    }

    #[test]
    fn test_file_metadata() {
        let code = generate_code(&tree(), &CodeGenOptions::for_dialect(Dialect::Kotlin)).unwrap();
        assert_eq!(code.primary.file_name, "Localizations.kt");
        assert_eq!(code.primary.extension(), "kt");
        assert_eq!(code.primary.mime_type, "text/x-kotlin");
        assert!(code.auxiliary.is_none());
    }

    #[test]
    fn test_mode_selects_auxiliary() {
        let options = CodeGenOptions::for_dialect(Dialect::Swift)
            .with_mode(GenerationMode::WithTestingHelper);
        let code = generate_code(&tree(), &options).unwrap();
        assert_eq!(
            code.auxiliary.map(|f| f.file_name),
            Some("LocalizationsTesting.swift".to_string())
        );

        let options = CodeGenOptions::for_dialect(Dialect::Kotlin)
            .with_mode(GenerationMode::WithMigrationHelper);
        let code = generate_code(&tree(), &options).unwrap();
        assert_eq!(code.files().count(), 2);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let options = CodeGenOptions::for_dialect(Dialect::Swift)
            .with_mode(GenerationMode::WithTestingHelper);
        assert_eq!(
            generate_code(&tree(), &options).unwrap(),
            generate_code(&tree(), &options).unwrap()
        );
    }

    #[test]
    fn test_reserved_identifier_stops_generation() {
        let mut section = Section::new("s1", "Protocol", "protocol");
        section.entries.push(Entry::new("e1", "x"));
        let tree = SectionTree::new(vec![section]);

        let err = generate_code(&tree, &CodeGenOptions::for_dialect(Dialect::Swift)).unwrap_err();
        assert!(matches!(
            err,
            DomainError::ReservedIdentifier { ref key, ref identifier, .. }
                if key == "protocol" && identifier == "Protocol"
        ));
    }
}
