//! Identifier planning shared by the dialect emitters.
//!
//! Planning assigns every section and entry its final identifier before any
//! text is written, so collisions and reserved names are settled in one place
//! and the auxiliary helpers can refer to the same names.

use lexicon_domain::identifier::{check_reserved, to_identifier};
use lexicon_domain::{
    Dialect, DomainResult, Entry, IdentifierCase, IdentifierRole, IdentifierScope, LocaleConfig,
    ParameterKind, Section, SectionTree,
};

/// Name of the top-level generated type in both dialects.
pub const ROOT_TYPE: &str = "Localizations";

/// One entry with its generated identifier.
#[derive(Debug, Clone)]
pub struct PlannedCase<'a> {
    /// The entry.
    pub entry: &'a Entry,
    /// Case or constant name, escaped when needed.
    pub identifier: String,
    /// Fully qualified reference, e.g. `Localizations.Home.welcomeMsg`.
    pub reference: String,
    /// Dotted key path, e.g. `home.banner.title`. Unique across the plan; a
    /// repeated path gets a `_2`, `_3`, ... suffix.
    pub qualified_key: String,
    /// Key of the owning section.
    pub filename: String,
    /// Parameters taken from the reference text.
    pub parameters: Vec<ParameterKind>,
}

impl PlannedCase<'_> {
    /// Text baked into a literal for `locale`. Without parameters the text is
    /// used as is at runtime, so `%%` is unescaped here.
    pub fn literal_text(&self, locale: &str, locales: &LocaleConfig) -> String {
        let text = self.entry.localized(locale, locales);
        if self.parameters.is_empty() {
            text.replace("%%", "%")
        } else {
            text.to_string()
        }
    }
}

/// One nested Swift enum.
#[derive(Debug, Clone)]
pub struct SwiftEnum<'a> {
    /// Type name, escaped when needed.
    pub type_name: String,
    /// The section it was planned from.
    pub section: &'a Section,
    /// Cases in entry order.
    pub cases: Vec<PlannedCase<'a>>,
    /// Nested enums in subsection order.
    pub children: Vec<Self>,
}

impl SwiftEnum<'_> {
    /// Number of cases in this enum and all nested ones.
    pub fn case_count(&self) -> usize {
        self.cases.len() + self.children.iter().map(Self::case_count).sum::<usize>()
    }
}

/// Plans the Swift nested enums for `tree`.
///
/// # Errors
///
/// Returns `ReservedIdentifier` if a section or entry key maps to a name
/// Swift cannot declare.
pub fn plan_swift<'a>(
    tree: &'a SectionTree,
    locales: &LocaleConfig,
) -> DomainResult<Vec<SwiftEnum<'a>>> {
    let mut scope = IdentifierScope::new();
    let mut keys = IdentifierScope::new();
    tree.roots
        .iter()
        .map(|root| plan_swift_enum(root, ROOT_TYPE, &mut scope, &mut keys, &[], locales))
        .collect()
}

fn plan_swift_enum<'a>(
    section: &'a Section,
    parent_reference: &str,
    parent_scope: &mut IdentifierScope,
    keys: &mut IdentifierScope,
    ancestors: &[&str],
    locales: &LocaleConfig,
) -> DomainResult<SwiftEnum<'a>> {
    let base = to_identifier(&section.key, IdentifierCase::UpperCamel);
    let claimed = parent_scope.claim(&base);
    let type_name = check_reserved(claimed, &section.key, Dialect::Swift, IdentifierRole::TypeName)?;
    let reference = format!("{parent_reference}.{type_name}");

    let mut path: Vec<&str> = ancestors.to_vec();
    path.push(&section.key);

    // Cases and nested types share one namespace inside the enum.
    let mut scope = IdentifierScope::new();
    let mut cases = Vec::with_capacity(section.entries.len());
    for entry in &section.entries {
        let base = to_identifier(&entry.key, IdentifierCase::LowerCamel);
        let claimed = scope.claim(&base);
        let identifier =
            check_reserved(claimed, &entry.key, Dialect::Swift, IdentifierRole::CaseName)?;
        cases.push(PlannedCase {
            entry,
            reference: format!("{reference}.{identifier}"),
            identifier,
            qualified_key: keys.claim(&qualified_key(&path, &entry.key)),
            filename: section.key.clone(),
            parameters: entry.parameters(locales),
        });
    }

    let children = section
        .subsections
        .iter()
        .map(|child| plan_swift_enum(child, &reference, &mut scope, keys, &path, locales))
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(SwiftEnum {
        type_name,
        section,
        cases,
        children,
    })
}

/// Flattens planned enums into their cases, depth first.
pub fn flatten_swift<'p, 'a>(enums: &'p [SwiftEnum<'a>]) -> Vec<&'p PlannedCase<'a>> {
    let mut out = Vec::new();
    for item in enums {
        out.extend(item.cases.iter());
        out.extend(flatten_swift(&item.children));
    }
    out
}

/// Plans the flat Kotlin constants for `tree`, depth first.
///
/// # Errors
///
/// Returns `ReservedIdentifier` if a constant name would clash with the
/// generated companion object.
pub fn plan_kotlin<'a>(
    tree: &'a SectionTree,
    locales: &LocaleConfig,
) -> DomainResult<Vec<PlannedCase<'a>>> {
    let mut scopes = KotlinScopes::default();
    let mut cases = Vec::with_capacity(tree.entry_count());
    for root in &tree.roots {
        plan_kotlin_section(root, &[], &mut scopes, locales, &mut cases)?;
    }
    Ok(cases)
}

/// Constant names and lookup keys; both are global in the flat enum.
#[derive(Default)]
struct KotlinScopes {
    constants: IdentifierScope,
    keys: IdentifierScope,
}

fn plan_kotlin_section<'a>(
    section: &'a Section,
    ancestors: &[&str],
    scopes: &mut KotlinScopes,
    locales: &LocaleConfig,
    out: &mut Vec<PlannedCase<'a>>,
) -> DomainResult<()> {
    let mut path: Vec<&str> = ancestors.to_vec();
    path.push(&section.key);

    for entry in &section.entries {
        let raw = format!("{}_{}", path.join("_"), entry.key);
        let base = to_identifier(&raw, IdentifierCase::UpperSnake);
        let claimed = scopes.constants.claim(&base);
        let identifier =
            check_reserved(claimed, &entry.key, Dialect::Kotlin, IdentifierRole::CaseName)?;
        out.push(PlannedCase {
            entry,
            reference: format!("{ROOT_TYPE}.{identifier}"),
            identifier,
            qualified_key: scopes.keys.claim(&qualified_key(&path, &entry.key)),
            filename: section.key.clone(),
            parameters: entry.parameters(locales),
        });
    }
    for child in &section.subsections {
        plan_kotlin_section(child, &path, scopes, locales, out)?;
    }
    Ok(())
}

fn qualified_key(path: &[&str], key: &str) -> String {
    let mut parts = path.to_vec();
    parts.push(key);
    parts.join(".")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lexicon_domain::DomainError;
    use pretty_assertions::assert_eq;

    fn tree() -> SectionTree {
        let mut banner = Section::new("s2", "Banner", "banner");
        banner.path = "home/banner".into();
        banner.entries.push(Entry::new("e2", "title").with_value("en", "Hi %@"));

        let mut home = Section::new("s1", "Home", "home");
        home.entries.push(Entry::new("e1", "welcome_msg").with_value("en", "Welcome"));
        home.entries.push(Entry::new("e3", "welcome-msg").with_value("en", "Welcome!"));
        home.subsections.push(banner);
        SectionTree::new(vec![home])
    }

    #[test]
    fn test_swift_plan_names() {
        let tree = tree();
        let enums = plan_swift(&tree, &LocaleConfig::default()).unwrap();
        assert_eq!(enums[0].type_name, "Home");
        assert_eq!(enums[0].children[0].type_name, "Banner");

        let refs: Vec<_> = flatten_swift(&enums)
            .iter()
            .map(|c| c.reference.clone())
            .collect();
        assert_eq!(
            refs,
            vec![
                "Localizations.Home.welcomeMsg",
                "Localizations.Home.welcomeMsg_2",
                "Localizations.Home.Banner.title",
            ]
        );
        assert_eq!(enums[0].case_count(), 3);
    }

    #[test]
    fn test_kotlin_plan_names() {
        let tree = tree();
        let cases = plan_kotlin(&tree, &LocaleConfig::default()).unwrap();
        let names: Vec<_> = cases.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(
            names,
            vec!["HOME_WELCOME_MSG", "HOME_WELCOME_MSG_2", "HOME_BANNER_TITLE"]
        );
        assert_eq!(cases[2].qualified_key, "home.banner.title");
        assert_eq!(cases[2].filename, "banner");
        assert_eq!(cases[2].parameters, vec![ParameterKind::String]);
    }

    #[test]
    fn test_swift_reserved_case_fails() {
        let mut home = Section::new("s1", "Home", "home");
        home.entries.push(Entry::new("e1", "self"));
        let tree = SectionTree::new(vec![home]);

        let err = plan_swift(&tree, &LocaleConfig::default()).unwrap_err();
        assert!(matches!(err, DomainError::ReservedIdentifier { ref key, .. } if key == "self"));
    }

    #[test]
    fn test_swift_reserved_type_fails() {
        let tree = SectionTree::new(vec![Section::new("s1", "Strings", "string")]);
        assert!(plan_swift(&tree, &LocaleConfig::default()).is_err());
    }

    #[test]
    fn test_type_and_case_share_scope() {
        let mut child = Section::new("s2", "Errors", "404_title");
        child.path = "mail/404_title".into();
        let mut mail = Section::new("s1", "Mail", "mail");
        mail.entries.push(Entry::new("e1", "404_title"));
        mail.subsections.push(child);
        let tree = SectionTree::new(vec![mail]);

        let enums = plan_swift(&tree, &LocaleConfig::default()).unwrap();
        assert_eq!(enums[0].cases[0].identifier, "_404Title");
        assert_eq!(enums[0].children[0].type_name, "_404Title_2");
    }

    fn dotted_key_tree() -> SectionTree {
        let mut banner = Section::new("s2", "Banner", "banner");
        banner.path = "home/banner".into();
        banner.entries.push(Entry::new("e2", "title"));

        let mut home = Section::new("s1", "Home", "home");
        home.entries.push(Entry::new("e1", "banner.title"));
        home.subsections.push(banner);
        SectionTree::new(vec![home])
    }

    #[test]
    fn test_kotlin_lookup_keys_unique() {
        let tree = dotted_key_tree();
        let cases = plan_kotlin(&tree, &LocaleConfig::default()).unwrap();
        let planned: Vec<_> = cases
            .iter()
            .map(|c| (c.identifier.as_str(), c.qualified_key.as_str()))
            .collect();
        assert_eq!(
            planned,
            vec![
                ("HOME_BANNER_TITLE", "home.banner.title"),
                ("HOME_BANNER_TITLE_2", "home.banner.title_2"),
            ]
        );
    }

    #[test]
    fn test_swift_lookup_keys_unique() {
        let tree = dotted_key_tree();
        let enums = plan_swift(&tree, &LocaleConfig::default()).unwrap();
        let keys: Vec<_> = flatten_swift(&enums)
            .iter()
            .map(|c| c.qualified_key.clone())
            .collect();
        assert_eq!(keys, vec!["home.banner.title", "home.banner.title_2"]);
    }
}
