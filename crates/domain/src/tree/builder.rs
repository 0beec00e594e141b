//! Section tree builder.
//!
//! Turns the flat records of a [`ContentSnapshot`] into a [`SectionTree`].
//! Roots are the sections no other section lists as a child. Sections that
//! are not reachable from any root are promoted to roots so nothing is
//! dropped silently. Cycle edges are pruned and reported, never followed.
//! Every section is expanded at most once, so the tree never holds more
//! sections than the snapshot has records.

use std::collections::{HashMap, HashSet};

use crate::entry::Entry;
use crate::error::{DomainError, DomainResult};
use crate::record::{ContentSnapshot, RawEntryRecord, RawSectionRecord};
use crate::section::Section;
use crate::warning::{StructuralWarning, WarningKind};

use super::{BuildOutcome, SectionTree};

/// Builds the section tree for a snapshot.
///
/// # Errors
///
/// Returns [`DomainError::MalformedRecord`] when a section or entry record has
/// no `id` or no `key`. Unresolved references and cycles are warnings.
pub fn build_section_tree(snapshot: &ContentSnapshot) -> DomainResult<BuildOutcome> {
    validate(snapshot)?;

    let mut resolver = Resolver::index(snapshot);
    let mut roots = Vec::new();

    let order = resolver.order.clone();
    let referenced: HashSet<&str> = order
        .iter()
        .copied()
        .flat_map(RawSectionRecord::subsection_refs)
        .map(String::as_str)
        .collect();

    for record in order
        .iter()
        .copied()
        .filter(|s| !referenced.contains(required(&s.id)))
    {
        resolver.push_root(record, &mut roots);
    }

    for record in order.iter().copied() {
        let id = required(&record.id);
        if resolver.visited.contains(id) || resolver.skipped.contains(id) {
            continue;
        }
        if resolver.push_root(record, &mut roots) {
            resolver.warn(
                required(&record.key),
                WarningKind::PromotedRoot,
                format!("section {id} is not reachable from any root; promoted to root"),
            );
        }
    }

    Ok(BuildOutcome {
        tree: SectionTree::new(roots),
        warnings: resolver.warnings,
    })
}

/// Field checked by [`validate`]; empty only if validation was skipped.
fn required(field: &Option<String>) -> &str {
    field.as_deref().map_or("", str::trim)
}

fn is_blank(field: Option<&String>) -> bool {
    field.is_none_or(|v| v.trim().is_empty())
}

fn validate(snapshot: &ContentSnapshot) -> DomainResult<()> {
    for (position, record) in snapshot.sections.iter().enumerate() {
        check_record("section", position, record.id.as_ref(), record.key.as_ref())?;
    }
    for (position, record) in snapshot.entries.iter().enumerate() {
        check_record("entry", position, record.id.as_ref(), record.key.as_ref())?;
    }
    Ok(())
}

fn check_record(
    kind: &str,
    position: usize,
    id: Option<&String>,
    key: Option<&String>,
) -> DomainResult<()> {
    if is_blank(id) {
        return Err(DomainError::malformed(
            format!("{kind} #{position}"),
            format!("{kind} record has no id"),
        ));
    }
    if is_blank(key) {
        let id = id.map_or_else(String::new, |v| v.trim().to_string());
        return Err(DomainError::malformed(id, format!("{kind} record has no key")));
    }
    Ok(())
}

fn to_entry(record: &RawEntryRecord) -> Entry {
    Entry {
        id: required(&record.id).to_string(),
        key: required(&record.key).to_string(),
        original_key: record.original_key.clone(),
        platform_key: record.android_key.clone(),
        line_number: record.line_number,
        values: record.values_by_locale.clone(),
    }
}

struct Resolver<'a> {
    /// Deduplicated section records in upstream order.
    order: Vec<&'a RawSectionRecord>,
    sections: HashMap<&'a str, &'a RawSectionRecord>,
    entries: HashMap<&'a str, Entry>,
    /// Sections already expanded somewhere in the tree.
    visited: HashSet<&'a str>,
    /// Sections dropped for reusing a sibling key.
    skipped: HashSet<&'a str>,
    warnings: Vec<StructuralWarning>,
}

impl<'a> Resolver<'a> {
    fn index(snapshot: &'a ContentSnapshot) -> Self {
        let mut resolver = Self {
            order: Vec::with_capacity(snapshot.sections.len()),
            sections: HashMap::with_capacity(snapshot.sections.len()),
            entries: HashMap::with_capacity(snapshot.entries.len()),
            visited: HashSet::new(),
            skipped: HashSet::new(),
            warnings: Vec::new(),
        };

        for record in &snapshot.entries {
            let id = required(&record.id);
            if resolver.entries.contains_key(id) {
                resolver.warn(
                    required(&record.key),
                    WarningKind::DuplicateId,
                    format!("duplicate entry id {id}; keeping the first record"),
                );
                continue;
            }
            resolver.entries.insert(id, to_entry(record));
        }

        for record in &snapshot.sections {
            let id = required(&record.id);
            if resolver.sections.contains_key(id) {
                resolver.warn(
                    required(&record.key),
                    WarningKind::DuplicateId,
                    format!("duplicate section id {id}; keeping the first record"),
                );
                continue;
            }
            resolver.sections.insert(id, record);
            resolver.order.push(record);
        }

        resolver
    }

    fn warn(&mut self, path: &str, kind: WarningKind, message: String) {
        self.warnings.push(StructuralWarning::new(path, kind, message));
    }

    /// Resolves `record` as a root unless a root already uses its key.
    /// Returns whether it was added.
    fn push_root(&mut self, record: &'a RawSectionRecord, roots: &mut Vec<Section>) -> bool {
        let id = required(&record.id);
        let key = required(&record.key);
        if roots.iter().any(|s| s.key == key) {
            self.skipped.insert(id);
            self.warn(
                key,
                WarningKind::DuplicateSiblingKey,
                format!("root section {id} reuses sibling key {key}; skipped"),
            );
            return false;
        }
        let mut on_path = Vec::new();
        roots.push(self.resolve(record, None, &mut on_path));
        true
    }

    fn resolve(
        &mut self,
        record: &'a RawSectionRecord,
        parent_path: Option<&str>,
        on_path: &mut Vec<&'a str>,
    ) -> Section {
        let id = required(&record.id);
        let key = required(&record.key);
        let path = parent_path.map_or_else(|| key.to_string(), |p| format!("{p}/{key}"));

        on_path.push(id);
        self.visited.insert(id);

        let mut entries = Vec::with_capacity(record.entry_refs().len());
        for entry_id in record.entry_refs() {
            let Some(entry) = self.entries.get(entry_id.as_str()) else {
                self.warn(
                    &path,
                    WarningKind::UnresolvedEntry,
                    format!("entry {entry_id} referenced by section {id} was not found"),
                );
                continue;
            };
            if entries.iter().any(|e: &Entry| e.key == entry.key) {
                let message = format!("entry {entry_id} reuses key {}; skipped", entry.key);
                self.warn(&path, WarningKind::DuplicateEntryKey, message);
                continue;
            }
            entries.push(entry.clone());
        }

        let mut subsections: Vec<Section> = Vec::with_capacity(record.subsection_refs().len());
        for child_id in record.subsection_refs() {
            let child_id = child_id.as_str();
            if on_path.contains(&child_id) {
                self.warn(
                    &path,
                    WarningKind::CycleDetected,
                    format!("section {id} lists ancestor {child_id} as a subsection; edge pruned"),
                );
                continue;
            }
            let Some(child) = self.sections.get(child_id).copied() else {
                self.warn(
                    &path,
                    WarningKind::UnresolvedSection,
                    format!("subsection {child_id} referenced by section {id} was not found"),
                );
                continue;
            };
            if self.visited.contains(child_id) {
                self.warn(
                    &path,
                    WarningKind::SharedSubsection,
                    format!("subsection {child_id} is already placed under another parent; skipped"),
                );
                continue;
            }
            let child_key = required(&child.key);
            if subsections.iter().any(|s| s.key == child_key) {
                self.skipped.insert(child_id);
                self.warn(
                    &path,
                    WarningKind::DuplicateSiblingKey,
                    format!("subsection {child_id} reuses sibling key {child_key}; skipped"),
                );
                continue;
            }
            subsections.push(self.resolve(child, Some(path.as_str()), on_path));
        }

        on_path.pop();

        Section {
            id: id.to_string(),
            title: record
                .title
                .as_deref()
                .map_or_else(|| key.to_string(), str::to_string),
            key: key.to_string(),
            path,
            entries,
            subsections,
        }
    }
}
