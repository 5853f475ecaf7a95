//! Module and collection name resolution.
//!
//! Resolves the partially-typed name at the cursor against the catalog,
//! honoring the two naming conventions: fully-qualified collection names
//! (`namespace.collection.module`) and bare short names when the FQCN
//! preference is off. A dotted prefix drills down segment by segment; the
//! rendered label is always the full accumulated name so that accepting a
//! candidate yields a syntactically complete token.
//!
//! Ordering is catalog insertion order — ranking is the client's concern.
//! Cross-collection short-name collisions are enumerated, not collapsed:
//! entries share a label but name their source collection in the detail.

use rustc_hash::FxHashSet;

use crate::catalog::CatalogSnapshot;

/// One resolved name ready for assembly into a completion item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub label: String,
    pub detail: Option<String>,
    pub documentation: Option<String>,
}

/// Resolve a typed module-name prefix.
pub fn resolve(typed: &str, use_fqcn: bool, snapshot: &CatalogSnapshot) -> Vec<ResolvedName> {
    let mut out = if typed.contains('.') {
        drill_down(typed, snapshot)
    } else if use_fqcn {
        fqcn_matches(typed, snapshot)
    } else {
        short_name_matches(typed, snapshot)
    };
    dedup(&mut out);
    out
}

/// All FQCNs containing the typed text. A plain prefix counts as a
/// substring, so an empty prefix yields the whole catalog.
fn fqcn_matches(typed: &str, snapshot: &CatalogSnapshot) -> Vec<ResolvedName> {
    snapshot
        .collections()
        .iter()
        .flat_map(|c| c.modules.values())
        .filter(|m| m.fqcn.contains(typed))
        .map(|m| ResolvedName {
            label: m.fqcn.clone(),
            detail: None,
            documentation: m.short_description.clone(),
        })
        .collect()
}

/// All short names starting with the typed text, across built-in modules
/// and every collection. Collisions across collections all surface.
fn short_name_matches(typed: &str, snapshot: &CatalogSnapshot) -> Vec<ResolvedName> {
    snapshot
        .collections()
        .iter()
        .flat_map(|c| c.modules.iter())
        .filter(|(short, _)| short.starts_with(typed))
        .map(|(short, m)| ResolvedName {
            label: short.clone(),
            detail: Some(m.fqcn.clone()),
            documentation: m.short_description.clone(),
        })
        .collect()
}

/// Drill down a dotted prefix: one completed segment addresses a
/// namespace, two address a collection, more address dotted module short
/// names inside a collection. The partial final segment prefix-filters at
/// each boundary; an unknown path yields nothing.
fn drill_down(typed: &str, snapshot: &CatalogSnapshot) -> Vec<ResolvedName> {
    let mut segments: Vec<&str> = typed.split('.').collect();
    // A trailing separator leaves an empty partial, which matches everything.
    let partial = segments.pop().unwrap_or("");
    match segments.as_slice() {
        [namespace] => snapshot
            .collections()
            .iter()
            .filter(|c| c.namespace == *namespace && c.name.starts_with(partial))
            .map(|c| ResolvedName {
                label: format!("{}.{}", c.namespace, c.name),
                detail: None,
                documentation: None,
            })
            .collect(),
        [namespace, collection] => modules_in(snapshot, namespace, collection, partial),
        [namespace, collection, rest @ ..] => {
            let mut prefix = rest.join(".");
            prefix.push('.');
            prefix.push_str(partial);
            modules_in(snapshot, namespace, collection, &prefix)
        }
        [] => Vec::new(),
    }
}

fn modules_in(
    snapshot: &CatalogSnapshot,
    namespace: &str,
    collection: &str,
    short_prefix: &str,
) -> Vec<ResolvedName> {
    snapshot
        .collections()
        .iter()
        .filter(|c| c.namespace == namespace && c.name == collection)
        .flat_map(|c| c.modules.iter())
        .filter(|(short, _)| short.starts_with(short_prefix))
        .map(|(_, m)| ResolvedName {
            label: m.fqcn.clone(),
            detail: None,
            documentation: m.short_description.clone(),
        })
        .collect()
}

/// Collapse identical (label, detail) pairs, keeping first occurrence.
fn dedup(names: &mut Vec<ResolvedName>) {
    let mut seen = FxHashSet::default();
    names.retain(|n| seen.insert((n.label.clone(), n.detail.clone())));
}
