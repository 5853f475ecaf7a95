//! Option tree walking.
//!
//! Descends a module's documented option tree along the dotted path the
//! classifier reconstructed, returning either the child option names at a
//! level (minus siblings already written) or the admissible values of a
//! leaf. The catalog comes from an external collector, so descent is depth
//! bounded and every unresolvable step fails soft to an empty result.

use tracing::warn;

use crate::catalog::{ModuleSpec, OptionSpec, OptionType};

/// Defensive bound against cyclic or degenerate collector output.
const MAX_OPTION_DEPTH: usize = 32;

fn descend<'a>(module: &'a ModuleSpec, path: &[String]) -> Option<&'a OptionSpec> {
    if path.len() > MAX_OPTION_DEPTH {
        warn!(depth = path.len(), fqcn = %module.fqcn, "option path too deep, ignoring");
        return None;
    }
    let mut iter = path.iter();
    let mut node = module.options.get(iter.next()?)?;
    for segment in iter {
        node = node.suboptions.get(segment)?;
    }
    Some(node)
}

/// Child option names at the addressed level, excluding keys already
/// written as siblings in the document. An empty path addresses the
/// module's first option level.
pub fn child_options<'a>(
    module: &'a ModuleSpec,
    path: &[String],
    used: &[String],
) -> Vec<(&'a str, &'a OptionSpec)> {
    let options = if path.is_empty() {
        &module.options
    } else {
        match descend(module, path) {
            // A node with choices is a leaf regardless of what else the
            // collector emitted for it.
            Some(node) if node.choices.is_empty() => &node.suboptions,
            _ => return Vec::new(),
        }
    };
    options
        .iter()
        .filter(|(name, _)| !used.iter().any(|u| u == *name))
        .map(|(name, spec)| (name.as_str(), spec))
        .collect()
}

/// Admissible values of the leaf addressed by `path`.
///
/// Enumerated choices come back in catalog order with the documented
/// default moved to the front — the default need not itself be a member of
/// the choices. A boolean leaf without choices completes to the canonical
/// `false`/`true` pair. A free-form leaf with a documented default offers
/// that default; anything else offers nothing.
pub fn leaf_values(module: &ModuleSpec, path: &[String]) -> Vec<String> {
    let Some(node) = descend(module, path) else {
        return Vec::new();
    };
    if !node.choices.is_empty() {
        return ordered_choices(&node.choices, node.default.as_deref());
    }
    if !node.suboptions.is_empty() {
        return Vec::new();
    }
    if node.option_type == OptionType::Bool {
        return vec!["false".to_string(), "true".to_string()];
    }
    if let Some(default) = &node.default {
        return vec![default.clone()];
    }
    Vec::new()
}

/// Choices in catalog order with the default first; the relative order of
/// the remaining choices is untouched.
pub fn ordered_choices(choices: &[String], default: Option<&str>) -> Vec<String> {
    match default {
        Some(default) => std::iter::once(default.to_string())
            .chain(choices.iter().filter(|c| c.as_str() != default).cloned())
            .collect(),
        None => choices.to_vec(),
    }
}
