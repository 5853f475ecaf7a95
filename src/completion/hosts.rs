//! Host value resolution for `hosts:` fields.
//!
//! Prefix match over the raw identifiers in the inventory index — no case
//! folding, no pattern syntax. Groups are offered as themselves; expanding
//! a group into members is not a completion concern.

use crate::catalog::inventory::InventoryIndex;

/// Candidates for a `hosts:` value: the reserved `all` pseudo-group,
/// defined groups, `ungrouped`, then hosts, each prefix-matched against
/// the typed text.
pub fn resolve_hosts(inventory: &InventoryIndex, prefix: &str) -> Vec<String> {
    inventory
        .candidates()
        .filter(|candidate| candidate.starts_with(prefix))
        .map(str::to_string)
        .collect()
}
