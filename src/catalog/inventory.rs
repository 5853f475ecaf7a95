//! Inventory index: groups, hosts, and the reserved pseudo-groups.
//!
//! Built from the raw group/host adjacency an inventory source reader
//! produces. Candidate order is fixed: `all`, defined groups in inventory
//! order, `ungrouped`, then hosts in inventory order. Groups are offered
//! as themselves — membership expansion is not a completion concern.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// Reserved pseudo-group naming every host.
pub const ALL_GROUP: &str = "all";
/// Reserved pseudo-group for hosts outside any defined group.
pub const UNGROUPED: &str = "ungrouped";

/// Raw adjacency as produced by an inventory source reader.
#[derive(Debug, Clone, Default)]
pub struct RawInventory {
    pub groups: IndexMap<String, RawGroup>,
}

#[derive(Debug, Clone, Default)]
pub struct RawGroup {
    pub hosts: Vec<String>,
    pub children: Vec<String>,
}

impl RawInventory {
    pub fn group_mut(&mut self, name: &str) -> &mut RawGroup {
        self.groups.entry(name.to_string()).or_default()
    }
}

/// Members of one defined group.
#[derive(Debug, Clone, Default)]
pub struct GroupMembers {
    pub hosts: Vec<String>,
    pub children: Vec<String>,
}

#[derive(Debug, Default)]
pub struct InventoryIndex {
    groups: IndexMap<String, GroupMembers>,
    hosts: Vec<String>,
}

impl InventoryIndex {
    pub fn from_raw(raw: RawInventory) -> Self {
        let mut groups: IndexMap<String, GroupMembers> = IndexMap::new();
        let mut hosts = Vec::new();
        let mut seen = FxHashSet::default();
        for (name, group) in raw.groups {
            if name != ALL_GROUP && name != UNGROUPED {
                let entry = groups.entry(name).or_default();
                entry.hosts.extend(group.hosts.iter().cloned());
                entry.children.extend(group.children.iter().cloned());
            }
            for host in group.hosts {
                if seen.insert(host.clone()) {
                    hosts.push(host);
                }
            }
        }
        Self { groups, hosts }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.hosts.is_empty()
    }

    /// Defined groups in inventory order, pseudo-groups excluded.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &GroupMembers)> {
        self.groups.iter().map(|(n, g)| (n.as_str(), g))
    }

    /// All known hosts in inventory order.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }

    /// Every completable identifier in candidate order.
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(ALL_GROUP)
            .chain(self.groups.keys().map(String::as_str))
            .chain(std::iter::once(UNGROUPED))
            .chain(self.hosts())
    }
}
