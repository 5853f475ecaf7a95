//! Metadata catalog: collections, modules, option trees, inventory.
//!
//! A [`CatalogSnapshot`] is an immutable, point-in-time view built from the
//! documentation collector's output. Requests share snapshots through an
//! `Arc`; a rebuild produces a fresh snapshot with a new version instead of
//! mutating anything in place, so concurrent completions never observe a
//! half-rebuilt catalog.

pub mod collector;
pub mod inventory;
pub mod keywords;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use thiserror::Error;

use self::collector::CollectionDoc;
use self::inventory::InventoryIndex;

/// Namespace and collection of the built-in modules.
pub const BUILTIN_NAMESPACE: &str = "ansible";
pub const BUILTIN_COLLECTION: &str = "builtin";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("documentation collector failed: {0}")]
    Collector(#[source] anyhow::Error),
    #[error("failed to read inventory source {path}: {source}")]
    InventoryRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed inventory source {path}: {source}")]
    InventoryFormat {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Declared type of a module option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionType {
    #[default]
    Str,
    Bool,
    Int,
    Float,
    List,
    Dict,
    Path,
    Raw,
}

impl OptionType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "str" | "string" => Self::Str,
            "bool" | "boolean" => Self::Bool,
            "int" | "integer" => Self::Int,
            "float" => Self::Float,
            "list" => Self::List,
            "dict" | "dictionary" => Self::Dict,
            "path" => Self::Path,
            _ => Self::Raw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::List => "list",
            Self::Dict => "dict",
            Self::Path => "path",
            Self::Raw => "raw",
        }
    }
}

/// One documented option or sub-option of a module.
///
/// Invariant: a node with non-empty `choices` is a leaf. When malformed
/// collector output carries both, `choices` wins and `suboptions` are
/// never offered.
#[derive(Debug, Clone, Default)]
pub struct OptionSpec {
    pub option_type: OptionType,
    pub required: bool,
    pub default: Option<String>,
    pub choices: Vec<String>,
    pub description: Option<String>,
    pub suboptions: IndexMap<String, OptionSpec>,
}

/// A documented module. Option order is documentation order.
#[derive(Debug, Clone)]
pub struct ModuleSpec {
    pub fqcn: String,
    pub short_description: Option<String>,
    pub options: IndexMap<String, OptionSpec>,
}

/// A collection: (namespace, name) plus its modules keyed by short name.
/// Short names may themselves be dotted when modules live in
/// subdirectories of the collection.
#[derive(Debug, Clone)]
pub struct CollectionEntry {
    pub namespace: String,
    pub name: String,
    pub modules: IndexMap<String, ModuleSpec>,
}

impl CollectionEntry {
    pub fn is_builtin(&self) -> bool {
        self.namespace == BUILTIN_NAMESPACE && self.name == BUILTIN_COLLECTION
    }
}

/// Immutable catalog snapshot shared by concurrent requests.
#[derive(Debug)]
pub struct CatalogSnapshot {
    version: u64,
    collections: Vec<CollectionEntry>,
    by_fqcn: FxHashMap<String, (usize, usize)>,
    inventory: InventoryIndex,
}

impl CatalogSnapshot {
    pub fn new(version: u64, docs: Vec<CollectionDoc>, inventory: InventoryIndex) -> Self {
        let collections: Vec<CollectionEntry> =
            docs.into_iter().map(CollectionEntry::from_doc).collect();
        let mut by_fqcn = FxHashMap::default();
        for (ci, collection) in collections.iter().enumerate() {
            for (mi, module) in collection.modules.values().enumerate() {
                by_fqcn.insert(module.fqcn.clone(), (ci, mi));
            }
        }
        Self {
            version,
            collections,
            by_fqcn,
            inventory,
        }
    }

    pub fn empty(version: u64) -> Self {
        Self::new(version, Vec::new(), InventoryIndex::default())
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn collections(&self) -> &[CollectionEntry] {
        &self.collections
    }

    pub fn inventory(&self) -> &InventoryIndex {
        &self.inventory
    }

    /// Resolve a task key to a module.
    ///
    /// A fully-qualified key (including dotted module short names such as
    /// `org_1.coll_5.sub_coll_1.module_1`) is looked up exactly; a bare key
    /// is tried against built-in modules first, then every collection in
    /// catalog order. Binding is independent of the FQCN preference: a
    /// document may use either convention regardless of the toggle.
    pub fn find_module(&self, key: &str) -> Option<&ModuleSpec> {
        if let Some(&(ci, mi)) = self.by_fqcn.get(key) {
            return self.collections[ci].modules.get_index(mi).map(|(_, m)| m);
        }
        if let Some(builtin) = self.collections.iter().find(|c| c.is_builtin()) {
            if let Some(module) = builtin.modules.get(key) {
                return Some(module);
            }
        }
        self.collections
            .iter()
            .filter(|c| !c.is_builtin())
            .find_map(|c| c.modules.get(key))
    }
}

impl CollectionEntry {
    fn from_doc(doc: CollectionDoc) -> Self {
        let namespace = doc.namespace;
        let name = doc.name;
        let modules = doc
            .modules
            .into_iter()
            .map(|m| {
                let fqcn = format!("{namespace}.{name}.{}", m.name);
                (
                    m.name.clone(),
                    ModuleSpec {
                        fqcn,
                        short_description: m.short_description,
                        options: m
                            .options
                            .into_iter()
                            .map(|o| (o.name.clone(), o.into_spec()))
                            .collect(),
                    },
                )
            })
            .collect();
        Self {
            namespace,
            name,
            modules,
        }
    }
}
