//! Collaborator interfaces that feed the catalog.
//!
//! The documentation collector and the inventory source reader are external
//! to this engine: real implementations shell out to the automation
//! toolchain or read an execution environment. The engine only depends on
//! the async traits plus the raw serde document shapes; `StaticCollector`
//! and `StaticInventory` serve embedders and tests, `YamlInventoryReader`
//! parses the YAML inventory format from explicitly configured paths
//! (source discovery belongs to the hosting server).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use super::inventory::RawInventory;
use super::{CatalogError, OptionSpec, OptionType};

/// Raw documentation for one collection, as collected from the toolchain.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionDoc {
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub modules: Vec<ModuleDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDoc {
    pub name: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionDoc {
    pub name: String,
    #[serde(rename = "type", default)]
    pub option_type: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub choices: Vec<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub suboptions: Vec<OptionDoc>,
}

impl OptionDoc {
    pub(crate) fn into_spec(self) -> OptionSpec {
        OptionSpec {
            option_type: self
                .option_type
                .as_deref()
                .map(OptionType::parse)
                .unwrap_or_default(),
            required: self.required,
            default: self.default.as_ref().and_then(scalar_to_string),
            choices: self.choices.iter().filter_map(scalar_to_string).collect(),
            description: self.description,
            suboptions: self
                .suboptions
                .into_iter()
                .map(|o| (o.name.clone(), o.into_spec()))
                .collect(),
        }
    }
}

/// Render a documented scalar the way it would be typed in a playbook.
fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Produces the raw module catalog for one execution context.
#[async_trait]
pub trait DocumentationCollector: Send + Sync {
    async fn collect(
        &self,
        ee_enabled: bool,
        collections_paths: &[PathBuf],
    ) -> Result<Vec<CollectionDoc>, CatalogError>;
}

/// Produces raw group/host adjacency for the configured inventory paths.
#[async_trait]
pub trait InventorySourceReader: Send + Sync {
    async fn read(&self, inventory_paths: &[PathBuf]) -> Result<RawInventory, CatalogError>;
}

/// A collector over a fixed set of collection docs.
#[derive(Debug, Clone, Default)]
pub struct StaticCollector {
    docs: Vec<CollectionDoc>,
}

impl StaticCollector {
    pub fn new(docs: Vec<CollectionDoc>) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl DocumentationCollector for StaticCollector {
    async fn collect(
        &self,
        _ee_enabled: bool,
        _collections_paths: &[PathBuf],
    ) -> Result<Vec<CollectionDoc>, CatalogError> {
        Ok(self.docs.clone())
    }
}

/// An inventory reader over a fixed adjacency.
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
    raw: RawInventory,
}

impl StaticInventory {
    pub fn new(raw: RawInventory) -> Self {
        Self { raw }
    }
}

#[async_trait]
impl InventorySourceReader for StaticInventory {
    async fn read(&self, _inventory_paths: &[PathBuf]) -> Result<RawInventory, CatalogError> {
        Ok(self.raw.clone())
    }
}

/// Reads YAML inventory files from the configured paths.
///
/// Missing files are skipped with a warning — inventory sources routinely
/// point at paths that do not exist yet. Malformed files are errors: the
/// workspace falls back to its last good snapshot.
#[derive(Debug, Clone, Default)]
pub struct YamlInventoryReader;

#[async_trait]
impl InventorySourceReader for YamlInventoryReader {
    async fn read(&self, inventory_paths: &[PathBuf]) -> Result<RawInventory, CatalogError> {
        let mut raw = RawInventory::default();
        for path in inventory_paths {
            let text = match tokio::fs::read_to_string(path).await {
                Ok(text) => text,
                Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                    warn!(path = %path.display(), "inventory source not found, skipping");
                    continue;
                }
                Err(source) => {
                    return Err(CatalogError::InventoryRead {
                        path: path.display().to_string(),
                        source,
                    });
                }
            };
            parse_inventory_yaml(path, &text, &mut raw)?;
        }
        Ok(raw)
    }
}

fn parse_inventory_yaml(
    path: &Path,
    text: &str,
    raw: &mut RawInventory,
) -> Result<(), CatalogError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|source| CatalogError::InventoryFormat {
            path: path.display().to_string(),
            source,
        })?;
    if let serde_yaml::Value::Mapping(groups) = value {
        for (name, node) in &groups {
            if let Some(name) = name.as_str() {
                collect_group(name, node, raw);
            }
        }
    }
    Ok(())
}

fn collect_group(name: &str, node: &serde_yaml::Value, raw: &mut RawInventory) {
    raw.group_mut(name);
    if let Some(serde_yaml::Value::Mapping(hosts)) = node.get("hosts") {
        for (host, _vars) in hosts {
            if let Some(host) = host.as_str() {
                raw.group_mut(name).hosts.push(host.to_string());
            }
        }
    }
    if let Some(serde_yaml::Value::Mapping(children)) = node.get("children") {
        for (child, child_node) in children {
            if let Some(child) = child.as_str() {
                raw.group_mut(name).children.push(child.to_string());
                collect_group(child, child_node, raw);
            }
        }
    }
}
