//! Per-document settings consumed by the completion engine.
//!
//! The settings store itself (client round-trips, file watching) lives in
//! the hosting server; this module only models the snapshot a single
//! request works with. Each request reads the settings once and keeps the
//! owned copy for its whole duration, so a toggle arriving mid-request can
//! never split one completion across two configurations.

use std::path::PathBuf;

use serde::Deserialize;

/// Settings for one document URI, deserialized from the client's
/// `workspace/configuration` payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    pub ansible: AnsibleSettings,
    #[serde(rename = "executionEnvironment")]
    pub execution_environment: ExecutionEnvironmentSettings,
    #[serde(rename = "collectionsPaths")]
    pub collections_paths: Vec<PathBuf>,
    #[serde(rename = "inventoryPaths")]
    pub inventory_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnsibleSettings {
    #[serde(rename = "useFullyQualifiedCollectionNames")]
    pub use_fully_qualified_collection_names: bool,
}

impl Default for AnsibleSettings {
    fn default() -> Self {
        Self {
            use_fully_qualified_collection_names: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ExecutionEnvironmentSettings {
    pub enabled: bool,
}

/// The subset of settings that determines which catalog a request sees.
/// Two documents with equal keys share one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogKey {
    pub ee_enabled: bool,
    pub collections_paths: Vec<PathBuf>,
    pub inventory_paths: Vec<PathBuf>,
}

impl DocumentSettings {
    pub fn use_fqcn(&self) -> bool {
        self.ansible.use_fully_qualified_collection_names
    }

    pub fn catalog_key(&self) -> CatalogKey {
        CatalogKey {
            ee_enabled: self.execution_environment.enabled,
            collections_paths: self.collections_paths.clone(),
            inventory_paths: self.inventory_paths.clone(),
        }
    }
}
