//! Workspace context: settings, collaborators, and catalog snapshots.
//!
//! One context exists per workspace root. It owns the per-document
//! settings, the documentation collector and inventory reader, and a cache
//! of immutable catalog snapshots keyed by the settings that affect
//! catalog construction. Rebuilds insert a fresh snapshot; requests that
//! already hold an `Arc` keep reading their point-in-time view.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::catalog::CatalogSnapshot;
use crate::catalog::collector::{DocumentationCollector, InventorySourceReader};
use crate::catalog::inventory::InventoryIndex;
use crate::settings::{CatalogKey, DocumentSettings};

pub struct WorkspaceContext {
    root: Url,
    default_settings: DocumentSettings,
    settings: DashMap<Url, DocumentSettings>,
    collector: Arc<dyn DocumentationCollector>,
    inventory_reader: Arc<dyn InventorySourceReader>,
    snapshots: RwLock<FxHashMap<CatalogKey, Arc<CatalogSnapshot>>>,
    last_good: RwLock<Option<Arc<CatalogSnapshot>>>,
    build_gate: Mutex<()>,
    next_version: AtomicU64,
}

impl WorkspaceContext {
    pub fn new(
        root: Url,
        collector: Arc<dyn DocumentationCollector>,
        inventory_reader: Arc<dyn InventorySourceReader>,
    ) -> Self {
        Self {
            root,
            default_settings: DocumentSettings::default(),
            settings: DashMap::new(),
            collector,
            inventory_reader,
            snapshots: RwLock::new(FxHashMap::default()),
            last_good: RwLock::new(None),
            build_gate: Mutex::new(()),
            next_version: AtomicU64::new(1),
        }
    }

    pub fn with_default_settings(mut self, settings: DocumentSettings) -> Self {
        self.default_settings = settings;
        self
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Settings snapshot for one document; the caller keeps the owned copy
    /// for the whole request.
    pub fn document_settings(&self, uri: &Url) -> DocumentSettings {
        self.settings
            .get(uri)
            .map(|s| s.clone())
            .unwrap_or_else(|| self.default_settings.clone())
    }

    /// Apply a settings mutation and invalidate the snapshots it affects.
    pub fn update_document_settings(
        &self,
        uri: &Url,
        mutate: impl FnOnce(&mut DocumentSettings),
    ) {
        let mut entry = self
            .settings
            .entry(uri.clone())
            .or_insert_with(|| self.default_settings.clone());
        let before = entry.catalog_key();
        mutate(entry.value_mut());
        let after = entry.catalog_key();
        drop(entry);
        if before != after {
            let mut snapshots = self.snapshots.write();
            snapshots.remove(&before);
            snapshots.remove(&after);
            debug!(uri = %uri, "catalog-affecting settings changed, snapshots invalidated");
        }
    }

    /// Drop every cached snapshot; the next request rebuilds lazily.
    pub fn invalidate_catalog(&self) {
        self.snapshots.write().clear();
    }

    /// The catalog snapshot for the given settings, building it on first
    /// use. On collector or reader failure the last good snapshot is
    /// reused when one exists; otherwise `None` and the request degrades
    /// to an empty candidate list.
    pub async fn snapshot(&self, settings: &DocumentSettings) -> Option<Arc<CatalogSnapshot>> {
        let key = settings.catalog_key();
        if let Some(snapshot) = self.snapshots.read().get(&key) {
            return Some(Arc::clone(snapshot));
        }
        let _gate = self.build_gate.lock().await;
        if let Some(snapshot) = self.snapshots.read().get(&key) {
            return Some(Arc::clone(snapshot));
        }
        match self.build(&key).await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.snapshots.write().insert(key, Arc::clone(&snapshot));
                *self.last_good.write() = Some(Arc::clone(&snapshot));
                Some(snapshot)
            }
            Err(error) => {
                warn!(%error, "catalog build failed, falling back to last good snapshot");
                self.last_good.read().clone()
            }
        }
    }

    async fn build(&self, key: &CatalogKey) -> Result<CatalogSnapshot, crate::catalog::CatalogError> {
        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        debug!(
            version,
            ee_enabled = key.ee_enabled,
            "building catalog snapshot"
        );
        let docs = self
            .collector
            .collect(key.ee_enabled, &key.collections_paths)
            .await?;
        let raw_inventory = self.inventory_reader.read(&key.inventory_paths).await?;
        Ok(CatalogSnapshot::new(
            version,
            docs,
            InventoryIndex::from_raw(raw_inventory),
        ))
    }
}

impl std::fmt::Debug for WorkspaceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceContext")
            .field("root", &self.root.as_str())
            .field("documents", &self.settings.len())
            .finish_non_exhaustive()
    }
}

#[allow(dead_code)]
fn _assert_traits() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WorkspaceContext>();
}
