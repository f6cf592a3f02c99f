// FICHIER : src-server/src/json_db/storage/mod.rs

pub mod cache;
pub mod file_storage;

use crate::utils::fs::PathBuf;
use crate::utils::json::Value;
use crate::utils::AppResult;
use serde::{Deserialize, Serialize};

// --- CONFIGURATION ---

/// Arborescence : `{data_root}/{space}/{db}/collections/{collection}/{id}.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDbConfig {
    pub data_root: PathBuf,
}

impl JsonDbConfig {
    pub fn new(data_root: PathBuf) -> Self {
        Self { data_root }
    }

    pub fn db_root(&self, space: &str, db: &str) -> PathBuf {
        self.data_root.join(space).join(db)
    }

    pub fn collections_root(&self, space: &str, db: &str) -> PathBuf {
        self.db_root(space, db).join("collections")
    }

    pub fn db_collection_path(&self, space: &str, db: &str, collection: &str) -> PathBuf {
        self.collections_root(space, db).join(collection)
    }
}

// --- MOTEUR DE STOCKAGE ---

/// Disque + cache LRU. Clonable : les clones partagent le même cache.
#[derive(Debug, Clone)]
pub struct StorageEngine {
    pub config: JsonDbConfig,
    pub cache: cache::Cache<String, Value>,
}

fn cache_key(space: &str, db: &str, collection: &str, id: &str) -> String {
    format!("{}/{}/{}/{}", space, db, collection, id)
}

impl StorageEngine {
    pub fn new(config: JsonDbConfig) -> Self {
        Self::with_capacity(config, cache::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(config: JsonDbConfig, capacity: usize) -> Self {
        Self {
            config,
            cache: cache::Cache::new(capacity),
        }
    }

    /// Écrit un document (disque atomique puis cache).
    pub async fn write_document(
        &self,
        space: &str,
        db: &str,
        collection: &str,
        id: &str,
        doc: &Value,
    ) -> AppResult<()> {
        file_storage::write_document(&self.config, space, db, collection, id, doc).await?;
        self.cache
            .put(cache_key(space, db, collection, id), doc.clone());
        Ok(())
    }

    /// Lit un document (cache d'abord, sinon disque).
    pub async fn read_document(
        &self,
        space: &str,
        db: &str,
        collection: &str,
        id: &str,
    ) -> AppResult<Option<Value>> {
        let key = cache_key(space, db, collection, id);
        if let Some(doc) = self.cache.get(&key) {
            return Ok(Some(doc));
        }

        let doc_opt = file_storage::read_document(&self.config, space, db, collection, id).await?;
        if let Some(doc) = &doc_opt {
            self.cache.put(key, doc.clone());
        }
        Ok(doc_opt)
    }

    /// Supprime un document ; `true` s'il existait.
    pub async fn delete_document(
        &self,
        space: &str,
        db: &str,
        collection: &str,
        id: &str,
    ) -> AppResult<bool> {
        let existed =
            file_storage::delete_document(&self.config, space, db, collection, id).await?;
        self.cache.remove(&cache_key(space, db, collection, id));
        Ok(existed)
    }

    /// Oublie tout ce qui est en cache pour une collection.
    pub fn forget_collection(&self, space: &str, db: &str, collection: &str) {
        let prefix = format!("{}/{}/{}/", space, db, collection);
        self.cache.remove_matching(|k| k.starts_with(&prefix));
    }

    /// Oublie tout ce qui est en cache pour une base.
    pub fn forget_db(&self, space: &str, db: &str) {
        let prefix = format!("{}/{}/", space, db);
        self.cache.remove_matching(|k| k.starts_with(&prefix));
    }
}
