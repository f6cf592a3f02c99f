// FICHIER : src-server/src/json_db/collections/collection.rs

//! Primitives collections : dossiers et inventaire des fichiers JSON d'une
//! collection. Pas de validation ici, uniquement persistance et I/O.

use crate::json_db::storage::JsonDbConfig;
use crate::utils::fs::{self, PathBuf};
use crate::utils::AppResult;

/// Racine des collections : {db_root}/collections/{collection}
pub fn collection_root(cfg: &JsonDbConfig, space: &str, db: &str, collection: &str) -> PathBuf {
    cfg.db_collection_path(space, db, collection)
}

/// S'assure que la collection existe (création récursive).
pub async fn create_collection_if_missing(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
) -> AppResult<()> {
    fs::ensure_dir(&collection_root(cfg, space, db, collection)).await
}

pub async fn drop_collection(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
) -> AppResult<bool> {
    let root = collection_root(cfg, space, db, collection);
    if !fs::exists(&root).await {
        return Ok(false);
    }
    fs::remove_dir_all(&root).await?;
    Ok(true)
}

/// Identifiants des documents (noms de fichiers `*.json` hors `_*`), triés.
pub async fn list_document_ids(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
) -> AppResult<Vec<String>> {
    let root = collection_root(cfg, space, db, collection);
    let mut out = Vec::new();
    if !fs::exists(&root).await {
        return Ok(out);
    }
    let mut entries = fs::read_dir(&root).await?;
    while let Some(e) = entries.next_entry().await? {
        let p = e.path();
        if !e.file_type().await?.is_file() {
            continue;
        }
        if p.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = p.file_stem().and_then(|s| s.to_str()) {
            // Les fichiers temporaires d'écriture atomique ont une double extension.
            if !stem.starts_with('_') && !stem.contains('.') {
                out.push(stem.to_string());
            }
        }
    }
    out.sort();
    Ok(out)
}

pub async fn list_collection_names(
    cfg: &JsonDbConfig,
    space: &str,
    db: &str,
) -> AppResult<Vec<String>> {
    let root = cfg.collections_root(space, db);
    let mut out = Vec::new();
    if !fs::exists(&root).await {
        return Ok(out);
    }
    let mut entries = fs::read_dir(&root).await?;
    while let Some(e) = entries.next_entry().await? {
        if e.file_type().await?.is_dir() {
            if let Ok(name) = e.file_name().into_string() {
                out.push(name);
            }
        }
    }
    out.sort();
    Ok(out)
}
