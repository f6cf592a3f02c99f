// FICHIER : src-server/src/json_db/storage/file_storage.rs

use crate::json_db::storage::JsonDbConfig;
use crate::utils::fs::{self, Path, PathBuf};
use crate::utils::json::Value;
use crate::utils::{AppError, AppResult};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropMode {
    /// Renomme la base en `{db}.deleted-{timestamp}`.
    Soft,
    /// Supprime l'arborescence.
    Hard,
}

/// Un identifiant de document devient un nom de fichier : pas de séparateur,
/// pas de remontée, pas de fichier caché.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && !id.starts_with('_')
        && !id.contains(['/', '\\', '\0'])
        && !id.contains("..")
}

fn doc_path(
    config: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
    id: &str,
) -> AppResult<PathBuf> {
    if !is_valid_id(id) {
        return Err(AppError::Database(format!(
            "Identifiant de document invalide : '{}'",
            id
        )));
    }
    Ok(config
        .db_collection_path(space, db, collection)
        .join(format!("{}.json", id)))
}

pub async fn open_db(config: &JsonDbConfig, space: &str, db: &str) -> AppResult<()> {
    let db_path = config.db_root(space, db);
    if !fs::exists(&db_path).await {
        return Err(AppError::Database(format!(
            "La base n'existe pas : {}",
            db_path.display()
        )));
    }
    Ok(())
}

/// Crée l'arborescence physique de la base (idempotent).
pub async fn create_db(config: &JsonDbConfig, space: &str, db: &str) -> AppResult<()> {
    let collections_root = config.collections_root(space, db);
    if !fs::exists(&collections_root).await {
        info!("📦 Création de la base {}/{}", space, db);
        fs::ensure_dir(&collections_root).await?;
    }
    Ok(())
}

pub async fn drop_db(config: &JsonDbConfig, space: &str, db: &str, mode: DropMode) -> AppResult<()> {
    let db_path = config.db_root(space, db);
    if !fs::exists(&db_path).await {
        return Ok(());
    }

    match mode {
        DropMode::Hard => fs::remove_dir_all(&db_path).await?,
        DropMode::Soft => {
            let timestamp = chrono::Utc::now().timestamp();
            let parent = db_path.parent().ok_or_else(|| {
                AppError::Database(format!("Base sans dossier parent : {}", db_path.display()))
            })?;
            let new_path = parent.join(format!("{}.deleted-{}", db, timestamp));
            fs::rename(&db_path, &new_path).await?;
        }
    }
    info!("🗑️ Base {}/{} supprimée ({:?})", space, db, mode);
    Ok(())
}

pub async fn write_document(
    config: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
    id: &str,
    doc: &Value,
) -> AppResult<()> {
    let file_path = doc_path(config, space, db, collection, id)?;
    fs::write_json_atomic(&file_path, doc).await?;
    debug!("écrit {}/{}", collection, id);
    Ok(())
}

pub async fn read_document(
    config: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
    id: &str,
) -> AppResult<Option<Value>> {
    // Un identifiant qui ne peut pas être un nom de fichier ne désigne rien.
    if !is_valid_id(id) {
        return Ok(None);
    }
    let file_path = doc_path(config, space, db, collection, id)?;
    match fs::read_json(&file_path).await {
        Ok(doc) => Ok(Some(doc)),
        Err(AppError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Retourne `true` si le document existait.
pub async fn delete_document(
    config: &JsonDbConfig,
    space: &str,
    db: &str,
    collection: &str,
    id: &str,
) -> AppResult<bool> {
    if !is_valid_id(id) {
        return Ok(false);
    }
    let file_path = doc_path(config, space, db, collection, id)?;
    if !fs::exists(&file_path).await {
        return Ok(false);
    }
    fs::remove_file(&file_path).await?;
    Ok(true)
}

/// Écriture atomique sécurisée (write -> sync -> rename).
pub async fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> AppResult<()> {
    fs::write_atomic(path.as_ref(), content).await
}
