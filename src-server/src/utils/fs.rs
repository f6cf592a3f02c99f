// FICHIER : src-server/src/utils/fs.rs

use crate::utils::error::{AppError, AppResult};
use crate::utils::json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use uuid::Uuid;

// --- RE-EXPORTS (Isolation de la couche OS) ---
pub use std::path::{Path, PathBuf};
pub use tokio::fs::ReadDir;

/// Crée le dossier (et ses parents) s'il n'existe pas.
pub async fn ensure_dir(path: &Path) -> AppResult<()> {
    if !exists(path).await {
        fs::create_dir_all(path).await?;
    }
    Ok(())
}

pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

pub async fn read_dir(path: &Path) -> AppResult<ReadDir> {
    Ok(fs::read_dir(path).await?)
}

pub async fn remove_file(path: &Path) -> AppResult<()> {
    Ok(fs::remove_file(path).await?)
}

pub async fn remove_dir_all(path: &Path) -> AppResult<()> {
    Ok(fs::remove_dir_all(path).await?)
}

pub async fn rename(from: &Path, to: &Path) -> AppResult<()> {
    Ok(fs::rename(from, to).await?)
}

#[instrument(skip(path), fields(path = ?path))]
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    if !exists(path).await {
        return Err(AppError::NotFound(format!(
            "Fichier JSON introuvable : {}",
            path.to_string_lossy()
        )));
    }
    let content = fs::read_to_string(path).await?;
    json::parse(&content)
}

// --- ÉCRITURE ATOMIQUE ---

/// Écriture atomique sécurisée (write -> sync -> rename).
/// Le fichier temporaire est unique par écriture : deux requêtes concurrentes
/// sur le même document ne se marchent pas dessus, la dernière gagne.
#[instrument(skip(content, path), fields(path = ?path))]
pub async fn write_atomic(path: &Path, content: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    let tmp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
    {
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(content).await?;
        file.sync_all().await?;
    }

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(AppError::Io(e));
    }
    Ok(())
}

pub async fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let content = json::stringify_pretty(value)?;
    write_atomic(path, content.as_bytes()).await
}
