// FICHIER : src-server/src/json_db/collections/manager.rs

use crate::json_db::storage::{file_storage, StorageEngine};
use crate::utils::json::{json, Map, Value};
use crate::utils::{AppError, AppResult};

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{collection, CREATED_AT, ID_FIELD, UPDATED_AT};

/// Horodatage RFC 3339 UTC à précision fixe (ordre lexical = ordre temporel).
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Debug)]
pub struct CollectionsManager<'a> {
    pub storage: &'a StorageEngine,
    pub space: String,
    pub db: String,
}

impl<'a> CollectionsManager<'a> {
    pub fn new(storage: &'a StorageEngine, space: &str, db: &str) -> Self {
        Self {
            storage,
            space: space.to_string(),
            db: db.to_string(),
        }
    }

    pub async fn init_db(&self) -> AppResult<()> {
        file_storage::create_db(&self.storage.config, &self.space, &self.db).await
    }

    pub async fn open_db(&self) -> AppResult<()> {
        file_storage::open_db(&self.storage.config, &self.space, &self.db).await
    }

    pub async fn drop_db(&self, mode: file_storage::DropMode) -> AppResult<()> {
        file_storage::drop_db(&self.storage.config, &self.space, &self.db, mode).await?;
        self.storage.forget_db(&self.space, &self.db);
        Ok(())
    }

    // --- MÉTHODES DE LECTURE ---

    pub async fn get_document(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        self.storage
            .read_document(&self.space, &self.db, collection, id)
            .await
    }

    /// Récupère plusieurs documents dans l'ordre des identifiants fournis.
    /// Mode STRICT : un identifiant sans document est une erreur.
    pub async fn read_many(&self, collection: &str, ids: &[String]) -> AppResult<Vec<Value>> {
        let mut docs = Vec::with_capacity(ids.len());
        for id in ids {
            match self.get_document(collection, id).await? {
                Some(doc) => docs.push(doc),
                None => {
                    return Err(AppError::NotFound(format!(
                        "Document '{}' introuvable dans '{}'",
                        id, collection
                    )))
                }
            }
        }
        Ok(docs)
    }

    pub async fn list_all(&self, collection: &str) -> AppResult<Vec<Value>> {
        let ids =
            collection::list_document_ids(&self.storage.config, &self.space, &self.db, collection)
                .await?;
        let mut docs = Vec::with_capacity(ids.len());
        for id in ids {
            // Un document supprimé entre le listing et la lecture est ignoré.
            if let Some(doc) = self.get_document(collection, &id).await? {
                docs.push(doc);
            }
        }
        Ok(docs)
    }

    pub async fn list_collections(&self) -> AppResult<Vec<String>> {
        collection::list_collection_names(&self.storage.config, &self.space, &self.db).await
    }

    // --- GESTION DES COLLECTIONS ---

    pub async fn create_collection(&self, name: &str) -> AppResult<()> {
        collection::create_collection_if_missing(&self.storage.config, &self.space, &self.db, name)
            .await
    }

    pub async fn drop_collection(&self, name: &str) -> AppResult<bool> {
        let dropped =
            collection::drop_collection(&self.storage.config, &self.space, &self.db, name).await?;
        self.storage.forget_collection(&self.space, &self.db, name);
        if dropped {
            info!("Collection '{}' supprimée", name);
        }
        Ok(dropped)
    }

    // --- ÉCRITURE ---

    /// Insère un document : attribue `id` s'il est absent, puis
    /// `createdAt` / `updatedAt`.
    #[instrument(skip(self, doc))]
    pub async fn insert_document(&self, collection: &str, doc: Value) -> AppResult<Value> {
        let mut obj = into_object(doc)?;
        let id = match obj.get(ID_FIELD).and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                obj.insert(ID_FIELD.to_string(), Value::String(id.clone()));
                id
            }
        };

        if self.get_document(collection, &id).await?.is_some() {
            return Err(AppError::Database(format!(
                "Le document '{}' existe déjà dans '{}'",
                id, collection
            )));
        }

        let now = now_timestamp();
        obj.insert(CREATED_AT.to_string(), Value::String(now.clone()));
        obj.insert(UPDATED_AT.to_string(), Value::String(now));

        let doc = Value::Object(obj);
        self.storage
            .write_document(&self.space, &self.db, collection, &id, &doc)
            .await?;
        debug!("inséré {}/{}", collection, id);
        Ok(doc)
    }

    /// Remplace le contenu d'un document existant. `id` et `createdAt` sont
    /// conservés, `updatedAt` est rafraîchi.
    #[instrument(skip(self, doc))]
    pub async fn update_document(&self, collection: &str, id: &str, doc: Value) -> AppResult<Value> {
        let old = self.require_document(collection, id).await?;
        let mut obj = into_object(doc)?;

        obj.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        let created = old
            .get(CREATED_AT)
            .cloned()
            .unwrap_or_else(|| Value::String(now_timestamp()));
        obj.insert(CREATED_AT.to_string(), created);
        obj.insert(UPDATED_AT.to_string(), Value::String(now_timestamp()));

        let doc = Value::Object(obj);
        self.storage
            .write_document(&self.space, &self.db, collection, id, &doc)
            .await?;
        Ok(doc)
    }

    /// `true` si le document existait.
    #[instrument(skip(self))]
    pub async fn delete_document(&self, collection: &str, id: &str) -> AppResult<bool> {
        self.storage
            .delete_document(&self.space, &self.db, collection, id)
            .await
    }

    /// Replace-all-and-set : vide le champ de références puis le positionne
    /// exactement sur `ids`, dans l'ordre fourni. Une seule réécriture
    /// atomique du document.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn set_references(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        ids: &[String],
    ) -> AppResult<Value> {
        let doc = self.require_document(collection, id).await?;
        let mut obj = into_object(doc)?;

        obj.insert(field.to_string(), json!(ids));
        obj.insert(UPDATED_AT.to_string(), Value::String(now_timestamp()));

        let doc = Value::Object(obj);
        self.storage
            .write_document(&self.space, &self.db, collection, id, &doc)
            .await?;
        Ok(doc)
    }

    async fn require_document(&self, collection: &str, id: &str) -> AppResult<Value> {
        self.get_document(collection, id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Document '{}' introuvable dans '{}'", id, collection))
        })
    }
}

fn into_object(doc: Value) -> AppResult<Map<String, Value>> {
    match doc {
        Value::Object(obj) => Ok(obj),
        other => Err(AppError::Database(format!(
            "Un document doit être un objet JSON (reçu : {})",
            crate::utils::json::type_name(&other)
        ))),
    }
}
