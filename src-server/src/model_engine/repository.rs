// FICHIER : src-server/src/model_engine/repository.rs

use super::fields::{clean_reference_ids, Fields};
use super::{Antiphona, Celebration, Model};
use crate::json_db::collections::CollectionsManager;
use crate::json_db::storage::StorageEngine;
use crate::utils::{AppError, AppResult, FieldErrors};

use std::marker::PhantomData;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Accès typé à la collection d'un modèle.
#[derive(Debug)]
pub struct Repository<'a, M: Model> {
    pub manager: CollectionsManager<'a>,
    _model: PhantomData<fn() -> M>,
}

/// Références soumises, déjà validées dans leur forme.
type References = Vec<(String, Vec<String>)>;

impl<'a, M: Model> Repository<'a, M> {
    // --- CONSTRUCTEURS ---

    pub fn new(storage: &'a StorageEngine, space: &str, db: &str) -> Self {
        Self::from_manager(CollectionsManager::new(storage, space, db))
    }

    pub fn from_manager(manager: CollectionsManager<'a>) -> Self {
        Self {
            manager,
            _model: PhantomData,
        }
    }

    // --- LECTURE ---

    pub async fn get(&self, id: &str) -> AppResult<Option<M>> {
        match self.manager.get_document(M::COLLECTION, id).await? {
            Some(doc) => Ok(Some(M::from_document(&doc)?)),
            None => Ok(None),
        }
    }

    pub async fn exists(&self, id: &str) -> AppResult<bool> {
        Ok(self.manager.get_document(M::COLLECTION, id).await?.is_some())
    }

    /// Enregistrements dans l'ordre des identifiants ; les identifiants sans
    /// document sont ignorés.
    pub async fn get_many(&self, ids: &[String]) -> AppResult<Vec<M>> {
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            match self.get(id).await? {
                Some(record) => out.push(record),
                None => debug!("{}/{} absent, ignoré", M::COLLECTION, id),
            }
        }
        Ok(out)
    }

    /// Tous les enregistrements, par date de création puis identifiant.
    pub async fn all(&self) -> AppResult<Vec<M>> {
        let mut records = self
            .manager
            .list_all(M::COLLECTION)
            .await?
            .iter()
            .map(M::from_document)
            .collect::<AppResult<Vec<M>>>()?;
        records.sort_by(|a, b| {
            a.created_at()
                .cmp(b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(records)
    }

    // --- ÉCRITURE ---

    /// Crée un enregistrement. Les champs de références sont séparés des
    /// champs scalaires et attachés après l'insertion.
    #[instrument(skip(self, fields), fields(collection = M::COLLECTION))]
    pub async fn create(&self, fields: Fields) -> AppResult<M> {
        let (scalars, references) = self.partition(fields, None)?;

        let mut references = references.into_iter();
        let Some((field, ids)) = references.next() else {
            return self.insert(&scalars).await;
        };

        let mut record = self.create_with_references(scalars, &field, ids).await?;
        for (field, ids) in references {
            self.manager
                .set_references(M::COLLECTION, record.id(), &field, &ids)
                .await?;
            record = self.require(record.id()).await?;
        }
        Ok(record)
    }

    /// Création en deux phases :
    /// 1. validation et insertion des seuls champs scalaires ;
    /// 2. replace-all-and-set des références, dans l'ordre fourni.
    ///
    /// Un échec en (1) ne laisse rien. Un échec en (2) laisse l'enregistrement
    /// sans ses références : la base n'offre pas de transaction
    /// multi-documents.
    #[instrument(skip(self, scalar_fields, reference_ids), fields(collection = M::COLLECTION, count = reference_ids.len()))]
    pub async fn create_with_references(
        &self,
        scalar_fields: Fields,
        reference_field: &str,
        reference_ids: Vec<String>,
    ) -> AppResult<M> {
        if !M::REFERENCE_FIELDS.contains(&reference_field) {
            return Err(AppError::Database(format!(
                "'{}' n'est pas un champ de références de {}",
                reference_field,
                M::COLLECTION
            )));
        }

        let record = self.insert(&scalar_fields).await?;

        if let Err(e) = self
            .manager
            .set_references(M::COLLECTION, record.id(), reference_field, &reference_ids)
            .await
        {
            warn!(
                "{}/{} créé sans ses références '{}' : {}",
                M::COLLECTION,
                record.id(),
                reference_field,
                e
            );
            return Err(e);
        }

        self.require(record.id()).await
    }

    /// PUT (`partial = false`) : les champs absents reprennent leur valeur
    /// par défaut. PATCH (`partial = true`) : ils gardent leur valeur.
    /// Les références ne sont remplacées que si elles sont fournies.
    #[instrument(skip(self, fields), fields(collection = M::COLLECTION))]
    pub async fn update(&self, id: &str, fields: Fields, partial: bool) -> AppResult<M> {
        let existing = self.require(id).await?;
        let base = partial.then_some(&existing);
        let (scalars, references) = self.partition(fields, base)?;

        let mut record = M::from_fields(id, &scalars, base)?;
        for field in M::REFERENCE_FIELDS {
            if let Some(ids) = existing.reference_ids(field) {
                record.set_reference_ids(field, ids.to_vec())?;
            }
        }

        self.manager
            .update_document(M::COLLECTION, id, record.to_document()?)
            .await?;
        for (field, ids) in &references {
            self.manager
                .set_references(M::COLLECTION, id, field, ids)
                .await?;
        }
        info!("{}/{} mis à jour", M::COLLECTION, id);
        self.require(id).await
    }

    /// `true` si l'enregistrement existait. Aucune cascade : les références
    /// qui le désignaient restent en place.
    #[instrument(skip(self), fields(collection = M::COLLECTION))]
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.manager.delete_document(M::COLLECTION, id).await
    }

    // --- INTERNES ---

    async fn insert(&self, fields: &Fields) -> AppResult<M> {
        let id = Uuid::new_v4().to_string();
        let record = M::from_fields(&id, fields, None)?;
        let stored = self
            .manager
            .insert_document(M::COLLECTION, record.to_document()?)
            .await?;
        info!("{}/{} créé", M::COLLECTION, id);
        M::from_document(&stored)
    }

    async fn require(&self, id: &str) -> AppResult<M> {
        self.get(id).await?.ok_or_else(|| {
            AppError::NotFound(format!("{}/{} introuvable", M::COLLECTION, id))
        })
    }

    /// Sépare références et scalaires. Une référence mal formée est
    /// signalée avec les erreurs des scalaires, en un seul lot.
    fn partition(&self, fields: Fields, base: Option<&M>) -> AppResult<(Fields, References)> {
        let (reference_fields, scalars): (Fields, Fields) = fields
            .into_iter()
            .partition(|(name, _)| M::REFERENCE_FIELDS.contains(&name.as_str()));

        let mut errors = FieldErrors::new();
        let mut references = Vec::with_capacity(reference_fields.len());
        for (name, value) in reference_fields {
            match clean_reference_ids(&value) {
                Ok(ids) => references.push((name, ids)),
                Err(e) => errors.add(&name, e.message),
            }
        }

        if !errors.is_empty() {
            if let Err(scalar_errors) = M::from_fields("", &scalars, base) {
                errors.extend(scalar_errors);
            }
            return Err(errors.into());
        }
        Ok((scalars, references))
    }
}

impl<'a> Repository<'a, Celebration> {
    /// Antiennes désignées par `ids`, dans l'ordre ; les références
    /// pendantes sont ignorées.
    pub async fn resolve_references(&self, ids: &[String]) -> AppResult<Vec<Antiphona>> {
        Repository::<Antiphona>::new(self.manager.storage, &self.manager.space, &self.manager.db)
            .get_many(ids)
            .await
    }
}
