// FICHIER : src-server/src/model_engine/mod.rs

// 1. Définitions de champs et contrat des modèles
pub mod fields;

// 2. Modèles métier
pub mod antiphona;
pub mod celebration;
pub mod season;

// 3. Accès aux données
pub mod repository;

use crate::json_db::collections::{CREATED_AT, ID_FIELD, UPDATED_AT};
use crate::utils::json::Value;
use crate::utils::{AppError, AppResult, FieldErrors};
use crate::validators::FieldValue;

// Re-exports
pub use antiphona::Antiphona;
pub use celebration::Celebration;
pub use fields::Fields;
pub use repository::Repository;
pub use season::LiturgicalSeason;

/// Contrat d'un enregistrement persistant.
///
/// `from_fields` effectue la validation complète : chaque champ exécute ses
/// validateurs (fail-fast au sein du champ) et les erreurs sont agrégées par
/// champ. Les champs absents prennent la valeur de `base` (mise à jour
/// partielle) ou leur valeur par défaut.
pub trait Model: Sized + Send + Sync + std::fmt::Debug {
    const COLLECTION: &'static str;
    const FIELD_NAMES: &'static [&'static str];
    const REFERENCE_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> &str;
    fn created_at(&self) -> &str;

    fn from_fields(id: &str, fields: &Fields, base: Option<&Self>) -> Result<Self, FieldErrors>;

    /// Document stocké, sans les horodatages gérés par le moteur.
    fn to_document(&self) -> AppResult<Value>;

    fn stamp(&mut self, created_at: String, updated_at: String);

    fn reference_ids(&self, _field: &str) -> Option<&[String]> {
        None
    }

    fn set_reference_ids(&mut self, field: &str, _ids: Vec<String>) -> AppResult<()> {
        Err(AppError::Database(format!(
            "'{}' n'est pas un champ de références de {}",
            field,
            Self::COLLECTION
        )))
    }

    /// Chemin de lecture : le document repasse par la validation complète.
    fn from_document(doc: &Value) -> AppResult<Self> {
        let obj = doc.as_object().ok_or_else(|| {
            AppError::Database(format!("Document de {} non objet", Self::COLLECTION))
        })?;
        let id = obj.get(ID_FIELD).and_then(Value::as_str).ok_or_else(|| {
            AppError::Database(format!("Document de {} sans identifiant", Self::COLLECTION))
        })?;

        let fields: Fields = obj
            .iter()
            .filter(|(k, _)| ![ID_FIELD, CREATED_AT, UPDATED_AT].contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), FieldValue::from(v.clone())))
            .collect();

        let mut record = Self::from_fields(id, &fields, None).map_err(|errors| {
            AppError::Database(format!(
                "Document {}/{} invalide : {}",
                Self::COLLECTION,
                id,
                errors
            ))
        })?;

        let timestamp = |key: &str| {
            obj.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        record.stamp(timestamp(CREATED_AT), timestamp(UPDATED_AT));
        Ok(record)
    }
}

/// Signale chaque champ soumis qui n'appartient pas au modèle.
pub(crate) fn reject_unknown_fields(fields: &Fields, known: &[&str], errors: &mut FieldErrors) {
    for name in fields.keys() {
        if !known.contains(&name.as_str()) {
            errors.add(name, fields::UNKNOWN_FIELD);
        }
    }
}
