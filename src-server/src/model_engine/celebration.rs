// FICHIER : src-server/src/model_engine/celebration.rs

use super::fields::{CharField, Fields, ReferenceListField};
use super::season::LiturgicalSeason;
use super::{reject_unknown_fields, Model};
use crate::utils::json::{json, Value};
use crate::utils::{AppError, AppResult, FieldErrors};
use crate::validators::FieldValue;
use serde::{Deserialize, Serialize};

pub const SEASON_FIELD: CharField =
    CharField::new("liturgical_season", 9).with_choices(&LiturgicalSeason::VALUES);
pub const NAME_FIELD: CharField = CharField::new("name", 40);
pub const ANTIPHONAS_FIELD: ReferenceListField = ReferenceListField::new("antiphonas", "antiphonas");

/// Célébration : un temps liturgique, un nom et une liste ordonnée de
/// références (non propriétaires) vers des antiennes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebration {
    pub id: String,
    pub liturgical_season: LiturgicalSeason,
    pub name: String,
    pub antiphonas: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl Model for Celebration {
    const COLLECTION: &'static str = "celebrations";
    const FIELD_NAMES: &'static [&'static str] = &["liturgical_season", "name", "antiphonas"];
    const REFERENCE_FIELDS: &'static [&'static str] = &["antiphonas"];

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn from_fields(id: &str, fields: &Fields, base: Option<&Self>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        reject_unknown_fields(fields, Self::FIELD_NAMES, &mut errors);

        // Champ absent sans base : chaîne vide, donc erreur "blank".
        let blank = FieldValue::str("");

        let season = match (fields.get(SEASON_FIELD.name), base) {
            (None, Some(b)) => Some(b.liturgical_season),
            (value, _) => match SEASON_FIELD.clean(value.unwrap_or(&blank)) {
                Ok(s) => s.parse::<LiturgicalSeason>().ok(),
                Err(e) => {
                    errors.add(SEASON_FIELD.name, e.message);
                    None
                }
            },
        };

        let name = match (fields.get(NAME_FIELD.name), base) {
            (None, Some(b)) => b.name.clone(),
            (value, _) => NAME_FIELD.clean(value.unwrap_or(&blank)).unwrap_or_else(|e| {
                errors.add(NAME_FIELD.name, e.message);
                String::new()
            }),
        };

        let antiphonas = match fields.get(ANTIPHONAS_FIELD.name) {
            Some(value) => ANTIPHONAS_FIELD.clean(value).unwrap_or_else(|e| {
                errors.add(ANTIPHONAS_FIELD.name, e.message);
                Vec::new()
            }),
            None => base.map(|b| b.antiphonas.clone()).unwrap_or_default(),
        };

        errors.into_result()?;
        let liturgical_season = season.ok_or_else(|| {
            FieldErrors::single(SEASON_FIELD.name, "This field cannot be blank.")
        })?;

        Ok(Self {
            id: id.to_string(),
            liturgical_season,
            name,
            antiphonas,
            created_at: base.map(|b| b.created_at.clone()).unwrap_or_default(),
            updated_at: base.map(|b| b.updated_at.clone()).unwrap_or_default(),
        })
    }

    fn to_document(&self) -> AppResult<Value> {
        Ok(json!({
            "id": self.id,
            "liturgical_season": self.liturgical_season.as_str(),
            "name": self.name,
            "antiphonas": self.antiphonas,
        }))
    }

    fn stamp(&mut self, created_at: String, updated_at: String) {
        self.created_at = created_at;
        self.updated_at = updated_at;
    }

    fn reference_ids(&self, field: &str) -> Option<&[String]> {
        (field == ANTIPHONAS_FIELD.name).then_some(self.antiphonas.as_slice())
    }

    fn set_reference_ids(&mut self, field: &str, ids: Vec<String>) -> AppResult<()> {
        if field != ANTIPHONAS_FIELD.name {
            return Err(AppError::Database(format!(
                "'{}' n'est pas un champ de références de {}",
                field,
                Self::COLLECTION
            )));
        }
        self.antiphonas = ids;
        Ok(())
    }
}
