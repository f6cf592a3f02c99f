// FICHIER : src-server/src/model_engine/antiphona.rs

use super::fields::{Fields, JsonField, UrlField};
use super::{reject_unknown_fields, Model};
use crate::utils::json::{json, Value};
use crate::utils::{AppResult, FieldErrors};
use crate::validators::{FieldValue, ValidationError, ValidationPipeline};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub use crate::validators::VALID_LANGUAGES;

/// Antienne : texte multilingue (code langue → texte) et lien externe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Antiphona {
    pub id: String,
    pub text: BTreeMap<String, String>,
    pub link: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

static TEXT_FIELD: OnceLock<JsonField> = OnceLock::new();

pub fn text_field() -> &'static JsonField {
    TEXT_FIELD.get_or_init(|| JsonField::new("text", ValidationPipeline::language_text()))
}

pub fn link_field() -> UrlField {
    UrlField::new("link")
}

fn clean_text(value: &FieldValue) -> Result<BTreeMap<String, String>, ValidationError> {
    let stored = text_field().to_storage(value)?;
    serde_json::from_value(stored).map_err(|e| ValidationError::new(e.to_string()))
}

impl Model for Antiphona {
    const COLLECTION: &'static str = "antiphonas";
    const FIELD_NAMES: &'static [&'static str] = &["text", "link"];

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn from_fields(id: &str, fields: &Fields, base: Option<&Self>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        reject_unknown_fields(fields, Self::FIELD_NAMES, &mut errors);

        let text = match fields.get("text") {
            Some(value) => clean_text(value).unwrap_or_else(|e| {
                errors.add("text", e.message);
                BTreeMap::new()
            }),
            None => base.map(|b| b.text.clone()).unwrap_or_default(),
        };

        let link = match fields.get("link") {
            Some(value) => link_field().clean(value).unwrap_or_else(|e| {
                errors.add("link", e.message);
                String::new()
            }),
            None => base.map(|b| b.link.clone()).unwrap_or_default(),
        };

        errors.into_result()?;
        Ok(Self {
            id: id.to_string(),
            text,
            link,
            created_at: base.map(|b| b.created_at.clone()).unwrap_or_default(),
            updated_at: base.map(|b| b.updated_at.clone()).unwrap_or_default(),
        })
    }

    fn to_document(&self) -> AppResult<Value> {
        Ok(json!({
            "id": self.id,
            "text": self.text,
            "link": self.link,
        }))
    }

    fn stamp(&mut self, created_at: String, updated_at: String) {
        self.created_at = created_at;
        self.updated_at = updated_at;
    }
}
