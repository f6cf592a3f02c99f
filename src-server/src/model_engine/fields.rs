// FICHIER : src-server/src/model_engine/fields.rs

//! Définitions de champs : chaque champ porte ses validateurs et les exécute
//! explicitement sur les chemins d'écriture (`to_storage` / `clean`) et de
//! lecture (`from_storage`).

use crate::utils::json::Value;
use crate::validators::url::INVALID_URL;
use crate::validators::{FieldValue, UrlValidator, ValidationError, ValidationPipeline};
use std::collections::BTreeMap;

/// Valeurs soumises pour un enregistrement, par nom de champ.
pub type Fields = BTreeMap<String, FieldValue>;

pub const BLANK: &str = "This field cannot be blank.";
pub const NULL: &str = "This field cannot be null.";
pub const UNKNOWN_FIELD: &str = "Unknown field.";

fn max_length_error(max: usize, n: usize) -> ValidationError {
    ValidationError::new(format!(
        "Ensure this value has at most {} characters (it has {}).",
        max, n
    ))
}

fn expect_str(value: &FieldValue) -> Result<&str, ValidationError> {
    match value {
        FieldValue::Str(s) => Ok(s),
        FieldValue::Null => Err(ValidationError::new(NULL)),
        other => Err(ValidationError::with_value(
            format!("Value {} must be of type str", other),
            other,
        )),
    }
}

// --- JSON ---

/// Champ JSON dont la valeur traverse le pipeline avant stockage et après
/// relecture.
#[derive(Debug)]
pub struct JsonField {
    pub name: &'static str,
    pipeline: ValidationPipeline,
}

impl JsonField {
    pub fn new(name: &'static str, pipeline: ValidationPipeline) -> Self {
        Self { name, pipeline }
    }

    pub fn to_storage(&self, value: &FieldValue) -> Result<Value, ValidationError> {
        self.pipeline.run(value)?;
        value.to_json()
    }

    pub fn from_storage(&self, stored: &Value) -> Result<FieldValue, ValidationError> {
        let value = FieldValue::from(stored.clone());
        self.pipeline.run(&value)?;
        Ok(value)
    }
}

// --- URL ---

#[derive(Debug, Clone)]
pub struct UrlField {
    pub name: &'static str,
    pub max_length: usize,
    validator: UrlValidator,
}

impl UrlField {
    pub const DEFAULT_MAX_LENGTH: usize = 200;

    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            max_length: Self::DEFAULT_MAX_LENGTH,
            validator: UrlValidator::new(),
        }
    }

    /// La chaîne vide est la valeur par défaut stockée et n'est pas validée.
    pub fn clean(&self, value: &FieldValue) -> Result<String, ValidationError> {
        let raw = match value {
            FieldValue::Str(s) => s.as_str(),
            FieldValue::Null => return Err(ValidationError::new(NULL)),
            _ => return Err(ValidationError::new(INVALID_URL)),
        };
        if raw.is_empty() {
            return Ok(String::new());
        }
        self.validator.check(raw)?;
        let n = raw.chars().count();
        if n > self.max_length {
            return Err(max_length_error(self.max_length, n));
        }
        Ok(raw.to_string())
    }
}

// --- CHAÎNES ---

#[derive(Debug, Clone)]
pub struct CharField {
    pub name: &'static str,
    pub max_length: usize,
    pub choices: Option<&'static [&'static str]>,
}

impl CharField {
    pub const fn new(name: &'static str, max_length: usize) -> Self {
        Self {
            name,
            max_length,
            choices: None,
        }
    }

    pub const fn with_choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Ordre des contrôles : choix, vide, longueur.
    pub fn clean(&self, value: &FieldValue) -> Result<String, ValidationError> {
        let s = expect_str(value)?;

        if let Some(choices) = self.choices {
            if !s.is_empty() && !choices.contains(&s) {
                return Err(ValidationError::with_value(
                    format!("Value '{}' is not a valid choice.", s),
                    value,
                ));
            }
        }
        if s.is_empty() {
            return Err(ValidationError::new(BLANK));
        }
        let n = s.chars().count();
        if n > self.max_length {
            return Err(max_length_error(self.max_length, n));
        }
        Ok(s.to_string())
    }
}

// --- RÉFÉRENCES ---

/// Collection ordonnée d'identifiants vers une autre collection.
#[derive(Debug, Clone)]
pub struct ReferenceListField {
    pub name: &'static str,
    pub to: &'static str,
}

impl ReferenceListField {
    pub const fn new(name: &'static str, to: &'static str) -> Self {
        Self { name, to }
    }

    pub fn clean(&self, value: &FieldValue) -> Result<Vec<String>, ValidationError> {
        clean_reference_ids(value)
    }
}

/// Liste d'identifiants chaînes ; ordre et doublons conservés tels que fournis.
pub fn clean_reference_ids(value: &FieldValue) -> Result<Vec<String>, ValidationError> {
    let invalid =
        || ValidationError::with_value(format!("Value {} must be a list of identifiers.", value), value);
    let items = value.as_list().ok_or_else(|| invalid())?;
    items
        .iter()
        .map(|item| match item {
            FieldValue::Str(id) if !id.is_empty() => Ok(id.clone()),
            _ => Err(invalid()),
        })
        .collect()
}
