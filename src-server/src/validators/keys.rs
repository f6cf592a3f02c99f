// FICHIER : src-server/src/validators/keys.rs

use super::{FieldValidator, FieldValue, ValidationError};
use std::collections::BTreeSet;

/// Vérifie que les clés d'une table appartiennent à un ensemble fixe.
/// Un sous-ensemble strict des clés autorisées est valide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidKeyValidator {
    valid_keys: BTreeSet<String>,
}

impl ValidKeyValidator {
    pub fn new<I, S>(valid_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            valid_keys: valid_keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn valid_keys(&self) -> &BTreeSet<String> {
        &self.valid_keys
    }

    fn is_valid_key(&self, key: &FieldValue) -> bool {
        matches!(key, FieldValue::Str(k) if self.valid_keys.contains(k))
    }
}

impl FieldValidator for ValidKeyValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        let entries = value
            .as_map()
            .ok_or_else(|| ValidationError::not_a_mapping(value))?;

        // Ensemble trié des clés fautives (forme affichable), sans doublons.
        let invalid: BTreeSet<String> = entries
            .iter()
            .map(|(k, _)| k)
            .filter(|k| !self.is_valid_key(k))
            .map(|k| k.to_string())
            .collect();

        if invalid.is_empty() {
            return Ok(());
        }

        let invalid_list: Vec<&str> = invalid.iter().map(String::as_str).collect();
        let valid_list: Vec<&str> = self.valid_keys.iter().map(String::as_str).collect();
        Err(ValidationError::with_value(
            format!(
                "Value: {} are invalid keys. Only keys accepted are {}",
                invalid_list.join(", "),
                valid_list.join(", ")
            ),
            value,
        ))
    }
}
