// FICHIER : src-server/src/validators/mod.rs

//! Validateurs de champs typés (tables langue → texte).
//!
//! Chaque validateur est fail-fast : la première violation rencontrée est
//! retournée, sans agrégation. L'agrégation par champ est faite au niveau de
//! l'enregistrement (`FieldErrors`).

pub mod keys;
pub mod pipeline;
pub mod types;
pub mod url;
pub mod value;

use serde_json::Value;
use std::fmt::Debug;

pub use keys::ValidKeyValidator;
pub use pipeline::ValidationPipeline;
pub use types::{KeysTypeValidator, TypeValidator, ValuesTypeValidator};
pub use url::UrlValidator;
pub use value::{FieldValue, JsonType};

/// Codes de langue acceptés comme clés d'un texte multilingue.
pub const VALID_LANGUAGES: [&str; 6] = ["es_AR", "es_MX", "es_ES", "es_US", "en_US", "la"];

/// Erreur de programmation détectée à la construction d'un validateur.
/// Jamais déclenchable par un utilisateur.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Must provide an iterable of types (got '{0}')")]
    NotAType(String),

    #[error("Must provide an iterable of types (got none)")]
    NoTypes,
}

/// Violation détectée sur une valeur.
///
/// `params` porte la valeur fautive sous forme JSON pour les couches qui
/// agrègent les erreurs par champ.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub params: Option<Value>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            params: None,
        }
    }

    pub fn with_value(message: impl Into<String>, value: &FieldValue) -> Self {
        Self {
            message: message.into(),
            params: Some(serde_json::json!({ "value": value.to_json_lossy() })),
        }
    }

    /// Erreur commune aux validateurs qui exigent une table.
    pub fn not_a_mapping(value: &FieldValue) -> Self {
        Self::new(format!("Value: {} must be of type Mapping.", value))
    }
}

/// Contrat commun à tous les validateurs de champ.
pub trait FieldValidator: Send + Sync + Debug {
    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError>;
}
