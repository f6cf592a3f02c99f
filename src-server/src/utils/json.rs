// FICHIER : src-server/src/utils/json.rs

use crate::utils::error::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

// --- RE-EXPORTS (Single Source of Truth pour le JSON) ---
pub use serde_json::{json, Map, Value};

/// Parse une chaîne JSON en un type T.
/// Journalise un extrait du contenu en cas d'échec.
pub fn parse<T: DeserializeOwned>(s: &str) -> AppResult<T> {
    serde_json::from_str(s).map_err(|e| {
        let snippet: String = s.chars().take(100).collect();
        tracing::debug!(snippet = %snippet, "JSON illisible");
        AppError::Serialization(e)
    })
}

/// Convertit un type T en chaîne JSON formatée (pretty).
pub fn stringify_pretty<T: Serialize>(v: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(v)?)
}

/// Convertit un type T en `serde_json::Value`.
pub fn to_value<T: Serialize>(v: T) -> AppResult<Value> {
    Ok(serde_json::to_value(v)?)
}

/// Fusionne récursivement deux objets JSON (Deep Merge).
/// L'objet `b` écrase les valeurs de `a` en cas de conflit.
pub fn merge(a: &mut Value, b: Value) {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => {
            for (k, v) in b {
                merge(a.entry(k).or_insert(Value::Null), v);
            }
        }
        (a, b) => *a = b,
    }
}

/// Nom du type JSON d'une valeur, pour les messages d'erreur.
pub fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
