// FICHIER : src-server/src/api/serializers.rs

//! Représentations hyperliées des ressources et lecture des corps de requête.

use super::error::{ApiError, ApiResult};
use crate::json_db::collections::CollectionsManager;
use crate::model_engine::celebration::ANTIPHONAS_FIELD;
use crate::model_engine::{Antiphona, Celebration, Fields, Model};
use crate::utils::json::{json, Map, Value};
use crate::utils::FieldErrors;
use crate::validators::FieldValue;
use url::Url;

pub const NO_URL_MATCH: &str = "Invalid hyperlink - No URL match.";
pub const DOES_NOT_EXIST: &str = "Invalid hyperlink - Object does not exist.";

/// `{base_url}/{collection}/{id}/`
pub fn resource_url(base_url: &str, collection: &str, id: &str) -> String {
    format!("{}/{}/{}/", base_url, collection, id)
}

pub fn collection_url(base_url: &str, collection: &str) -> String {
    format!("{}/{}/", base_url, collection)
}

/// Modèle exposé par l'API.
pub trait Resource: Model {
    fn represent(&self, base_url: &str) -> Value;

    /// Collection visée par un champ de références.
    fn reference_target(_field: &str) -> Option<&'static str> {
        None
    }
}

impl Resource for Antiphona {
    fn represent(&self, base_url: &str) -> Value {
        json!({
            "url": resource_url(base_url, Self::COLLECTION, &self.id),
            "text": self.text,
            "link": self.link,
        })
    }
}

impl Resource for Celebration {
    fn represent(&self, base_url: &str) -> Value {
        let antiphonas: Vec<String> = self
            .antiphonas
            .iter()
            .map(|id| resource_url(base_url, ANTIPHONAS_FIELD.to, id))
            .collect();
        json!({
            "url": resource_url(base_url, Self::COLLECTION, &self.id),
            "liturgical_season": self.liturgical_season.as_str(),
            "name": self.name,
            "antiphonas": antiphonas,
        })
    }

    fn reference_target(field: &str) -> Option<&'static str> {
        (field == ANTIPHONAS_FIELD.name).then_some(ANTIPHONAS_FIELD.to)
    }
}

/// Le corps doit être un objet JSON.
pub fn parse_body(body: &[u8]) -> ApiResult<Map<String, Value>> {
    let value: Value = serde_json::from_slice(body).map_err(|e| ApiError::Parse(e.to_string()))?;
    match value {
        Value::Object(obj) => Ok(obj),
        other => Err(FieldErrors::single(
            "non_field_errors",
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                FieldValue::from(other).json_type()
            ),
        )
        .into()),
    }
}

/// Extrait l'identifiant d'une entrée de relation : URL de ressource
/// (`.../{target}/{id}/`) ou identifiant nu.
pub fn link_to_id(entry: &str, target: &str) -> Option<String> {
    let Ok(url) = Url::parse(entry) else {
        return (!entry.is_empty() && !entry.contains('/')).then(|| entry.to_string());
    };
    let mut segments: Vec<&str> = url.path_segments()?.collect();
    if segments.last() == Some(&"") {
        segments.pop();
    }
    match segments.as_slice() {
        [.., collection, id] if *collection == target && !id.is_empty() => Some(id.to_string()),
        _ => None,
    }
}

/// Convertit le corps en champs du modèle. Les clés inconnues et `url`
/// (lecture seule) sont ignorées ; les relations sont résolues et leur
/// existence vérifiée.
pub async fn fields_from_body<M: Resource>(
    manager: &CollectionsManager<'_>,
    body: Map<String, Value>,
) -> Result<Fields, FieldErrors> {
    let mut fields = Fields::new();
    let mut errors = FieldErrors::new();

    for (name, value) in body {
        if !M::FIELD_NAMES.contains(&name.as_str()) {
            continue;
        }
        match M::reference_target(&name) {
            Some(target) => match resolve_links(manager, target, &value).await {
                Ok(ids) => {
                    fields.insert(name, FieldValue::from(ids));
                }
                Err(message) => errors.add(&name, message),
            },
            None => {
                fields.insert(name, FieldValue::from(value));
            }
        }
    }

    errors.into_result()?;
    Ok(fields)
}

async fn resolve_links(
    manager: &CollectionsManager<'_>,
    target: &str,
    value: &Value,
) -> Result<Vec<String>, String> {
    let Value::Array(entries) = value else {
        return Err(format!(
            "Expected a list of items but got type \"{}\".",
            FieldValue::from(value.clone()).json_type()
        ));
    };

    let mut ids = Vec::with_capacity(entries.len());
    for entry in entries {
        let Value::String(raw) = entry else {
            return Err(format!(
                "Incorrect type. Expected URL string, received {}.",
                FieldValue::from(entry.clone()).json_type()
            ));
        };
        let id = link_to_id(raw, target).ok_or_else(|| NO_URL_MATCH.to_string())?;
        let exists = manager
            .get_document(target, &id)
            .await
            .map_err(|e| e.to_string())?
            .is_some();
        if !exists {
            return Err(DOES_NOT_EXIST.to_string());
        }
        ids.push(id);
    }
    Ok(ids)
}
