// FICHIER : src-server/src/api/handlers.rs

use super::error::{ApiError, ApiResult};
use super::serializers::{collection_url, fields_from_body, parse_body, Resource};
use super::AppState;
use crate::model_engine::{Antiphona, Celebration, Fields, Model, Repository};
use crate::utils::json::{json, Map, Value};
use crate::utils::AppError;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

fn not_found<M: Model>(id: &str) -> ApiError {
    AppError::NotFound(format!("{}/{}", M::COLLECTION, id)).into()
}

/// GET / : racine navigable de l'API.
pub async fn api_root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        (Antiphona::COLLECTION): collection_url(&state.base_url, Antiphona::COLLECTION),
        (Celebration::COLLECTION): collection_url(&state.base_url, Celebration::COLLECTION),
    }))
}

/// GET /{collection}/
pub async fn list<M: Resource>(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let repo = Repository::<M>::new(&state.storage, &state.space, &state.db);
    let items: Vec<Value> = repo
        .all()
        .await?
        .iter()
        .map(|record| record.represent(&state.base_url))
        .collect();
    Ok(Json(Value::Array(items)))
}

/// POST /{collection}/
pub async fn create<M: Resource>(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let body = parse_body(&body)?;
    let repo = Repository::<M>::new(&state.storage, &state.space, &state.db);

    let fields = match fields_from_body::<M>(&repo.manager, body.clone()).await {
        Ok(fields) => fields,
        Err(mut errors) => {
            // Les autres champs sont validés aussi : un seul lot d'erreurs.
            let scalars = scalar_fields::<M>(body);
            if let Err(others) = M::from_fields("", &scalars, None) {
                errors.extend(others);
            }
            return Err(errors.into());
        }
    };

    let record = repo.create(fields).await?;
    Ok((StatusCode::CREATED, Json(record.represent(&state.base_url))))
}

/// GET /{collection}/{id}/
pub async fn retrieve<M: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = Repository::<M>::new(&state.storage, &state.space, &state.db);
    let record = repo.get(&id).await?.ok_or_else(|| not_found::<M>(&id))?;
    Ok(Json(record.represent(&state.base_url)))
}

/// PUT /{collection}/{id}/
pub async fn update<M: Resource>(
    state: State<AppState>,
    path: Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    write::<M>(state, path, body, false).await
}

/// PATCH /{collection}/{id}/
pub async fn partial_update<M: Resource>(
    state: State<AppState>,
    path: Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    write::<M>(state, path, body, true).await
}

async fn write<M: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
    partial: bool,
) -> ApiResult<Json<Value>> {
    let repo = Repository::<M>::new(&state.storage, &state.space, &state.db);
    let existing = repo.get(&id).await?.ok_or_else(|| not_found::<M>(&id))?;

    let body = parse_body(&body)?;
    let fields = match fields_from_body::<M>(&repo.manager, body.clone()).await {
        Ok(fields) => fields,
        Err(mut errors) => {
            let scalars = scalar_fields::<M>(body);
            if let Err(others) = M::from_fields(&id, &scalars, partial.then_some(&existing)) {
                errors.extend(others);
            }
            return Err(errors.into());
        }
    };

    let record = repo.update(&id, fields, partial).await?;
    Ok(Json(record.represent(&state.base_url)))
}

/// DELETE /{collection}/{id}/
pub async fn destroy<M: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let repo = Repository::<M>::new(&state.storage, &state.space, &state.db);
    if repo.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found::<M>(&id))
    }
}

/// Champs connus du modèle hors références, pour compléter un lot d'erreurs.
fn scalar_fields<M: Resource>(body: Map<String, Value>) -> Fields {
    body.into_iter()
        .filter(|(k, _)| M::FIELD_NAMES.contains(&k.as_str()))
        .filter(|(k, _)| !M::REFERENCE_FIELDS.contains(&k.as_str()))
        .map(|(k, v)| (k, v.into()))
        .collect()
}
