// FICHIER : src-server/src/api/mod.rs

//! Exposition REST des antiennes et des célébrations.

pub mod error;
pub mod handlers;
pub mod serializers;

use crate::json_db::storage::StorageEngine;
use crate::model_engine::{Antiphona, Celebration, Model};
use crate::utils::AppConfig;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// État partagé par les handlers. Les clones partagent le cache du moteur.
#[derive(Debug, Clone)]
pub struct AppState {
    pub storage: StorageEngine,
    pub space: String,
    pub db: String,
    /// Base des URLs de ressources, sans slash final.
    pub base_url: String,
}

impl AppState {
    pub fn new(storage: StorageEngine, space: &str, db: &str, base_url: &str) -> Self {
        Self {
            storage,
            space: space.to_string(),
            db: db.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig, storage: StorageEngine) -> Self {
        Self::new(storage, &config.space, &config.db, &config.base_url())
    }
}

/// # Routes
///
/// - `GET /` : racine de l'API
/// - `GET|POST /antiphonas/`, `GET|PUT|PATCH|DELETE /antiphonas/{id}/`
/// - `GET|POST /celebrations/`, `GET|PUT|PATCH|DELETE /celebrations/{id}/`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::api_root))
        .merge(resource_routes::<Antiphona>())
        .merge(resource_routes::<Celebration>())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn resource_routes<M: serializers::Resource + 'static>() -> Router<AppState> {
    let list = format!("/{}/", M::COLLECTION);
    let detail = format!("/{}/{{id}}/", M::COLLECTION);
    Router::new()
        .route(&list, get(handlers::list::<M>).post(handlers::create::<M>))
        .route(
            &detail,
            get(handlers::retrieve::<M>)
                .put(handlers::update::<M>)
                .patch(handlers::partial_update::<M>)
                .delete(handlers::destroy::<M>),
        )
}
