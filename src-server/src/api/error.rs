// FICHIER : src-server/src/api/error.rs

use crate::utils::json::json;
use crate::utils::{AppError, FieldErrors};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

pub const NOT_FOUND: &str = "Not found.";

/// Erreurs exposées aux clients HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("JSON parse error - {0}")]
    Parse(String),
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::App(AppError::Validation(errors))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::App(AppError::Validation(errors)) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::App(AppError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": NOT_FOUND }))).into_response()
            }
            ApiError::Parse(_) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": self.to_string() }))).into_response()
            }
            ApiError::App(e) => {
                error!("❌ Erreur serveur : {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let r = ApiError::from(FieldErrors::single("name", "This field cannot be blank.")).into_response();
        assert_eq!(r.status(), StatusCode::BAD_REQUEST);

        let r = ApiError::App(AppError::NotFound("x".into())).into_response();
        assert_eq!(r.status(), StatusCode::NOT_FOUND);

        let r = ApiError::Parse("EOF".into()).into_response();
        assert_eq!(r.status(), StatusCode::BAD_REQUEST);

        let r = ApiError::App(AppError::Database("disque plein".into())).into_response();
        assert_eq!(r.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
