//! REST API endpoints.
//!
//! Axum-based HTTP API for registering trainers, the pokemon and items
//! they own, and battling stored pokemon against each other.

pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::catalog::CatalogError;
use crate::sampler::SampleError;
use crate::storage::{Page, StorageError};
use state::AppState;

pub const TRAINER_NOT_FOUND: &str = "Trainer not found";
pub const POKEMON_NOT_FOUND: &str = "Pokemon not found";

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Catalog lookup failed: {0}")]
    Upstream(#[from] CatalogError),

    #[error("{0}")]
    Sampling(#[from] SampleError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn trainer_not_found() -> Self {
        ApiError::NotFound(TRAINER_NOT_FOUND.to_string())
    }

    pub fn pokemon_not_found() -> Self {
        ApiError::NotFound(POKEMON_NOT_FOUND.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UnknownTrainer(_) => ApiError::trainer_not_found(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Sampling(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("{}", self);
        } else if status != StatusCode::NOT_FOUND {
            warn!("{}", self);
        }

        let body = ErrorResponse {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Offset/limit query parameters shared by list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl ListParams {
    pub fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

/// Build the application router.
///
/// Collection routes answer both with and without a trailing slash.
pub fn build_router(state: AppState) -> Router {
    use routes::{items, pokemons, trainers};

    Router::new()
        .route(
            "/trainers",
            get(trainers::list_trainers).post(trainers::create_trainer),
        )
        .route(
            "/trainers/",
            get(trainers::list_trainers).post(trainers::create_trainer),
        )
        .route("/trainers/:trainer_id", get(trainers::get_trainer))
        .route("/trainers/:trainer_id/pokemon", post(trainers::add_trainer_pokemon))
        .route("/trainers/:trainer_id/pokemon/", post(trainers::add_trainer_pokemon))
        .route("/trainers/:trainer_id/item", post(trainers::add_trainer_item))
        .route("/trainers/:trainer_id/item/", post(trainers::add_trainer_item))
        .route("/pokemons", get(pokemons::list_pokemons))
        .route("/pokemons/", get(pokemons::list_pokemons))
        .route("/pokemons/random", get(pokemons::random_pokemons))
        .route("/pokemons/random/", get(pokemons::random_pokemons))
        .route("/pokemons/fight", get(pokemons::fight_pokemons))
        .route("/items", get(items::list_items))
        .route("/items/", get(items::list_items))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
