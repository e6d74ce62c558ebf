use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::{ApiError, ListParams};
use crate::models::Item;

pub async fn list_items(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let Query(params) = params?;
    let items = state.store.list_items(params.page()).await?;
    Ok(Json(items))
}
