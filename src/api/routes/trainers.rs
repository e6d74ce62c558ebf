use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Item, NewItem, NewPokemon, NewTrainer, Pokemon, Trainer, TrainerId};
use crate::storage::Page;

#[derive(Debug, Default, Deserialize)]
pub struct ListTrainersParams {
    pub skip: Option<usize>,
    pub limit: Option<usize>,

    /// Exact name filter
    pub name: Option<String>,
}

pub async fn create_trainer(
    State(state): State<AppState>,
    payload: Result<Json<NewTrainer>, JsonRejection>,
) -> Result<Json<Trainer>, ApiError> {
    let Json(trainer) = payload?;
    let created = state.store.create_trainer(trainer).await?;
    Ok(Json(created))
}

pub async fn list_trainers(
    State(state): State<AppState>,
    params: Result<Query<ListTrainersParams>, QueryRejection>,
) -> Result<Json<Vec<Trainer>>, ApiError> {
    let Query(params) = params?;
    let page = Page::new(params.skip, params.limit);

    let trainers = match params.name.as_deref() {
        Some(name) => page.slice(state.store.find_trainers_by_name(name).await?),
        None => state.store.list_trainers(page).await?,
    };

    Ok(Json(trainers))
}

pub async fn get_trainer(
    State(state): State<AppState>,
    trainer_id: Result<Path<TrainerId>, PathRejection>,
) -> Result<Json<Trainer>, ApiError> {
    let Path(trainer_id) = trainer_id?;
    let trainer = state
        .store
        .get_trainer(trainer_id)
        .await?
        .ok_or_else(ApiError::trainer_not_found)?;
    Ok(Json(trainer))
}

pub async fn add_trainer_pokemon(
    State(state): State<AppState>,
    trainer_id: Result<Path<TrainerId>, PathRejection>,
    payload: Result<Json<NewPokemon>, JsonRejection>,
) -> Result<Json<Pokemon>, ApiError> {
    let Path(trainer_id) = trainer_id?;
    let Json(pokemon) = payload?;

    // Unknown owners must not cost a catalog call.
    state
        .store
        .get_trainer(trainer_id)
        .await?
        .ok_or_else(ApiError::trainer_not_found)?;

    let name = state.catalog.fetch_name(pokemon.api_id).await?;
    debug!("Catalog {} resolved #{} to {}", state.catalog.name(), pokemon.api_id, name);

    let created = state.store.create_pokemon(trainer_id, pokemon, name).await?;
    Ok(Json(created))
}

pub async fn add_trainer_item(
    State(state): State<AppState>,
    trainer_id: Result<Path<TrainerId>, PathRejection>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let Path(trainer_id) = trainer_id?;
    let Json(item) = payload?;
    let created = state.store.create_item(trainer_id, item).await?;
    Ok(Json(created))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::build_router;
    use crate::api::test_support::{get_json, post_json, setup_test_state, starter_catalog};
    use crate::catalog::StubCatalog;

    async fn create_trainer(app: axum::Router, name: &str) -> i64 {
        let (status, json) = post_json(
            app,
            "/trainers/",
            json!({"name": name, "birthdate": "2000-01-01"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        json["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_create_trainer() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path(), Arc::new(StubCatalog::new()));

        let (status, json) = post_json(
            build_router(state),
            "/trainers/",
            json!({"name": "Ash Ketchum", "birthdate": "1997-04-01"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Ash Ketchum");
        assert_eq!(json["birthdate"], "1997-04-01");
        assert!(json["id"].is_i64());
        assert!(json["age"].is_u64());
        assert_eq!(json["inventory"], json!([]));
        assert_eq!(json["pokemons"], json!([]));
    }

    #[tokio::test]
    async fn test_create_trainer_invalid_body() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path(), Arc::new(StubCatalog::new()));

        let (status, json) = post_json(
            build_router(state),
            "/trainers/",
            json!({"name": "Missing Birthdate"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["detail"].as_str().unwrap().contains("birthdate"));
    }

    #[tokio::test]
    async fn test_get_trainers_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path(), Arc::new(StubCatalog::new()));

        let (status, json) = get_json(build_router(state), "/trainers").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([]));
    }

    #[tokio::test]
    async fn test_get_trainers_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path(), Arc::new(StubCatalog::new()));
        for i in 0..5 {
            create_trainer(build_router(state.clone()), &format!("Player{}", i)).await;
        }

        let (status, json) = get_json(build_router(state.clone()), "/trainers?skip=0&limit=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 2);

        let (_, json) = get_json(build_router(state), "/trainers?skip=3").await;
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Player3", "Player4"]);
    }

    #[tokio::test]
    async fn test_get_trainers_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path(), Arc::new(StubCatalog::new()));
        create_trainer(build_router(state.clone()), "Gary").await;
        create_trainer(build_router(state.clone()), "May").await;

        let (status, json) = get_json(build_router(state), "/trainers/?name=May").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["name"], "May");
    }

    #[tokio::test]
    async fn test_get_trainer_by_id() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path(), Arc::new(StubCatalog::new()));
        let id = create_trainer(build_router(state.clone()), "Dawn").await;

        let (status, json) = get_json(build_router(state), &format!("/trainers/{}", id)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Dawn");
        assert_eq!(json["pokemons"], json!([]));
        assert_eq!(json["inventory"], json!([]));
    }

    #[tokio::test]
    async fn test_get_trainer_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path(), Arc::new(StubCatalog::new()));

        let (status, json) = get_json(build_router(state), "/trainers/99999").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["detail"], "Trainer not found");
    }

    #[tokio::test]
    async fn test_get_trainer_malformed_id() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path(), Arc::new(StubCatalog::new()));

        let (status, json) = get_json(build_router(state), "/trainers/abc").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["detail"].is_string());
    }

    #[tokio::test]
    async fn test_add_item_malformed_trainer_id() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path(), Arc::new(StubCatalog::new()));

        let (status, json) = post_json(
            build_router(state),
            "/trainers/abc/item/",
            json!({"name": "Potion"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["detail"].is_string());
    }

    #[tokio::test]
    async fn test_add_item_to_trainer() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path(), Arc::new(StubCatalog::new()));
        let id = create_trainer(build_router(state.clone()), "Red").await;

        let (status, json) = post_json(
            build_router(state.clone()),
            &format!("/trainers/{}/item/", id),
            json!({"name": "Potion", "description": "Heals 20 HP"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Potion");
        assert_eq!(json["trainer_id"], id);

        let (_, trainer) = get_json(build_router(state), &format!("/trainers/{}", id)).await;
        assert_eq!(trainer["inventory"][0]["name"], "Potion");
    }

    #[tokio::test]
    async fn test_add_item_unknown_trainer() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path(), Arc::new(StubCatalog::new()));

        let (status, json) = post_json(
            build_router(state),
            "/trainers/12/item/",
            json!({"name": "Potion"}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["detail"], "Trainer not found");
    }

    #[tokio::test]
    async fn test_add_pokemon_resolves_name() {
        let tmp = tempfile::tempdir().unwrap();
        let catalog = Arc::new(starter_catalog());
        let state = setup_test_state(tmp.path(), catalog.clone());
        let id = create_trainer(build_router(state.clone()), "Erika").await;

        let (status, json) = post_json(
            build_router(state),
            &format!("/trainers/{}/pokemon/", id),
            json!({"api_id": 1}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "bulbasaur");
        assert_eq!(json["api_id"], 1);
        assert_eq!(json["trainer_id"], id);
        assert!(json["custom_name"].is_null());
        assert_eq!(catalog.calls(), 1);
    }

    #[tokio::test]
    async fn test_add_pokemon_with_custom_name() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path(), Arc::new(starter_catalog()));
        let id = create_trainer(build_router(state.clone()), "Blaine").await;

        let (_, json) = post_json(
            build_router(state.clone()),
            &format!("/trainers/{}/pokemon/", id),
            json!({"api_id": 4, "custom_name": "Flamie"}),
        )
        .await;

        assert_eq!(json["custom_name"], "Flamie");
        assert_eq!(json["name"], "charmander");

        let (_, trainer) = get_json(build_router(state), &format!("/trainers/{}", id)).await;
        assert_eq!(trainer["pokemons"][0]["name"], "charmander");
    }

    #[tokio::test]
    async fn test_add_pokemon_unknown_trainer_skips_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        let catalog = Arc::new(starter_catalog());
        let state = setup_test_state(tmp.path(), catalog.clone());

        let (status, json) = post_json(
            build_router(state),
            "/trainers/5/pokemon/",
            json!({"api_id": 25}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["detail"], "Trainer not found");
        assert_eq!(catalog.calls(), 0);
    }

    #[tokio::test]
    async fn test_add_pokemon_catalog_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path(), Arc::new(starter_catalog()));
        let id = create_trainer(build_router(state.clone()), "Misty").await;

        let (status, _) = post_json(
            build_router(state.clone()),
            &format!("/trainers/{}/pokemon/", id),
            json!({"api_id": 9999}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (_, trainer) = get_json(build_router(state), &format!("/trainers/{}", id)).await;
        assert_eq!(trainer["pokemons"], json!([]));
    }
}
