//! Helpers for driving the router in tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tokio::sync::Mutex;
use tower::util::ServiceExt;

use crate::api::state::AppState;
use crate::catalog::StubCatalog;
use crate::sampler::DEFAULT_SAMPLE_SIZE;
use crate::storage::{JsonlStore, StorageConfig};

pub fn setup_test_state(dir: &std::path::Path, catalog: Arc<StubCatalog>) -> AppState {
    let storage = StorageConfig::new(dir.to_path_buf());
    AppState {
        store: Arc::new(JsonlStore::new(&storage)),
        catalog,
        rng: Arc::new(Mutex::new(StdRng::seed_from_u64(7))),
        sample_size: DEFAULT_SAMPLE_SIZE,
    }
}

/// Catalog knowing a handful of starters.
pub fn starter_catalog() -> StubCatalog {
    StubCatalog::new()
        .with_pokemon(
            1,
            "bulbasaur",
            &[("hp", 45), ("attack", 49), ("defense", 49), ("speed", 45)],
        )
        .with_pokemon(
            4,
            "charmander",
            &[("hp", 39), ("attack", 52), ("defense", 43), ("speed", 65)],
        )
        .with_pokemon(
            7,
            "squirtle",
            &[("hp", 44), ("attack", 48), ("defense", 65), ("speed", 43)],
        )
        .with_pokemon(
            25,
            "pikachu",
            &[("hp", 35), ("attack", 55), ("defense", 40), ("speed", 90)],
        )
        .with_pokemon(
            150,
            "mewtwo",
            &[("hp", 106), ("attack", 110), ("defense", 90), ("speed", 130)],
        )
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(request).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}
