use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::{ApiError, ListParams};
use crate::battle::{compare_stats, BattleOutcome};
use crate::models::{Pokemon, PokemonId, PokemonWithStats};
use crate::sampler::sample_distinct;
use crate::storage::Page;

pub async fn list_pokemons(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Pokemon>>, ApiError> {
    let Query(params) = params?;
    let pokemons = state.store.list_pokemon(params.page()).await?;
    Ok(Json(pokemons))
}

#[derive(Debug, Default, Deserialize)]
pub struct RandomParams {
    /// Only the first `limit` stored pokemon are eligible
    pub limit: Option<usize>,
}

pub async fn random_pokemons(
    State(state): State<AppState>,
    params: Result<Query<RandomParams>, QueryRejection>,
) -> Result<Json<Vec<PokemonWithStats>>, ApiError> {
    let Query(params) = params?;
    let population = state
        .store
        .list_pokemon(Page::new(None, params.limit))
        .await?;

    let picked = {
        let mut rng = state.rng.lock().await;
        sample_distinct(&mut *rng, &population, state.sample_size)?
    };

    let mut team = Vec::with_capacity(picked.len());
    for pokemon in picked {
        let stats = state.catalog.fetch_stats(pokemon.api_id).await?;
        team.push(PokemonWithStats { pokemon, stats });
    }

    Ok(Json(team))
}

#[derive(Debug, Deserialize)]
pub struct FightParams {
    pub first_pokemon_id: PokemonId,
    pub second_pokemon_id: PokemonId,
}

#[derive(Debug, Serialize)]
pub struct FightResult {
    pub winner: Option<String>,
    pub draw: bool,
}

pub async fn fight_pokemons(
    State(state): State<AppState>,
    params: Result<Query<FightParams>, QueryRejection>,
) -> Result<Json<FightResult>, ApiError> {
    let Query(params) = params?;

    let first = state
        .store
        .get_pokemon(params.first_pokemon_id)
        .await?
        .ok_or_else(ApiError::pokemon_not_found)?;
    let second = state
        .store
        .get_pokemon(params.second_pokemon_id)
        .await?
        .ok_or_else(ApiError::pokemon_not_found)?;

    let (first_stats, second_stats) = tokio::try_join!(
        state.catalog.fetch_stats(first.api_id),
        state.catalog.fetch_stats(second.api_id),
    )?;

    let outcome = compare_stats(&first_stats, &second_stats);
    let winner = match outcome {
        BattleOutcome::FirstWins => Some(first.name.clone()),
        BattleOutcome::SecondWins => Some(second.name.clone()),
        BattleOutcome::Draw => None,
    };

    info!(
        "Fight {} vs {}: {:?}",
        first.nickname_or_name(),
        second.nickname_or_name(),
        outcome
    );

    Ok(Json(FightResult {
        draw: outcome.is_draw(),
        winner,
    }))
}
