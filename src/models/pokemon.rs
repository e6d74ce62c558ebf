//! Pokemon model.

use serde::{Deserialize, Serialize};

use super::{ApiId, PokemonId, Stat, TrainerId};

/// Request body for adding a pokemon to a trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPokemon {
    pub api_id: ApiId,
    #[serde(default)]
    pub custom_name: Option<String>,
}

/// A stored pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: PokemonId,

    /// Identifier in the remote catalog
    pub api_id: ApiId,

    /// Name resolved from the catalog at creation time
    pub name: String,

    pub custom_name: Option<String>,
    pub trainer_id: TrainerId,
}

impl Pokemon {
    /// The trainer's nickname if one was given, otherwise the catalog name.
    pub fn nickname_or_name(&self) -> &str {
        self.custom_name.as_deref().unwrap_or(&self.name)
    }
}

/// A stored pokemon with freshly fetched catalog stats.
#[derive(Debug, Clone, Serialize)]
pub struct PokemonWithStats {
    #[serde(flatten)]
    pub pokemon: Pokemon,
    pub stats: Vec<Stat>,
}
