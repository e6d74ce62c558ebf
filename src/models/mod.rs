//! Core data models for the trainer registry.

mod item;
mod pokemon;
mod stat;
mod trainer;

pub use item::*;
pub use pokemon::*;
pub use stat::*;
pub use trainer::*;

/// Internal storage id of a trainer.
pub type TrainerId = i64;

/// Internal storage id of a pokemon.
pub type PokemonId = i64;

/// Internal storage id of an item.
pub type ItemId = i64;

/// Numeric key of a creature in the remote catalog.
pub type ApiId = u32;
