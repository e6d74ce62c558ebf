//! Record storage.
//!
//! The registry keeps three tables (trainers, pokemon, items) behind the
//! [`RecordStore`] trait. [`JsonlStore`] stores each table as a JSON Lines
//! file in the data directory.

mod jsonl;
mod store;

pub use jsonl::*;
pub use store::*;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Item, NewItem, NewPokemon, NewTrainer, Pokemon, PokemonId, Trainer, TrainerId,
};

/// Default page size for list operations.
pub const DEFAULT_LIMIT: usize = 100;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Trainer {0} does not exist")]
    UnknownTrainer(TrainerId),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn table_path(&self, table: Table) -> PathBuf {
        self.data_dir.join(table.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Offset/limit window over a table in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Page {
    pub fn new(skip: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Apply the window to rows.
    pub fn slice<T>(&self, rows: Vec<T>) -> Vec<T> {
        rows.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

/// Persistence operations for trainers and what they own.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_trainer(&self, trainer: NewTrainer) -> Result<Trainer, StorageError>;

    async fn get_trainer(&self, id: TrainerId) -> Result<Option<Trainer>, StorageError>;

    async fn list_trainers(&self, page: Page) -> Result<Vec<Trainer>, StorageError>;

    /// All trainers with exactly this name.
    async fn find_trainers_by_name(&self, name: &str) -> Result<Vec<Trainer>, StorageError>;

    /// Store a pokemon whose catalog name has already been resolved.
    async fn create_pokemon(
        &self,
        trainer_id: TrainerId,
        pokemon: NewPokemon,
        name: String,
    ) -> Result<Pokemon, StorageError>;

    async fn get_pokemon(&self, id: PokemonId) -> Result<Option<Pokemon>, StorageError>;

    async fn list_pokemon(&self, page: Page) -> Result<Vec<Pokemon>, StorageError>;

    async fn create_item(&self, trainer_id: TrainerId, item: NewItem)
        -> Result<Item, StorageError>;

    async fn list_items(&self, page: Page) -> Result<Vec<Item>, StorageError>;
}
