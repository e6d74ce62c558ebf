//! JSONL-backed record store.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::{JsonlTable, Page, RecordStore, StorageConfig, StorageError, Table};
use crate::models::{
    Item, NewItem, NewPokemon, NewTrainer, Pokemon, PokemonId, Trainer, TrainerId, TrainerRow,
};

/// Rows with an integer primary key.
trait Keyed {
    fn key(&self) -> i64;
}

impl Keyed for TrainerRow {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Pokemon {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Item {
    fn key(&self) -> i64 {
        self.id
    }
}

/// Next free key in a table; keys start at 1.
///
/// `lines` counts every non-empty line, including ones that failed to parse.
/// Keys never fall below it, so a row hidden by a damaged line keeps its key.
fn next_key<T: Keyed>(rows: &[T], lines: usize) -> i64 {
    if lines > rows.len() {
        warn!(
            "{} unreadable rows in table, skipping past their keys",
            lines - rows.len()
        );
    }
    let max_key = rows.iter().map(Keyed::key).max().unwrap_or(0);
    max_key.max(lines as i64) + 1
}

/// Record store keeping one JSONL file per table.
pub struct JsonlStore {
    trainers: JsonlTable<TrainerRow>,
    pokemons: JsonlTable<Pokemon>,
    items: JsonlTable<Item>,

    /// Serializes key assignment and appends.
    write_lock: Mutex<()>,
}

impl JsonlStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            trainers: JsonlTable::for_table(config, Table::Trainers),
            pokemons: JsonlTable::for_table(config, Table::Pokemons),
            items: JsonlTable::for_table(config, Table::Items),
            write_lock: Mutex::new(()),
        }
    }

    /// Join pokemon and items onto trainer rows.
    fn hydrate(&self, rows: Vec<TrainerRow>) -> Result<Vec<Trainer>, StorageError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let pokemons = self.pokemons.read_all()?;
        let items = self.items.read_all()?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let owned_pokemon = pokemons
                    .iter()
                    .filter(|p| p.trainer_id == row.id)
                    .cloned()
                    .collect();
                let inventory = items
                    .iter()
                    .filter(|i| i.trainer_id == row.id)
                    .cloned()
                    .collect();
                Trainer::hydrate(row, owned_pokemon, inventory)
            })
            .collect())
    }

    fn trainer_exists(&self, id: TrainerId) -> Result<bool, StorageError> {
        Ok(self.trainers.read_all()?.iter().any(|t| t.id == id))
    }
}

#[async_trait]
impl RecordStore for JsonlStore {
    async fn create_trainer(&self, trainer: NewTrainer) -> Result<Trainer, StorageError> {
        let _guard = self.write_lock.lock().await;

        let (rows, lines) = self.trainers.read_counted()?;
        let row = TrainerRow {
            id: next_key(&rows, lines),
            name: trainer.name,
            birthdate: trainer.birthdate,
        };
        self.trainers.append(&row)?;

        info!("Created trainer {} ({})", row.id, row.name);
        Ok(Trainer::hydrate(row, Vec::new(), Vec::new()))
    }

    async fn get_trainer(&self, id: TrainerId) -> Result<Option<Trainer>, StorageError> {
        let rows = self.trainers.read_where(|t| t.id == id)?;
        Ok(self.hydrate(rows)?.into_iter().next())
    }

    async fn list_trainers(&self, page: Page) -> Result<Vec<Trainer>, StorageError> {
        let rows = page.slice(self.trainers.read_all()?);
        self.hydrate(rows)
    }

    async fn find_trainers_by_name(&self, name: &str) -> Result<Vec<Trainer>, StorageError> {
        let rows = self.trainers.read_where(|t| t.name == name)?;
        self.hydrate(rows)
    }

    async fn create_pokemon(
        &self,
        trainer_id: TrainerId,
        pokemon: NewPokemon,
        name: String,
    ) -> Result<Pokemon, StorageError> {
        let _guard = self.write_lock.lock().await;

        if !self.trainer_exists(trainer_id)? {
            return Err(StorageError::UnknownTrainer(trainer_id));
        }

        let (rows, lines) = self.pokemons.read_counted()?;
        let record = Pokemon {
            id: next_key(&rows, lines),
            api_id: pokemon.api_id,
            name,
            custom_name: pokemon.custom_name,
            trainer_id,
        };
        self.pokemons.append(&record)?;

        info!(
            "Trainer {} caught {} (#{}) as pokemon {}",
            trainer_id, record.name, record.api_id, record.id
        );
        Ok(record)
    }

    async fn get_pokemon(&self, id: PokemonId) -> Result<Option<Pokemon>, StorageError> {
        Ok(self.pokemons.read_where(|p| p.id == id)?.into_iter().next())
    }

    async fn list_pokemon(&self, page: Page) -> Result<Vec<Pokemon>, StorageError> {
        Ok(page.slice(self.pokemons.read_all()?))
    }

    async fn create_item(
        &self,
        trainer_id: TrainerId,
        item: NewItem,
    ) -> Result<Item, StorageError> {
        let _guard = self.write_lock.lock().await;

        if !self.trainer_exists(trainer_id)? {
            return Err(StorageError::UnknownTrainer(trainer_id));
        }

        let (rows, lines) = self.items.read_counted()?;
        let record = Item {
            id: next_key(&rows, lines),
            name: item.name,
            description: item.description,
            trainer_id,
        };
        self.items.append(&record)?;

        info!("Gave item {} ({}) to trainer {}", record.id, record.name, trainer_id);
        Ok(record)
    }

    async fn list_items(&self, page: Page) -> Result<Vec<Item>, StorageError> {
        Ok(page.slice(self.items.read_all()?))
    }
}
