//! Trainer model.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Item, Pokemon, TrainerId};

/// Request body for creating a trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrainer {
    pub name: String,
    pub birthdate: NaiveDate,
}

/// A trainer as persisted in the `trainers` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerRow {
    pub id: TrainerId,
    pub name: String,
    pub birthdate: NaiveDate,
}

/// A trainer with its owned pokemon and items joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
    pub id: TrainerId,
    pub name: String,
    pub birthdate: NaiveDate,

    /// Whole years since `birthdate`, derived on read
    pub age: u32,

    pub inventory: Vec<Item>,
    pub pokemons: Vec<Pokemon>,
}

impl Trainer {
    /// Join a stored row with its collections.
    pub fn hydrate(row: TrainerRow, pokemons: Vec<Pokemon>, inventory: Vec<Item>) -> Self {
        Self {
            age: age_from_birthdate(row.birthdate),
            id: row.id,
            name: row.name,
            birthdate: row.birthdate,
            inventory,
            pokemons,
        }
    }
}

/// Age in whole years as of today.
pub fn age_from_birthdate(birthdate: NaiveDate) -> u32 {
    age_on(birthdate, Local::now().date_naive())
}

/// Age in whole years as of `today`. Birthdates in the future count as 0.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years -= 1;
    }
    years.max(0) as u32
}
