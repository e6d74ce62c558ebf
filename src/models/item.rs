//! Item model.

use serde::{Deserialize, Serialize};

use super::{ItemId, TrainerId};

/// Request body for giving an item to a trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub trainer_id: TrainerId,
}
