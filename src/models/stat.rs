//! Named creature stats.

use serde::{Deserialize, Serialize};

/// A single named stat value, e.g. `attack = 84`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: u32,
}

impl Stat {
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Build a stat list from `(name, value)` pairs.
#[cfg(test)]
pub fn stat_list(pairs: &[(&str, u32)]) -> Vec<Stat> {
    pairs
        .iter()
        .map(|(name, value)| Stat::new(*name, *value))
        .collect()
}
