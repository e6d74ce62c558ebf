//! Stat battles between two creatures.
//!
//! A battle walks the first side's stats in order and awards a point to
//! whichever side has the strictly higher value for each stat both sides
//! share. The sign of the final tally decides the outcome.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::Stat;

/// Result of comparing two stat lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    FirstWins,
    SecondWins,
    Draw,
}

impl BattleOutcome {
    fn from_score(score: i32) -> Self {
        match score.cmp(&0) {
            Ordering::Greater => BattleOutcome::FirstWins,
            Ordering::Less => BattleOutcome::SecondWins,
            Ordering::Equal => BattleOutcome::Draw,
        }
    }

    /// `1` when the first side wins, `-1` when the second does, `0` on a draw.
    pub fn signum(self) -> i8 {
        match self {
            BattleOutcome::FirstWins => 1,
            BattleOutcome::SecondWins => -1,
            BattleOutcome::Draw => 0,
        }
    }

    pub fn is_draw(self) -> bool {
        self == BattleOutcome::Draw
    }
}

/// Index stats by name in first-seen order. A repeated name keeps its
/// original position and takes the later value.
pub fn stat_map(stats: &[Stat]) -> IndexMap<&str, u32> {
    let mut map = IndexMap::with_capacity(stats.len());
    for stat in stats {
        map.insert(stat.name.as_str(), stat.value);
    }
    map
}

/// Compare two stat lines.
pub fn compare_stats(first: &[Stat], second: &[Stat]) -> BattleOutcome {
    let first = stat_map(first);
    let second = stat_map(second);

    let score: i32 = first
        .iter()
        .filter_map(|(name, first_value)| {
            second
                .get(name)
                .map(|second_value| match first_value.cmp(second_value) {
                    Ordering::Greater => 1,
                    Ordering::Less => -1,
                    Ordering::Equal => 0,
                })
        })
        .sum();

    BattleOutcome::from_score(score)
}

/// Signed form of [`compare_stats`].
pub fn compare(first: &[Stat], second: &[Stat]) -> i8 {
    compare_stats(first, second).signum()
}
