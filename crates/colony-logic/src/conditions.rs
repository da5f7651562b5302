//! Win/loss evaluation from plain population numbers.

use serde::{Deserialize, Serialize};

use crate::constants::colony::{VICTORY_HAPPINESS, VICTORY_POPULATION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    Victory,
    Defeat,
}

/// Evaluate the game state. Recomputed on demand, never stored.
///
/// - `alive`: living colonists
/// - `avg_happiness`: mean happiness over living colonists
pub fn evaluate(alive: usize, avg_happiness: f64) -> GameStatus {
    if alive == 0 {
        GameStatus::Defeat
    } else if alive >= VICTORY_POPULATION && avg_happiness > VICTORY_HAPPINESS {
        GameStatus::Victory
    } else {
        GameStatus::Active
    }
}
