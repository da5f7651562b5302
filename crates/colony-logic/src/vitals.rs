//! Pure colonist vitals logic.
//!
//! Health/happiness clamping, productivity and professions, plus the
//! starvation and dehydration penalties.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::consumption::{
    DEHYDRATION_HAPPINESS, DEHYDRATION_HEALTH, FOOD_PER_COLONIST, STARVATION_HAPPINESS,
    STARVATION_HEALTH, WATER_PER_COLONIST,
};
use crate::constants::vitals::{MAX, MIN, PRODUCTIVITY_SCALE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    Farmer,
    Engineer,
    Scientist,
    Miner,
    Doctor,
}

impl Profession {
    pub const ALL: [Profession; 5] = [
        Profession::Farmer,
        Profession::Engineer,
        Profession::Scientist,
        Profession::Miner,
        Profession::Doctor,
    ];

    /// Productivity bonus for this line of work.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Farmer => 1.2,
            Self::Engineer => 1.3,
            Self::Scientist => 1.1,
            Self::Miner => 1.25,
            Self::Doctor => 1.15,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Farmer => "Farmer",
            Self::Engineer => "Engineer",
            Self::Scientist => "Scientist",
            Self::Miner => "Miner",
            Self::Doctor => "Doctor",
        }
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profession {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| s.to_string())
    }
}

/// Clamp a health or happiness value into `[0, 100]`.
pub fn clamp_vital(value: i32) -> i32 {
    value.clamp(MIN, MAX)
}

/// A colonist is alive while health is above zero.
pub fn is_alive(health: i32) -> bool {
    health > 0
}

/// Work productivity from current vitals and profession multiplier.
pub fn productivity(health: i32, happiness: i32, multiplier: f64) -> f64 {
    (health as f64 / 100.0) * (happiness as f64 / 100.0) * PRODUCTIVITY_SCALE * multiplier
}

/// What one colonist takes from the stores and what it costs them if short.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ration {
    pub food: f64,
    pub water: f64,
    pub starving: bool,
    pub dehydrated: bool,
}

impl Ration {
    /// Health and happiness deltas from going short this turn. Food and
    /// water penalties stack.
    pub fn penalty(&self) -> (i32, i32) {
        let mut health = 0;
        let mut happiness = 0;
        if self.starving {
            health -= STARVATION_HEALTH;
            happiness -= STARVATION_HAPPINESS;
        }
        if self.dehydrated {
            health -= DEHYDRATION_HEALTH;
            happiness -= DEHYDRATION_HAPPINESS;
        }
        (health, happiness)
    }
}

/// Ration drawn from the given food and water availability.
pub fn ration(food_available: f64, water_available: f64) -> Ration {
    let food = FOOD_PER_COLONIST.min(food_available.max(0.0));
    let water = WATER_PER_COLONIST.min(water_available.max(0.0));
    Ration {
        food,
        water,
        starving: food < FOOD_PER_COLONIST,
        dehydrated: water < WATER_PER_COLONIST,
    }
}
