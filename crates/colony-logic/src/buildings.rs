//! Building variant definitions: rates, energy draw and costs for every kind.
//!
//! Each kind carries a fixed [`BuildingSpec`]. The engine instantiates
//! buildings from these specs and dispatches production on [`BuildingKind`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::buildings::{BASE_CAPACITY, HABITAT_CAPACITY};
use crate::resources::ResourceType;

/// What a building hands back to the colony when it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    /// Adds to a resource ledger.
    Resource(ResourceType),
    /// Raises happiness of every living colonist.
    Happiness,
    /// Grants medical care to a few living colonists.
    Health,
}

/// Fixed parameters shared by every building of one kind.
#[derive(Debug, Clone, Serialize)]
pub struct BuildingSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub output: Output,
    /// Output per level at full energy (resource units, or bonus points).
    pub base_rate: f64,
    /// Energy drawn per turn at full operation.
    pub energy_cost: f64,
    pub base_capacity: u32,
    pub construction_cost: &'static [(ResourceType, f64)],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    Farm,
    WaterPurifier,
    PowerGenerator,
    Mine,
    Habitat,
    Hospital,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 6] = [
        BuildingKind::Farm,
        BuildingKind::WaterPurifier,
        BuildingKind::PowerGenerator,
        BuildingKind::Mine,
        BuildingKind::Habitat,
        BuildingKind::Hospital,
    ];

    /// Construction key accepted by the build action.
    pub fn key(self) -> &'static str {
        match self {
            Self::Farm => "farm",
            Self::WaterPurifier => "purifier",
            Self::PowerGenerator => "generator",
            Self::Mine => "mine",
            Self::Habitat => "habitat",
            Self::Hospital => "hospital",
        }
    }

    pub fn spec(self) -> BuildingSpec {
        use ResourceType::{Energy, Food, Metal, Water};
        match self {
            Self::Farm => BuildingSpec {
                name: "Farm",
                description: "Grows food for the colonists",
                output: Output::Resource(Food),
                base_rate: 15.0,
                energy_cost: 5.0,
                base_capacity: BASE_CAPACITY,
                construction_cost: &[(Metal, 20.0), (Energy, 10.0)],
            },
            Self::WaterPurifier => BuildingSpec {
                name: "Water Purifier",
                description: "Purifies and supplies drinking water",
                output: Output::Resource(Water),
                base_rate: 12.0,
                energy_cost: 8.0,
                base_capacity: BASE_CAPACITY,
                construction_cost: &[(Metal, 25.0), (Energy, 15.0)],
            },
            Self::PowerGenerator => BuildingSpec {
                name: "Power Generator",
                description: "Generates energy for the colony",
                output: Output::Resource(Energy),
                base_rate: 30.0,
                energy_cost: 0.0,
                base_capacity: BASE_CAPACITY,
                construction_cost: &[(Metal, 40.0)],
            },
            Self::Mine => BuildingSpec {
                name: "Mine",
                description: "Extracts metal from the ground",
                output: Output::Resource(Metal),
                base_rate: 8.0,
                energy_cost: 6.0,
                base_capacity: BASE_CAPACITY,
                construction_cost: &[(Metal, 15.0), (Energy, 5.0)],
            },
            Self::Habitat => BuildingSpec {
                name: "Habitat",
                description: "Provides housing for the colonists",
                output: Output::Happiness,
                base_rate: 2.0,
                energy_cost: 3.0,
                base_capacity: HABITAT_CAPACITY,
                construction_cost: &[(Metal, 30.0), (Energy, 5.0)],
            },
            Self::Hospital => BuildingSpec {
                name: "Hospital",
                description: "Looks after the colonists' health",
                output: Output::Health,
                base_rate: 3.0,
                energy_cost: 5.0,
                base_capacity: BASE_CAPACITY,
                construction_cost: &[(Metal, 35.0), (Energy, 10.0)],
            },
        }
    }

    pub fn is_generator(self) -> bool {
        matches!(self, Self::PowerGenerator)
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

impl FromStr for BuildingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.key() == key)
            .ok_or_else(|| s.to_string())
    }
}
