//! Resource kinds and their starting stockpiles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four resources tracked by a colony ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Food,
    Water,
    Energy,
    Metal,
}

impl ResourceType {
    /// Ledger order. Alerts and reports iterate in this order.
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Food,
        ResourceType::Water,
        ResourceType::Energy,
        ResourceType::Metal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Water => "water",
            Self::Energy => "energy",
            Self::Metal => "metal",
        }
    }

    /// Capitalized label used in alerts and display strings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Water => "Water",
            Self::Energy => "Energy",
            Self::Metal => "Metal",
        }
    }

    /// Starting (quantity, capacity) for a new colony.
    pub fn starting_stock(self) -> (f64, f64) {
        match self {
            Self::Food => (50.0, 1000.0),
            Self::Water => (50.0, 1000.0),
            Self::Energy => (100.0, 1000.0),
            Self::Metal => (100.0, 500.0),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "water" => Ok(Self::Water),
            "energy" => Ok(Self::Energy),
            "metal" => Ok(Self::Metal),
            other => Err(other.to_string()),
        }
    }
}
