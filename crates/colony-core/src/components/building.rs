//! Building component: one producer or facility of a given kind.

use colony_logic::buildings::{BuildingKind, Output};
use colony_logic::constants::buildings::MAINTENANCE_RECOVERY_CHANCE;
use colony_logic::production::{
    base_production, energy_draw, generator_output, upgrade_cost, upgraded_capacity,
};
use colony_logic::resources::ResourceType;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ColonyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingStatus {
    Active,
    Inactive,
    Maintenance,
}

impl BuildingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for BuildingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildingStatus {
    type Err = ColonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(ColonyError::InvalidStatus(s.to_string())),
        }
    }
}

/// What one building yields for the energy it was offered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Yield {
    Resource(ResourceType, f64),
    Happiness(i32),
    Health(i32),
    Nothing,
}

/// Result of [`Building::produce`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Production {
    pub output: Yield,
    pub energy_consumed: f64,
}

impl Production {
    const IDLE: Production = Production {
        output: Yield::Nothing,
        energy_consumed: 0.0,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub(crate) id: u32,
    pub(crate) kind: BuildingKind,
    pub(crate) level: u32,
    pub(crate) capacity: u32,
    pub(crate) status: BuildingStatus,
    pub(crate) total_production: f64,
}

impl Building {
    pub fn new(id: u32, kind: BuildingKind) -> Self {
        Self {
            id,
            kind,
            level: 1,
            capacity: kind.spec().base_capacity,
            status: BuildingStatus::Active,
            total_production: 0.0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> BuildingKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.spec().name
    }

    pub fn description(&self) -> &'static str {
        self.kind.spec().description
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Housing slots for a habitat; nominal capacity for everything else.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn status(&self) -> BuildingStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == BuildingStatus::Active
    }

    pub fn set_status(&mut self, status: BuildingStatus) {
        self.status = status;
    }

    /// Output accumulated over full-energy runs only.
    pub fn total_production(&self) -> f64 {
        self.total_production
    }

    pub fn construction_cost(&self) -> &'static [(ResourceType, f64)] {
        self.kind.spec().construction_cost
    }

    /// Run for one turn on `available_energy`. Inactive buildings yield
    /// nothing and draw nothing.
    pub fn produce(&mut self, available_energy: f64) -> Production {
        if !self.is_active() {
            return Production::IDLE;
        }
        let spec = self.kind.spec();
        match spec.output {
            Output::Resource(kind) if self.kind.is_generator() => Production {
                output: Yield::Resource(kind, generator_output(spec.base_rate, self.level)),
                energy_consumed: 0.0,
            },
            Output::Resource(kind) => {
                let out = base_production(
                    spec.base_rate,
                    self.level,
                    available_energy,
                    spec.energy_cost,
                );
                if out.full_power {
                    self.total_production += out.amount;
                }
                Production {
                    output: Yield::Resource(kind, out.amount),
                    energy_consumed: energy_draw(available_energy, spec.energy_cost),
                }
            }
            Output::Happiness | Output::Health if available_energy < spec.energy_cost => {
                Production::IDLE
            }
            Output::Happiness => Production {
                output: Yield::Happiness(self.bonus(spec.base_rate)),
                energy_consumed: spec.energy_cost,
            },
            Output::Health => Production {
                output: Yield::Health(self.bonus(spec.base_rate)),
                energy_consumed: spec.energy_cost,
            },
        }
    }

    fn bonus(&self, rate: f64) -> i32 {
        (rate * self.level as f64) as i32
    }

    /// Price of the next level, without changing anything.
    pub fn upgrade_cost(&self) -> Vec<(ResourceType, f64)> {
        self.construction_cost()
            .iter()
            .map(|(kind, amount)| (*kind, upgrade_cost(*amount, self.level)))
            .collect()
    }

    /// Go up one level. Returns the cost that applied to this step.
    pub fn upgrade(&mut self) -> Vec<(ResourceType, f64)> {
        let cost = self.upgrade_cost();
        self.level += 1;
        self.capacity = upgraded_capacity(self.capacity);
        cost
    }

    /// Passive per-turn update: buildings in maintenance may come back.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if self.status == BuildingStatus::Maintenance && rng.gen_bool(MAINTENANCE_RECOVERY_CHANCE)
        {
            self.status = BuildingStatus::Active;
        }
    }
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (level {}, {})", self.name(), self.level, self.status)
    }
}
