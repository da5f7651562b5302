//! Colonist component: vitals, profession, work record.

use colony_logic::constants::{medical, vitals, wear};
use colony_logic::vitals::{clamp_vital, is_alive, productivity, ration, Profession, Ration};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ColonyError;

/// One inhabitant of the colony. Dead colonists stay in the roster with
/// `health == 0`; nothing but events may touch them again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colonist {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) profession: Profession,
    pub(crate) health: i32,
    pub(crate) happiness: i32,
    pub(crate) productivity: f64,
    pub(crate) days_worked: u32,
}

impl Colonist {
    pub fn new(id: u32, name: impl Into<String>, profession: Profession) -> Self {
        Self {
            id,
            name: name.into(),
            description: describe(profession),
            profession,
            health: vitals::STARTING_HEALTH,
            happiness: vitals::STARTING_HAPPINESS,
            productivity: vitals::STARTING_PRODUCTIVITY,
            days_worked: 0,
        }
    }

    /// New colonist with a random profession.
    pub fn random(id: u32, name: impl Into<String>, rng: &mut impl Rng) -> Self {
        let profession = *Profession::ALL
            .choose(rng)
            .unwrap_or(&Profession::Farmer);
        Self::new(id, name, profession)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn profession(&self) -> Profession {
        self.profession
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn happiness(&self) -> i32 {
        self.happiness
    }

    pub fn productivity(&self) -> f64 {
        self.productivity
    }

    pub fn days_worked(&self) -> u32 {
        self.days_worked
    }

    pub fn is_alive(&self) -> bool {
        is_alive(self.health)
    }

    pub fn set_health(&mut self, value: i32) {
        self.health = clamp_vital(value);
    }

    pub fn set_happiness(&mut self, value: i32) {
        self.happiness = clamp_vital(value);
    }

    pub fn adjust_health(&mut self, delta: i32) {
        self.set_health(self.health.saturating_add(delta));
    }

    pub fn adjust_happiness(&mut self, delta: i32) {
        self.set_happiness(self.happiness.saturating_add(delta));
    }

    pub fn rename(&mut self, name: &str) -> Result<(), ColonyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ColonyError::EmptyName);
        }
        self.name = name.to_string();
        Ok(())
    }

    pub fn set_profession(&mut self, profession: Profession) {
        self.profession = profession;
        self.description = describe(profession);
    }

    /// One day of work. Returns the productivity for reporting, 0 if dead.
    pub fn work(&mut self, rng: &mut impl Rng) -> f64 {
        if !self.is_alive() {
            return 0.0;
        }
        self.days_worked += 1;
        self.productivity =
            productivity(self.health, self.happiness, self.profession.multiplier());

        let (lo, hi) = wear::WORK_HEALTH;
        self.adjust_health(-rng.gen_range(lo..=hi));
        let (lo, hi) = wear::WORK_HAPPINESS;
        self.adjust_happiness(-rng.gen_range(lo..=hi));

        self.productivity
    }

    /// Eat and drink from what is available. Returns what was actually taken.
    pub fn consume(&mut self, food_available: f64, water_available: f64) -> Ration {
        if !self.is_alive() {
            return Ration {
                food: 0.0,
                water: 0.0,
                starving: false,
                dehydrated: false,
            };
        }
        let taken = ration(food_available, water_available);
        let (health, happiness) = taken.penalty();
        self.adjust_health(health);
        self.adjust_happiness(happiness);
        taken
    }

    pub fn receive_medical_care(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.adjust_health(medical::CARE_HEALTH);
        self.adjust_happiness(medical::CARE_HAPPINESS);
    }

    /// A day off: recovers some health and happiness.
    pub fn rest(&mut self, rng: &mut impl Rng) {
        if !self.is_alive() {
            return;
        }
        let (lo, hi) = wear::REST_HEALTH;
        self.adjust_health(rng.gen_range(lo..=hi));
        let (lo, hi) = wear::REST_HAPPINESS;
        self.adjust_happiness(rng.gen_range(lo..=hi));
    }

    /// Passive per-turn update: occasional morale drift.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if !self.is_alive() {
            return;
        }
        if rng.gen_bool(wear::MORALE_DRIFT_CHANCE) {
            self.adjust_happiness(-1);
        }
    }
}

fn describe(profession: Profession) -> String {
    format!("Colonist working as {profession}")
}

impl fmt::Display for Colonist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_alive() { "Alive" } else { "Dead" };
        write!(
            f,
            "{} ({}) - Health: {}, Happiness: {} - {}",
            self.name, self.profession, self.health, self.happiness, status
        )
    }
}
