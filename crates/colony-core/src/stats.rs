//! Read-only views of a colony for status screens and JSON output.

use std::collections::BTreeMap;

use colony_logic::buildings::BuildingKind;
use colony_logic::conditions::{evaluate, GameStatus};
use colony_logic::constants::colony::RECENT_EVENTS;
use colony_logic::resources::ResourceType;
use colony_logic::vitals::Profession;
use serde::{Deserialize, Serialize};

use crate::components::{Building, BuildingStatus, Colonist, Resource};
use crate::engine::Colony;
use crate::systems::{Event, EventEffect, EventKind};

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceView {
    pub quantity: f64,
    pub capacity: f64,
    pub percent: f64,
}

impl From<&Resource> for ResourceView {
    fn from(r: &Resource) -> Self {
        Self {
            quantity: round_to(r.quantity(), 2),
            capacity: r.capacity(),
            percent: round_to(r.percent_full(), 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingView {
    pub id: u32,
    pub kind: BuildingKind,
    pub name: String,
    pub level: u32,
    pub capacity: u32,
    pub status: BuildingStatus,
    pub total_production: f64,
}

impl From<&Building> for BuildingView {
    fn from(b: &Building) -> Self {
        Self {
            id: b.id(),
            kind: b.kind(),
            name: b.name().to_string(),
            level: b.level(),
            capacity: b.capacity(),
            status: b.status(),
            total_production: round_to(b.total_production(), 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonistView {
    pub id: u32,
    pub name: String,
    pub profession: Profession,
    pub health: i32,
    pub happiness: i32,
    pub productivity: f64,
    pub days_worked: u32,
    pub alive: bool,
}

impl From<&Colonist> for ColonistView {
    fn from(c: &Colonist) -> Self {
        Self {
            id: c.id(),
            name: c.name().to_string(),
            profession: c.profession(),
            health: c.health(),
            happiness: c.happiness(),
            productivity: round_to(c.productivity(), 2),
            days_worked: c.days_worked(),
            alive: c.is_alive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventView {
    pub kind: EventKind,
    pub name: String,
    pub description: String,
    pub effects: Vec<EventEffect>,
    pub applied: bool,
}

impl From<&Event> for EventView {
    fn from(e: &Event) -> Self {
        Self {
            kind: e.kind,
            name: e.name.clone(),
            description: e.description.clone(),
            effects: e.effects.clone(),
            applied: e.is_applied(),
        }
    }
}

/// Snapshot of everything a status screen shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub name: String,
    pub day: u32,
    pub alive_count: usize,
    pub dead_count: usize,
    pub avg_health: f64,
    pub avg_happiness: f64,
    pub building_count: usize,
    pub housing_capacity: u32,
    pub resources: BTreeMap<ResourceType, ResourceView>,
    pub buildings: Vec<BuildingView>,
    /// Living colonists only.
    pub colonists: Vec<ColonistView>,
    /// Most recent events, oldest first.
    pub recent_events: Vec<EventView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionReport {
    pub status: GameStatus,
    pub message: String,
}

impl Colony {
    pub fn statistics(&self) -> Statistics {
        let alive = self.alive_count();
        let skip = self.history.len().saturating_sub(RECENT_EVENTS);

        Statistics {
            name: self.name.clone(),
            day: self.day,
            alive_count: alive,
            dead_count: self.colonists.len() - alive,
            avg_health: round_to(self.average_health(), 1),
            avg_happiness: round_to(self.average_happiness(), 1),
            building_count: self.buildings.len(),
            housing_capacity: self.housing_capacity(),
            resources: self
                .resources
                .iter()
                .map(|r| (r.kind(), ResourceView::from(r)))
                .collect(),
            buildings: self.buildings.iter().map(BuildingView::from).collect(),
            colonists: self.living_colonists().map(ColonistView::from).collect(),
            recent_events: self.history[skip..].iter().map(EventView::from).collect(),
        }
    }

    /// Win/loss state, recomputed on every call.
    pub fn check_conditions(&self) -> ConditionReport {
        let alive = self.alive_count();
        let status = evaluate(alive, self.average_happiness());
        let message = match status {
            GameStatus::Defeat => "All colonists have died. The colony is lost!".to_string(),
            GameStatus::Victory => {
                format!("Victory! The colony thrives with {alive} happy colonists!")
            }
            GameStatus::Active => String::new(),
        };
        ConditionReport { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::EventEngine;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_statistics_of_seed_colony() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut colony = Colony::new("Stats", &mut rng);
        colony.colonists_mut()[2].set_health(0);
        colony.colonists_mut()[0].set_happiness(75);

        let stats = colony.statistics();

        assert_eq!(stats.alive_count, 2);
        assert_eq!(stats.dead_count, 1);
        assert_eq!(stats.avg_health, 100.0);
        assert_eq!(stats.avg_happiness, 77.5);
        assert_eq!(stats.building_count, 3);
        assert_eq!(stats.housing_capacity, 0);
        assert_eq!(stats.colonists.len(), 2);
        assert_eq!(stats.resources[&ResourceType::Metal].percent, 3.0);
        assert_eq!(stats.buildings[0].name, "Power Generator");
    }

    #[test]
    fn test_recent_events_capped() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut colony = Colony::new("Busy", &mut rng);
        let engine = EventEngine::new(1.0);
        for _ in 0..8 {
            colony.process_turn(&engine, &mut rng);
        }

        let stats = colony.statistics();

        assert_eq!(colony.history().len(), 8);
        assert_eq!(stats.recent_events.len(), 5);
        assert_eq!(stats.recent_events[4].name, colony.history()[7].name);
    }

    #[test]
    fn test_conditions() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut colony = Colony::new("Cond", &mut rng);
        assert_eq!(colony.check_conditions().status, GameStatus::Active);
        assert!(colony.check_conditions().message.is_empty());

        for c in colony.colonists_mut() {
            c.set_health(0);
        }
        let report = colony.check_conditions();
        assert_eq!(report.status, GameStatus::Defeat);
        assert_eq!(report.message, "All colonists have died. The colony is lost!");
    }

    #[test]
    fn test_victory() {
        let mut rng = StdRng::seed_from_u64(8);
        let colony = Colony::with_colonists("Thrive", 20, &mut rng);

        let report = colony.check_conditions();

        assert_eq!(report.status, GameStatus::Victory);
        assert_eq!(
            report.message,
            "Victory! The colony thrives with 20 happy colonists!"
        );
    }
}
