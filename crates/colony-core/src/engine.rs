//! Colony engine - the aggregate root and its turn pipeline

use std::collections::BTreeMap;
use std::fmt;

use colony_logic::buildings::BuildingKind;
use colony_logic::constants::colony::{STARTING_COLONISTS, STARTING_DAY};
use colony_logic::resources::ResourceType;
use colony_logic::vitals::Profession;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::error::ColonyError;
use crate::systems::*;

/// Buildings every new colony starts with, in construction order.
const SEED_BUILDINGS: [BuildingKind; 3] = [
    BuildingKind::PowerGenerator,
    BuildingKind::Farm,
    BuildingKind::WaterPurifier,
];

/// One colony: its people, buildings, stockpiles and history.
///
/// The colony exclusively owns every entity in it. Colonists are never
/// removed; death is a state. Buildings are only added through
/// [`Colony::build`], which pays for them first.
#[derive(Debug, Clone)]
pub struct Colony {
    pub(crate) name: String,
    pub(crate) day: u32,
    pub(crate) colonists: Vec<Colonist>,
    pub(crate) buildings: Vec<Building>,
    pub(crate) resources: ResourceLedger,
    pub(crate) history: Vec<Event>,
    pub(crate) total_deaths: u32,
    pub(crate) buildings_built: u32,
    /// Production multiplier for the next production pass only.
    pub(crate) efficiency_bonus: f64,
    pub(crate) next_colonist_id: u32,
    pub(crate) next_building_id: u32,
}

/// The event that fired during a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventReport {
    pub name: String,
    pub summary: String,
}

/// What happened during one call to [`Colony::process_turn`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Day on which the turn was played (before the day advanced).
    pub day: u32,
    /// Non-zero production totals, generators included.
    pub production: BTreeMap<ResourceType, f64>,
    /// Non-zero food and water consumed.
    pub consumption: BTreeMap<ResourceType, f64>,
    pub event: Option<EventReport>,
    pub alerts: Vec<String>,
}

impl Colony {
    /// A colony with no colonists, no buildings and the starting ledger.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            day: STARTING_DAY,
            colonists: Vec::new(),
            buildings: Vec::new(),
            resources: ResourceLedger::new(),
            history: Vec::new(),
            total_deaths: 0,
            buildings_built: 0,
            efficiency_bonus: 1.0,
            next_colonist_id: 1,
            next_building_id: 1,
        }
    }

    /// Standard seed colony: three colonists plus a generator, a farm and
    /// a purifier paid for out of the starting stockpiles.
    pub fn new(name: impl Into<String>, rng: &mut impl Rng) -> Self {
        Self::with_colonists(name, STARTING_COLONISTS, rng)
    }

    pub fn with_colonists(name: impl Into<String>, count: u32, rng: &mut impl Rng) -> Self {
        let mut colony = Self::empty(name);
        for _ in 0..count {
            colony.add_colonist(None, rng);
        }
        for kind in SEED_BUILDINGS {
            if let Err(e) = colony.build(kind.key()) {
                log::warn!("Seed {} not built: {}", kind, e);
            }
        }
        colony
    }

    // --- Accessors ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn colonists(&self) -> &[Colonist] {
        &self.colonists
    }

    pub fn colonists_mut(&mut self) -> &mut [Colonist] {
        &mut self.colonists
    }

    pub fn living_colonists(&self) -> impl Iterator<Item = &Colonist> {
        self.colonists.iter().filter(|c| c.is_alive())
    }

    pub fn living_colonists_mut(&mut self) -> impl Iterator<Item = &mut Colonist> {
        self.colonists.iter_mut().filter(|c| c.is_alive())
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn resources(&self) -> &ResourceLedger {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceLedger {
        &mut self.resources
    }

    /// Append-only log of every event applied to this colony.
    pub fn history(&self) -> &[Event] {
        &self.history
    }

    pub fn total_deaths(&self) -> u32 {
        self.total_deaths
    }

    pub fn buildings_built(&self) -> u32 {
        self.buildings_built
    }

    pub fn efficiency_bonus(&self) -> f64 {
        self.efficiency_bonus
    }

    pub fn set_efficiency_bonus(&mut self, multiplier: f64) {
        self.efficiency_bonus = multiplier;
    }

    pub fn alive_count(&self) -> usize {
        self.living_colonists().count()
    }

    /// Housing slots across active habitats. Zero means unlimited.
    pub fn housing_capacity(&self) -> u32 {
        self.buildings
            .iter()
            .filter(|b| b.kind() == BuildingKind::Habitat && b.is_active())
            .map(Building::capacity)
            .sum()
    }

    pub fn average_health(&self) -> f64 {
        self.average(|c| c.health())
    }

    pub fn average_happiness(&self) -> f64 {
        self.average(|c| c.happiness())
    }

    fn average(&self, vital: impl Fn(&Colonist) -> i32) -> f64 {
        let alive = self.alive_count();
        if alive == 0 {
            return 0.0;
        }
        let total: i32 = self.living_colonists().map(vital).sum();
        total as f64 / alive as f64
    }

    // --- Player actions ---

    /// Construct a building by type key. Either the full cost is paid and
    /// the building is added, or nothing changes.
    pub fn build(&mut self, key: &str) -> Result<String, ColonyError> {
        let kind: BuildingKind = key
            .parse()
            .map_err(|_| ColonyError::InvalidBuildingType(key.to_string()))?;

        self.resources.spend(kind.spec().construction_cost)?;

        let building = Building::new(self.next_building_id, kind);
        self.next_building_id += 1;
        self.buildings.push(building);
        self.buildings_built += 1;

        log::debug!("Built {} (#{})", kind, self.buildings_built);
        Ok(format!("{kind} built successfully!"))
    }

    /// Pay the scaled cost and raise a building one level.
    pub fn upgrade_building(&mut self, index: usize) -> Result<String, ColonyError> {
        let building = self
            .buildings
            .get_mut(index)
            .ok_or(ColonyError::UnknownBuilding(index))?;

        self.resources.spend(&building.upgrade_cost())?;
        building.upgrade();

        Ok(format!(
            "{} upgraded to level {}!",
            building.name(),
            building.level()
        ))
    }

    pub fn set_building_status(&mut self, index: usize, status: &str) -> Result<String, ColonyError> {
        let status: BuildingStatus = status.parse()?;
        let building = self
            .buildings
            .get_mut(index)
            .ok_or(ColonyError::UnknownBuilding(index))?;
        building.set_status(status);
        Ok(format!("{} is now {}", building.name(), status))
    }

    /// Admit a new colonist with a random profession, if housing allows.
    pub fn hire_colonist(
        &mut self,
        name: Option<&str>,
        rng: &mut impl Rng,
    ) -> Result<String, ColonyError> {
        let name = match name {
            Some(n) if n.trim().is_empty() => return Err(ColonyError::EmptyName),
            Some(n) => Some(n.trim()),
            None => None,
        };

        let housing = self.housing_capacity();
        if housing > 0 && self.alive_count() >= housing as usize {
            return Err(ColonyError::HousingFull);
        }

        let colonist = self.add_colonist(name, rng);
        Ok(format!(
            "{} joined the colony as a {}!",
            colonist.name(),
            colonist.profession()
        ))
    }

    fn add_colonist(&mut self, name: Option<&str>, rng: &mut impl Rng) -> &Colonist {
        let name = match name {
            Some(n) => n.to_string(),
            None => format!("Colonist {}", self.colonists.len() + 1),
        };
        let colonist = Colonist::random(self.next_colonist_id, name, rng);
        self.next_colonist_id += 1;
        self.colonists.push(colonist);
        &self.colonists[self.colonists.len() - 1]
    }

    /// Give one colonist a day off.
    pub fn rest_colonist(&mut self, id: u32, rng: &mut impl Rng) -> Result<String, ColonyError> {
        let colonist = self
            .colonists
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(ColonyError::UnknownColonist(id))?;
        if !colonist.is_alive() {
            return Err(ColonyError::ColonistDead(id));
        }
        colonist.rest(rng);
        Ok(format!("{} rested and feels better", colonist.name()))
    }

    pub fn rename_colonist(&mut self, id: u32, name: &str) -> Result<String, ColonyError> {
        let colonist = self
            .colonists
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(ColonyError::UnknownColonist(id))?;
        let old = colonist.name().to_string();
        colonist.rename(name)?;
        Ok(format!("{} is now called {}", old, colonist.name()))
    }

    /// Move a living colonist to another profession.
    pub fn assign_profession(&mut self, id: u32, profession: &str) -> Result<String, ColonyError> {
        let profession: Profession = profession
            .parse()
            .map_err(|_| ColonyError::InvalidProfession(profession.to_string()))?;
        let colonist = self
            .colonists
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(ColonyError::UnknownColonist(id))?;
        if !colonist.is_alive() {
            return Err(ColonyError::ColonistDead(id));
        }
        colonist.set_profession(profession);
        Ok(format!("{} now works as {}", colonist.name(), profession))
    }

    // --- Turn pipeline ---

    /// Play one turn. Steps run in a fixed order; each depends on the state
    /// the previous one left behind.
    pub fn process_turn(&mut self, events: &EventEngine, rng: &mut impl Rng) -> TurnReport {
        let mut report = TurnReport {
            day: self.day,
            ..Default::default()
        };

        // 1. Energy generation
        let generated = power_system(&mut self.buildings, &mut self.resources);
        if generated > 0.0 {
            report.production.insert(ResourceType::Energy, generated);
        }

        // 2. Production, against the post-generation energy allocation
        let pass = production_system(&mut self.buildings, &mut self.resources, self.efficiency_bonus);
        self.efficiency_bonus = 1.0;
        for (kind, amount) in pass.produced {
            *report.production.entry(kind).or_insert(0.0) += amount;
        }

        // 3. Work
        let output = work_system(&mut self.colonists, rng);
        log::debug!("Work output {:.2}", output);

        // 4. Consumption
        let eaten = consumption_system(&mut self.colonists, &mut self.resources);
        if eaten.food > 0.0 {
            report.consumption.insert(ResourceType::Food, eaten.food);
        }
        if eaten.water > 0.0 {
            report.consumption.insert(ResourceType::Water, eaten.water);
        }

        // 5. Hospitals and habitats
        let effects = facilities_system(&mut self.buildings, &mut self.colonists, pass.energy_remaining);
        log::debug!("Treated {}, cheered {}", effects.treated, effects.cheered);

        // 6. Passive updates
        upkeep_system(&mut self.colonists, &mut self.buildings, rng);

        // 7. Deaths
        if let Some(died) = death_system(&self.colonists, &mut self.total_deaths) {
            report.alerts.push(format!("{died} colonist(s) died!"));
        }

        // 8. Random event
        if let Some(mut event) = events.generate(rng) {
            let summary = event.apply(self, rng);
            log::info!("Event on day {}: {}", self.day, event.name);
            report.event = Some(EventReport {
                name: event.name.clone(),
                summary,
            });
            self.history.push(event);
        }

        // 9. Low stock
        report.alerts.extend(low_resource_alerts(&self.resources));

        // 10. Next day
        self.day += 1;

        for alert in &report.alerts {
            log::warn!("{}", alert);
        }
        log::info!(
            "{}: day {} done, {} alive, {} alert(s)",
            self.name,
            report.day,
            self.alive_count(),
            report.alerts.len()
        );
        report
    }
}

impl fmt::Display for Colony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Colony {} - Day {} - {} colonists alive",
            self.name,
            self.day,
            self.alive_count()
        )
    }
}
