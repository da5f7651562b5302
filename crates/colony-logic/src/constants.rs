//! Game constants for consumption, penalties, thresholds and chances.
//!
//! Plain numeric constants with no engine dependency. The colony engine
//! and the headless harness both read these.

pub mod vitals {
    /// Upper bound for health and happiness.
    pub const MAX: i32 = 100;
    pub const MIN: i32 = 0;
    pub const STARTING_HEALTH: i32 = 100;
    pub const STARTING_HAPPINESS: i32 = 80;
    pub const STARTING_PRODUCTIVITY: f64 = 1.0;
    /// Productivity scale applied on top of health × happiness.
    pub const PRODUCTIVITY_SCALE: f64 = 1.5;
}

pub mod consumption {
    /// Food each living colonist needs per turn.
    pub const FOOD_PER_COLONIST: f64 = 5.0;
    /// Water each living colonist needs per turn.
    pub const WATER_PER_COLONIST: f64 = 3.0;

    pub const STARVATION_HEALTH: i32 = 10;
    pub const STARVATION_HAPPINESS: i32 = 15;
    pub const DEHYDRATION_HEALTH: i32 = 15;
    pub const DEHYDRATION_HAPPINESS: i32 = 10;
}

pub mod wear {
    /// Inclusive health loss range for one day of work.
    pub const WORK_HEALTH: (i32, i32) = (1, 3);
    /// Inclusive happiness loss range for one day of work.
    pub const WORK_HAPPINESS: (i32, i32) = (1, 2);
    /// Inclusive health gain range for a rest day.
    pub const REST_HEALTH: (i32, i32) = (5, 10);
    pub const REST_HAPPINESS: (i32, i32) = (3, 7);
    /// Chance per turn that a living colonist loses 1 happiness.
    pub const MORALE_DRIFT_CHANCE: f64 = 0.1;
}

pub mod medical {
    pub const CARE_HEALTH: i32 = 20;
    pub const CARE_HAPPINESS: i32 = 5;
    /// Patients a powered hospital treats per turn.
    pub const PATIENTS_PER_HOSPITAL: usize = 3;
}

pub mod buildings {
    pub const BASE_CAPACITY: u32 = 10;
    pub const HABITAT_CAPACITY: u32 = 5;
    /// Output multiplier when a building runs on partial energy.
    pub const PARTIAL_ENERGY_EFFICIENCY: f64 = 0.5;
    pub const UPGRADE_COST_FACTOR: f64 = 1.5;
    pub const UPGRADE_CAPACITY_FACTOR: f64 = 1.3;
    /// Chance per turn that a building in maintenance returns to service.
    pub const MAINTENANCE_RECOVERY_CHANCE: f64 = 0.3;
}

pub mod events {
    /// Chance that any event fires in a given turn.
    pub const TRIGGER_CHANCE: f64 = 0.3;
    pub const TECH_BREAKTHROUGH_EFFICIENCY: f64 = 1.2;
}

pub mod colony {
    pub const STARTING_DAY: u32 = 1;
    pub const STARTING_COLONISTS: u32 = 3;
    /// Percent-full below which a low-resource alert is raised.
    pub const LOW_RESOURCE_PERCENT: f64 = 20.0;
    pub const VICTORY_POPULATION: usize = 20;
    /// Average happiness that must be exceeded (strictly) for victory.
    pub const VICTORY_HAPPINESS: f64 = 70.0;
    /// Number of history entries included in statistics.
    pub const RECENT_EVENTS: usize = 5;
}
