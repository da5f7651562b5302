//! Pure production logic: energy-limited output, energy draw, upgrade scaling.

use crate::constants::buildings::{
    PARTIAL_ENERGY_EFFICIENCY, UPGRADE_CAPACITY_FACTOR, UPGRADE_COST_FACTOR,
};

/// Result of running the base production formula once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseOutput {
    pub amount: f64,
    /// True when the building had all the energy it asked for. Only these
    /// runs count toward cumulative production.
    pub full_power: bool,
}

/// Output of an energy-consuming building at `level`.
///
/// With enough energy the output is `base * level`. Short on energy, the
/// output falls proportionally to the shortfall and is halved on top.
pub fn base_production(base: f64, level: u32, available_energy: f64, energy_cost: f64) -> BaseOutput {
    let nominal = base * level as f64;
    if energy_cost > 0.0 && available_energy < energy_cost {
        let ratio = (available_energy / energy_cost).max(0.0);
        BaseOutput {
            amount: nominal * ratio * PARTIAL_ENERGY_EFFICIENCY,
            full_power: false,
        }
    } else {
        BaseOutput {
            amount: nominal,
            full_power: true,
        }
    }
}

/// Energy a resource building takes from the turn's allocation.
pub fn energy_draw(available_energy: f64, energy_cost: f64) -> f64 {
    if available_energy >= energy_cost {
        energy_cost
    } else {
        available_energy.max(0.0)
    }
}

/// Energy generator output: flat per level, no energy consumed.
pub fn generator_output(base: f64, level: u32) -> f64 {
    base * level as f64
}

/// Cost of taking a building from `level` to `level + 1`.
pub fn upgrade_cost(original: f64, level: u32) -> f64 {
    original * level as f64 * UPGRADE_COST_FACTOR
}

/// Capacity after one upgrade, rounded down.
pub fn upgraded_capacity(capacity: u32) -> u32 {
    (capacity as f64 * UPGRADE_CAPACITY_FACTOR).floor() as u32
}
