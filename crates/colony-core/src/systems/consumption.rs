//! Consumption pass - colonists eat and drink from the turn's stores.

use crate::components::{Colonist, ResourceLedger};

/// Totals from one consumption pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Consumption {
    pub food: f64,
    pub water: f64,
    pub starving: usize,
    pub dehydrated: usize,
}

/// Feed living colonists first-come-first-served.
///
/// Food and water are read from the ledger once, at the start of the pass.
/// Each colonist draws from what the ones before them left, so the end of
/// the roster goes short first.
pub fn consumption_system(colonists: &mut [Colonist], ledger: &mut ResourceLedger) -> Consumption {
    let mut food_left = ledger.food.quantity();
    let mut water_left = ledger.water.quantity();
    let mut totals = Consumption::default();

    for colonist in colonists.iter_mut().filter(|c| c.is_alive()) {
        let taken = colonist.consume(food_left, water_left);
        food_left -= taken.food;
        water_left -= taken.water;

        totals.food += taken.food;
        totals.water += taken.water;
        totals.starving += taken.starving as usize;
        totals.dehydrated += taken.dehydrated as usize;
    }

    ledger.food.remove(totals.food);
    ledger.water.remove(totals.water);

    if totals.starving > 0 || totals.dehydrated > 0 {
        log::warn!(
            "{} colonist(s) went hungry, {} went thirsty",
            totals.starving,
            totals.dehydrated
        );
    }
    totals
}
