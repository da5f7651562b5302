//! Passive upkeep and death accounting.

use rand::Rng;

use crate::components::{Building, Colonist};

/// Per-turn passive update for every colonist and building.
pub fn upkeep_system(colonists: &mut [Colonist], buildings: &mut [Building], rng: &mut impl Rng) {
    for colonist in colonists.iter_mut() {
        colonist.tick(rng);
    }
    for building in buildings.iter_mut() {
        building.tick(rng);
    }
}

/// Recount the dead. Returns how many died since the last count and
/// stores the new total.
pub fn death_system(colonists: &[Colonist], total_deaths: &mut u32) -> Option<u32> {
    let dead = colonists.iter().filter(|c| !c.is_alive()).count() as u32;
    if dead > *total_deaths {
        let new_deaths = dead - *total_deaths;
        *total_deaths = dead;
        Some(new_deaths)
    } else {
        None
    }
}
