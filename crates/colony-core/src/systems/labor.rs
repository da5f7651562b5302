//! Work pass - every living colonist puts in a day.

use rand::Rng;

use crate::components::Colonist;

/// Run a work day for every living colonist. Returns the summed
/// productivity, which is informational only.
pub fn work_system(colonists: &mut [Colonist], rng: &mut impl Rng) -> f64 {
    colonists
        .iter_mut()
        .filter(|c| c.is_alive())
        .map(|c| c.work(rng))
        .sum()
}
