//! Component definitions: the entities a colony owns.
//!
//! Components hold state and their own local rules (clamping, bounded
//! add/remove, per-building production). Cross-entity logic that runs
//! once per turn lives in systems.

mod building;
mod colonist;
mod resources;

pub use building::*;
pub use colonist::*;
pub use resources::*;
