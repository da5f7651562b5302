//! Systems - one function per pass of the turn pipeline
//!
//! Each system works on the colony's slices and ledger directly. The
//! orchestration order lives in [`crate::engine::Colony::process_turn`].

mod alerts;
mod consumption;
mod events;
mod facilities;
mod labor;
mod power;
mod production;
mod upkeep;

pub use alerts::*;
pub use consumption::*;
pub use events::*;
pub use facilities::*;
pub use labor::*;
pub use power::*;
pub use production::*;
pub use upkeep::*;
