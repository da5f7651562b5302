//! Colony Core - turn-based colony simulation engine
//!
//! A small colony of settlers lives off what its buildings produce. Every
//! turn runs a fixed pipeline: generate energy, produce, work, eat and
//! drink, apply hospital and habitat effects, tick, count the dead, roll
//! for a random event, raise low-stock alerts, and advance the day.
//!
//! # Architecture
//!
//! - **Components**: the entities a colony owns (ledger, colonists, buildings)
//! - **Systems**: one function per pipeline pass, plus the event engine
//! - **Engine**: the [`Colony`](engine::Colony) aggregate and its turn order
//! - **Session**: config, RNG, event engine and save store around one colony
//!
//! # Example
//!
//! ```rust,no_run
//! use colony_core::prelude::*;
//!
//! let mut session = Session::new_game(GameConfig::default()).unwrap();
//! session.build("mine").unwrap();
//!
//! loop {
//!     let report = session.advance();
//!     if session.conditions().status != GameStatus::Active {
//!         break;
//!     }
//!     println!("day {}: {} alert(s)", report.day, report.alerts.len());
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod session;
pub mod stats;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::GameConfig;
    pub use crate::engine::{Colony, EventReport, TurnReport};
    pub use crate::error::ColonyError;
    pub use crate::session::Session;
    pub use crate::stats::{ConditionReport, Statistics};
    pub use crate::systems::{Event, EventEngine, EventKind};
    pub use colony_logic::conditions::GameStatus;
    pub use colony_logic::resources::ResourceType;
}
