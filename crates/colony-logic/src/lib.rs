//! Pure colony rules.
//!
//! This crate contains the game rules that are independent of any state
//! container, persistence, or randomness. Functions take plain data and
//! return results, which keeps them unit-testable and shared between the
//! engine and the headless harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`buildings`] | Building kinds and their fixed rates, energy draw, costs |
//! | [`conditions`] | Victory / defeat evaluation |
//! | [`constants`] | Consumption, penalties, thresholds, chances |
//! | [`production`] | Energy-limited output, energy draw, upgrade scaling |
//! | [`resources`] | Resource kinds and starting stockpiles |
//! | [`vitals`] | Professions, clamping, productivity, rations |

pub mod buildings;
pub mod conditions;
pub mod constants;
pub mod production;
pub mod resources;
pub mod vitals;
