//! Session - the explicit context handle a front end drives.
//!
//! A session owns one colony together with everything needed to play it:
//! the RNG, the event engine, the save store and the config. Every
//! mutating call takes `&mut self`, so turns on one colony never overlap.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::engine::{Colony, TurnReport};
use crate::error::ColonyError;
use crate::persistence::{FileStore, SaveError};
use crate::stats::{ConditionReport, Statistics};
use crate::systems::EventEngine;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Save(#[from] SaveError),
}

pub struct Session {
    colony: Colony,
    rng: StdRng,
    events: EventEngine,
    store: FileStore,
    config: GameConfig,
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn logged(result: Result<String, ColonyError>) -> Result<String, ColonyError> {
    match &result {
        Ok(msg) => log::info!("{}", msg),
        Err(e) => log::warn!("{}", e),
    }
    result
}

impl Session {
    /// Start a fresh colony. Nothing is written until the first save.
    pub fn new_game(config: GameConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let mut rng = make_rng(config.seed);
        let colony =
            Colony::with_colonists(config.colony_name.clone(), config.starting_colonists, &mut rng);
        log::info!("New colony {} founded", colony.name());
        Ok(Self::assemble(colony, rng, config))
    }

    /// Resume the colony saved at `config.save_path`, if there is one.
    /// With a fixed seed the RNG is seeded from `seed ^ day`.
    pub fn load_game(config: GameConfig) -> Result<Option<Self>, SessionError> {
        config.validate()?;
        let store = FileStore::new(&config.save_path);
        let Some(colony) = store.load()? else {
            return Ok(None);
        };
        log::info!("Loaded {} from {}", colony, store.path().display());
        let rng = make_rng(config.seed.map(|seed| seed ^ u64::from(colony.day())));
        Ok(Some(Self::assemble(colony, rng, config)))
    }

    fn assemble(colony: Colony, rng: StdRng, config: GameConfig) -> Self {
        Self {
            colony,
            rng,
            events: EventEngine::new(config.event_chance),
            store: FileStore::new(&config.save_path),
            config,
        }
    }

    pub fn colony(&self) -> &Colony {
        &self.colony
    }

    pub fn colony_mut(&mut self) -> &mut Colony {
        &mut self.colony
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Play one turn, then autosave if enabled. A failed autosave does not
    /// undo the turn; it is logged and reported as an alert.
    pub fn advance(&mut self) -> TurnReport {
        let mut report = self.colony.process_turn(&self.events, &mut self.rng);
        if self.config.autosave {
            if let Err(e) = self.store.save(&self.colony) {
                log::error!("Autosave to {} failed: {}", self.store.path().display(), e);
                report.alerts.push(format!("Autosave failed: {e}"));
            }
        }
        report
    }

    pub fn build(&mut self, key: &str) -> Result<String, ColonyError> {
        logged(self.colony.build(key))
    }

    pub fn upgrade(&mut self, index: usize) -> Result<String, ColonyError> {
        logged(self.colony.upgrade_building(index))
    }

    pub fn set_building_status(&mut self, index: usize, status: &str) -> Result<String, ColonyError> {
        logged(self.colony.set_building_status(index, status))
    }

    pub fn hire(&mut self, name: Option<&str>) -> Result<String, ColonyError> {
        logged(self.colony.hire_colonist(name, &mut self.rng))
    }

    pub fn rest(&mut self, id: u32) -> Result<String, ColonyError> {
        logged(self.colony.rest_colonist(id, &mut self.rng))
    }

    pub fn rename(&mut self, id: u32, name: &str) -> Result<String, ColonyError> {
        logged(self.colony.rename_colonist(id, name))
    }

    pub fn assign(&mut self, id: u32, profession: &str) -> Result<String, ColonyError> {
        logged(self.colony.assign_profession(id, profession))
    }

    pub fn statistics(&self) -> Statistics {
        self.colony.statistics()
    }

    pub fn conditions(&self) -> ConditionReport {
        self.colony.check_conditions()
    }

    pub fn save(&self) -> Result<(), SaveError> {
        self.store.save(&self.colony)
    }

    /// Throw the current colony away, save file included, and found a new one.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.store.delete()?;
        self.colony = Colony::with_colonists(
            self.config.colony_name.clone(),
            self.config.starting_colonists,
            &mut self.rng,
        );
        log::info!("Colony {} restarted", self.colony.name());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::fs;
    use std::path::Path;

    fn config_in(dir: &Path) -> GameConfig {
        GameConfig {
            colony_name: "Session".into(),
            save_path: dir.join("colony.sav"),
            seed: Some(17),
            event_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_game_rejects_invalid_config() {
        let config = GameConfig {
            event_chance: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new_game(config),
            Err(SessionError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_advance_autosaves_and_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new_game(config_in(dir.path())).unwrap();
        assert!(!session.store().exists());

        session.advance();
        session.advance();

        let loaded = Session::load_game(config_in(dir.path())).unwrap().unwrap();
        assert_eq!(loaded.colony().day(), 3);
        assert_eq!(loaded.colony().colonists(), session.colony().colonists());
    }

    #[test]
    fn test_resumed_rng_depends_on_day() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new_game(config_in(dir.path())).unwrap();
        session.advance();

        let mut day2 = Session::load_game(config_in(dir.path())).unwrap().unwrap();
        let first: u64 = day2.rng.gen();
        assert_eq!(first, StdRng::seed_from_u64(17 ^ 2).gen::<u64>());

        day2.advance();
        let mut day3 = Session::load_game(config_in(dir.path())).unwrap().unwrap();
        assert_eq!(day3.colony().day(), 3);
        assert_ne!(day3.rng.gen::<u64>(), first);
    }

    #[test]
    fn test_load_without_save_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Session::load_game(config_in(dir.path())).unwrap().is_none());
    }

    #[test]
    fn test_autosave_failure_becomes_alert() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let config = GameConfig {
            save_path: blocker.join("colony.sav"),
            ..config_in(dir.path())
        };
        let mut session = Session::new_game(config).unwrap();

        let report = session.advance();

        assert_eq!(session.colony().day(), 2);
        assert!(report.alerts.iter().any(|a| a.starts_with("Autosave failed:")));
    }

    #[test]
    fn test_restart_deletes_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new_game(config_in(dir.path())).unwrap();
        session.advance();
        assert!(session.store().exists());

        session.restart().unwrap();

        assert!(!session.store().exists());
        assert_eq!(session.colony().day(), 1);
        assert_eq!(session.colony().colonists().len(), 3);
    }

    #[test]
    fn test_actions_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new_game(config_in(dir.path())).unwrap();

        assert!(session.build("castle").is_err());
        assert!(session.hire(Some("Nova")).is_ok());
        assert_eq!(session.statistics().alive_count, 4);
        assert!(session.rest(4).is_ok());
        assert!(session.rename(4, "Lyra").is_ok());
        assert_eq!(session.colony().colonists()[3].name(), "Lyra");
    }
}
