//! Save/Load functionality for persisting colony state
//!
//! The colony is converted into an explicit snapshot schema, then encoded
//! with bincode behind a version header. In-memory types can change freely
//! as long as the conversion below keeps up; a schema change bumps
//! [`SAVE_VERSION`] and old saves are rejected rather than misread.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use bincode::Options;
use colony_logic::buildings::BuildingKind;
use colony_logic::resources::ResourceType;
use colony_logic::vitals::Profession;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::components::{Building, BuildingStatus, Colonist, Resource, ResourceLedger};
use crate::engine::Colony;
use crate::systems::{Event, EventEffect, EventKind};

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Upper bound on a decoded save. Length prefixes past it fail instead of
/// allocating.
pub const MAX_SAVE_BYTES: u64 = 16 * 1024 * 1024;

/// Fixed-width integers, same layout as `bincode::serialize`, but bounded.
fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(MAX_SAVE_BYTES)
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Encode(#[from] Box<bincode::ErrorKind>),

    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Serializable snapshot of a whole colony
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonySnapshot {
    pub name: String,
    pub day: u32,
    pub colonists: Vec<ColonistSnapshot>,
    pub buildings: Vec<BuildingSnapshot>,
    pub resources: Vec<ResourceSnapshot>,
    pub history: Vec<EventSnapshot>,
    pub total_deaths: u32,
    pub buildings_built: u32,
    pub efficiency_bonus: f64,
    pub next_colonist_id: u32,
    pub next_building_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonistSnapshot {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub profession: Profession,
    pub health: i32,
    pub happiness: i32,
    pub productivity: f64,
    pub days_worked: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSnapshot {
    pub id: u32,
    pub kind: BuildingKind,
    pub level: u32,
    pub capacity: u32,
    pub status: BuildingStatus,
    pub total_production: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub kind: ResourceType,
    pub quantity: f64,
    pub capacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub kind: EventKind,
    pub name: String,
    pub description: String,
    pub effects: Vec<EventEffect>,
    pub applied: bool,
}

impl From<&Colonist> for ColonistSnapshot {
    fn from(c: &Colonist) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
            profession: c.profession,
            health: c.health,
            happiness: c.happiness,
            productivity: c.productivity,
            days_worked: c.days_worked,
        }
    }
}

impl From<ColonistSnapshot> for Colonist {
    fn from(s: ColonistSnapshot) -> Self {
        let mut colonist = Colonist::new(s.id, s.name, s.profession);
        colonist.description = s.description;
        colonist.set_health(s.health);
        colonist.set_happiness(s.happiness);
        colonist.productivity = s.productivity.max(0.0);
        colonist.days_worked = s.days_worked;
        colonist
    }
}

impl From<&Building> for BuildingSnapshot {
    fn from(b: &Building) -> Self {
        Self {
            id: b.id,
            kind: b.kind,
            level: b.level,
            capacity: b.capacity,
            status: b.status,
            total_production: b.total_production,
        }
    }
}

impl From<BuildingSnapshot> for Building {
    fn from(s: BuildingSnapshot) -> Self {
        let mut building = Building::new(s.id, s.kind);
        building.level = s.level.max(1);
        building.capacity = s.capacity;
        building.status = s.status;
        building.total_production = s.total_production;
        building
    }
}

impl From<&Resource> for ResourceSnapshot {
    fn from(r: &Resource) -> Self {
        Self {
            kind: r.kind,
            quantity: r.quantity,
            capacity: r.capacity,
        }
    }
}

impl From<&Event> for EventSnapshot {
    fn from(e: &Event) -> Self {
        Self {
            kind: e.kind,
            name: e.name.clone(),
            description: e.description.clone(),
            effects: e.effects.clone(),
            applied: e.is_applied(),
        }
    }
}

impl From<EventSnapshot> for Event {
    fn from(s: EventSnapshot) -> Self {
        Event::restore(s.kind, s.name, s.description, s.effects, s.applied)
    }
}

impl From<&Colony> for ColonySnapshot {
    fn from(colony: &Colony) -> Self {
        Self {
            name: colony.name.clone(),
            day: colony.day,
            colonists: colony.colonists.iter().map(ColonistSnapshot::from).collect(),
            buildings: colony.buildings.iter().map(BuildingSnapshot::from).collect(),
            resources: colony.resources.iter().map(ResourceSnapshot::from).collect(),
            history: colony.history.iter().map(EventSnapshot::from).collect(),
            total_deaths: colony.total_deaths,
            buildings_built: colony.buildings_built,
            efficiency_bonus: colony.efficiency_bonus,
            next_colonist_id: colony.next_colonist_id,
            next_building_id: colony.next_building_id,
        }
    }
}

impl From<ColonySnapshot> for Colony {
    fn from(s: ColonySnapshot) -> Self {
        let mut resources = ResourceLedger::new();
        for r in s.resources {
            *resources.get_mut(r.kind) = Resource::new(r.kind, r.quantity, r.capacity);
        }

        let mut colony = Colony::empty(s.name);
        colony.day = s.day;
        colony.colonists = s.colonists.into_iter().map(Colonist::from).collect();
        colony.buildings = s.buildings.into_iter().map(Building::from).collect();
        colony.resources = resources;
        colony.history = s.history.into_iter().map(Event::from).collect();
        colony.total_deaths = s.total_deaths;
        colony.buildings_built = s.buildings_built;
        colony.efficiency_bonus = s.efficiency_bonus;
        colony.next_colonist_id = s.next_colonist_id;
        colony.next_building_id = s.next_building_id;
        colony
    }
}

/// Save a colony to a writer: version header, then the snapshot
pub fn save_colony<W: Write>(mut writer: W, colony: &Colony) -> Result<(), SaveError> {
    codec().serialize_into(&mut writer, &SAVE_VERSION)?;
    codec().serialize_into(&mut writer, &ColonySnapshot::from(colony))?;
    Ok(())
}

/// Load a colony from a reader
pub fn load_colony<R: Read>(mut reader: R) -> Result<Colony, SaveError> {
    let version: u32 = codec().deserialize_from(&mut reader)?;
    if version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: version,
        });
    }
    let snapshot: ColonySnapshot = codec().deserialize_from(&mut reader)?;
    Ok(snapshot.into())
}

/// One colony per file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write the colony next to the target, then rename over it, so a
    /// crash mid-write leaves the previous save intact.
    pub fn save(&self, colony: &Colony) -> Result<(), SaveError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            save_colony(&mut writer, colony)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| SaveError::Io(e.error))?;

        log::debug!("Saved {} to {}", colony.name(), self.path.display());
        Ok(())
    }

    /// `Ok(None)` when there is no save yet. A save that exists but cannot
    /// be decoded is an error.
    pub fn load(&self) -> Result<Option<Colony>, SaveError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        load_colony(BufReader::new(file)).map(Some)
    }

    /// Remove the save file. Returns whether there was one.
    pub fn delete(&self) -> Result<bool, SaveError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::EventEngine;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn played_colony() -> Colony {
        let mut rng = StdRng::seed_from_u64(99);
        let mut colony = Colony::new("Saved", &mut rng);
        let engine = EventEngine::new(1.0);
        for _ in 0..4 {
            colony.process_turn(&engine, &mut rng);
        }
        colony.set_efficiency_bonus(1.2);
        colony
    }

    fn assert_same(a: &Colony, b: &Colony) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.day(), b.day());
        assert_eq!(a.colonists(), b.colonists());
        assert_eq!(a.buildings(), b.buildings());
        assert_eq!(a.resources(), b.resources());
        assert_eq!(a.history(), b.history());
        assert_eq!(a.total_deaths(), b.total_deaths());
        assert_eq!(a.buildings_built(), b.buildings_built());
        assert_eq!(a.efficiency_bonus(), b.efficiency_bonus());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let colony = played_colony();

        let mut buffer = Vec::new();
        save_colony(&mut buffer, &colony).expect("Save failed");
        let loaded = load_colony(&buffer[..]).expect("Load failed");

        assert_same(&colony, &loaded);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("colony.sav"));
        let colony = played_colony();

        store.save(&colony).unwrap();
        assert!(store.exists());
        let loaded = store.load().unwrap().expect("save should exist");

        assert_same(&colony, &loaded);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nothing.sav"));
        assert!(store.load().unwrap().is_none());
        assert!(!store.delete().unwrap());
    }

    #[test]
    fn test_truncated_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colony.sav");
        let store = FileStore::new(&path);
        store.save(&played_colony()).unwrap();

        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        assert!(store.load().is_err());
    }

    #[test]
    fn test_oversized_length_prefix_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colony.sav");
        let mut bytes = SAVE_VERSION.to_le_bytes().to_vec();
        bytes.extend_from_slice(&(u64::MAX / 2).to_le_bytes());
        bytes.extend_from_slice(b"abc");
        fs::write(&path, bytes).unwrap();

        assert!(matches!(FileStore::new(&path).load(), Err(SaveError::Encode(_))));
    }

    #[test]
    fn test_format_matches_plain_bincode() {
        let colony = played_colony();
        let mut buffer = Vec::new();
        save_colony(&mut buffer, &colony).unwrap();

        let mut plain = bincode::serialize(&SAVE_VERSION).unwrap();
        plain.extend(bincode::serialize(&ColonySnapshot::from(&colony)).unwrap());
        assert_eq!(buffer, plain);
    }

    #[test]
    fn test_version_mismatch() {
        let mut buffer = Vec::new();
        bincode::serialize_into(&mut buffer, &(SAVE_VERSION + 1)).unwrap();

        match load_colony(&buffer[..]) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, SAVE_VERSION + 1);
            }
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("colony.sav"));
        store.save(&played_colony()).unwrap();

        assert!(store.delete().unwrap());
        assert!(!store.exists());
    }
}
