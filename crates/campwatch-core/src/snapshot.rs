//! Save/Load functionality for persisting a survival run.
//!
//! Uses bincode for binary serialization. Monsters are captured component
//! by component and respawned into a fresh world on load, so entity ids are
//! not stable across a round trip. The random stream is reseeded on load;
//! draws after a load do not replay the saved run's draws.

use hecs::World;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::camp::CampState;
use crate::clock::SurvivalClock;
use crate::components::{DespawnTimer, Heading, Monster, Position, Vec3};
use crate::config::{GameConfig, SpawnerConfig};
use crate::engine::SurvivalEngine;
use crate::events::Outcome;
use crate::spawner::{Spawner, SpawnerState};
use campwatch_logic::phase::PhaseSchedule;

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of a survival run.
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Scenario the run was started from
    pub config: GameConfig,
    /// Elapsed survival time in seconds
    pub elapsed: f32,
    /// Resolved outcome, if the run already ended
    pub outcome: Option<Outcome>,
    /// Camp health pool
    pub camp_max_health: f32,
    pub camp_current_health: f32,
    /// Spawner loop state, including phase-profile edits to its config
    pub spawner_config: SpawnerConfig,
    pub spawner_state: SpawnerState,
    pub next_attempt_in: f32,
    pub total_spawned: u32,
    /// Every live monster with its components
    pub monsters: Vec<MonsterSnapshot>,
}

/// One monster's components, without the entity id.
#[derive(Serialize, Deserialize)]
pub struct MonsterSnapshot {
    pub monster: Monster,
    pub position: Vec3,
    pub yaw: f32,
    pub despawn_in: Option<f32>,
    /// Whether the spawner still counts this monster against the active cap.
    pub tracked: bool,
}

fn snapshot_monsters(world: &World, spawner: &Spawner) -> Vec<MonsterSnapshot> {
    let mut monsters = Vec::new();
    for (entity, (monster, position, heading)) in
        world.query::<(&Monster, &Position, &Heading)>().iter()
    {
        let despawn_in = world
            .get::<&DespawnTimer>(entity)
            .ok()
            .map(|timer| timer.remaining);
        monsters.push(MonsterSnapshot {
            monster: *monster,
            position: position.point,
            yaw: heading.yaw,
            despawn_in,
            tracked: spawner.active_monsters().contains(&entity),
        });
    }
    monsters
}

/// Save the complete run to a writer.
pub fn save_game<W: Write>(writer: W, engine: &SurvivalEngine) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        config: engine.config.clone(),
        elapsed: engine.clock.elapsed(),
        outcome: engine.outcome,
        camp_max_health: engine.camp.max_health(),
        camp_current_health: engine.camp.current_health(),
        spawner_config: engine.spawner.config().clone(),
        spawner_state: engine.spawner.state(),
        next_attempt_in: engine.spawner.next_attempt_in(),
        total_spawned: engine.spawner.total_spawned(),
        monsters: snapshot_monsters(&engine.world, &engine.spawner),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a run from a reader into a fresh engine.
pub fn load_game<R: Read>(reader: R) -> Result<SurvivalEngine, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let mut engine = SurvivalEngine::new(save_data.config);

    let mut world = World::new();
    let mut active = Vec::new();
    for snapshot in save_data.monsters {
        let entity = world.spawn((
            snapshot.monster,
            Position::new(snapshot.position),
            Heading::new(snapshot.yaw),
        ));
        if let Some(remaining) = snapshot.despawn_in {
            let _ = world.insert_one(entity, DespawnTimer { remaining });
        }
        if snapshot.tracked {
            active.push(entity);
        }
    }

    let schedule = PhaseSchedule::normalized(
        engine.config.day_percent,
        engine.config.night_percent,
        engine.config.dawn_percent,
    );
    engine.world = world;
    engine.clock = SurvivalClock::restore(
        engine.config.survival_time,
        schedule,
        save_data.elapsed,
    );
    engine.camp = CampState::restore(
        engine.config.camp_anchor,
        save_data.camp_max_health,
        save_data.camp_current_health,
    );
    engine.spawner = Spawner::restore(
        save_data.spawner_config,
        save_data.spawner_state,
        save_data.next_attempt_in,
        save_data.total_spawned,
        active,
    );
    engine.outcome = save_data.outcome;
    engine.events.clear();

    Ok(engine)
}

impl SurvivalEngine {
    /// Serialize the run to any writer.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        save_game(writer, self)
    }

    /// Rebuild an engine from a previously saved run.
    pub fn load<R: Read>(reader: R) -> Result<Self, SaveError> {
        load_game(reader)
    }
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArchetypeConfig;

    fn busy_config() -> GameConfig {
        GameConfig {
            survival_time: 60.0,
            seed: Some(5),
            archetypes: vec![ArchetypeConfig::default()],
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut engine = SurvivalEngine::new(busy_config());
        for _ in 0..600 {
            engine.update(1.0 / 60.0);
        }
        let _ = engine.drain_events();

        let original_elapsed = engine.elapsed();
        let original_total = engine.total_spawned();
        let original_active = engine.active_monsters();
        let original_camp = engine.camp().current_health();
        assert!(original_total > 0, "run never spawned anything");

        let mut buffer = Vec::new();
        engine.save(&mut buffer).expect("save failed");

        let loaded = SurvivalEngine::load(&buffer[..]).expect("load failed");
        assert!((loaded.elapsed() - original_elapsed).abs() < 1e-3);
        assert_eq!(loaded.total_spawned(), original_total);
        assert_eq!(loaded.active_monsters(), original_active);
        assert_eq!(loaded.camp().current_health(), original_camp);
        assert_eq!(loaded.outcome(), None);
        assert_eq!(loaded.phase(), engine.phase());
    }

    #[test]
    fn test_loaded_run_keeps_simulating() {
        let mut engine = SurvivalEngine::new(busy_config());
        for _ in 0..300 {
            engine.update(0.1);
        }
        let mut buffer = Vec::new();
        engine.save(&mut buffer).expect("save failed");

        let mut loaded = SurvivalEngine::load(&buffer[..]).expect("load failed");
        let elapsed_at_load = loaded.elapsed();
        for _ in 0..50 {
            loaded.update(0.1);
        }
        assert!(loaded.elapsed() > elapsed_at_load);
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let engine = SurvivalEngine::new(busy_config());
        let mut buffer = Vec::new();
        engine.save(&mut buffer).expect("save failed");

        let mut data: SaveData = bincode::deserialize(&buffer).expect("decode failed");
        data.version = 99;
        let tampered = bincode::serialize(&data).expect("encode failed");

        match SurvivalEngine::load(&tampered[..]) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, 99);
            }
            other => panic!("expected version mismatch, got {:?}", other.map(|_| ())),
        }
    }
}
