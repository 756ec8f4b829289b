//! Configuration surface — every tunable the presentation layer sets once
//! at scene load or per phase transition.
//!
//! All structs deserialize from JSON with `#[serde(default)]`, so a
//! scenario file only needs to name what it changes.

use serde::{Deserialize, Serialize};

use crate::components::Vec3;
use campwatch_logic::phase::Phase;

/// A named monster template: stats plus a spawn weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeConfig {
    pub name: String,
    /// Units per second while walking.
    pub move_speed: f32,
    /// Turn-smoothing rate while walking.
    pub rotation_speed: f32,
    pub max_health: f32,
    /// Damage dealt to the camp by the final attack.
    pub attack_damage: f32,
    /// Distance from the anchor at which walking stops and the attack fires.
    pub safety_radius: f32,
    /// Spawn-in duration; immobile until it elapses.
    pub spawn_duration: f32,
    /// Delay between the final attack and removal.
    pub destroy_delay: f32,
    /// Delay between death and removal.
    pub death_destroy_delay: f32,
    /// Relative selection weight; zero excludes the archetype.
    pub spawn_weight: f32,
    /// Fire a one-shot story event the first time this archetype is hit.
    pub story_on_first_hit: bool,
}

impl Default for ArchetypeConfig {
    fn default() -> Self {
        Self {
            name: String::from("monster"),
            move_speed: 2.0,
            rotation_speed: 5.0,
            max_health: 100.0,
            attack_damage: 10.0,
            safety_radius: 2.0,
            spawn_duration: 1.0,
            destroy_delay: 5.0,
            death_destroy_delay: 2.0,
            spawn_weight: 1.0,
            story_on_first_hit: false,
        }
    }
}

/// Occasionally assigns an elevated speed multiplier to a spawned monster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RushPolicy {
    /// Probability per spawn of producing a rushed monster.
    pub chance: f32,
    /// Inclusive speed-multiplier range drawn on a rushed spawn.
    pub speed_multiplier: (f32, f32),
}

/// Per-phase difficulty profile pushed into the spawner on each transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseProfile {
    pub spawn_interval: f32,
    pub interval_variation: f32,
    /// Angular width of the spawn sector in degrees (360 = full circle).
    pub angle_range: f32,
    /// Rotation of the sector around the anchor, degrees.
    pub angle_offset: f32,
    /// Maximum live monsters; 0 means unbounded.
    pub max_active: u32,
    pub rush: Option<RushPolicy>,
}

impl Default for PhaseProfile {
    fn default() -> Self {
        Self {
            spawn_interval: 3.0,
            interval_variation: 0.5,
            angle_range: 180.0,
            angle_offset: 0.0,
            max_active: 0,
            rush: None,
        }
    }
}

/// One profile per phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseProfiles {
    pub day: PhaseProfile,
    pub night: PhaseProfile,
    pub dawn: PhaseProfile,
}

impl PhaseProfiles {
    pub fn profile(&self, phase: Phase) -> &PhaseProfile {
        match phase {
            Phase::Day => &self.day,
            Phase::Night => &self.night,
            Phase::Dawn => &self.dawn,
        }
    }
}

/// Live spawner configuration. The phase controller rewrites the
/// profile-owned fields on each transition; manual edits between
/// transitions survive until the next push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub spawn_interval: f32,
    pub interval_variation: f32,
    pub angle_range: f32,
    pub angle_offset: f32,
    /// Inner spawn radius; monsters never appear closer to the anchor.
    pub min_radius: f32,
    /// Outer spawn radius.
    pub max_radius: f32,
    /// Maximum live monsters; 0 means unbounded.
    pub max_active: u32,
    /// Maximum total spawns for the whole run; 0 means unbounded.
    pub max_total: u32,
    pub rush: Option<RushPolicy>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 3.0,
            interval_variation: 0.5,
            angle_range: 180.0,
            angle_offset: 0.0,
            min_radius: 3.0,
            max_radius: 10.0,
            max_active: 0,
            max_total: 0,
            rush: None,
        }
    }
}

impl SpawnerConfig {
    /// One-shot push of a phase's difficulty profile. Radii and the total
    /// budget are run-level settings and stay untouched.
    pub fn apply_profile(&mut self, profile: &PhaseProfile) {
        self.spawn_interval = profile.spawn_interval;
        self.interval_variation = profile.interval_variation;
        self.angle_range = profile.angle_range;
        self.angle_offset = profile.angle_offset;
        self.max_active = profile.max_active;
        self.rush = profile.rush;
    }
}

/// Top-level scenario configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seconds the camp must survive to win.
    pub survival_time: f32,
    pub camp_health: f32,
    pub camp_anchor: Vec3,
    /// Raw phase duration fractions; normalized at engine construction.
    pub day_percent: f32,
    pub night_percent: f32,
    pub dawn_percent: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Total spawn budget for the run; 0 means unbounded.
    pub max_total: u32,
    pub phases: PhaseProfiles,
    pub archetypes: Vec<ArchetypeConfig>,
    /// Seed for the engine RNG; omit for entropy.
    pub seed: Option<u64>,
    /// Begin spawning as soon as the engine starts ticking.
    pub auto_start: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            survival_time: 300.0,
            camp_health: 100.0,
            camp_anchor: Vec3::ZERO,
            day_percent: 0.4,
            night_percent: 0.3,
            dawn_percent: 0.3,
            min_radius: 3.0,
            max_radius: 10.0,
            max_total: 0,
            phases: PhaseProfiles::default(),
            archetypes: Vec::new(),
            seed: None,
            auto_start: true,
        }
    }
}

impl GameConfig {
    /// Initial spawner configuration before the first phase push.
    pub fn spawner_config(&self) -> SpawnerConfig {
        SpawnerConfig {
            min_radius: self.min_radius,
            max_radius: self.max_radius,
            max_total: self.max_total,
            ..SpawnerConfig::default()
        }
    }
}
