//! Monster spawner — a countdown-driven loop that admits, places, and
//! tracks monsters.
//!
//! The wait between attempts is an explicit countdown resumed by each
//! tick, so the whole spawner is stepped cooperatively on the one
//! simulation thread and `stop()` takes effect immediately.

use hecs::{Entity, World};
use log::{debug, error, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{Heading, Monster, MonsterState, Position, Vec3};
use crate::config::{ArchetypeConfig, PhaseProfile, SpawnerConfig};
use crate::events::{AnimationCue, GameEvent};
use campwatch_logic::spawn::{annulus_point, next_spawn_wait, weighted_pick};

/// Poll interval while the active cap blocks admission, seconds.
const ACTIVE_CAP_POLL: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnerState {
    Stopped,
    Running,
}

/// Go/no-go decision for a single spawn attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admit,
    /// Live count is at the cap; retry after a short poll.
    ActiveCapReached,
    /// Total budget spent; the spawner stops permanently.
    TotalBudgetExhausted,
}

/// Owns the spawn loop state and the registry of live monsters.
#[derive(Debug)]
pub struct Spawner {
    config: SpawnerConfig,
    state: SpawnerState,
    /// Seconds until the next spawn attempt.
    next_attempt_in: f32,
    total_spawned: u32,
    active: Vec<Entity>,
}

impl Spawner {
    pub fn new(config: SpawnerConfig) -> Self {
        Self {
            config,
            state: SpawnerState::Stopped,
            next_attempt_in: 0.0,
            total_spawned: 0,
            active: Vec::new(),
        }
    }

    pub fn state(&self) -> SpawnerState {
        self.state
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// Manual edits here survive until the next phase transition.
    pub fn config_mut(&mut self) -> &mut SpawnerConfig {
        &mut self.config
    }

    /// One-shot difficulty push from a phase transition.
    pub fn apply_profile(&mut self, profile: &PhaseProfile) {
        self.config.apply_profile(profile);
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn total_spawned(&self) -> u32 {
        self.total_spawned
    }

    pub fn active_monsters(&self) -> &[Entity] {
        &self.active
    }

    /// Begin the spawn loop. Idempotent while running.
    pub fn start(&mut self) {
        if self.state == SpawnerState::Running {
            return;
        }
        self.state = SpawnerState::Running;
        self.next_attempt_in = 0.0;
        info!("spawner started");
    }

    /// Halt the spawn loop and cancel any pending wait. Safe when stopped.
    pub fn stop(&mut self) {
        if self.state == SpawnerState::Stopped {
            return;
        }
        self.state = SpawnerState::Stopped;
        info!("spawner stopped after {} total spawns", self.total_spawned);
    }

    /// Current admission decision given the live counts and caps.
    pub fn admission(&self) -> Admission {
        if self.config.max_total > 0 && self.total_spawned >= self.config.max_total {
            return Admission::TotalBudgetExhausted;
        }
        if self.config.max_active > 0 && self.active.len() as u32 >= self.config.max_active {
            return Admission::ActiveCapReached;
        }
        Admission::Admit
    }

    /// Advance the spawn countdown and attempt spawns that came due.
    pub fn update(
        &mut self,
        world: &mut World,
        anchor: Vec3,
        archetypes: &[ArchetypeConfig],
        rng: &mut impl Rng,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) {
        if self.state != SpawnerState::Running {
            return;
        }

        self.next_attempt_in -= dt.max(0.0);
        while self.next_attempt_in <= 0.0 {
            match self.admission() {
                Admission::TotalBudgetExhausted => {
                    info!("maximum total spawns reached; stopping spawner");
                    self.stop();
                    return;
                }
                Admission::ActiveCapReached => {
                    // Deferral does not consume the spawn budget.
                    self.next_attempt_in += ACTIVE_CAP_POLL;
                }
                Admission::Admit => {
                    self.spawn_monster(world, anchor, archetypes, rng, events);
                    self.next_attempt_in += next_spawn_wait(
                        self.config.spawn_interval,
                        self.config.interval_variation,
                        rng.gen(),
                    );
                }
            }
        }
    }

    /// Explicit destruction notification; decrements the active count
    /// exactly once per monster regardless of cause.
    pub fn on_monster_destroyed(&mut self, monster: Entity) {
        if let Some(index) = self.active.iter().position(|&e| e == monster) {
            let _ = self.active.swap_remove(index);
        }
    }

    fn spawn_monster(
        &mut self,
        world: &mut World,
        anchor: Vec3,
        archetypes: &[ArchetypeConfig],
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) {
        if archetypes.is_empty() {
            error!("no monster archetypes configured; skipping spawn");
            return;
        }

        let weights: Vec<f32> = archetypes.iter().map(|a| a.spawn_weight).collect();
        let index = match weighted_pick(&weights, rng.gen()) {
            Some(index) => index,
            None => {
                error!("no archetype has a positive spawn weight; skipping spawn");
                return;
            }
        };
        let archetype = &archetypes[index];

        let (x, z) = annulus_point(
            self.config.min_radius,
            self.config.max_radius,
            self.config.angle_range,
            self.config.angle_offset,
            rng.gen(),
            rng.gen(),
        );
        let position = anchor + Vec3::new(x, 0.0, z);

        let (rushed, speed_multiplier) = match self.config.rush {
            Some(rush) if rng.gen::<f32>() < rush.chance => {
                let (low, high) = rush.speed_multiplier;
                if low < high {
                    (true, rng.gen_range(low..=high))
                } else {
                    warn!("rush speed range {:?} is empty; using its lower bound", rush.speed_multiplier);
                    (true, low.max(1.0))
                }
            }
            _ => (false, 1.0),
        };

        let monster = world.spawn((
            Monster {
                archetype: index,
                health: archetype.max_health,
                max_health: archetype.max_health,
                speed_multiplier,
                state: MonsterState::Spawning {
                    remaining: archetype.spawn_duration,
                },
                story_fired: false,
            },
            Position::new(position),
            // Face the camp from the spawn point.
            Heading::new(Heading::yaw_between(position, anchor)),
        ));

        self.active.push(monster);
        self.total_spawned += 1;

        debug!(
            "spawned {} at ({:.1}, {:.1}), rushed={}, total={}",
            archetype.name, position.x, position.z, rushed, self.total_spawned
        );
        events.push(GameEvent::MonsterSpawned {
            monster,
            archetype: index,
            position,
            rushed,
        });
        events.push(GameEvent::Animation {
            monster,
            cue: AnimationCue::Spawn,
        });
    }

    pub(crate) fn restore(
        config: SpawnerConfig,
        state: SpawnerState,
        next_attempt_in: f32,
        total_spawned: u32,
        active: Vec<Entity>,
    ) -> Self {
        Self {
            config,
            state,
            next_attempt_in,
            total_spawned,
            active,
        }
    }

    pub(crate) fn next_attempt_in(&self) -> f32 {
        self.next_attempt_in
    }
}
