//! Survival engine — main entry point for running the simulation.
//!
//! One `update(dt)` call per host frame drives the survival clock, the
//! spawner, and every monster, in that order, on a single logical thread.
//! Outbound notifications accumulate in an event queue the host drains
//! after each update.

use hecs::{Entity, World};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camp::CampState;
use crate::clock::SurvivalClock;
use crate::components::{DespawnTimer, Monster, MonsterState};
use crate::config::{ArchetypeConfig, GameConfig, PhaseProfiles};
use crate::events::{AnimationCue, GameEvent, Outcome};
use crate::spawner::Spawner;
use crate::systems::{despawn_system, pursuit_system, spawn_phase_system};
use campwatch_logic::combat::{self, HitRegion};
use campwatch_logic::phase::{Phase, PhaseSchedule};

/// The whole simulation: world, camp, clock, spawner, and event queue.
pub struct SurvivalEngine {
    pub world: World,
    pub(crate) clock: SurvivalClock,
    pub(crate) spawner: Spawner,
    pub(crate) camp: CampState,
    pub(crate) profiles: PhaseProfiles,
    pub(crate) archetypes: Vec<ArchetypeConfig>,
    pub(crate) config: GameConfig,
    pub(crate) rng: StdRng,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) outcome: Option<Outcome>,
}

impl SurvivalEngine {
    pub fn new(config: GameConfig) -> Self {
        let schedule =
            PhaseSchedule::normalized(config.day_percent, config.night_percent, config.dawn_percent);
        let clock = SurvivalClock::new(config.survival_time, schedule);
        let camp = CampState::new(config.camp_anchor, config.camp_health);
        let mut spawner = Spawner::new(config.spawner_config());

        if config.archetypes.is_empty() {
            warn!("no monster archetypes configured; the spawner will stay idle");
        }
        if config.auto_start {
            spawner.start();
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            "camp initialized with {} health; survive for {} seconds to win",
            camp.max_health(),
            clock.survival_time()
        );

        Self {
            world: World::new(),
            clock,
            spawner,
            camp,
            profiles: config.phases.clone(),
            archetypes: config.archetypes.clone(),
            config,
            rng,
            events: Vec::new(),
            outcome: None,
        }
    }

    /// Advance the simulation by `dt` seconds. A no-op once the run has
    /// resolved.
    pub fn update(&mut self, dt: f32) {
        if !self.is_active() {
            return;
        }

        let tick = self.clock.tick(dt);
        if let Some(phase) = tick.transition {
            self.spawner.apply_profile(self.profiles.profile(phase));
            info!("entering phase {:?} at t={:.1}", phase, self.clock.elapsed());
            self.events.push(GameEvent::PhaseChanged { phase });
        }
        if tick.finished {
            self.win();
            return;
        }

        let anchor = self.camp.anchor();
        self.spawner.update(
            &mut self.world,
            anchor,
            &self.archetypes,
            &mut self.rng,
            dt,
            &mut self.events,
        );
        spawn_phase_system(&mut self.world, dt, &mut self.events);

        let damage = pursuit_system(&mut self.world, anchor, &self.archetypes, dt, &mut self.events);
        if damage > 0.0 {
            let remaining = self.camp.take_damage(damage);
            self.events.push(GameEvent::CampDamaged {
                amount: damage,
                remaining,
            });
            if self.camp.is_destroyed() {
                self.lose();
            }
        }

        for monster in despawn_system(&mut self.world, dt, &mut self.events) {
            self.spawner.on_monster_destroyed(monster);
        }
    }

    /// Inbound damage from the host's hit detection. Unknown entities and
    /// already-dead monsters are logged no-ops.
    pub fn damage_monster(&mut self, monster: Entity, amount: f32, region: HitRegion) {
        let (dead, story, hit_cue) = {
            let mut state = match self.world.get::<&mut Monster>(monster) {
                Ok(state) => state,
                Err(_) => {
                    warn!("damage reported for unknown monster {:?}; ignoring", monster);
                    return;
                }
            };
            if state.state == MonsterState::Dead {
                return;
            }

            let story = if state.story_fired {
                false
            } else if let Some(archetype) = self.archetypes.get(state.archetype) {
                state.story_fired = true;
                archetype.story_on_first_hit
            } else {
                false
            };

            state.health = combat::apply_damage(state.health, amount * region.damage_multiplier());
            let dead = combat::is_dead(state.health);
            if dead {
                state.state = MonsterState::Dead;
            }
            (dead, story, !dead)
        };

        let archetype = self
            .world
            .get::<&Monster>(monster)
            .map(|m| m.archetype)
            .unwrap_or_default();
        if story {
            self.events.push(GameEvent::StoryTriggered { monster, archetype });
        }

        if dead {
            let delay = self
                .archetypes
                .get(archetype)
                .map(|a| a.death_destroy_delay)
                .unwrap_or(2.0);
            // Replaces a pending attack-despawn timer if one exists.
            let _ = self.world.insert_one(monster, DespawnTimer { remaining: delay });
            self.events.push(GameEvent::Animation {
                monster,
                cue: AnimationCue::Die,
            });
        } else if hit_cue {
            self.events.push(GameEvent::Animation {
                monster,
                cue: AnimationCue::Hit,
            });
        }
    }

    /// Drain the outbound event queue accumulated since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// False once Win or Lose has fired.
    pub fn is_active(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn phase(&self) -> Option<Phase> {
        self.clock.phase()
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn remaining_time(&self) -> f32 {
        self.clock.remaining()
    }

    pub fn camp(&self) -> &CampState {
        &self.camp
    }

    pub fn active_monsters(&self) -> usize {
        self.spawner.active_count()
    }

    pub fn total_spawned(&self) -> u32 {
        self.spawner.total_spawned()
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Scene-lifecycle control over the spawn loop.
    pub fn start_spawning(&mut self) {
        self.spawner.start();
    }

    pub fn stop_spawning(&mut self) {
        self.spawner.stop();
    }

    fn win(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(Outcome::Win);
        self.spawner.stop();
        info!("victory: the camp survived");
        self.events.push(GameEvent::GameOver {
            outcome: Outcome::Win,
        });
    }

    fn lose(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(Outcome::Lose);
        self.spawner.stop();
        info!("defeat: the camp was destroyed");
        self.events.push(GameEvent::GameOver {
            outcome: Outcome::Lose,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhaseProfile;

    fn minimal_config() -> GameConfig {
        GameConfig {
            survival_time: 10.0,
            seed: Some(1),
            archetypes: vec![ArchetypeConfig::default()],
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_first_update_enters_day_and_applies_profile() {
        let mut config = minimal_config();
        config.phases.day = PhaseProfile {
            spawn_interval: 7.5,
            max_active: 3,
            ..PhaseProfile::default()
        };
        let mut engine = SurvivalEngine::new(config);
        engine.update(0.016);

        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::PhaseChanged { phase: Phase::Day }));
        assert_eq!(engine.spawner().config().spawn_interval, 7.5);
        assert_eq!(engine.spawner().config().max_active, 3);
    }

    #[test]
    fn test_win_fires_once_and_freezes_engine() {
        let mut engine = SurvivalEngine::new(GameConfig {
            survival_time: 1.0,
            seed: Some(1),
            ..GameConfig::default()
        });
        for _ in 0..30 {
            engine.update(0.1);
        }
        let game_overs = engine
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(engine.outcome(), Some(Outcome::Win));
        assert!(!engine.is_active());

        // Further updates are inert.
        engine.update(1.0);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_damage_unknown_monster_is_noop() {
        let mut engine = SurvivalEngine::new(minimal_config());
        let ghost = engine.world.spawn(());
        engine.world.despawn(ghost).unwrap();
        engine.damage_monster(ghost, 25.0, HitRegion::Body);
        assert!(engine.drain_events().is_empty());
    }
}
