//! Integration tests for full survival runs.
//!
//! Exercises: GameConfig → SurvivalEngine → phase transitions → spawning
//! → pursuit → camp damage → win/lose resolution.
//!
//! All runs are headless and seeded — no rendering, no wall clock.

use campwatch_core::prelude::*;

// ── Helpers ────────────────────────────────────────────────────────────

/// Scenario whose monsters spawn but never reach the camp.
fn passive_config() -> GameConfig {
    GameConfig {
        survival_time: 300.0,
        seed: Some(42),
        archetypes: vec![ArchetypeConfig {
            name: "scarecrow".into(),
            move_speed: 0.0,
            ..ArchetypeConfig::default()
        }],
        ..GameConfig::default()
    }
}

/// Scenario engineered to fall quickly: close spawns, thin camp health.
fn doomed_config() -> GameConfig {
    let mut config = GameConfig {
        survival_time: 300.0,
        camp_health: 20.0,
        min_radius: 2.5,
        max_radius: 3.5,
        seed: Some(7),
        archetypes: vec![ArchetypeConfig::default()],
        ..GameConfig::default()
    };
    config.phases.day.spawn_interval = 0.5;
    config.phases.day.interval_variation = 0.0;
    config
}

fn run_until_resolved(engine: &mut SurvivalEngine, dt: f32, max_steps: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..max_steps {
        engine.update(dt);
        events.extend(engine.drain_events());
        if !engine.is_active() {
            break;
        }
    }
    events
}

fn phase_changes(events: &[GameEvent]) -> Vec<Phase> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::PhaseChanged { phase } => Some(*phase),
            _ => None,
        })
        .collect()
}

// ── Full-run outcomes ──────────────────────────────────────────────────

#[test]
fn surviving_the_full_duration_wins() {
    let mut engine = SurvivalEngine::new(passive_config());
    let events = run_until_resolved(&mut engine, 0.1, 4_000);

    assert_eq!(engine.outcome(), Some(Outcome::Win));
    assert!(engine.elapsed() >= 300.0);
    assert_eq!(phase_changes(&events), vec![Phase::Day, Phase::Night, Phase::Dawn]);
    assert!(events.contains(&GameEvent::GameOver {
        outcome: Outcome::Win
    }));
    // A resolved engine stops spawning and stops ticking.
    let total = engine.total_spawned();
    engine.update(10.0);
    assert_eq!(engine.total_spawned(), total);
    assert!(engine.drain_events().is_empty());
}

#[test]
fn camp_destruction_loses_before_the_timer() {
    let mut engine = SurvivalEngine::new(doomed_config());
    let events = run_until_resolved(&mut engine, 0.05, 20_000);

    assert_eq!(engine.outcome(), Some(Outcome::Lose));
    assert!(engine.elapsed() < 300.0);
    assert!(engine.camp().is_destroyed());
    assert!(events.contains(&GameEvent::GameOver {
        outcome: Outcome::Lose
    }));
    assert!(!events.contains(&GameEvent::GameOver {
        outcome: Outcome::Win
    }));
    // Two 10-damage attacks empty a 20-health camp.
    let damage: f32 = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::CampDamaged { amount, .. } => Some(*amount),
            _ => None,
        })
        .sum();
    assert!(damage >= 20.0);
}

#[test]
fn phase_transitions_land_on_schedule() {
    let mut engine = SurvivalEngine::new(passive_config());
    let mut boundaries = Vec::new();
    for _ in 0..4_000 {
        engine.update(0.1);
        for event in engine.drain_events() {
            if let GameEvent::PhaseChanged { phase } = event {
                boundaries.push((phase, engine.elapsed()));
            }
        }
        if !engine.is_active() {
            break;
        }
    }
    // 300 s at 40/30/30 percent: day at 0, night at 120, dawn at 210.
    assert_eq!(boundaries.len(), 3);
    assert!(boundaries[0].1 < 0.2);
    assert!((boundaries[1].1 - 120.0).abs() < 0.2);
    assert!((boundaries[2].1 - 210.0).abs() < 0.2);
}

// ── Spawn caps under the engine loop ───────────────────────────────────

#[test]
fn active_cap_holds_while_monsters_idle() {
    let mut config = passive_config();
    config.phases.day.spawn_interval = 0.3;
    config.phases.day.interval_variation = 0.0;
    config.phases.day.max_active = 5;
    let mut engine = SurvivalEngine::new(config);

    for _ in 0..600 {
        engine.update(0.1);
        assert!(engine.active_monsters() <= 5);
    }
    // Idle monsters never despawn, so the field fills to the cap and stays.
    assert_eq!(engine.active_monsters(), 5);
    assert_eq!(engine.total_spawned(), 5);
}

#[test]
fn killed_monsters_free_cap_slots() {
    let mut config = passive_config();
    config.phases.day.spawn_interval = 0.3;
    config.phases.day.interval_variation = 0.0;
    config.phases.day.max_active = 2;
    let mut engine = SurvivalEngine::new(config);

    let mut spawned = Vec::new();
    for _ in 0..100 {
        engine.update(0.1);
        for event in engine.drain_events() {
            if let GameEvent::MonsterSpawned { monster, .. } = event {
                spawned.push(monster);
            }
        }
    }
    assert_eq!(spawned.len(), 2);

    engine.damage_monster(spawned[0], 1_000.0, HitRegion::Body);
    // Death delay (2 s) then despawn, freeing a slot for a third spawn.
    for _ in 0..100 {
        engine.update(0.1);
    }
    assert_eq!(engine.total_spawned(), 3);
    assert_eq!(engine.active_monsters(), 2);
}

// ── Arrow damage, head shots, and story hooks ──────────────────────────

fn first_spawn(engine: &mut SurvivalEngine) -> hecs::Entity {
    for _ in 0..200 {
        engine.update(0.1);
        for event in engine.drain_events() {
            if let GameEvent::MonsterSpawned { monster, .. } = event {
                return monster;
            }
        }
    }
    panic!("no monster spawned within 20 seconds");
}

#[test]
fn body_and_head_shots_apply_expected_damage() {
    let mut engine = SurvivalEngine::new(passive_config());
    let monster = first_spawn(&mut engine);

    engine.damage_monster(monster, 30.0, HitRegion::Body);
    let state = *engine.world.get::<&Monster>(monster).unwrap();
    assert_eq!(state.health, 70.0);

    // Head shots land double damage.
    engine.damage_monster(monster, 30.0, HitRegion::Head);
    let state = *engine.world.get::<&Monster>(monster).unwrap();
    assert_eq!(state.health, 10.0);
    assert!(engine
        .drain_events()
        .iter()
        .filter(|e| matches!(
            e,
            GameEvent::Animation {
                cue: AnimationCue::Hit,
                ..
            }
        ))
        .count()
        == 2);
}

#[test]
fn lethal_hit_kills_then_despawns() {
    let mut engine = SurvivalEngine::new(passive_config());
    let monster = first_spawn(&mut engine);
    let before = engine.active_monsters();

    engine.damage_monster(monster, 60.0, HitRegion::Head);
    let events = engine.drain_events();
    assert!(events.contains(&GameEvent::Animation {
        monster,
        cue: AnimationCue::Die
    }));
    assert_eq!(
        engine.world.get::<&Monster>(monster).unwrap().state,
        MonsterState::Dead
    );

    // Dead monsters ignore further damage.
    engine.damage_monster(monster, 60.0, HitRegion::Body);
    assert!(engine.drain_events().is_empty());

    // Corpse lingers for the death delay (2 s), then despawns.
    let mut destroyed = false;
    for _ in 0..30 {
        engine.update(0.1);
        for event in engine.drain_events() {
            if event == (GameEvent::MonsterDestroyed { monster }) {
                destroyed = true;
            }
        }
    }
    assert!(destroyed);
    assert!(!engine.world.contains(monster));
    assert_eq!(engine.active_monsters(), before - 1);
}

#[test]
fn story_hook_fires_on_first_hit_only() {
    let mut config = passive_config();
    config.archetypes[0].story_on_first_hit = true;
    let mut engine = SurvivalEngine::new(config);
    let monster = first_spawn(&mut engine);

    engine.damage_monster(monster, 10.0, HitRegion::Body);
    let events = engine.drain_events();
    assert!(events.contains(&GameEvent::StoryTriggered {
        monster,
        archetype: 0
    }));

    engine.damage_monster(monster, 10.0, HitRegion::Body);
    assert!(!engine
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::StoryTriggered { .. })));
}

// ── Determinism ────────────────────────────────────────────────────────

#[test]
fn seeded_runs_are_identical() {
    let mut a = SurvivalEngine::new(doomed_config());
    let mut b = SurvivalEngine::new(doomed_config());

    let events_a = run_until_resolved(&mut a, 0.05, 20_000);
    let events_b = run_until_resolved(&mut b, 0.05, 20_000);

    assert_eq!(a.outcome(), b.outcome());
    assert_eq!(a.total_spawned(), b.total_spawned());
    assert_eq!(a.elapsed(), b.elapsed());
    assert_eq!(a.camp().current_health(), b.camp().current_health());
    assert_eq!(events_a.len(), events_b.len());
}
