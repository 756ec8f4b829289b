//! CampWatch Headless Survival Harness
//!
//! Validates pure survival logic and scenario data without a renderer.
//! Runs entirely in-process — no graphics, no VR rig, no wall clock.
//!
//! Usage:
//!   cargo run -p campwatch-simtest
//!   cargo run -p campwatch-simtest -- --verbose

use campwatch_core::prelude::*;
use campwatch_logic::combat;
use campwatch_logic::phase::PhaseSchedule;
use campwatch_logic::spawn::{annulus_point, next_spawn_wait, weighted_pick, MIN_SPAWN_WAIT};

// ── Default scenario (same JSON the host loads) ─────────────────────────
const SCENARIO_JSON: &str = include_str!("../../../data/default_scenario.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

/// Small deterministic generator for uniform sweeps; keeps the harness free
/// of external randomness.
struct Lcg(u64);

impl Lcg {
    fn next_f32(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as f32) / ((1u64 << 31) as f32)
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== CampWatch Survival Harness ===\n");

    let mut results = Vec::new();

    // 1. Default scenario validation
    results.extend(validate_scenario(verbose));

    // 2. Phase schedule sweep
    results.extend(validate_phase_schedule(verbose));

    // 3. Spawn geometry and selection sweep
    results.extend(validate_spawn_geometry(verbose));

    // 4. Combat rules
    results.extend(validate_combat_rules(verbose));

    // 5. Full survival runs
    results.extend(validate_survival_runs(verbose));

    // 6. Save/load round trip
    results.extend(validate_snapshot(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Default scenario ─────────────────────────────────────────────────

fn validate_scenario(_verbose: bool) -> Vec<TestResult> {
    println!("--- Default Scenario ---");
    let mut results = Vec::new();

    let config: GameConfig = match serde_json::from_str(SCENARIO_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult {
                name: "scenario_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "scenario_parse".into(),
        passed: true,
        detail: format!("{} archetypes loaded", config.archetypes.len()),
    });

    results.push(TestResult {
        name: "scenario_has_archetypes".into(),
        passed: !config.archetypes.is_empty(),
        detail: format!("{} archetypes", config.archetypes.len()),
    });

    let spawnable = config
        .archetypes
        .iter()
        .filter(|a| a.spawn_weight > 0.0)
        .count();
    results.push(TestResult {
        name: "scenario_spawnable_archetypes".into(),
        passed: spawnable > 0,
        detail: format!("{} archetypes with positive spawn weight", spawnable),
    });

    results.push(TestResult {
        name: "scenario_radii_ordered".into(),
        passed: config.min_radius > 0.0 && config.min_radius < config.max_radius,
        detail: format!("radii {}..{}", config.min_radius, config.max_radius),
    });

    results.push(TestResult {
        name: "scenario_survival_time_positive".into(),
        passed: config.survival_time > 0.0,
        detail: format!("{} s", config.survival_time),
    });

    let percent_total = config.day_percent + config.night_percent + config.dawn_percent;
    results.push(TestResult {
        name: "scenario_phase_percents".into(),
        passed: percent_total > 0.0,
        detail: format!(
            "day {} / night {} / dawn {}",
            config.day_percent, config.night_percent, config.dawn_percent
        ),
    });

    let bad_intervals: Vec<&str> = [
        ("day", &config.phases.day),
        ("night", &config.phases.night),
        ("dawn", &config.phases.dawn),
    ]
    .iter()
    .filter(|(_, p)| p.spawn_interval <= 0.0)
    .map(|(name, _)| *name)
    .collect();
    results.push(TestResult {
        name: "scenario_spawn_intervals_positive".into(),
        passed: bad_intervals.is_empty(),
        detail: if bad_intervals.is_empty() {
            "all phase intervals positive".into()
        } else {
            format!("non-positive intervals in: {}", bad_intervals.join(", "))
        },
    });

    let bad_rush: Vec<&str> = [
        ("day", &config.phases.day),
        ("night", &config.phases.night),
        ("dawn", &config.phases.dawn),
    ]
    .iter()
    .filter(|(_, p)| {
        p.rush.map_or(false, |r| {
            !(0.0..=1.0).contains(&r.chance) || r.speed_multiplier.0 > r.speed_multiplier.1
        })
    })
    .map(|(name, _)| *name)
    .collect();
    results.push(TestResult {
        name: "scenario_rush_policies_sane".into(),
        passed: bad_rush.is_empty(),
        detail: if bad_rush.is_empty() {
            "all rush policies within range".into()
        } else {
            format!("bad rush policy in: {}", bad_rush.join(", "))
        },
    });

    results
}

// ── 2. Phase schedule ───────────────────────────────────────────────────

fn validate_phase_schedule(verbose: bool) -> Vec<TestResult> {
    println!("--- Phase Schedule ---");
    let mut results = Vec::new();

    let schedule = PhaseSchedule::normalized(0.4, 0.3, 0.3);
    let survival = 300.0;

    let probes = [
        (0.0, Phase::Day),
        (60.0, Phase::Day),
        (119.9, Phase::Day),
        (120.1, Phase::Night),
        (209.9, Phase::Night),
        (210.1, Phase::Dawn),
        (299.9, Phase::Dawn),
    ];
    let mut mismatches = Vec::new();
    for (t, expected) in probes {
        let sample = schedule.sample(t, survival);
        if sample.phase != expected {
            mismatches.push(format!("t={}: {:?} (expected {:?})", t, sample.phase, expected));
        }
        if verbose {
            println!(
                "  t={:>5.1} → {:?} ({:.1}/{:.1}s into phase)",
                t, sample.phase, sample.phase_time, sample.phase_duration
            );
        }
    }
    results.push(TestResult {
        name: "phase_boundaries_40_30_30".into(),
        passed: mismatches.is_empty(),
        detail: if mismatches.is_empty() {
            "boundaries at 120 s and 210 s".into()
        } else {
            mismatches.join("; ")
        },
    });

    // Garbage splits fall back to the stock 40/30/30.
    let fallback = PhaseSchedule::normalized(0.0, 0.0, 0.0);
    let at_night = fallback.sample(150.0, survival).phase;
    results.push(TestResult {
        name: "phase_zero_split_falls_back".into(),
        passed: at_night == Phase::Night,
        detail: format!("t=150 under fallback split → {:?}", at_night),
    });

    // A phase with zero share is skipped entirely.
    let no_night = PhaseSchedule::normalized(0.5, 0.0, 0.5);
    let skipped = (0..300)
        .map(|t| no_night.sample(t as f32, survival).phase)
        .all(|p| p != Phase::Night);
    results.push(TestResult {
        name: "phase_zero_share_skipped".into(),
        passed: skipped,
        detail: "night never sampled under a 50/0/50 split".into(),
    });

    results
}

// ── 3. Spawn geometry ───────────────────────────────────────────────────

fn validate_spawn_geometry(verbose: bool) -> Vec<TestResult> {
    println!("--- Spawn Geometry ---");
    let mut results = Vec::new();
    let mut rng = Lcg(0x5eed);

    let (min_r, max_r) = (3.0, 10.0);
    let mut out_of_annulus = 0;
    let mut out_of_sector = 0;
    let mut inner_half = 0;
    let samples = 20_000;
    for _ in 0..samples {
        let (x, z) = annulus_point(min_r, max_r, 180.0, 0.0, rng.next_f32(), rng.next_f32());
        let r = (x * x + z * z).sqrt();
        if r < min_r - 1e-3 || r > max_r + 1e-3 {
            out_of_annulus += 1;
        }
        if z < -1e-3 {
            out_of_sector += 1;
        }
        // Median radius for area-uniform sampling over 3..10 is ~7.38.
        if r < 7.38 {
            inner_half += 1;
        }
    }
    results.push(TestResult {
        name: "spawn_points_inside_annulus".into(),
        passed: out_of_annulus == 0,
        detail: format!("{}/{} outside radii {}..{}", out_of_annulus, samples, min_r, max_r),
    });
    results.push(TestResult {
        name: "spawn_points_inside_sector".into(),
        passed: out_of_sector == 0,
        detail: format!("{}/{} below the 180-degree sector", out_of_sector, samples),
    });
    let inner_fraction = inner_half as f32 / samples as f32;
    if verbose {
        println!("  inner-half fraction: {:.3}", inner_fraction);
    }
    results.push(TestResult {
        name: "spawn_radius_area_uniform".into(),
        passed: (inner_fraction - 0.5).abs() < 0.02,
        detail: format!("{:.3} of samples inside the equal-area median", inner_fraction),
    });

    // Weighted selection converges on the weight ratio.
    let weights = [1.0, 3.0];
    let mut counts = [0u32; 2];
    for _ in 0..20_000 {
        if let Some(i) = weighted_pick(&weights, rng.next_f32()) {
            counts[i] += 1;
        }
    }
    let heavy = counts[1] as f32 / (counts[0] + counts[1]) as f32;
    results.push(TestResult {
        name: "spawn_weighted_pick_frequencies".into(),
        passed: (heavy - 0.75).abs() < 0.02,
        detail: format!("weight-3 archetype picked {:.3} of the time", heavy),
    });

    results.push(TestResult {
        name: "spawn_zero_weights_rejected".into(),
        passed: weighted_pick(&[0.0, -1.0], 0.5).is_none(),
        detail: "no pick when no weight is positive".into(),
    });

    // Interval jitter never drops below the floor.
    let mut below_floor = 0;
    let mut min_seen = f32::MAX;
    for _ in 0..10_000 {
        let wait = next_spawn_wait(0.3, 0.5, rng.next_f32());
        if wait < MIN_SPAWN_WAIT {
            below_floor += 1;
        }
        min_seen = min_seen.min(wait);
    }
    results.push(TestResult {
        name: "spawn_wait_floor".into(),
        passed: below_floor == 0 && min_seen >= MIN_SPAWN_WAIT,
        detail: format!("minimum wait seen {:.3} s", min_seen),
    });

    results
}

// ── 4. Combat rules ─────────────────────────────────────────────────────

fn validate_combat_rules(_verbose: bool) -> Vec<TestResult> {
    println!("--- Combat Rules ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "combat_head_multiplier".into(),
        passed: HitRegion::Head.damage_multiplier() == 2.0
            && HitRegion::Body.damage_multiplier() == 1.0,
        detail: "head 2x, body 1x".into(),
    });

    let h = combat::apply_damage(100.0, 30.0);
    let clamped = combat::apply_damage(h, 500.0);
    let ignored = combat::apply_damage(h, -10.0);
    results.push(TestResult {
        name: "combat_damage_clamps".into(),
        passed: h == 70.0 && clamped == 0.0 && ignored == 70.0,
        detail: format!("100-30={}, overkill→{}, negative→{}", h, clamped, ignored),
    });

    results.push(TestResult {
        name: "combat_death_threshold".into(),
        passed: combat::is_dead(0.0) && !combat::is_dead(0.01),
        detail: "dead exactly at zero".into(),
    });

    results
}

// ── 5. Full survival runs ───────────────────────────────────────────────

fn scenario_config(seed: u64) -> GameConfig {
    let mut config: GameConfig =
        serde_json::from_str(SCENARIO_JSON).unwrap_or_default();
    config.seed = Some(seed);
    config
}

fn run_to_resolution(engine: &mut SurvivalEngine, dt: f32, max_steps: u32) -> Vec<GameEvent> {
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

fn validate_survival_runs(verbose: bool) -> Vec<TestResult> {
    println!("--- Survival Runs ---");
    let mut results = Vec::new();

    // Passive monsters: the camp always survives.
    let mut config = scenario_config(1);
    for archetype in &mut config.archetypes {
        archetype.move_speed = 0.0;
    }
    let mut engine = SurvivalEngine::new(config);
    let events = run_to_resolution(&mut engine, 0.1, 4_000);
    let phases: Vec<Phase> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::PhaseChanged { phase } => Some(*phase),
            _ => None,
        })
        .collect();
    if verbose {
        println!(
            "  passive run: {:?} after {:.0} s, {} spawned",
            engine.outcome(),
            engine.elapsed(),
            engine.total_spawned()
        );
    }
    results.push(TestResult {
        name: "run_passive_scenario_wins".into(),
        passed: engine.outcome() == Some(Outcome::Win)
            && phases == vec![Phase::Day, Phase::Night, Phase::Dawn],
        detail: format!("outcome {:?}, phases {:?}", engine.outcome(), phases),
    });
    results.push(TestResult {
        name: "run_spawner_produced_monsters".into(),
        passed: engine.total_spawned() > 0,
        detail: format!("{} spawned over the run", engine.total_spawned()),
    });

    // Night profile raises the cap; verify the cap is never exceeded.
    let mut config = scenario_config(2);
    for archetype in &mut config.archetypes {
        archetype.move_speed = 0.0;
    }
    let caps = (
        config.phases.day.max_active,
        config.phases.night.max_active,
        config.phases.dawn.max_active,
    );
    let mut engine = SurvivalEngine::new(config);
    let mut cap_violations = 0;
    while engine.is_active() {
        engine.update(0.1);
        let spawned_this_step = engine
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::MonsterSpawned { .. }));
        let cap = match engine.phase() {
            Some(Phase::Day) => caps.0,
            Some(Phase::Night) => caps.1,
            Some(Phase::Dawn) => caps.2,
            None => 0,
        };
        // A shrinking cap strands the overflow; only new spawns above the
        // cap count as violations.
        if spawned_this_step && cap > 0 && engine.active_monsters() > cap as usize {
            cap_violations += 1;
        }
    }
    results.push(TestResult {
        name: "run_active_caps_admit_under_cap_only".into(),
        passed: cap_violations == 0,
        detail: format!("{} over-cap admissions across the run", cap_violations),
    });

    // Undefended camp with the stock scenario: monsters win long before dawn.
    let mut engine = SurvivalEngine::new(scenario_config(3));
    let events = run_to_resolution(&mut engine, 0.05, 200_000);
    let lost = engine.outcome() == Some(Outcome::Lose);
    if verbose {
        println!(
            "  undefended run: {:?} at {:.0} s, camp {:.0} health",
            engine.outcome(),
            engine.elapsed(),
            engine.camp().current_health()
        );
    }
    results.push(TestResult {
        name: "run_undefended_camp_falls".into(),
        passed: lost && engine.camp().is_destroyed(),
        detail: format!("outcome {:?} at {:.0} s", engine.outcome(), engine.elapsed()),
    });
    results.push(TestResult {
        name: "run_game_over_fires_once".into(),
        passed: events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count()
            == 1,
        detail: "exactly one GameOver event".into(),
    });

    // Same seed, same story.
    let mut a = SurvivalEngine::new(scenario_config(4));
    let mut b = SurvivalEngine::new(scenario_config(4));
    let ea = run_to_resolution(&mut a, 0.05, 200_000);
    let eb = run_to_resolution(&mut b, 0.05, 200_000);
    results.push(TestResult {
        name: "run_seeded_determinism".into(),
        passed: a.outcome() == b.outcome()
            && a.total_spawned() == b.total_spawned()
            && a.elapsed() == b.elapsed()
            && ea.len() == eb.len(),
        detail: format!(
            "{:?}/{} spawns vs {:?}/{} spawns",
            a.outcome(),
            a.total_spawned(),
            b.outcome(),
            b.total_spawned()
        ),
    });

    results
}

// ── 6. Save/load ────────────────────────────────────────────────────────

fn validate_snapshot(verbose: bool) -> Vec<TestResult> {
    println!("--- Save/Load ---");
    let mut results = Vec::new();

    let mut config = scenario_config(5);
    for archetype in &mut config.archetypes {
        archetype.move_speed = 0.0;
    }
    let mut engine = SurvivalEngine::new(config);
    for _ in 0..1_000 {
        engine.update(0.1);
    }
    let _ = engine.drain_events();

    let mut buffer = Vec::new();
    let saved = engine.save(&mut buffer).is_ok();
    results.push(TestResult {
        name: "snapshot_saves".into(),
        passed: saved && !buffer.is_empty(),
        detail: format!("{} bytes", buffer.len()),
    });
    if verbose {
        println!("  save size: {} bytes", buffer.len());
    }

    match SurvivalEngine::load(&buffer[..]) {
        Ok(mut loaded) => {
            let matches = (loaded.elapsed() - engine.elapsed()).abs() < 1e-3
                && loaded.total_spawned() == engine.total_spawned()
                && loaded.active_monsters() == engine.active_monsters()
                && loaded.phase() == engine.phase();
            results.push(TestResult {
                name: "snapshot_roundtrip".into(),
                passed: matches,
                detail: format!(
                    "elapsed {:.1} s, {} spawned, {} active",
                    loaded.elapsed(),
                    loaded.total_spawned(),
                    loaded.active_monsters()
                ),
            });

            let before = loaded.elapsed();
            for _ in 0..100 {
                loaded.update(0.1);
            }
            results.push(TestResult {
                name: "snapshot_resumes".into(),
                passed: loaded.elapsed() > before,
                detail: format!("resumed from {:.1} s to {:.1} s", before, loaded.elapsed()),
            });
        }
        Err(e) => {
            results.push(TestResult {
                name: "snapshot_roundtrip".into(),
                passed: false,
                detail: format!("load failed: {}", e),
            });
        }
    }

    results
}
