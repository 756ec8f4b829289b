//! Pursuit system — walking monsters chase the camp anchor and deliver
//! their one-shot attack inside the safety radius.
//!
//! Straight-line pursuit on the horizontal plane only; no pathfinding or
//! obstacle avoidance.

use hecs::{Entity, World};
use log::warn;

use crate::components::{DespawnTimer, Heading, Monster, MonsterState, Position, Vec3};
use crate::config::ArchetypeConfig;
use crate::events::{AnimationCue, GameEvent};

enum Step {
    Move {
        entity: Entity,
        position: Vec3,
        yaw: f32,
    },
    Attack {
        entity: Entity,
        yaw: f32,
        damage: f32,
        destroy_delay: f32,
    },
}

/// Advance every walking monster one tick. Returns the total damage the
/// camp absorbed from attacks delivered this tick.
pub fn pursuit_system(
    world: &mut World,
    anchor: Vec3,
    archetypes: &[ArchetypeConfig],
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> f32 {
    // Collect first; attacks insert components, which would invalidate the query.
    let mut steps: Vec<Step> = Vec::new();

    for (entity, (monster, position, heading)) in
        world.query::<(&Monster, &Position, &Heading)>().iter()
    {
        if monster.state != MonsterState::Walking {
            continue;
        }
        let archetype = match archetypes.get(monster.archetype) {
            Some(archetype) => archetype,
            None => {
                // Defensive: stale index freezes the monster in place.
                warn!("monster {:?} references missing archetype {}", entity, monster.archetype);
                continue;
            }
        };

        let to_anchor = (anchor - position.point).horizontal();
        let distance = to_anchor.length();
        let target_yaw = Heading::yaw_between(position.point, anchor);

        if distance <= archetype.safety_radius {
            steps.push(Step::Attack {
                entity,
                yaw: target_yaw,
                damage: archetype.attack_damage,
                destroy_delay: archetype.destroy_delay,
            });
        } else {
            let direction = to_anchor.normalize();
            let mut new_heading = *heading;
            new_heading.rotate_toward(
                target_yaw,
                archetype.rotation_speed * monster.speed_multiplier,
                dt,
            );
            let step = archetype.move_speed * monster.speed_multiplier * dt;
            steps.push(Step::Move {
                entity,
                position: position.point + direction * step,
                yaw: new_heading.yaw,
            });
        }
    }

    let mut total_damage = 0.0;
    for step in steps {
        match step {
            Step::Move { entity, position, yaw } => {
                if let Ok(mut pos) = world.get::<&mut Position>(entity) {
                    pos.point = position;
                }
                if let Ok(mut heading) = world.get::<&mut Heading>(entity) {
                    heading.yaw = yaw;
                }
            }
            Step::Attack {
                entity,
                yaw,
                damage,
                destroy_delay,
            } => {
                if let Ok(mut monster) = world.get::<&mut Monster>(entity) {
                    // Single-fire: the state write is the guard.
                    monster.state = MonsterState::Attacking;
                } else {
                    continue;
                }
                if let Ok(mut heading) = world.get::<&mut Heading>(entity) {
                    // Snap to face the target for the attack.
                    heading.yaw = yaw;
                }
                let _ = world.insert_one(
                    entity,
                    DespawnTimer {
                        remaining: destroy_delay,
                    },
                );
                total_damage += damage;
                events.push(GameEvent::Animation {
                    monster: entity,
                    cue: AnimationCue::Attack,
                });
            }
        }
    }

    total_damage
}
