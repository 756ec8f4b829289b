//! Monster lifecycle timers: spawn-in and scheduled despawn.

use hecs::{Entity, World};
use log::debug;

use crate::components::{DespawnTimer, Monster, MonsterState};
use crate::events::{AnimationCue, GameEvent};

/// Count down spawn-in timers; Spawning → Walking once they elapse.
pub fn spawn_phase_system(world: &mut World, dt: f32, events: &mut Vec<GameEvent>) {
    let mut now_walking: Vec<Entity> = Vec::new();

    for (entity, monster) in world.query_mut::<&mut Monster>() {
        if let MonsterState::Spawning { remaining } = &mut monster.state {
            *remaining -= dt;
            if *remaining <= 0.0 {
                monster.state = MonsterState::Walking;
                now_walking.push(entity);
            }
        }
    }

    for monster in now_walking {
        events.push(GameEvent::Animation {
            monster,
            cue: AnimationCue::Walk,
        });
    }
}

/// Count down despawn timers and remove expired monsters from the world.
/// Returns the removed entities so the spawner registry can be updated.
pub fn despawn_system(world: &mut World, dt: f32, events: &mut Vec<GameEvent>) -> Vec<Entity> {
    let mut expired: Vec<Entity> = Vec::new();

    for (entity, timer) in world.query_mut::<&mut DespawnTimer>() {
        timer.remaining -= dt;
        if timer.remaining <= 0.0 {
            expired.push(entity);
        }
    }

    for &monster in &expired {
        let _ = world.despawn(monster);
        debug!("despawned monster {:?}", monster);
        events.push(GameEvent::MonsterDestroyed { monster });
    }

    expired
}
