//! Outbound events — the engine's entire boundary with the presentation
//! layer.
//!
//! Anything the host acts on (play an animation, trigger a cutscene,
//! switch scene on game over) is a fire-and-forget event here. The host
//! drains the queue after each update; the core never consults a return
//! value.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::components::Vec3;
use campwatch_logic::phase::Phase;

/// Animation state the presentation layer should play for a monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationCue {
    Spawn,
    Walk,
    Attack,
    Hit,
    Die,
}

/// Terminal result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

/// A single outbound notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The survival clock crossed into a new phase.
    PhaseChanged { phase: Phase },
    /// A monster entered the world.
    MonsterSpawned {
        monster: Entity,
        archetype: usize,
        position: Vec3,
        /// The rush sub-policy triggered for this spawn.
        rushed: bool,
    },
    /// Play an animation state on a monster.
    Animation { monster: Entity, cue: AnimationCue },
    /// An archetype's one-shot first-hit story hook fired.
    StoryTriggered { monster: Entity, archetype: usize },
    /// The camp absorbed an attack.
    CampDamaged { amount: f32, remaining: f32 },
    /// A monster left the world (any cause).
    MonsterDestroyed { monster: Entity },
    /// The run resolved; fires exactly once.
    GameOver { outcome: Outcome },
}
