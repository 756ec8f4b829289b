//! CampWatch Core - Camp Survival Simulation Engine
//!
//! An ECS-based simulation of a timed camp-defence encounter: monsters spawn
//! on an arc around the camp, pursue it, and attack, while a survival clock
//! walks the run through its day, night, and dawn phases.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Monsters
//! - **Components**: Pure data attached to entities (Monster, Position, Heading)
//! - **Systems**: Logic that queries and updates components each tick
//!
//! The host (renderer, VR rig, test harness) owns the frame loop; it calls
//! [`engine::SurvivalEngine::update`] once per frame, reports arrow hits
//! through [`engine::SurvivalEngine::damage_monster`], and drains the event
//! queue for animation and UI cues.
//!
//! # Example
//!
//! ```rust,no_run
//! use campwatch_core::prelude::*;
//!
//! let mut engine = SurvivalEngine::new(GameConfig::default());
//!
//! // Run simulation
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS
//!     for event in engine.drain_events() {
//!         println!("{:?}", event);
//!     }
//!     if !engine.is_active() {
//!         break;
//!     }
//! }
//! ```

pub mod camp;
pub mod clock;
pub mod components;
pub mod config;
pub mod engine;
pub mod events;
pub mod snapshot;
pub mod spawner;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::camp::CampState;
    pub use crate::components::*;
    pub use crate::config::{ArchetypeConfig, GameConfig, PhaseProfile, RushPolicy};
    pub use crate::engine::SurvivalEngine;
    pub use crate::events::{AnimationCue, GameEvent, Outcome};
    pub use campwatch_logic::combat::HitRegion;
    pub use campwatch_logic::phase::Phase;
}
