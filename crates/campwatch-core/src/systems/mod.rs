//! Systems — logic stepped once per engine update over the hecs world.

pub mod lifecycle;
pub mod pursuit;

pub use lifecycle::{despawn_system, spawn_phase_system};
pub use pursuit::pursuit_system;
