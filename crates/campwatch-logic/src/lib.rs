//! Pure survival-simulation logic — no ECS, no engine dependencies.
//!
//! Phase scheduling, weighted archetype selection, spawn geometry, and
//! damage rules as pure functions. Callers own all randomness: functions
//! take pre-drawn uniform samples in `[0, 1)` rather than an RNG, so every
//! result is reproducible and trivially testable.

pub mod combat;
pub mod phase;
pub mod spawn;
