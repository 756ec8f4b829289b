//! Camp state — the health pool the monsters are trying to empty.

use log::warn;

use crate::components::Vec3;
use campwatch_logic::combat;

/// Mutable camp health plus the anchor point monsters pursue.
///
/// Health only moves through [`CampState::take_damage`], so it is monotone
/// non-increasing for the life of the value.
#[derive(Debug, Clone)]
pub struct CampState {
    anchor: Vec3,
    max_health: f32,
    current_health: f32,
}

impl CampState {
    /// Fallback when a scenario configures a non-positive health pool.
    const DEFAULT_HEALTH: f32 = 100.0;

    pub fn new(anchor: Vec3, max_health: f32) -> Self {
        let max_health = if max_health > 0.0 {
            max_health
        } else {
            warn!(
                "camp health {} is not positive; falling back to {}",
                max_health,
                Self::DEFAULT_HEALTH
            );
            Self::DEFAULT_HEALTH
        };
        Self {
            anchor,
            max_health,
            current_health: max_health,
        }
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn current_health(&self) -> f32 {
        self.current_health
    }

    /// Health as a fraction of maximum, for external presentation.
    pub fn health_percent(&self) -> f32 {
        combat::health_percent(self.current_health, self.max_health)
    }

    pub fn is_destroyed(&self) -> bool {
        combat::is_dead(self.current_health)
    }

    /// Apply damage and return the remaining health, clamped at zero.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        self.current_health = combat::apply_damage(self.current_health, amount);
        self.current_health
    }

    pub(crate) fn restore(anchor: Vec3, max_health: f32, current_health: f32) -> Self {
        let mut camp = Self::new(anchor, max_health);
        camp.current_health = current_health.clamp(0.0, camp.max_health);
        camp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_full_health() {
        let camp = CampState::new(Vec3::ZERO, 100.0);
        assert_eq!(camp.current_health(), 100.0);
        assert_eq!(camp.health_percent(), 1.0);
        assert!(!camp.is_destroyed());
    }

    #[test]
    fn test_damage_is_monotone_and_clamped() {
        let mut camp = CampState::new(Vec3::ZERO, 100.0);
        assert_eq!(camp.take_damage(30.0), 70.0);
        assert_eq!(camp.take_damage(-10.0), 70.0);
        assert_eq!(camp.take_damage(100.0), 0.0);
        assert!(camp.is_destroyed());
        assert_eq!(camp.take_damage(5.0), 0.0);
    }

    #[test]
    fn test_non_positive_max_health_falls_back() {
        let camp = CampState::new(Vec3::ZERO, 0.0);
        assert_eq!(camp.max_health(), 100.0);
        let camp = CampState::new(Vec3::ZERO, -5.0);
        assert_eq!(camp.max_health(), 100.0);
    }
}
