//! Damage rules shared by monsters and the camp.
//!
//! Health is monotone non-increasing and clamped at zero; a hit-region
//! multiplier scales incoming damage independently of any state machine.

use serde::{Deserialize, Serialize};

/// Where a hit landed, as tagged by the host's hit detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitRegion {
    Body,
    Head,
}

impl HitRegion {
    /// Damage multiplier for this region. Head shots count double.
    pub fn damage_multiplier(self) -> f32 {
        match self {
            HitRegion::Body => 1.0,
            HitRegion::Head => 2.0,
        }
    }
}

/// Apply damage to a health pool: monotone decrease, clamped at zero.
/// Negative damage amounts are ignored — health never increases here.
pub fn apply_damage(health: f32, amount: f32) -> f32 {
    (health - amount.max(0.0)).max(0.0)
}

/// Whether a health value counts as dead.
pub fn is_dead(health: f32) -> bool {
    health <= 0.0
}

/// Health as a fraction of maximum in `[0, 1]`, for external presentation.
/// A non-positive maximum yields 0.
pub fn health_percent(health: f32, max_health: f32) -> f32 {
    if max_health <= 0.0 {
        return 0.0;
    }
    (health / max_health).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_region_multipliers() {
        assert_eq!(HitRegion::Body.damage_multiplier(), 1.0);
        assert_eq!(HitRegion::Head.damage_multiplier(), 2.0);
    }

    #[test]
    fn test_apply_damage_clamps_at_zero() {
        assert_eq!(apply_damage(10.0, 25.0), 0.0);
        assert_eq!(apply_damage(0.0, 5.0), 0.0);
    }

    #[test]
    fn test_apply_damage_ignores_negative_amounts() {
        assert_eq!(apply_damage(50.0, -10.0), 50.0);
    }

    #[test]
    fn test_arrow_then_headshot_scenario() {
        // 100 HP, 25 arrow hit, then 25 head shot at ×2 → 25 HP, alive.
        let mut health = 100.0;
        health = apply_damage(health, 25.0 * HitRegion::Body.damage_multiplier());
        assert_eq!(health, 75.0);
        health = apply_damage(health, 25.0 * HitRegion::Head.damage_multiplier());
        assert_eq!(health, 25.0);
        assert!(!is_dead(health));
    }

    #[test]
    fn test_is_dead() {
        assert!(is_dead(0.0));
        assert!(is_dead(-1.0));
        assert!(!is_dead(0.01));
    }

    #[test]
    fn test_health_percent() {
        assert_eq!(health_percent(50.0, 100.0), 0.5);
        assert_eq!(health_percent(150.0, 100.0), 1.0);
        assert_eq!(health_percent(-5.0, 100.0), 0.0);
        assert_eq!(health_percent(50.0, 0.0), 0.0);
    }
}
