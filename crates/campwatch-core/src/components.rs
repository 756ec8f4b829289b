//! Components attached to monster entities, plus the small math types they
//! share.

use serde::{Deserialize, Serialize};

/// 3D position vector.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*other - *self).length()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::ZERO
        }
    }

    /// Copy with the vertical component zeroed. Pursuit happens on the
    /// horizontal plane only.
    pub fn horizontal(&self) -> Self {
        Self {
            x: self.x,
            y: 0.0,
            z: self.z,
        }
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// Spatial position of a monster in world space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Position {
    pub point: Vec3,
}

impl Position {
    pub fn new(point: Vec3) -> Self {
        Self { point }
    }
}

/// Facing direction on the horizontal plane, as a yaw angle in radians.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Heading {
    pub yaw: f32,
}

impl Heading {
    pub fn new(yaw: f32) -> Self {
        Self { yaw }
    }

    /// Yaw that points from `from` toward `to` on the horizontal plane.
    /// Zero-length directions keep yaw 0.
    pub fn yaw_between(from: Vec3, to: Vec3) -> f32 {
        let dir = (to - from).horizontal();
        if dir.length() > 0.0 {
            dir.z.atan2(dir.x)
        } else {
            0.0
        }
    }

    /// Turn toward `target_yaw` by the fraction `rate * dt` of the remaining
    /// angle, clamped to arrive exactly. Matches a per-frame spherical-lerp
    /// smoothing: fast turns early, easing in near the target.
    pub fn rotate_toward(&mut self, target_yaw: f32, rate: f32, dt: f32) {
        let fraction = (rate * dt).clamp(0.0, 1.0);
        self.yaw += wrap_angle(target_yaw - self.yaw) * fraction;
        self.yaw = wrap_angle(self.yaw);
    }
}

/// Wrap an angle into `(-PI, PI]`.
fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % std::f32::consts::TAU;
    if a > std::f32::consts::PI {
        a -= std::f32::consts::TAU;
    } else if a < -std::f32::consts::PI {
        a += std::f32::consts::TAU;
    }
    a
}

/// Lifecycle state of a monster. `Attacking` and `Dead` are terminal:
/// nothing transitions out of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MonsterState {
    /// Playing its spawn-in; immobile and non-interactive for movement.
    Spawning { remaining: f32 },
    /// Pursuing the camp anchor.
    Walking,
    /// Final attack delivered; awaiting despawn.
    Attacking,
    /// Health reached zero; awaiting despawn.
    Dead,
}

impl MonsterState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MonsterState::Attacking | MonsterState::Dead)
    }
}

/// Core monster component. Stats live on the archetype; this holds the
/// per-instance mutable state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Monster {
    /// Index into the engine's archetype table.
    pub archetype: usize,
    pub health: f32,
    pub max_health: f32,
    /// Assigned at spawn (rush policy or 1.0), fixed for the lifetime.
    pub speed_multiplier: f32,
    pub state: MonsterState,
    /// One-shot guard for the archetype's first-hit story hook.
    pub story_fired: bool,
}

impl Monster {
    pub fn health_percent(&self) -> f32 {
        campwatch_logic::combat::health_percent(self.health, self.max_health)
    }
}

/// Scheduled removal; present only once a monster has attacked or died.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DespawnTimer {
    pub remaining: f32,
}
