//! Spawn geometry and archetype selection.
//!
//! All functions take uniform samples in `[0, 1)` drawn by the caller, so
//! the spawner stays deterministic under a seeded RNG and these stay pure.

/// Floor on the wait between spawn attempts, seconds.
pub const MIN_SPAWN_WAIT: f32 = 0.1;

/// Pick an index by cumulative-weight scan: entry `i` is chosen with
/// probability `weights[i] / total`. Non-positive weights are skippable but
/// still occupy an index. Returns `None` when the slice is empty or no
/// weight is positive.
pub fn weighted_pick(weights: &[f32], u: f32) -> Option<usize> {
    let total: f32 = weights.iter().filter(|w| w.is_finite() && **w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }
    let target = u.clamp(0.0, 1.0) * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (i, &w) in weights.iter().enumerate() {
        if !w.is_finite() || w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = Some(i);
        if target < cumulative {
            return Some(i);
        }
    }
    // u == 1.0 rounding edge: fall back to the last positive entry.
    last_positive
}

/// Wait before the next spawn attempt: `interval ± variation`, floored at
/// [`MIN_SPAWN_WAIT`].
pub fn next_spawn_wait(interval: f32, variation: f32, u: f32) -> f32 {
    let jitter = (u.clamp(0.0, 1.0) * 2.0 - 1.0) * variation.abs();
    (interval + jitter).max(MIN_SPAWN_WAIT)
}

/// Sample a point on the horizontal plane, uniform by area, over the
/// annulus sector `[min_radius, max_radius] × [offset, offset + range]`
/// degrees around the origin. Returns an `(x, z)` offset.
///
/// Radius uses square-root-of-uniform sampling so density is uniform per
/// unit area instead of clustering toward the center.
pub fn annulus_point(
    min_radius: f32,
    max_radius: f32,
    angle_range_deg: f32,
    angle_offset_deg: f32,
    u_radius: f32,
    u_angle: f32,
) -> (f32, f32) {
    let max_radius = max_radius.max(0.0);
    if max_radius <= 0.0 {
        return (0.0, 0.0);
    }
    let min_norm = (min_radius.max(0.0) / max_radius).min(1.0);

    let min_sq = min_norm * min_norm;
    let norm = (min_sq + u_radius.clamp(0.0, 1.0) * (1.0 - min_sq)).sqrt();
    let distance = norm * max_radius;

    let angle_deg = u_angle.clamp(0.0, 1.0) * angle_range_deg + angle_offset_deg;
    let angle = angle_deg.to_radians();

    (angle.cos() * distance, angle.sin() * distance)
}
