//! Phase schedule math — maps elapsed survival time to Day/Night/Dawn.
//!
//! The schedule is a set of duration fractions normalized to sum 1.0.
//! Sampling it at an elapsed time yields exactly one phase plus the time
//! spent inside that phase; phase boundaries are monotonically increasing.

use serde::{Deserialize, Serialize};

/// Ordered survival phases. The sequence is not cyclic: the end of Dawn is
/// the win condition, not a wrap back to Day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Day,
    Night,
    Dawn,
}

impl Phase {
    /// All phases in schedule order.
    pub const ALL: [Phase; 3] = [Phase::Day, Phase::Night, Phase::Dawn];
}

/// Split used when all three configured fractions are zero.
const FALLBACK_SPLIT: [f32; 3] = [0.4, 0.3, 0.3];

/// Normalized phase duration fractions. Invariant: `day + night + dawn == 1.0`
/// (up to float rounding) and every fraction is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseSchedule {
    pub day: f32,
    pub night: f32,
    pub dawn: f32,
}

impl Default for PhaseSchedule {
    fn default() -> Self {
        Self {
            day: FALLBACK_SPLIT[0],
            night: FALLBACK_SPLIT[1],
            dawn: FALLBACK_SPLIT[2],
        }
    }
}

/// The result of sampling a schedule at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSample {
    pub phase: Phase,
    /// Time already spent inside `phase`, in `[0, phase_duration)`.
    pub phase_time: f32,
    /// Total duration of `phase` in seconds.
    pub phase_duration: f32,
}

impl PhaseSchedule {
    /// Build a schedule from raw fractions, normalizing them to sum 1.0.
    ///
    /// Negative or non-finite inputs are treated as zero. A degenerate
    /// all-zero triple yields the fallback 0.4/0.3/0.3 split so the
    /// division never blows up.
    pub fn normalized(day: f32, night: f32, dawn: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let (day, night, dawn) = (sanitize(day), sanitize(night), sanitize(dawn));
        let total = day + night + dawn;
        if total <= 0.0 {
            return Self::default();
        }
        Self {
            day: day / total,
            night: night / total,
            dawn: dawn / total,
        }
    }

    /// Normalized fraction of the run occupied by `phase`.
    pub fn fraction(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Day => self.day,
            Phase::Night => self.night,
            Phase::Dawn => self.dawn,
        }
    }

    /// Duration of `phase` in seconds for a run of `survival_time` seconds.
    pub fn duration(&self, phase: Phase, survival_time: f32) -> f32 {
        self.fraction(phase) * survival_time
    }

    /// Elapsed time at which `phase` begins.
    pub fn start(&self, phase: Phase, survival_time: f32) -> f32 {
        match phase {
            Phase::Day => 0.0,
            Phase::Night => self.day * survival_time,
            Phase::Dawn => (self.day + self.night) * survival_time,
        }
    }

    /// Sample the schedule at `elapsed` seconds into the run.
    ///
    /// `elapsed` past the end of the run clamps into Dawn; negative values
    /// clamp to the start of Day.
    pub fn sample(&self, elapsed: f32, survival_time: f32) -> PhaseSample {
        let elapsed = elapsed.max(0.0);
        let night_start = self.start(Phase::Night, survival_time);
        let dawn_start = self.start(Phase::Dawn, survival_time);

        let phase = if elapsed < night_start {
            Phase::Day
        } else if elapsed < dawn_start {
            Phase::Night
        } else {
            Phase::Dawn
        };

        let phase_duration = self.duration(phase, survival_time);
        let phase_time = (elapsed - self.start(phase, survival_time)).max(0.0);
        PhaseSample {
            phase,
            phase_time: if phase_duration > 0.0 {
                phase_time.min(phase_duration)
            } else {
                0.0
            },
            phase_duration,
        }
    }
}
