//! Survival clock — monotonic elapsed time mapped onto the phase schedule.
//!
//! Phase and in-phase time are recomputed from elapsed time each tick, not
//! stored independently, so the clock can never disagree with itself.

use serde::{Deserialize, Serialize};

use campwatch_logic::phase::{Phase, PhaseSample, PhaseSchedule};

/// What a single tick observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockTick {
    /// `Some(phase)` exactly once per boundary crossing (including entering
    /// Day on the first tick).
    pub transition: Option<Phase>,
    /// The survival duration has elapsed.
    pub finished: bool,
}

/// Monotonic survival clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivalClock {
    survival_time: f32,
    schedule: PhaseSchedule,
    elapsed: f32,
    /// Last phase reported through a transition; `None` until the first tick.
    current: Option<Phase>,
}

impl SurvivalClock {
    pub fn new(survival_time: f32, schedule: PhaseSchedule) -> Self {
        Self {
            survival_time: survival_time.max(0.0),
            schedule,
            elapsed: 0.0,
            current: None,
        }
    }

    /// Advance by `dt` seconds and report any phase transition plus whether
    /// the survival duration has now elapsed.
    pub fn tick(&mut self, dt: f32) -> ClockTick {
        self.elapsed += dt.max(0.0);

        let phase = self.sample().phase;
        let transition = if self.current != Some(phase) {
            self.current = Some(phase);
            Some(phase)
        } else {
            None
        };

        ClockTick {
            transition,
            finished: self.elapsed >= self.survival_time,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn remaining(&self) -> f32 {
        (self.survival_time - self.elapsed).max(0.0)
    }

    pub fn survival_time(&self) -> f32 {
        self.survival_time
    }

    pub fn schedule(&self) -> &PhaseSchedule {
        &self.schedule
    }

    /// Phase last reported through a transition.
    pub fn phase(&self) -> Option<Phase> {
        self.current
    }

    /// Current phase sample derived from elapsed time.
    pub fn sample(&self) -> PhaseSample {
        self.schedule.sample(self.elapsed, self.survival_time)
    }

    pub(crate) fn restore(survival_time: f32, schedule: PhaseSchedule, elapsed: f32) -> Self {
        let mut clock = Self::new(survival_time, schedule);
        clock.elapsed = elapsed.max(0.0);
        clock.current = Some(clock.sample().phase);
        clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_clock() -> SurvivalClock {
        SurvivalClock::new(300.0, PhaseSchedule::normalized(0.4, 0.3, 0.3))
    }

    #[test]
    fn test_first_tick_enters_day() {
        let mut clock = reference_clock();
        assert_eq!(clock.phase(), None);
        let tick = clock.tick(0.016);
        assert_eq!(tick.transition, Some(Phase::Day));
        assert!(!tick.finished);
    }

    #[test]
    fn test_one_transition_per_boundary() {
        let mut clock = reference_clock();
        let mut transitions = Vec::new();
        for _ in 0..3100 {
            if let Some(phase) = clock.tick(0.1).transition {
                transitions.push((phase, clock.elapsed()));
            }
        }
        let phases: Vec<Phase> = transitions.iter().map(|(p, _)| *p).collect();
        assert_eq!(phases, vec![Phase::Day, Phase::Night, Phase::Dawn]);
        assert!((transitions[1].1 - 120.0).abs() < 0.11);
        assert!((transitions[2].1 - 210.0).abs() < 0.11);
    }

    #[test]
    fn test_finished_at_survival_time() {
        let mut clock = reference_clock();
        let mut finished_at = None;
        for _ in 0..3100 {
            if clock.tick(0.1).finished {
                finished_at = Some(clock.elapsed());
                break;
            }
        }
        let finished_at = finished_at.expect("clock never finished");
        assert!(finished_at >= 300.0 && finished_at < 300.2);
    }

    #[test]
    fn test_remaining_clamps_at_zero() {
        let mut clock = SurvivalClock::new(1.0, PhaseSchedule::default());
        let _ = clock.tick(5.0);
        assert_eq!(clock.remaining(), 0.0);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut clock = reference_clock();
        let _ = clock.tick(1.0);
        let before = clock.elapsed();
        let _ = clock.tick(-2.0);
        assert_eq!(clock.elapsed(), before);
    }
}
