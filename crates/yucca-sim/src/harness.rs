//! Drives the glitch guard across a synthesized fix stream.
//!
//! Stands in for the host flight loop: a millisecond clock derived from
//! scenario time, a config store the guard re-reads every tick, and a
//! per-tick record of what the guard decided.

use nalgebra::Vector2;
use yucca_core::{ConfigStore, GlitchGuard, GuardConfig, Location, MonotonicClock};

use crate::sensor::FixStream;

/// Scenario time as a wrapping 32-bit millisecond counter.
#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    ms: u32,
}

impl SimClock {
    pub fn from_secs(t: f64) -> Self {
        Self {
            ms: (t * 1000.0) as u64 as u32,
        }
    }
}

impl MonotonicClock for SimClock {
    fn now_ms(&self) -> u32 {
        self.ms
    }
}

/// In-memory parameter store. Mutate `config` between ticks to model a
/// hot reload.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimConfigStore {
    pub config: GuardConfig,
}

impl ConfigStore for SimConfigStore {
    fn guard_config(&self) -> GuardConfig {
        self.config
    }
}

pub struct GuardRunResult {
    pub time_s: Vec<f64>,
    pub glitching: Vec<bool>,
    pub last_good: Vec<Location>,
    pub last_good_vel: Vec<Vector2<f32>>,

    pub accepted_ticks: usize,
    pub rejected_ticks: usize,
    pub no_lock_ticks: usize,
}

/// Run a fresh guard over the whole stream under a fixed configuration.
pub fn run_guard(stream: &FixStream, config: &GuardConfig) -> GuardRunResult {
    let mut guard = GlitchGuard::new();
    let store = SimConfigStore { config: *config };

    let n = stream.time_s.len();
    let mut res = GuardRunResult {
        time_s: stream.time_s.clone(),
        glitching: Vec::with_capacity(n),
        last_good: Vec::with_capacity(n),
        last_good_vel: Vec::with_capacity(n),
        accepted_ticks: 0,
        rejected_ticks: 0,
        no_lock_ticks: 0,
    };

    for (t, fix) in stream.time_s.iter().zip(&stream.fixes) {
        let clock = SimClock::from_secs(*t);
        guard.evaluate(clock.now_ms(), fix, &store);

        // Lock loss and kinematic rejection surface identically on the
        // guard; the stream knows which was which.
        if !fix.quality.has_3d_lock() {
            res.no_lock_ticks += 1;
        } else if guard.is_glitching() {
            res.rejected_ticks += 1;
        } else {
            res.accepted_ticks += 1;
        }

        res.glitching.push(guard.is_glitching());
        res.last_good.push(guard.last_good_position());
        res.last_good_vel.push(guard.last_good_velocity());
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{simulate_track, ScenarioParams};
    use crate::sensor::{generate_fix_stream, FaultKind, FaultWindow, FixNoiseConfig};

    fn quiet_noise() -> FixNoiseConfig {
        FixNoiseConfig {
            pos_noise_std_cm: 25.0,
            vel_noise_std_cms: 10.0,
            ..FixNoiseConfig::default()
        }
    }

    fn track() -> crate::scenario::TruthTrack {
        simulate_track(&ScenarioParams {
            duration_s: 30.0,
            ..ScenarioParams::default()
        })
    }

    #[test]
    fn clean_stream_is_fully_trusted() {
        let stream = generate_fix_stream(&track(), &quiet_noise(), &[]);
        let res = run_guard(&stream, &GuardConfig::default());

        assert_eq!(res.rejected_ticks, 0);
        assert_eq!(res.no_lock_ticks, 0);
        assert_eq!(res.accepted_ticks, stream.fixes.len());
        assert!(res.glitching.iter().all(|g| !g));
    }

    #[test]
    fn multipath_jump_is_rejected_for_the_whole_window() {
        // 50 m step during cruise, well past what 1000 cm/s² can explain
        // within the window.
        let faults = [FaultWindow {
            start_s: 15.0,
            end_s: 17.0,
            kind: FaultKind::Jump {
                offset_ne_cm: Vector2::new(5_000.0, 0.0),
            },
        }];
        let stream = generate_fix_stream(&track(), &quiet_noise(), &faults);
        let res = run_guard(&stream, &GuardConfig::default());

        let mut reacquired = false;
        for (i, t) in res.time_s.iter().enumerate() {
            if (15.0..17.0).contains(t) {
                assert!(res.glitching[i], "jump trusted at t = {t}");
                // Reference stays frozen at the pre-jump anchor.
                assert_eq!(res.last_good[i], res.last_good[i - 1]);
            } else if *t >= 17.2 {
                reacquired = reacquired || !res.glitching[i];
            }
        }
        assert!(reacquired, "guard never re-trusted the clean stream");
        assert_eq!(res.rejected_ticks, 10);
    }

    #[test]
    fn lock_loss_is_counted_separately_and_recovers() {
        let faults = [FaultWindow {
            start_s: 2.0,
            end_s: 3.0,
            kind: FaultKind::LockLoss,
        }];
        let stream = generate_fix_stream(&track(), &quiet_noise(), &faults);
        let res = run_guard(&stream, &GuardConfig::default());

        assert_eq!(res.no_lock_ticks, 5);
        assert_eq!(res.rejected_ticks, 0);

        // First tick after reacquisition is trusted again.
        let after = res
            .time_s
            .iter()
            .position(|t| *t >= 3.0)
            .unwrap();
        assert!(!res.glitching[after]);
    }

    #[test]
    fn a_2d_solution_is_no_better_than_no_lock() {
        let faults = [FaultWindow {
            start_s: 2.0,
            end_s: 3.0,
            kind: FaultKind::Degraded2d,
        }];
        let stream = generate_fix_stream(&track(), &quiet_noise(), &faults);
        let res = run_guard(&stream, &GuardConfig::default());

        assert_eq!(res.no_lock_ticks, 5);
        assert_eq!(res.rejected_ticks, 0);
    }

    #[test]
    fn disabled_guard_never_flags_a_locked_fix() {
        let faults = [FaultWindow {
            start_s: 10.0,
            end_s: 20.0,
            kind: FaultKind::Jump {
                offset_ne_cm: Vector2::new(100_000.0, -40_000.0),
            },
        }];
        let stream = generate_fix_stream(&track(), &quiet_noise(), &faults);
        let res = run_guard(
            &stream,
            &GuardConfig {
                enabled: false,
                ..GuardConfig::default()
            },
        );

        assert_eq!(res.rejected_ticks, 0);
        assert!(res.glitching.iter().all(|g| !g));
    }
}
