//! Position glitch guard.
//!
//! A stateful per-tick validator for incoming GNSS fixes. Each tick it
//! dead-reckons the last trusted fix forward by its own velocity and elapsed
//! time, then accepts the new fix only if it lies within a fixed trust
//! radius of that prediction or within the distance reachable under a
//! bounded maximum acceleration. Downstream consumers poll the trust flag
//! and the frozen last-known-good reference instead of handling errors;
//! nothing here allocates or performs I/O.

use nalgebra::Vector2;

use crate::geo::Location;
use crate::sources::{ConfigStore, FixSource};

/// Guard tuning. Owned by the host's parameter store and re-read every tick,
/// so updates take effect between evaluations.
///
/// Values are taken as-is. A non-positive `radius_cm` disables the
/// fixed-tolerance fast path, and a non-positive `accel_max_cmss` then
/// rejects every fix the radius does not cover. Range checking belongs to
/// the store that feeds this in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardConfig {
    /// Glitch protection on/off. While off, the guard still re-seeds its
    /// reference from live data every tick.
    pub enabled: bool,
    /// Radius within which any new fix is accepted outright, cm.
    pub radius_cm: f32,
    /// Assumed maximum vehicle acceleration, cm/s².
    pub accel_max_cmss: f32,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius_cm: 200.0,
            accel_max_cmss: 1000.0,
        }
    }
}

/// Per-session guard state. Create once at subsystem start; there is no
/// reset, the instance lives as long as the session does.
#[derive(Debug, Clone)]
pub struct GlitchGuard {
    /// Time of the last trusted fix, monotonic ms.
    last_good_ms: u32,
    /// Position of the last trusted fix.
    last_good_loc: Location,
    /// Horizontal velocity (north, east) at the last trusted fix, cm/s.
    last_good_vel: Vector2<f32>,

    /// Set on the first fix adopted while a 3D lock exists. Never clears.
    initialized: bool,
    /// Current trust flag, recomputed every evaluation.
    glitching: bool,
}

impl Default for GlitchGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl GlitchGuard {
    pub fn new() -> Self {
        Self {
            last_good_ms: 0,
            last_good_loc: Location::default(),
            last_good_vel: Vector2::zeros(),
            initialized: false,
            glitching: false,
        }
    }

    /// Evaluate the current fix against the dead-reckoned prediction.
    ///
    /// The only mutating operation. Call once per control-loop tick from a
    /// single task; `now_ms` comes from the host's monotonic clock and a
    /// wrapped or stalled reading clamps elapsed time to zero.
    ///
    /// The kinematic bound is measured from the last accepted fix, not the
    /// last tick. While fixes are being rejected the acceptance envelope
    /// keeps widening with `0.5 * accel_max * t²`, so a persistent offset is
    /// eventually re-accepted.
    pub fn evaluate(&mut self, now_ms: u32, gps: &impl FixSource, store: &impl ConfigStore) {
        // An unlocked receiver carries no usable position. Flag and learn
        // nothing this tick.
        if !gps.quality().has_3d_lock() {
            self.glitching = true;
            return;
        }

        let config = store.guard_config();

        // Not yet initialized, or protection turned off: adopt the live fix
        // unconditionally so a later enable resumes from a fresh reference
        // rather than a stale one.
        if !self.initialized || !config.enabled {
            self.adopt(now_ms, gps);
            self.initialized = true;
            self.glitching = false;
            return;
        }

        let elapsed_s = now_ms.saturating_sub(self.last_good_ms) as f32 / 1000.0;

        // Project the trusted fix forward along its own velocity.
        let predicted = self.last_good_loc.offset_cm(self.last_good_vel * elapsed_s);
        let distance_cm = predicted.distance_cm(&gps.location());

        // Two-tier acceptance: a fixed radius absorbs receiver jitter at any
        // elapsed time, and beyond it the farthest the vehicle could have
        // traveled while accelerating at the configured maximum. Both bounds
        // are inclusive.
        let accepted = distance_cm <= config.radius_cm
            || distance_cm <= 0.5 * config.accel_max_cmss * elapsed_s * elapsed_s;

        if accepted {
            self.adopt(now_ms, gps);
        }
        self.glitching = !accepted;
    }

    fn adopt(&mut self, now_ms: u32, gps: &impl FixSource) {
        self.last_good_ms = now_ms;
        self.last_good_loc = gps.location();
        self.last_good_vel = gps.velocity_ne();
    }

    /// True while the latest fix is not to be trusted.
    pub fn is_glitching(&self) -> bool {
        self.glitching
    }

    /// Position of the last trusted fix.
    pub fn last_good_position(&self) -> Location {
        self.last_good_loc
    }

    /// Horizontal velocity (north, east) at the last trusted fix, cm/s.
    pub fn last_good_velocity(&self) -> Vector2<f32> {
        self.last_good_vel
    }

    /// Timestamp of the last trusted fix, monotonic ms.
    pub fn last_good_update_ms(&self) -> u32 {
        self.last_good_ms
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }
}
