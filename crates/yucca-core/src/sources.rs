//! Collaborator traits: where fixes, time and configuration come from.
//!
//! The guard owns none of these. The host wires in whatever receiver driver,
//! scheduler clock and parameter store it has; the simulation crate provides
//! in-memory stand-ins for all three.

use nalgebra::Vector2;

use crate::fix::{FixQuality, GpsFix};
use crate::geo::Location;
use crate::guard::GuardConfig;

/// Supplies the current positioning sample on demand.
pub trait FixSource {
    fn quality(&self) -> FixQuality;
    fn location(&self) -> Location;
    /// Horizontal velocity (north, east) in cm/s.
    fn velocity_ne(&self) -> Vector2<f32>;
}

/// A snapshot is its own source.
impl FixSource for GpsFix {
    fn quality(&self) -> FixQuality {
        self.quality
    }

    fn location(&self) -> Location {
        self.location
    }

    fn velocity_ne(&self) -> Vector2<f32> {
        self.vel_ne_cms
    }
}

/// Monotonically non-decreasing milliseconds. May wrap.
pub trait MonotonicClock {
    fn now_ms(&self) -> u32;
}

/// Supplies the guard's configuration, re-read every evaluation so external
/// updates take effect between ticks.
pub trait ConfigStore {
    fn guard_config(&self) -> GuardConfig;
}
