//! Fix quality scale and per-tick fix snapshots.

use nalgebra::Vector2;

use crate::geo::Location;

/// Receiver fix quality, ordered from no signal to RTK-fixed.
///
/// The ordering is load-bearing: anything below [`FixQuality::Fix3d`] carries
/// no usable position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum FixQuality {
    NoGps = 0,
    NoFix = 1,
    Fix2d = 2,
    Fix3d = 3,
    Dgps = 4,
    RtkFloat = 5,
    RtkFixed = 6,
}

impl FixQuality {
    pub fn label(self) -> &'static str {
        match self {
            Self::NoGps => "No GPS",
            Self::NoFix => "No Fix",
            Self::Fix2d => "2D",
            Self::Fix3d => "3D",
            Self::Dgps => "DGPS",
            Self::RtkFloat => "RTK Float",
            Self::RtkFixed => "RTK Fixed",
        }
    }

    /// True for 3D lock or better.
    pub fn has_3d_lock(self) -> bool {
        self >= Self::Fix3d
    }
}

/// One positioning sample, as read from the receiver this tick.
///
/// Velocity is horizontal (north, east) in cm/s. The sample is a value type;
/// the guard copies what it trusts and never holds a reference across ticks.
#[derive(Debug, Clone, Copy)]
pub struct GpsFix {
    pub quality: FixQuality,
    pub location: Location,
    pub vel_ne_cms: Vector2<f32>,
}

impl GpsFix {
    pub fn new(quality: FixQuality, location: Location, vel_ne_cms: Vector2<f32>) -> Self {
        Self {
            quality,
            location,
            vel_ne_cms,
        }
    }
}
