//! Fixed-point geodetic locations and the planar small-offset math the guard
//! runs on.
//!
//! Positions are carried as integer degrees ×1e7, the native format of most
//! GNSS receivers. Offsets and distances use a local-tangent-plane
//! (equirectangular) approximation: latitude units map to a constant
//! centimeter scale and longitude units are compressed by cos(latitude).
//! Only valid for small, sub-kilometer offsets.

use nalgebra::Vector2;

/// Centimeters per 1e-7 degree of latitude.
pub const CM_PER_LATLON_UNIT: f32 = 1.113195;

/// 1e-7 degrees to radians.
const LATLON_UNIT_TO_RAD: f32 = 1.0e-7 * core::f32::consts::PI / 180.0;

// cos(lat) shrinks toward the poles; keep a positive floor so longitude
// conversions never divide by zero.
const LON_SCALE_MIN: f32 = 0.01;

/// Geodetic position, degrees ×1e7.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location {
    pub lat: i32,
    pub lon: i32,
}

impl Location {
    pub const fn new(lat: i32, lon: i32) -> Self {
        Self { lat, lon }
    }

    /// Build from floating-point degrees. Host/test convenience; onboard
    /// sources already deliver the fixed-point form.
    pub fn from_degrees(lat_deg: f64, lon_deg: f64) -> Self {
        Self {
            lat: (lat_deg * 1e7) as i32,
            lon: (lon_deg * 1e7) as i32,
        }
    }

    /// Longitude compression factor at this latitude, clamped away from zero.
    pub fn lon_scale(&self) -> f32 {
        let scale = libm::cosf(self.lat as f32 * LATLON_UNIT_TO_RAD);
        scale.clamp(LON_SCALE_MIN, 1.0)
    }

    /// Shift this location by a (north, east) offset in centimeters.
    ///
    /// Equirectangular approximation; sub-kilometer offsets only.
    pub fn offset_cm(&self, offset_ne_cm: Vector2<f32>) -> Self {
        let dlat = offset_ne_cm.x / CM_PER_LATLON_UNIT;
        let dlon = offset_ne_cm.y / (CM_PER_LATLON_UNIT * self.lon_scale());
        Self {
            lat: self.lat + dlat as i32,
            lon: self.lon + dlon as i32,
        }
    }

    /// Planar distance to `other` in centimeters.
    ///
    /// Same approximation as [`Location::offset_cm`]; the longitude delta is
    /// scaled by cos(latitude) at `self`.
    pub fn distance_cm(&self, other: &Self) -> f32 {
        let dlat = (other.lat - self.lat) as f32;
        let dlon = (other.lon - self.lon) as f32 * self.lon_scale();
        Vector2::new(dlat, dlon).norm() * CM_PER_LATLON_UNIT
    }
}
