//! Planar truth-track generation.
//!
//! Produces the ground-truth trajectory a fix stream is synthesized from: a
//! hover followed by acceleration to cruise along a commanded heading.
//! Kinematics are
//! integrated at the guard's own tick rate, so every truth sample lines up
//! with one guard evaluation.

use nalgebra::Vector2;
use yucca_core::Location;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub duration_s: f64, // s
    pub tick_hz: f64,    // guard evaluation rate

    // Where the flight happens; fixes are laid out around this origin.
    pub origin_lat_deg: f64,
    pub origin_lon_deg: f64,

    pub hold_s: f64,           // hover before departure
    pub cruise_speed_cms: f64, // commanded ground speed, cm/s
    pub accel_cmss: f64,       // speed-change acceleration, cm/s²
    pub heading_deg: f64,      // course over ground, degrees from north
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            duration_s: 60.0,
            tick_hz: 5.0,
            origin_lat_deg: 35.0,
            origin_lon_deg: -106.0,
            hold_s: 5.0,
            cruise_speed_cms: 800.0,
            accel_cmss: 150.0,
            heading_deg: 45.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Truth track
// ---------------------------------------------------------------------------
#[derive(Clone)]
pub struct TruthTrack {
    pub time_s: Vec<f64>,
    /// Position relative to the origin, (north, east) cm.
    pub pos_ne_cm: Vec<Vector2<f64>>,
    /// Ground velocity, (north, east) cm/s.
    pub vel_ne_cms: Vec<Vector2<f64>>,
    pub origin: Location,
}

pub fn simulate_track(p: &ScenarioParams) -> TruthTrack {
    let dt = 1.0 / p.tick_hz;
    let steps = (p.duration_s * p.tick_hz) as usize;

    let heading = p.heading_deg.to_radians();
    let course = Vector2::new(heading.cos(), heading.sin());

    let mut res = TruthTrack {
        time_s: Vec::with_capacity(steps),
        pos_ne_cm: Vec::with_capacity(steps),
        vel_ne_cms: Vec::with_capacity(steps),
        origin: Location::from_degrees(p.origin_lat_deg, p.origin_lon_deg),
    };

    let mut pos = Vector2::zeros();
    let mut speed = 0.0f64;

    for i in 0..steps {
        // Derive t from the index; accumulating dt drifts over a long run.
        let t = i as f64 * dt;
        let vel = course * speed;

        res.time_s.push(t);
        res.pos_ne_cm.push(pos);
        res.vel_ne_cms.push(vel);

        // Forward Euler is plenty at these rates; there is no attitude or
        // force model to stiffen the system.
        pos += vel * dt;
        if t >= p.hold_s && speed < p.cruise_speed_cms {
            speed = (speed + p.accel_cmss * dt).min(p.cruise_speed_cms);
        }
    }

    res
}
