//! GNSS fix-stream synthesis.
//!
//! Turns a truth track into the stream a receiver would report: Gaussian
//! position/velocity noise, plus injected fault windows for the failure
//! modes a glitch guard exists to catch (multipath steps, loss of lock,
//! degraded 2D solutions).

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use yucca_core::{FixQuality, GpsFix, Location};

use crate::scenario::TruthTrack;

#[derive(Debug, Clone)]
pub struct FixNoiseConfig {
    pub noise_scale: f64,
    pub pos_noise_std_cm: f64,   // cm
    pub vel_noise_std_cms: f64,  // cm/s
    pub seed: u64,
}

impl Default for FixNoiseConfig {
    fn default() -> Self {
        Self {
            noise_scale: 1.0,
            pos_noise_std_cm: 150.0,
            vel_noise_std_cms: 20.0,
            seed: 42,
        }
    }
}

/// What a fault window does to the fixes inside it.
#[derive(Debug, Clone)]
pub enum FaultKind {
    /// Constant position offset, (north, east) cm. A multipath reflection or
    /// spoofed solution: quality stays good, position lies.
    Jump { offset_ne_cm: Vector2<f64> },
    /// Receiver drops below any usable fix.
    LockLoss,
    /// Receiver falls back to a 2D solution.
    Degraded2d,
}

#[derive(Debug, Clone)]
pub struct FaultWindow {
    pub start_s: f64,
    pub end_s: f64,
    pub kind: FaultKind,
}

impl FaultWindow {
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start_s && t < self.end_s
    }
}

#[derive(Clone)]
pub struct FixStream {
    pub time_s: Vec<f64>,
    pub fixes: Vec<GpsFix>,
    pub origin: Location,
}

pub fn generate_fix_stream(
    truth: &TruthTrack,
    cfg: &FixNoiseConfig,
    faults: &[FaultWindow],
) -> FixStream {
    let mut rng = StdRng::seed_from_u64(cfg.seed);

    let d_pos = Normal::new(0.0, cfg.noise_scale * cfg.pos_noise_std_cm).unwrap();
    let d_vel = Normal::new(0.0, cfg.noise_scale * cfg.vel_noise_std_cms).unwrap();

    let n = truth.time_s.len();
    let mut stream = FixStream {
        time_s: truth.time_s.clone(),
        fixes: Vec::with_capacity(n),
        origin: truth.origin,
    };

    for i in 0..n {
        let t = truth.time_s[i];

        let mut quality = FixQuality::Fix3d;
        let mut pos_ne = truth.pos_ne_cm[i]
            + Vector2::new(d_pos.sample(&mut rng), d_pos.sample(&mut rng));
        let vel_ne = truth.vel_ne_cms[i]
            + Vector2::new(d_vel.sample(&mut rng), d_vel.sample(&mut rng));

        for fault in faults.iter().filter(|f| f.contains(t)) {
            match &fault.kind {
                FaultKind::Jump { offset_ne_cm } => pos_ne += offset_ne_cm,
                FaultKind::LockLoss => quality = FixQuality::NoFix,
                FaultKind::Degraded2d => quality = FixQuality::Fix2d,
            }
        }

        let location = truth
            .origin
            .offset_cm(Vector2::new(pos_ne.x as f32, pos_ne.y as f32));

        stream.fixes.push(GpsFix::new(
            quality,
            location,
            Vector2::new(vel_ne.x as f32, vel_ne.y as f32),
        ));
    }

    stream
}
