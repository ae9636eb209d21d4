//! Yucca Simulation Library
//!
//! Provides truth-track generation, GNSS fix-stream synthesis with fault
//! injection, and a harness that drives the glitch guard tick by tick.

pub mod harness;
pub mod params;
pub mod scenario;
pub mod sensor;

// Re-export main types
pub use harness::{run_guard, GuardRunResult, SimClock, SimConfigStore};
pub use params::*;
pub use scenario::{simulate_track, ScenarioParams, TruthTrack};
pub use sensor::{generate_fix_stream, FaultKind, FaultWindow, FixNoiseConfig, FixStream};
