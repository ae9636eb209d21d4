//! # Yucca Core
//!
//! GNSS position glitch guard designed for `no_std` flight-controller
//! environments. This crate contains only the code that needs to run on the
//! vehicle:
//! - Fixed-point geodetic locations and planar small-offset math
//! - Fix quality scale and per-tick fix snapshots
//! - The stateful glitch guard itself
//!
//! The guard performs no I/O and never allocates; fixes, timestamps and
//! configuration come in through the collaborator traits in [`sources`].
//!
//! # Features
//! - `std`: Enable standard library support (for host-side tooling)
//! - Default: `no_std` with no allocations (bare metal embedded)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod fix;
pub mod geo;
pub mod guard;
pub mod sources;

// Re-export core types
pub use fix::{FixQuality, GpsFix};
pub use geo::Location;
pub use guard::{GlitchGuard, GuardConfig};
pub use sources::{ConfigStore, FixSource, MonotonicClock};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
