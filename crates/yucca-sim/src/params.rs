//! Parameter definitions for the guard and the simulation around it.

/// Parameter specification with bounds and step size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Human-readable label.
    pub label: &'static str,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Step size for sliders and sweeps.
    pub step: f64,
}

impl ParamSpec {
    /// Create a new parameter specification.
    pub const fn new(label: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self {
            label,
            min,
            max,
            step,
        }
    }
}

/// Glitch-guard tuning parameters.
pub mod guard {
    use super::ParamSpec;

    pub const TRUST_RADIUS: ParamSpec = ParamSpec::new("Trust Radius (cm)", 100.0, 2000.0, 100.0);
    pub const ACCEL_MAX: ParamSpec = ParamSpec::new("Max Accel (cm/s²)", 100.0, 2000.0, 100.0);
}

/// Flight scenario parameters.
pub mod scenario {
    use super::ParamSpec;

    pub const DURATION: ParamSpec = ParamSpec::new("Duration (s)", 5.0, 600.0, 5.0);
    pub const TICK_HZ: ParamSpec = ParamSpec::new("Guard Rate (Hz)", 1.0, 50.0, 1.0);
    pub const HOLD: ParamSpec = ParamSpec::new("Hold (s)", 0.0, 60.0, 1.0);
    pub const CRUISE_SPEED: ParamSpec = ParamSpec::new("Cruise Speed (cm/s)", 0.0, 3000.0, 50.0);
    pub const ACCEL: ParamSpec = ParamSpec::new("Accel (cm/s²)", 10.0, 1000.0, 10.0);
    pub const HEADING: ParamSpec = ParamSpec::new("Heading (°)", 0.0, 360.0, 5.0);
}

/// Receiver noise parameters.
pub mod noise {
    use super::ParamSpec;

    pub const NOISE_SCALE: ParamSpec = ParamSpec::new("Noise Scale", 0.0, 10.0, 0.1);
    pub const POS_STD: ParamSpec = ParamSpec::new("Pos σ (cm)", 0.0, 1000.0, 10.0);
    pub const VEL_STD: ParamSpec = ParamSpec::new("Vel σ (cm/s)", 0.0, 200.0, 5.0);
}

/// Guard tuning defaults, by parameter name.
pub const GUARD_DEFAULTS: [(&str, f64); 2] = [("radius_cm", 200.0), ("accel_max_cmss", 1000.0)];

/// Get the default value for a guard parameter.
pub fn guard_param_default(param: &str) -> Option<f64> {
    for (name, value) in GUARD_DEFAULTS.iter() {
        if *name == param {
            return Some(*value);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_defaults() {
        assert_eq!(guard_param_default("radius_cm"), Some(200.0));
        assert_eq!(guard_param_default("accel_max_cmss"), Some(1000.0));
        assert!(guard_param_default("unknown_param").is_none());
    }

    #[test]
    fn test_guard_defaults_sit_inside_their_ranges() {
        let radius = guard_param_default("radius_cm").unwrap();
        assert!(radius >= guard::TRUST_RADIUS.min && radius <= guard::TRUST_RADIUS.max);

        let accel = guard_param_default("accel_max_cmss").unwrap();
        assert!(accel >= guard::ACCEL_MAX.min && accel <= guard::ACCEL_MAX.max);
    }

    #[test]
    fn test_param_spec() {
        let spec = ParamSpec::new("Test", 0.0, 100.0, 1.0);
        assert_eq!(spec.label, "Test");
        assert_eq!(spec.min, 0.0);
        assert_eq!(spec.max, 100.0);
        assert_eq!(spec.step, 1.0);
    }
}
