use serde::{Deserialize, Serialize};

/// Proportional / integral / derivative gains for one control loop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidGains {
    pub p: f64,
    pub i: f64,
    pub d: f64,
}

impl PidGains {
    pub const fn new(p: f64, i: f64, d: f64) -> Self {
        Self { p, i, d }
    }

    pub const fn proportional(p: f64) -> Self {
        Self::new(p, 0.0, 0.0)
    }
}

/// Clamp applied to a motor controller's closed-loop output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputRange {
    pub min: f64,
    pub max: f64,
}

impl Default for OutputRange {
    fn default() -> Self {
        Self { min: -1.0, max: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleMode {
    #[default]
    Brake,
    Coast,
}

/// Trapezoidal motion profile limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionConstraints {
    pub max_velocity: f64,
    pub max_acceleration: f64,
}

impl MotionConstraints {
    pub const fn new(max_velocity: f64, max_acceleration: f64) -> Self {
        Self { max_velocity, max_acceleration }
    }
}

/// Static, gravity, velocity and acceleration gains for a pivoting arm, in volts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArmFeedforward {
    pub ks: f64,
    pub kg: f64,
    pub kv: f64,
    pub ka: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proportional_gains() {
        assert_eq!(PidGains::proportional(0.6), PidGains { p: 0.6, i: 0.0, d: 0.0 });
    }

    #[test]
    fn test_output_range_default() {
        let range = OutputRange::default();
        assert_eq!((range.min, range.max), (-1.0, 1.0));
    }

    #[test]
    fn test_idle_mode_serde() {
        assert_eq!(serde_json::to_string(&IdleMode::Coast).unwrap(), "\"coast\"");
        let mode: IdleMode = serde_yaml::from_str("brake").unwrap();
        assert_eq!(mode, IdleMode::Brake);
    }
}
