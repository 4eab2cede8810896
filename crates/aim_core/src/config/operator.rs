use serde::{Deserialize, Serialize};

/// Driver controller mapping and stick shaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    pub driver_controller_port: u8,
    pub left_x_deadband: f64,
    pub left_y_deadband: f64,
    pub right_x_deadband: f64,
    pub right_y_deadband: f64,
    pub arm_manual_deadband: f64,
    /// Multiplier from stick deflection to arm setpoint change.
    pub arm_manual_scale: f64,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            driver_controller_port: 0,
            left_x_deadband: 0.01,
            left_y_deadband: 0.01,
            right_x_deadband: 0.01,
            right_y_deadband: 0.01,
            arm_manual_deadband: 0.05,
            arm_manual_scale: 0.1,
        }
    }
}

impl OperatorConfig {
    /// Deadbanded and scaled manual arm input.
    pub fn arm_manual_input(&self, raw: f64) -> f64 {
        apply_deadband(raw, self.arm_manual_deadband) * self.arm_manual_scale
    }

    pub(crate) fn deadbands(&self) -> [(&'static str, f64); 5] {
        [
            ("operator.left_x_deadband", self.left_x_deadband),
            ("operator.left_y_deadband", self.left_y_deadband),
            ("operator.right_x_deadband", self.right_x_deadband),
            ("operator.right_y_deadband", self.right_y_deadband),
            ("operator.arm_manual_deadband", self.arm_manual_deadband),
        ]
    }
}

/// Zero inside `[-deadband, deadband]`, rescaled so the output still spans [-1, 1].
pub fn apply_deadband(value: f64, deadband: f64) -> f64 {
    if value.abs() <= deadband {
        return 0.0;
    }
    (value - deadband.copysign(value)) / (1.0 - deadband)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadband_zeroes_small_input() {
        assert_eq!(apply_deadband(0.04, 0.05), 0.0);
        assert_eq!(apply_deadband(-0.05, 0.05), 0.0);
    }

    #[test]
    fn test_deadband_rescales() {
        assert!((apply_deadband(1.0, 0.05) - 1.0).abs() < 1e-12);
        assert!((apply_deadband(-1.0, 0.05) + 1.0).abs() < 1e-12);
        assert!((apply_deadband(0.525, 0.05) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_arm_manual_input() {
        let operator = OperatorConfig::default();
        assert_eq!(operator.arm_manual_input(0.02), 0.0);
        assert!((operator.arm_manual_input(1.0) - 0.1).abs() < 1e-12);
    }
}
