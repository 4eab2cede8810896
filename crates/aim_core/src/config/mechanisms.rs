//! Arm, intake, launcher and climber configuration.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::gains::{ArmFeedforward, MotionConstraints, PidGains};
use crate::units::{inches_to_meters, rpm_to_rad_per_sec};

/// Free speed of the brushless motors used on every mechanism.
pub const MOTOR_FREE_SPEED_RPM: f64 = 5676.0;

/// Nominal battery voltage the feedforward gains are expressed against.
const NOMINAL_VOLTAGE: f64 = 12.0;

// ============================================================================
// Arm
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmParams {
    pub left_can_id: u8,
    pub left_inverted: bool,
    pub right_can_id: u8,
    pub right_inverted: bool,
    /// Limit switch on the intake side.
    pub front_limit_switch_port: u8,
    /// Limit switch on the camera side.
    pub back_limit_switch_port: u8,
    pub current_limit_a: u16,
    /// Soft limits in radians.
    pub front_limit: f64,
    pub back_limit: f64,
    /// Highest angle allowed while the robot is under the stage.
    pub under_stage_limit: f64,
    /// Arm rotations per motor rotation.
    pub gear_ratio: f64,
    pub motor_free_speed_rpm: f64,
    /// Gravity feedforward, volts.
    pub gravity_gain: f64,
    pub position_gains: PidGains,
    pub motion_constraints: MotionConstraints,
    /// Arm angle used for picking up game pieces.
    pub intake_angle: f64,
}

impl Default for ArmParams {
    fn default() -> Self {
        Self {
            left_can_id: 16,
            left_inverted: true,
            right_can_id: 17,
            right_inverted: false,
            front_limit_switch_port: 2,
            back_limit_switch_port: 1,
            current_limit_a: 40,
            front_limit: 0.0,
            back_limit: 1.58,
            under_stage_limit: 0.2,
            gear_ratio: 1.0 / 256.0,
            motor_free_speed_rpm: MOTOR_FREE_SPEED_RPM,
            gravity_gain: 0.47,
            position_gains: PidGains::proportional(0.6),
            motion_constraints: MotionConstraints::new(2.0, 2.0),
            intake_angle: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ArmParams", into = "ArmParams")]
pub struct ArmConfig {
    pub params: ArmParams,
    /// Through-bore rotations to arm radians.
    pub position_factor: f64,
    /// Encoder RPM to arm radians per second.
    pub velocity_factor: f64,
    /// Arm free speed, radians per second.
    pub free_speed: f64,
    pub feedforward: ArmFeedforward,
}

impl ArmConfig {
    pub fn new(params: ArmParams) -> Self {
        let position_factor = params.gear_ratio * 2.0 * PI;
        let velocity_factor = rpm_to_rad_per_sec(params.gear_ratio);
        let free_speed = params.motor_free_speed_rpm * velocity_factor;
        Self {
            position_factor,
            velocity_factor,
            free_speed,
            feedforward: ArmFeedforward {
                ks: 0.0,
                kg: params.gravity_gain,
                kv: NOMINAL_VOLTAGE / free_speed,
                ka: 0.0,
            },
            params,
        }
    }

    /// Clamp a requested arm angle to the soft limits in effect.
    pub fn clamp_angle(&self, angle: f64, under_stage: bool) -> f64 {
        let upper = if under_stage { self.params.under_stage_limit } else { self.params.back_limit };
        angle.clamp(self.params.front_limit, upper)
    }
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self::new(ArmParams::default())
    }
}

impl From<ArmParams> for ArmConfig {
    fn from(params: ArmParams) -> Self {
        Self::new(params)
    }
}

impl From<ArmConfig> for ArmParams {
    fn from(config: ArmConfig) -> Self {
        config.params
    }
}

// ============================================================================
// Intake
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeParams {
    pub can_id: u8,
    pub motor_inverted: bool,
    pub current_limit_a: u16,
    pub wheel_diameter_m: f64,
    pub breakbeam_port: u8,
    /// Breakbeam reads true while nothing blocks it.
    pub breakbeam_true_by_default: bool,
    pub position_gains: PidGains,
    pub position_tolerance: f64,
    pub intake_power: f64,
    /// Seconds after the breakbeam clears until the piece has left the launcher.
    pub clear_launcher_time_s: f64,
}

impl Default for IntakeParams {
    fn default() -> Self {
        Self {
            can_id: 13,
            motor_inverted: false,
            current_limit_a: 20,
            wheel_diameter_m: inches_to_meters(2.0),
            breakbeam_port: 3,
            breakbeam_true_by_default: true,
            position_gains: PidGains::proportional(1.0),
            position_tolerance: 0.5,
            intake_power: 0.7,
            clear_launcher_time_s: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "IntakeParams", into = "IntakeParams")]
pub struct IntakeConfig {
    pub params: IntakeParams,
    /// Motor rotations to surface travel in meters.
    pub rotations_to_meters: f64,
}

impl IntakeConfig {
    pub fn new(params: IntakeParams) -> Self {
        Self { rotations_to_meters: params.wheel_diameter_m * PI, params }
    }

    /// Whether a raw breakbeam reading means a game piece is present.
    pub fn piece_detected(&self, raw: bool) -> bool {
        raw != self.params.breakbeam_true_by_default
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self::new(IntakeParams::default())
    }
}

impl From<IntakeParams> for IntakeConfig {
    fn from(params: IntakeParams) -> Self {
        Self::new(params)
    }
}

impl From<IntakeConfig> for IntakeParams {
    fn from(config: IntakeConfig) -> Self {
        config.params
    }
}

// ============================================================================
// Launcher
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub top_can_id: u8,
    pub bottom_can_id: u8,
    pub top_inverted: bool,
    pub bottom_inverted: bool,
    pub current_limit_a: u16,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            top_can_id: 14,
            bottom_can_id: 15,
            top_inverted: false,
            bottom_inverted: false,
            current_limit_a: 80,
        }
    }
}

// ============================================================================
// Climber
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimberConfig {
    pub left_can_id: u8,
    /// Releasing spins the left motor counter-clockwise when set.
    pub left_inverted: bool,
    pub right_can_id: u8,
    pub right_inverted: bool,
    /// Output used to release (raise) the hooks.
    pub release_speed: f64,
    /// Output used to climb (lower) the hooks. Always negative.
    pub climb_speed: f64,
    /// Seconds at `release_speed` to reach the top.
    pub release_to_top_time_s: f64,
    /// Seconds at `climb_speed` to retract from the top to the bottom.
    pub retract_fully_down_time_s: f64,
}

impl Default for ClimberConfig {
    fn default() -> Self {
        Self {
            left_can_id: 18,
            left_inverted: true,
            right_can_id: 19,
            right_inverted: false,
            release_speed: 1.0,
            climb_speed: -0.5,
            release_to_top_time_s: 0.0,
            retract_fully_down_time_s: 0.0,
        }
    }
}
