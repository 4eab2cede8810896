//! Swerve drivetrain configuration.
//!
//! Hand-authored values live in the `*Params` structs. The config types wrap
//! them and carry the conversion factors and limits derived from them, computed
//! once when the config is built or deserialized.

use std::f64::consts::PI;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::gains::{IdleMode, MotionConstraints, OutputRange, PidGains};
use crate::units::{feet_to_meters, inches_to_meters};

/// One value per swerve module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerModule<T> {
    pub front_left: T,
    pub front_right: T,
    pub back_left: T,
    pub back_right: T,
}

impl<T> PerModule<T> {
    pub const fn new(front_left: T, front_right: T, back_left: T, back_right: T) -> Self {
        Self { front_left, front_right, back_left, back_right }
    }

    /// Front-left, front-right, back-left, back-right.
    pub fn to_array(self) -> [T; 4] {
        [self.front_left, self.front_right, self.back_left, self.back_right]
    }
}

impl<T: Copy> PerModule<T> {
    pub const fn splat(value: T) -> Self {
        Self::new(value, value, value, value)
    }
}

// ============================================================================
// Module
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwerveModuleParams {
    pub wheel_diameter_m: f64,
    /// Wheel rotations per drive motor rotation.
    pub drive_gear_ratio: f64,
    /// Module rotations per turning motor rotation.
    pub turning_gear_ratio: f64,
    pub drive_free_speed_mps: f64,
    pub driving_gains: PidGains,
    pub turning_gains: PidGains,
    pub turning_ff: f64,
    pub driving_output: OutputRange,
    pub turning_output: OutputRange,
    pub driving_idle_mode: IdleMode,
    pub turning_idle_mode: IdleMode,
    pub driving_current_limit_a: u16,
    pub turning_current_limit_a: u16,
}

impl Default for SwerveModuleParams {
    fn default() -> Self {
        Self {
            wheel_diameter_m: inches_to_meters(4.0),
            drive_gear_ratio: 1.0 / 6.75,
            turning_gear_ratio: 1.0 / (150.0 / 7.0),
            drive_free_speed_mps: feet_to_meters(15.1),
            driving_gains: PidGains::proportional(0.04),
            turning_gains: PidGains::proportional(1.0),
            turning_ff: 0.0,
            driving_output: OutputRange::default(),
            turning_output: OutputRange::default(),
            driving_idle_mode: IdleMode::Brake,
            turning_idle_mode: IdleMode::Brake,
            driving_current_limit_a: 50,
            turning_current_limit_a: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SwerveModuleParams", into = "SwerveModuleParams")]
pub struct SwerveModuleConfig {
    pub params: SwerveModuleParams,
    /// Drive encoder rotations to wheel travel in meters.
    pub drive_rot_to_meters: f64,
    /// Turning encoder rotations to module angle in radians.
    pub turning_rot_to_rad: f64,
    pub drive_rpm_to_mps: f64,
    pub turning_rpm_to_rad_per_sec: f64,
    /// Velocity feedforward for the drive loop.
    pub driving_ff: f64,
}

impl SwerveModuleConfig {
    pub fn new(params: SwerveModuleParams) -> Self {
        let drive_rot_to_meters = params.drive_gear_ratio * PI * params.wheel_diameter_m;
        let turning_rot_to_rad = params.turning_gear_ratio * 2.0 * PI;
        Self {
            drive_rot_to_meters,
            turning_rot_to_rad,
            drive_rpm_to_mps: drive_rot_to_meters / 60.0,
            turning_rpm_to_rad_per_sec: turning_rot_to_rad / 60.0,
            driving_ff: 1.0 / params.drive_free_speed_mps,
            params,
        }
    }
}

impl Default for SwerveModuleConfig {
    fn default() -> Self {
        Self::new(SwerveModuleParams::default())
    }
}

impl From<SwerveModuleParams> for SwerveModuleConfig {
    fn from(params: SwerveModuleParams) -> Self {
        Self::new(params)
    }
}

impl From<SwerveModuleConfig> for SwerveModuleParams {
    fn from(config: SwerveModuleConfig) -> Self {
        config.params
    }
}

// ============================================================================
// Ports
// ============================================================================

/// CAN ids for every module's motors and absolute encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwervePorts {
    pub drive_motor: PerModule<u8>,
    pub turning_motor: PerModule<u8>,
    pub absolute_encoder: PerModule<u8>,
}

impl Default for SwervePorts {
    fn default() -> Self {
        Self {
            drive_motor: PerModule::new(6, 9, 3, 12),
            turning_motor: PerModule::new(4, 7, 1, 10),
            absolute_encoder: PerModule::new(5, 8, 2, 11),
        }
    }
}

impl SwervePorts {
    pub fn all(&self) -> impl Iterator<Item = u8> + '_ {
        self.drive_motor
            .to_array()
            .into_iter()
            .chain(self.turning_motor.to_array())
            .chain(self.absolute_encoder.to_array())
    }
}

// ============================================================================
// Chassis
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChassisParams {
    /// Distance between left and right wheel centers.
    pub track_width_m: f64,
    /// Distance between front and back wheel centers.
    pub wheel_base_m: f64,
    pub turning_encoder_reversed: PerModule<bool>,
    pub drive_encoder_reversed: PerModule<bool>,
    pub absolute_encoder_reversed: PerModule<bool>,
    pub absolute_encoder_offset_rad: PerModule<f64>,
    pub max_speed_mps: f64,
    pub max_angular_speed_rad_per_sec: f64,
}

impl Default for ChassisParams {
    fn default() -> Self {
        Self {
            track_width_m: inches_to_meters(23.75),
            wheel_base_m: inches_to_meters(23.75),
            turning_encoder_reversed: PerModule::splat(true),
            drive_encoder_reversed: PerModule::splat(true),
            absolute_encoder_reversed: PerModule::splat(false),
            absolute_encoder_offset_rad: PerModule::new(
                3.45145677,
                5.46250558,
                2.61543724,
                4.71699094,
            ),
            max_speed_mps: 4.8,
            max_angular_speed_rad_per_sec: 2.0 * 2.0 * PI,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ChassisParams", into = "ChassisParams")]
pub struct ChassisConfig {
    pub params: ChassisParams,
    /// Center-to-corner-wheel distance.
    pub drive_base_radius: f64,
    /// Module positions relative to robot center, x forward, y left.
    pub module_locations: PerModule<Vector2<f64>>,
}

impl ChassisConfig {
    pub fn new(params: ChassisParams) -> Self {
        let half_base = params.wheel_base_m / 2.0;
        let half_track = params.track_width_m / 2.0;
        Self {
            drive_base_radius: half_track.hypot(half_base),
            module_locations: PerModule::new(
                Vector2::new(half_base, half_track),
                Vector2::new(half_base, -half_track),
                Vector2::new(-half_base, half_track),
                Vector2::new(-half_base, -half_track),
            ),
            params,
        }
    }
}

impl Default for ChassisConfig {
    fn default() -> Self {
        Self::new(ChassisParams::default())
    }
}

impl From<ChassisParams> for ChassisConfig {
    fn from(params: ChassisParams) -> Self {
        Self::new(params)
    }
}

impl From<ChassisConfig> for ChassisParams {
    fn from(config: ChassisConfig) -> Self {
        config.params
    }
}

// ============================================================================
// Teleop / Auto limits
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeleopConfig {
    pub max_speed_mps: f64,
    pub max_angular_speed_rad_per_sec: f64,
    pub max_acceleration: f64,
    pub max_angular_acceleration: f64,
    pub heading_gains: PidGains,
    pub heading_constraints: MotionConstraints,
}

impl TeleopConfig {
    pub fn from_chassis(chassis: &ChassisConfig) -> Self {
        let physical_angular = chassis.params.max_angular_speed_rad_per_sec;
        Self {
            max_speed_mps: chassis.params.max_speed_mps,
            max_angular_speed_rad_per_sec: physical_angular / 4.0,
            max_acceleration: 3.0,
            max_angular_acceleration: 3.0,
            heading_gains: PidGains::proportional(0.4),
            heading_constraints: MotionConstraints::new(physical_angular / 5.0, PI),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoConfig {
    pub max_speed_mps: f64,
    pub max_angular_speed_rad_per_sec: f64,
    pub max_acceleration: f64,
    pub max_angular_acceleration: f64,
    pub translation_gains: PidGains,
    pub rotation_gains: PidGains,
    pub theta_constraints: MotionConstraints,
}

impl AutoConfig {
    pub fn from_chassis(chassis: &ChassisConfig) -> Self {
        let max_angular_speed = chassis.params.max_angular_speed_rad_per_sec / 10.0;
        let max_angular_acceleration = PI / 4.0;
        Self {
            max_speed_mps: chassis.params.max_speed_mps / 4.0,
            max_angular_speed_rad_per_sec: max_angular_speed,
            max_acceleration: 3.0,
            max_angular_acceleration,
            translation_gains: PidGains::proportional(5.0),
            rotation_gains: PidGains::proportional(5.0),
            theta_constraints: MotionConstraints::new(max_angular_speed, max_angular_acceleration),
        }
    }
}

// ============================================================================
// Drivetrain
// ============================================================================

/// Drivetrain as written in a config file. Teleop and auto limits may be
/// omitted, in which case they are derived from the chassis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrivetrainParams {
    pub module: SwerveModuleConfig,
    pub ports: SwervePorts,
    pub chassis: ChassisConfig,
    pub teleop: Option<TeleopConfig>,
    pub auto: Option<AutoConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DrivetrainParams", into = "DrivetrainParams")]
pub struct DrivetrainConfig {
    pub module: SwerveModuleConfig,
    pub ports: SwervePorts,
    pub chassis: ChassisConfig,
    pub teleop: TeleopConfig,
    pub auto: AutoConfig,
}

impl Default for DrivetrainConfig {
    fn default() -> Self {
        DrivetrainParams::default().into()
    }
}

impl From<DrivetrainParams> for DrivetrainConfig {
    fn from(params: DrivetrainParams) -> Self {
        let teleop = params.teleop.unwrap_or_else(|| TeleopConfig::from_chassis(&params.chassis));
        let auto = params.auto.unwrap_or_else(|| AutoConfig::from_chassis(&params.chassis));
        Self { module: params.module, ports: params.ports, chassis: params.chassis, teleop, auto }
    }
}

impl From<DrivetrainConfig> for DrivetrainParams {
    fn from(config: DrivetrainConfig) -> Self {
        Self {
            module: config.module,
            ports: config.ports,
            chassis: config.chassis,
            teleop: Some(config.teleop),
            auto: Some(config.auto),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_conversion_factors() {
        let module = SwerveModuleConfig::default();
        let expected = (1.0 / 6.75) * PI * 0.1016;
        assert!((module.drive_rot_to_meters - expected).abs() < 1e-12);
        assert!((module.drive_rpm_to_mps - expected / 60.0).abs() < 1e-12);
        assert!((module.turning_rot_to_rad - 7.0 / 150.0 * 2.0 * PI).abs() < 1e-12);
        assert!((module.driving_ff - 1.0 / feet_to_meters(15.1)).abs() < 1e-12);
    }

    #[test]
    fn test_chassis_radius_and_locations() {
        let chassis = ChassisConfig::default();
        let half = inches_to_meters(23.75) / 2.0;
        assert!((chassis.drive_base_radius - half * 2f64.sqrt()).abs() < 1e-12);

        let [fl, fr, bl, br] = chassis.module_locations.to_array();
        assert_eq!(fl, Vector2::new(half, half));
        assert_eq!(fr, Vector2::new(half, -half));
        assert_eq!(bl, Vector2::new(-half, half));
        assert_eq!(br, Vector2::new(-half, -half));
    }

    #[test]
    fn test_ports_are_unique() {
        let ports = SwervePorts::default();
        let mut ids: Vec<u8> = ports.all().collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn test_teleop_and_auto_derived_from_chassis() {
        let drivetrain = DrivetrainConfig::default();
        assert_eq!(drivetrain.teleop.max_speed_mps, 4.8);
        assert!((drivetrain.teleop.max_angular_speed_rad_per_sec - PI).abs() < 1e-12);
        assert!((drivetrain.auto.max_speed_mps - 1.2).abs() < 1e-12);
        assert!((drivetrain.auto.max_angular_speed_rad_per_sec - 0.4 * PI).abs() < 1e-12);
        let theta = drivetrain.auto.theta_constraints;
        assert_eq!(theta.max_velocity, drivetrain.auto.max_angular_speed_rad_per_sec);
        assert!((theta.max_acceleration - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_yaml_derives_limits() {
        let yaml = "chassis:\n  max_speed_mps: 6.0\n";
        let drivetrain: DrivetrainConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(drivetrain.chassis.params.max_speed_mps, 6.0);
        assert_eq!(drivetrain.teleop.max_speed_mps, 6.0);
        assert!((drivetrain.auto.max_speed_mps - 1.5).abs() < 1e-12);
        // Untouched chassis keys keep their defaults.
        assert_eq!(drivetrain.chassis.params.track_width_m, inches_to_meters(23.75));
    }

    #[test]
    fn test_module_params_round_trip_through_json() {
        let module = SwerveModuleConfig::default();
        let json = serde_json::to_string(&module).unwrap();
        assert!(!json.contains("drive_rot_to_meters"));
        let parsed: SwerveModuleConfig = serde_json::from_str(&json).unwrap();
        assert!((parsed.drive_rot_to_meters - module.drive_rot_to_meters).abs() < 1e-12);
        assert_eq!(parsed.params.driving_current_limit_a, 50);
        assert_eq!(parsed.params.turning_idle_mode, IdleMode::Brake);
    }
}
