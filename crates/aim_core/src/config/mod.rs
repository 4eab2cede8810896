//! # Robot Configuration
//!
//! Every tunable number on the robot, grouped by subsystem. Configs are plain
//! values: build one at startup, validate it, and hand references to the
//! subsystems that need them. Derived constants (encoder conversion factors,
//! module locations, feedforward gains) are computed when a config is built or
//! deserialized, so readers never recompute them.
//!
//! ## Usage
//! ```rust
//! use aim_core::config::RobotConfig;
//! use aim_core::geometry::FieldPoint;
//!
//! let config = RobotConfig::default();
//! config.validate().unwrap();
//!
//! let resolver = config.target_resolver();
//! let target = resolver.resolve_nearest(FieldPoint::new(1.0, 1.0), false).unwrap();
//! assert_eq!(target.name, "in_front_of_speaker");
//! ```

mod drivetrain;
mod gains;
mod mechanisms;
mod operator;
mod positions;

pub use drivetrain::{
    AutoConfig, ChassisConfig, ChassisParams, DrivetrainConfig, DrivetrainParams, PerModule,
    SwerveModuleConfig, SwerveModuleParams, SwervePorts, TeleopConfig,
};
pub use gains::{ArmFeedforward, IdleMode, MotionConstraints, OutputRange, PidGains};
pub use mechanisms::{
    ArmConfig, ArmParams, ClimberConfig, IntakeConfig, IntakeParams, LauncherConfig,
    MOTOR_FREE_SPEED_RPM,
};
pub use operator::{apply_deadband, OperatorConfig};
pub use positions::{ShootingParams, ShootingPositions};

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::field::{FieldConfig, FieldParams};
use crate::geometry::{is_finite_point, FieldPoint};
use crate::targets::{ScoringTarget, SharedCatalog, TargetCatalog, TargetResolver};

static DEFAULT_CONFIG: Lazy<RobotConfig> = Lazy::new(RobotConfig::default);

/// Complete robot configuration.
///
/// The stage zone and the amp pose depend on the field size and the chassis,
/// so they are derived after every section has been read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RobotParams", into = "RobotParams")]
pub struct RobotConfig {
    pub operator: OperatorConfig,
    pub field: FieldConfig,
    pub drivetrain: DrivetrainConfig,
    pub arm: ArmConfig,
    pub intake: IntakeConfig,
    pub launcher: LauncherConfig,
    pub climber: ClimberConfig,
    pub shooting: ShootingPositions,
}

/// Robot configuration as written in a config file. Missing sections keep
/// their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotParams {
    pub operator: OperatorConfig,
    pub field: FieldParams,
    pub drivetrain: DrivetrainConfig,
    pub arm: ArmConfig,
    pub intake: IntakeConfig,
    pub launcher: LauncherConfig,
    pub climber: ClimberConfig,
    pub shooting: ShootingParams,
}

impl From<RobotParams> for RobotConfig {
    fn from(params: RobotParams) -> Self {
        let drivetrain = params.drivetrain;
        let field = FieldConfig::from_params(params.field, drivetrain.chassis.drive_base_radius);
        let shooting = params.shooting.resolve(field.width_m, field.robot_radius_m);
        Self {
            operator: params.operator,
            field,
            drivetrain,
            arm: params.arm,
            intake: params.intake,
            launcher: params.launcher,
            climber: params.climber,
            shooting,
        }
    }
}

impl From<RobotConfig> for RobotParams {
    fn from(config: RobotConfig) -> Self {
        Self {
            operator: config.operator,
            field: config.field.into(),
            drivetrain: config.drivetrain,
            arm: config.arm,
            intake: config.intake,
            launcher: config.launcher,
            climber: config.climber,
            shooting: config.shooting.into(),
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        RobotParams::default().into()
    }
}

impl RobotConfig {
    /// Shared, immutable copy of the authored defaults.
    pub fn defaults() -> &'static RobotConfig {
        &DEFAULT_CONFIG
    }

    /// Parse and validate a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: RobotConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RobotConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let contents = match extension.as_deref() {
            Some("yaml" | "yml" | "json") => fs::read_to_string(path)?,
            _ => return Err(ConfigError::UnsupportedFormat { path: path.to_path_buf() }),
        };
        let config = if extension.as_deref() == Some("json") {
            Self::from_json_str(&contents)?
        } else {
            Self::from_yaml_str(&contents)?
        };

        info!(
            path = %path.display(),
            speaker_targets = config.shooting.speaker.len(),
            "loaded robot config"
        );
        Ok(config)
    }

    /// Check cross-field invariants. Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field.length_m", self.field.length_m)?;
        positive("field.width_m", self.field.width_m)?;

        let module = &self.drivetrain.module.params;
        positive("drivetrain.module.wheel_diameter_m", module.wheel_diameter_m)?;
        positive("drivetrain.module.drive_gear_ratio", module.drive_gear_ratio)?;
        positive("drivetrain.module.turning_gear_ratio", module.turning_gear_ratio)?;
        positive("drivetrain.module.drive_free_speed_mps", module.drive_free_speed_mps)?;

        let chassis = &self.drivetrain.chassis.params;
        positive("drivetrain.chassis.track_width_m", chassis.track_width_m)?;
        positive("drivetrain.chassis.wheel_base_m", chassis.wheel_base_m)?;

        let arm = &self.arm.params;
        positive("arm.gear_ratio", arm.gear_ratio)?;
        if arm.front_limit >= arm.back_limit {
            return Err(ConfigError::invalid(
                "arm.back_limit",
                format!("{} must exceed front limit {}", arm.back_limit, arm.front_limit),
            ));
        }
        if !(arm.front_limit..=arm.back_limit).contains(&arm.under_stage_limit) {
            return Err(ConfigError::invalid(
                "arm.under_stage_limit",
                format!(
                    "{} outside arm range [{}, {}]",
                    arm.under_stage_limit, arm.front_limit, arm.back_limit
                ),
            ));
        }

        positive("intake.wheel_diameter_m", self.intake.params.wheel_diameter_m)?;

        if self.climber.climb_speed.is_nan() || self.climber.climb_speed >= 0.0 {
            return Err(ConfigError::invalid(
                "climber.climb_speed",
                format!("{} must be negative", self.climber.climb_speed),
            ));
        }

        for (field, deadband) in self.operator.deadbands() {
            if !(0.0..1.0).contains(&deadband) {
                return Err(ConfigError::invalid(field, format!("{} outside [0, 1)", deadband)));
            }
        }

        if self.shooting.speaker.is_empty() {
            return Err(ConfigError::invalid("shooting.speaker", "no speaker positions"));
        }
        self.check_target("shooting.amp_score", &self.shooting.amp_score)?;
        for target in &self.shooting.speaker {
            self.check_target("shooting.speaker", target)?;
        }

        Ok(())
    }

    fn check_target(&self, field: &'static str, target: &ScoringTarget) -> Result<(), ConfigError> {
        if !is_finite_point(target.position()) || !target.heading().is_finite() {
            return Err(ConfigError::invalid(
                field,
                format!("target `{}` has a non-finite pose", target.name),
            ));
        }
        if !self.field.contains(target.position()) {
            warn!(
                name = %target.name,
                x = target.position().x,
                y = target.position().y,
                "scoring target lies outside the field"
            );
        }
        Ok(())
    }

    pub fn speaker_catalog(&self) -> TargetCatalog {
        self.shooting.speaker.clone()
    }

    /// Resolver over the speaker catalog on this field.
    pub fn target_resolver(&self) -> TargetResolver {
        TargetResolver::new(self.field.clone(), self.speaker_catalog())
    }

    /// Reloadable handle over the speaker catalog on this field.
    pub fn shared_catalog(&self) -> SharedCatalog {
        SharedCatalog::new(self.field.clone(), self.speaker_catalog())
    }

    /// Highest arm angle allowed at a live robot position.
    pub fn arm_limit_at(&self, robot: &FieldPoint, requested: f64) -> f64 {
        let under_stage = self.field.stage.is_in_danger_zone(robot);
        self.arm.clamp_angle(requested, under_stage)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{} must be positive", value)))
    }
}
