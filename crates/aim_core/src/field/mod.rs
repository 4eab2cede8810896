//! Field dimensions, alliance sides, and the symmetry map between them.
//!
//! Every authored pose lives in the blue alliance frame: origin at the blue
//! driver-station-side corner, x along the field length, y along the width.
//! Red robots see the mirror image of that frame, so anything crossing between
//! the two goes through [`FieldConfig::mirror_point`] / [`FieldConfig::mirror_pose`].

mod stage;

pub use stage::StageZone;

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::ChassisConfig;
use crate::geometry::{normalize_angle, FieldPoint, Pose2d};
use crate::units::feet_to_meters;

/// Field length (driver station wall to driver station wall).
pub const DEFAULT_LENGTH_FT: f64 = 54.27;
/// Field width (guardrail to guardrail).
pub const DEFAULT_WIDTH_FT: f64 = 26.9375;

/// Which half of the field the robot plays from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alliance {
    /// Authoring frame. Catalog poses are written from this side.
    #[default]
    Blue,
    Red,
}

impl Alliance {
    pub fn from_mirrored(on_mirrored_side: bool) -> Self {
        if on_mirrored_side {
            Alliance::Red
        } else {
            Alliance::Blue
        }
    }

    /// True when this alliance's live frame is the mirror of the authoring frame.
    #[inline]
    pub fn is_mirrored(self) -> bool {
        matches!(self, Alliance::Red)
    }

    pub fn opposite(self) -> Self {
        match self {
            Alliance::Blue => Alliance::Red,
            Alliance::Red => Alliance::Blue,
        }
    }
}

impl From<bool> for Alliance {
    fn from(on_mirrored_side: bool) -> Self {
        Alliance::from_mirrored(on_mirrored_side)
    }
}

/// The single geometric map relating the two alliance frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSymmetry {
    /// 180° rotation about field center: (x, y) -> (L - x, W - y).
    #[default]
    Rotational,
    /// Reflection across the center line: (x, y) -> (L - x, y).
    EndToEnd,
}

/// Field description as authored. The stage layout is derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    pub length_m: f64,
    pub width_m: f64,
    pub symmetry: FieldSymmetry,
    /// Robot frame radius used to size the stage danger zone. Unset means the
    /// chassis radius is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robot_radius_m: Option<f64>,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            length_m: feet_to_meters(DEFAULT_LENGTH_FT),
            width_m: feet_to_meters(DEFAULT_WIDTH_FT),
            symmetry: FieldSymmetry::default(),
            robot_radius_m: None,
        }
    }
}

/// Physical field description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FieldParams", into = "FieldParams")]
pub struct FieldConfig {
    pub length_m: f64,
    pub width_m: f64,
    pub symmetry: FieldSymmetry,
    pub robot_radius_m: f64,
    pub stage: StageZone,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldParams::default().into()
    }
}

impl From<FieldParams> for FieldConfig {
    fn from(params: FieldParams) -> Self {
        let fallback = ChassisConfig::default().drive_base_radius;
        Self::from_params(params, fallback)
    }
}

impl From<FieldConfig> for FieldParams {
    fn from(config: FieldConfig) -> Self {
        Self {
            length_m: config.length_m,
            width_m: config.width_m,
            symmetry: config.symmetry,
            robot_radius_m: Some(config.robot_radius_m),
        }
    }
}

impl FieldConfig {
    /// Field of the given size with the default stage layout scaled to it.
    pub fn new(length_m: f64, width_m: f64, symmetry: FieldSymmetry) -> Self {
        FieldParams { length_m, width_m, symmetry, robot_radius_m: None }.into()
    }

    /// Build from authored values, using `fallback_radius_m` when no robot
    /// radius was given.
    pub fn from_params(params: FieldParams, fallback_radius_m: f64) -> Self {
        let robot_radius_m = params.robot_radius_m.unwrap_or(fallback_radius_m);
        Self {
            length_m: params.length_m,
            width_m: params.width_m,
            symmetry: params.symmetry,
            robot_radius_m,
            stage: StageZone::for_field(params.length_m, params.width_m, robot_radius_m),
        }
    }

    /// Same field, stage resized for a robot of the given radius.
    pub fn with_robot_radius(mut self, robot_radius_m: f64) -> Self {
        self.robot_radius_m = robot_radius_m;
        self.stage = StageZone::for_field(self.length_m, self.width_m, robot_radius_m);
        self
    }

    pub fn with_symmetry(mut self, symmetry: FieldSymmetry) -> Self {
        self.symmetry = symmetry;
        self
    }

    pub fn center(&self) -> FieldPoint {
        FieldPoint::new(self.length_m / 2.0, self.width_m / 2.0)
    }

    /// Inclusive bounds check against the field carpet.
    pub fn contains(&self, point: &FieldPoint) -> bool {
        (0.0..=self.length_m).contains(&point.x) && (0.0..=self.width_m).contains(&point.y)
    }

    /// Map a point into the opposite alliance's frame. Applying it twice is identity.
    pub fn mirror_point(&self, point: &FieldPoint) -> FieldPoint {
        match self.symmetry {
            FieldSymmetry::Rotational => {
                FieldPoint::new(self.length_m - point.x, self.width_m - point.y)
            }
            FieldSymmetry::EndToEnd => FieldPoint::new(self.length_m - point.x, point.y),
        }
    }

    pub fn mirror_heading(&self, heading: f64) -> f64 {
        match self.symmetry {
            FieldSymmetry::Rotational => normalize_angle(heading + PI),
            FieldSymmetry::EndToEnd => normalize_angle(PI - heading),
        }
    }

    pub fn mirror_pose(&self, pose: &Pose2d) -> Pose2d {
        Pose2d {
            position: self.mirror_point(&pose.position),
            heading: self.mirror_heading(pose.heading),
        }
    }

    /// Live-frame point to authoring frame.
    pub fn to_canonical(&self, point: &FieldPoint, alliance: Alliance) -> FieldPoint {
        if alliance.is_mirrored() {
            self.mirror_point(point)
        } else {
            *point
        }
    }

    /// Authoring-frame pose to the given alliance's live frame.
    pub fn to_live_pose(&self, pose: &Pose2d, alliance: Alliance) -> Pose2d {
        if alliance.is_mirrored() {
            self.mirror_pose(pose)
        } else {
            *pose
        }
    }
}
