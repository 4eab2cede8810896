use serde::{Deserialize, Serialize};

use crate::geometry::Pose2d;
use crate::targets::{ScoringTarget, TargetCatalog};
use crate::units::feet_to_meters;

/// Preset shooting poses, all authored from the blue side.
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingPositions {
    /// Against the amp wall. Not part of the speaker catalog.
    pub amp_score: ScoringTarget,
    /// Every pose valid for speaker shots during teleop.
    pub speaker: TargetCatalog,
}

impl ShootingPositions {
    /// Presets for a field of the given width and a robot of the given radius.
    pub fn for_field(field_width_m: f64, robot_radius_m: f64) -> Self {
        Self {
            amp_score: amp_for_field(field_width_m, robot_radius_m),
            speaker: speaker_presets(),
        }
    }
}

/// Shooting presets as written in a config file. An omitted amp pose is
/// derived from the field width and robot radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShootingParams {
    pub amp_score: Option<ScoringTarget>,
    pub speaker: TargetCatalog,
}

impl Default for ShootingParams {
    fn default() -> Self {
        Self { amp_score: None, speaker: speaker_presets() }
    }
}

impl ShootingParams {
    pub fn resolve(self, field_width_m: f64, robot_radius_m: f64) -> ShootingPositions {
        ShootingPositions {
            amp_score: self
                .amp_score
                .unwrap_or_else(|| amp_for_field(field_width_m, robot_radius_m)),
            speaker: self.speaker,
        }
    }
}

impl From<ShootingPositions> for ShootingParams {
    fn from(positions: ShootingPositions) -> Self {
        Self { amp_score: Some(positions.amp_score), speaker: positions.speaker }
    }
}

/// The amp pose backs the robot against the far wall, so it moves with the
/// field width and the robot radius.
fn amp_for_field(field_width_m: f64, robot_radius_m: f64) -> ScoringTarget {
    // Amp opening starts 4' 1.5" from the wall and is 2' wide.
    let amp_x = feet_to_meters(4.125) + feet_to_meters(1.0);
    let amp_y = field_width_m - robot_radius_m;
    ScoringTarget::new("amp_score", Pose2d::from_degrees(amp_x, amp_y, -90.0), 1.38, 0.4)
}

fn speaker_presets() -> TargetCatalog {
    TargetCatalog::new(vec![ScoringTarget::new(
        "in_front_of_speaker",
        Pose2d::new(0.0, 0.0, 0.0),
        0.198,
        0.5,
    )])
}
