use serde::{Deserialize, Serialize};

use crate::geometry::{planar_distance, FieldPoint};
use crate::units::inches_to_meters;

/// Distance from the blue wall to the blue stage center.
const BLUE_STAGE_OFFSET_IN: f64 = 156.895;
/// Distance from the red wall to the red stage center.
const RED_STAGE_OFFSET_IN: f64 = 157.395;
/// Stage footprint diameter.
const STAGE_DIAMETER_IN: f64 = 85.9;
/// Clearance kept between the stage footprint and the robot frame.
const STAGE_CLEARANCE_IN: f64 = 12.0;

/// The two stage structures, in absolute field coordinates.
///
/// Unlike scoring targets these are not mirrored: both stages are listed, so a
/// live pose can be checked directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageZone {
    pub blue_center: FieldPoint,
    pub red_center: FieldPoint,
    /// Robot-center distance within which the arm must respect the under-stage limit.
    pub danger_radius_m: f64,
}

impl StageZone {
    pub fn for_field(length_m: f64, width_m: f64, robot_radius_m: f64) -> Self {
        Self {
            blue_center: FieldPoint::new(inches_to_meters(BLUE_STAGE_OFFSET_IN), width_m / 2.0),
            red_center: FieldPoint::new(
                length_m - inches_to_meters(RED_STAGE_OFFSET_IN),
                width_m / 2.0,
            ),
            danger_radius_m: inches_to_meters(STAGE_DIAMETER_IN / 2.0 + STAGE_CLEARANCE_IN)
                + robot_radius_m,
        }
    }

    pub fn is_in_danger_zone(&self, point: &FieldPoint) -> bool {
        planar_distance(&self.blue_center, point) <= self.danger_radius_m
            || planar_distance(&self.red_center, point) <= self.danger_radius_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> StageZone {
        StageZone::for_field(16.54, 8.21, 0.4)
    }

    #[test]
    fn test_stage_centers() {
        let zone = zone();
        assert!((zone.blue_center.x - 3.985_133).abs() < 1e-6);
        assert!((zone.blue_center.y - 4.105).abs() < 1e-9);
        assert!((zone.red_center.x - (16.54 - 3.997_833)).abs() < 1e-6);
    }

    #[test]
    fn test_danger_radius_includes_robot() {
        let zone = zone();
        let expected = inches_to_meters(85.9 / 2.0 + 12.0) + 0.4;
        assert!((zone.danger_radius_m - expected).abs() < 1e-12);
    }

    #[test]
    fn test_danger_zone_membership() {
        let zone = zone();
        assert!(zone.is_in_danger_zone(&zone.blue_center));
        assert!(zone.is_in_danger_zone(&zone.red_center));
        assert!(!zone.is_in_danger_zone(&FieldPoint::new(8.27, 4.105)));
        assert!(!zone.is_in_danger_zone(&FieldPoint::new(0.0, 0.0)));
    }
}
