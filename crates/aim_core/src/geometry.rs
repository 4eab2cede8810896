//! Field-plane geometry primitives.
//!
//! Positions are meters, headings are radians counter-clockwise from the +x axis.

use std::f64::consts::{PI, TAU};

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A point on the field floor (x = along field length, y = along field width).
pub type FieldPoint = Point2<f64>;

/// Wrap an angle into (-π, π].
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle % TAU;
    if wrapped <= -PI {
        wrapped + TAU
    } else if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Euclidean distance between two points.
///
/// Goes through `hypot` on the coordinate differences, so it stays finite for
/// any pair whose differences are finite.
#[inline]
pub fn planar_distance(a: &FieldPoint, b: &FieldPoint) -> f64 {
    let delta = a - b;
    delta.x.hypot(delta.y)
}

/// True when both coordinates are finite.
#[inline]
pub fn is_finite_point(point: &FieldPoint) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

/// Robot pose on the field floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPose")]
pub struct Pose2d {
    pub position: FieldPoint,
    /// Radians, normalized to (-π, π] on construction and deserialization.
    pub heading: f64,
}

/// Pose as written in config files, before the heading is wrapped.
#[derive(Deserialize)]
struct RawPose {
    position: FieldPoint,
    heading: f64,
}

impl From<RawPose> for Pose2d {
    fn from(raw: RawPose) -> Self {
        Self::new(raw.position.x, raw.position.y, raw.heading)
    }
}

impl Pose2d {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { position: FieldPoint::new(x, y), heading: normalize_angle(heading) }
    }

    pub fn from_degrees(x: f64, y: f64, heading_deg: f64) -> Self {
        Self::new(x, y, heading_deg.to_radians())
    }

    pub fn heading_degrees(&self) -> f64 {
        self.heading.to_degrees()
    }

    /// Straight-line distance between the two positions, ignoring heading.
    pub fn distance_to(&self, point: &FieldPoint) -> f64 {
        planar_distance(&self.position, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(0.0)).abs() < 1e-12);
        assert!((normalize_angle(PI) - PI).abs() < 1e-12);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-12);
        // 3π lands on the ±π seam; rounding decides which side.
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-9);
        assert!((normalize_angle(-PI / 2.0 - TAU) + PI / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_pose_from_degrees() {
        let pose = Pose2d::from_degrees(1.0, 2.0, -90.0);
        assert_eq!(pose.position, FieldPoint::new(1.0, 2.0));
        assert!((pose.heading + PI / 2.0).abs() < 1e-12);
        assert!((pose.heading_degrees() + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_pose_distance() {
        let pose = Pose2d::new(2.0, 0.0, 0.0);
        assert!((pose.distance_to(&FieldPoint::new(5.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_planar_distance_large_coordinates() {
        let far = planar_distance(&FieldPoint::new(0.0, 0.0), &FieldPoint::new(2e155, 0.0));
        let near = planar_distance(&FieldPoint::new(1e155, 0.0), &FieldPoint::new(2e155, 0.0));
        assert!(far.is_finite() && near.is_finite());
        assert!(near < far);
        assert!((far / 2e155 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_deserialized_heading_is_normalized() {
        let pose: Pose2d = serde_yaml::from_str("position: [1.0, 2.0]\nheading: 7.0\n").unwrap();
        assert!((pose.heading - (7.0 - TAU)).abs() < 1e-12);
        assert_eq!(pose.position, FieldPoint::new(1.0, 2.0));

        let json = serde_json::to_string(&pose).unwrap();
        let back: Pose2d = serde_json::from_str(&json).unwrap();
        assert!((back.heading - pose.heading).abs() < 1e-12);
    }

    #[test]
    fn test_is_finite_point() {
        assert!(is_finite_point(&FieldPoint::new(1.0, -3.0)));
        assert!(!is_finite_point(&FieldPoint::new(f64::NAN, 0.0)));
        assert!(!is_finite_point(&FieldPoint::new(0.0, f64::INFINITY)));
    }
}
