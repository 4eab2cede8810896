use serde::{Deserialize, Serialize};

use crate::geometry::{FieldPoint, Pose2d};

/// A preset scoring location, authored in the blue alliance frame.
///
/// The arm angle and launcher speed travel with the pose so the consumer can
/// set up the mechanisms for that shot; target selection never looks at them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringTarget {
    pub name: String,
    pub pose: Pose2d,
    /// Arm angle in radians.
    pub arm_angle: f64,
    /// Launcher output, fraction of full power.
    pub launcher_speed: f64,
}

impl ScoringTarget {
    pub fn new(name: impl Into<String>, pose: Pose2d, arm_angle: f64, launcher_speed: f64) -> Self {
        Self { name: name.into(), pose, arm_angle, launcher_speed }
    }

    #[inline]
    pub fn position(&self) -> &FieldPoint {
        &self.pose.position
    }

    #[inline]
    pub fn heading(&self) -> f64 {
        self.pose.heading
    }
}

/// Ordered, read-only list of scoring targets.
///
/// Order matters: when two targets are equally close the earlier one wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetCatalog {
    targets: Vec<ScoringTarget>,
}

impl TargetCatalog {
    pub fn new(targets: Vec<ScoringTarget>) -> Self {
        Self { targets }
    }

    pub fn as_slice(&self) -> &[ScoringTarget] {
        &self.targets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoringTarget> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScoringTarget> {
        self.targets.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&ScoringTarget> {
        self.targets.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, target: &ScoringTarget) -> bool {
        self.targets.iter().any(|t| t == target)
    }
}

impl FromIterator<ScoringTarget> for TargetCatalog {
    fn from_iter<I: IntoIterator<Item = ScoringTarget>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TargetCatalog {
    type Item = &'a ScoringTarget;
    type IntoIter = std::slice::Iter<'a, ScoringTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TargetCatalog {
        TargetCatalog::new(vec![
            ScoringTarget::new("subwoofer", Pose2d::new(1.3, 5.5, 0.0), 0.198, 0.5),
            ScoringTarget::new("podium", Pose2d::from_degrees(2.9, 4.1, -25.0), 0.45, 0.8),
        ])
    }

    #[test]
    fn test_catalog_order_preserved() {
        let catalog = sample();
        let names: Vec<&str> = catalog.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["subwoofer", "podium"]);
        assert_eq!(catalog.get(1).map(|t| t.name.as_str()), Some("podium"));
    }

    #[test]
    fn test_find_and_contains() {
        let catalog = sample();
        let podium = catalog.find("podium").cloned().unwrap();
        assert!(catalog.contains(&podium));
        assert!(catalog.find("amp").is_none());

        let stranger = ScoringTarget::new("podium", Pose2d::new(0.0, 0.0, 0.0), 0.45, 0.8);
        assert!(!catalog.contains(&stranger));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = TargetCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_catalog_yaml_is_a_plain_list() {
        let yaml = r#"
- name: subwoofer
  pose:
    position: [1.3, 5.5]
    heading: 0.0
  arm_angle: 0.198
  launcher_speed: 0.5
"#;
        let catalog: TargetCatalog = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.as_slice()[0].position(), &FieldPoint::new(1.3, 5.5));
    }
}
