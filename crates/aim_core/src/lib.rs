//! # aim_core - Robot Configuration and Scoring Target Resolution
//!
//! This library holds the robot's configuration tables and picks the scoring
//! preset closest to the robot on a mirrored competition field.
//!
//! ## Features
//! - Immutable, serde-loadable configuration with derived constants
//! - Presets authored once from the blue side, usable from either alliance
//! - Deterministic nearest-target selection (earliest preset wins ties)
//! - Catalog hot swap without blocking readers
//!
//! ## Example
//! ```rust
//! use aim_core::{Alliance, FieldPoint, RobotConfig};
//!
//! let config = RobotConfig::default();
//! let resolver = config.target_resolver();
//!
//! // Red robot near the red speaker.
//! let live = FieldPoint::new(config.field.length_m - 0.5, config.field.width_m - 0.5);
//! let resolved = resolver.resolve_for_alliance(live, Alliance::Red).unwrap();
//! assert_eq!(resolved.target().name, "in_front_of_speaker");
//! assert!(resolved.distance_from(&live) < 1.0);
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod geometry;
pub mod targets;
pub mod units;

pub use config::RobotConfig;
pub use error::{ConfigError, ResolveError, Result};
pub use field::{Alliance, FieldConfig, FieldParams, FieldSymmetry, StageZone};
pub use geometry::{FieldPoint, Pose2d};
pub use targets::{
    nearest_target, ResolvedTarget, ScoringTarget, SharedCatalog, TargetCatalog, TargetResolver,
};
