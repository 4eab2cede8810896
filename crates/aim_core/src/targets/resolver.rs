//! Nearest scoring target lookup on a mirrored field.
//!
//! Catalog poses are authored once, from the blue side. A red robot's live
//! position is first mapped through the field symmetry into the blue frame and
//! then compared against the catalog. The scan is linear: catalogs hold a
//! handful of presets, so no spatial index is kept.

use std::sync::Arc;

use tracing::{debug, warn};

use super::catalog::{ScoringTarget, TargetCatalog};
use crate::error::{ResolveError, Result};
use crate::field::{Alliance, FieldConfig};
use crate::geometry::{is_finite_point, planar_distance, FieldPoint, Pose2d};

/// Index and distance of the closest entry, or the reason there is none.
fn scan<'a>(
    targets: &'a [ScoringTarget],
    query: &FieldPoint,
) -> Result<(usize, &'a ScoringTarget, f64)> {
    if targets.is_empty() {
        return Err(ResolveError::EmptyCatalog);
    }
    if !is_finite_point(query) {
        return Err(ResolveError::InvalidQueryPoint { x: query.x, y: query.y });
    }

    let mut best = (0, &targets[0], planar_distance(targets[0].position(), query));
    for (index, target) in targets.iter().enumerate().skip(1) {
        let distance = planar_distance(target.position(), query);
        // Strictly closer only: equal distances keep the earlier entry.
        if distance < best.2 {
            best = (index, target, distance);
        }
    }
    Ok(best)
}

/// Closest target to `query`, both already in the same frame.
///
/// Returns the catalog index alongside the entry. Ties go to the lowest index.
pub fn nearest_target<'a>(
    targets: &'a [ScoringTarget],
    query: &FieldPoint,
) -> Result<(usize, &'a ScoringTarget)> {
    scan(targets, query).map(|(index, target, _)| (index, target))
}

/// Resolves live robot positions against a fixed catalog of presets.
///
/// Holds no mutable state, so one resolver can be shared between threads.
#[derive(Debug, Clone)]
pub struct TargetResolver {
    field: FieldConfig,
    catalog: Arc<TargetCatalog>,
}

impl TargetResolver {
    pub fn new(field: FieldConfig, catalog: impl Into<Arc<TargetCatalog>>) -> Self {
        Self { field, catalog: catalog.into() }
    }

    pub fn field(&self) -> &FieldConfig {
        &self.field
    }

    pub fn catalog(&self) -> &Arc<TargetCatalog> {
        &self.catalog
    }

    /// Nearest catalog entry to a live position.
    ///
    /// `on_mirrored_side` maps `query` through the field symmetry before the
    /// comparison. The returned target is the catalog entry untouched, so its
    /// pose is still in the blue frame; use [`Self::resolve_for_alliance`] when
    /// the pose is going to be driven to.
    ///
    /// # Errors
    ///
    /// [`ResolveError::EmptyCatalog`] if there is nothing to pick from,
    /// [`ResolveError::InvalidQueryPoint`] if `query` is NaN or infinite.
    pub fn resolve_nearest(
        &self,
        query: FieldPoint,
        on_mirrored_side: bool,
    ) -> Result<&ScoringTarget> {
        let alliance = Alliance::from_mirrored(on_mirrored_side);
        self.resolve_indexed(&query, alliance).map(|(_, target)| target)
    }

    /// Like [`Self::resolve_nearest`], but also maps the chosen pose back into
    /// the alliance's live frame.
    pub fn resolve_for_alliance(
        &self,
        query: FieldPoint,
        alliance: Alliance,
    ) -> Result<ResolvedTarget<'_>> {
        let (index, target) = self.resolve_indexed(&query, alliance)?;
        Ok(ResolvedTarget {
            index,
            target,
            alliance,
            live_pose: self.field.to_live_pose(&target.pose, alliance),
        })
    }

    fn resolve_indexed(
        &self,
        query: &FieldPoint,
        alliance: Alliance,
    ) -> Result<(usize, &ScoringTarget)> {
        // Same precedence as `scan`: an empty catalog is reported before a bad query.
        if self.catalog.is_empty() {
            warn!(?alliance, "no scoring targets to resolve against");
            return Err(ResolveError::EmptyCatalog);
        }
        if !is_finite_point(query) {
            warn!(x = query.x, y = query.y, "rejecting non-finite target query");
            return Err(ResolveError::InvalidQueryPoint { x: query.x, y: query.y });
        }

        let canonical = self.field.to_canonical(query, alliance);
        match scan(self.catalog.as_slice(), &canonical) {
            Ok((index, target, distance)) => {
                debug!(
                    name = %target.name,
                    index,
                    distance,
                    ?alliance,
                    "resolved nearest scoring target"
                );
                Ok((index, target))
            }
            Err(err) => {
                warn!(error = %err, ?alliance, "no scoring target resolved");
                Err(err)
            }
        }
    }
}

/// A resolved target together with its pose in the caller's live frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTarget<'a> {
    index: usize,
    target: &'a ScoringTarget,
    alliance: Alliance,
    live_pose: Pose2d,
}

impl<'a> ResolvedTarget<'a> {
    /// Catalog entry, blue-frame geometry.
    pub fn target(&self) -> &'a ScoringTarget {
        self.target
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn alliance(&self) -> Alliance {
        self.alliance
    }

    /// Target pose as seen from the resolving alliance.
    pub fn live_pose(&self) -> Pose2d {
        self.live_pose
    }

    /// Live-frame distance from `query` to the target pose.
    pub fn distance_from(&self, query: &FieldPoint) -> f64 {
        self.live_pose.distance_to(query)
    }
}
