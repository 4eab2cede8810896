//! Scoring target presets and nearest-target resolution.

mod catalog;
mod resolver;
mod shared;

pub use catalog::{ScoringTarget, TargetCatalog};
pub use resolver::{nearest_target, ResolvedTarget, TargetResolver};
pub use shared::SharedCatalog;

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::field::{FieldConfig, FieldSymmetry};
    use crate::geometry::{FieldPoint, Pose2d};
    use proptest::prelude::*;

    const LENGTH: f64 = 16.54;
    const WIDTH: f64 = 8.21;

    fn arb_target() -> impl Strategy<Value = ScoringTarget> {
        (0.0..LENGTH, 0.0..WIDTH, -3.0f64..3.0, 0.0f64..1.6, 0.0f64..1.0).prop_map(
            |(x, y, heading, arm, speed)| {
                ScoringTarget::new("preset", Pose2d::new(x, y, heading), arm, speed)
            },
        )
    }

    fn arb_catalog() -> impl Strategy<Value = TargetCatalog> {
        prop::collection::vec(arb_target(), 1..12).prop_map(TargetCatalog::new)
    }

    fn arb_query() -> impl Strategy<Value = FieldPoint> {
        (-2.0..LENGTH + 2.0, -2.0..WIDTH + 2.0).prop_map(|(x, y)| FieldPoint::new(x, y))
    }

    fn arb_symmetry() -> impl Strategy<Value = FieldSymmetry> {
        prop_oneof![Just(FieldSymmetry::Rotational), Just(FieldSymmetry::EndToEnd)]
    }

    fn resolver(catalog: TargetCatalog, symmetry: FieldSymmetry) -> TargetResolver {
        TargetResolver::new(FieldConfig::new(LENGTH, WIDTH, symmetry), catalog)
    }

    proptest! {
        /// Property: repeated queries pick the same entry
        #[test]
        fn prop_resolution_is_deterministic(
            catalog in arb_catalog(),
            query in arb_query(),
            mirrored in any::<bool>(),
        ) {
            let resolver = resolver(catalog, FieldSymmetry::Rotational);
            let first = resolver.resolve_for_alliance(query, mirrored.into())
                .map(|r| r.index());
            let second = resolver.resolve_for_alliance(query, mirrored.into())
                .map(|r| r.index());
            prop_assert_eq!(first, second);
        }

        /// Property: the result is a catalog member and no member is closer
        #[test]
        fn prop_result_is_closest_member(
            catalog in arb_catalog(),
            query in arb_query(),
            mirrored in any::<bool>(),
            symmetry in arb_symmetry(),
        ) {
            let resolver = resolver(catalog, symmetry);
            let found = resolver.resolve_nearest(query, mirrored).unwrap();
            prop_assert!(resolver.catalog().contains(found));

            let canonical = if mirrored {
                resolver.field().mirror_point(&query)
            } else {
                query
            };
            let best = found.pose.distance_to(&canonical);
            for target in resolver.catalog().iter() {
                prop_assert!(best <= target.pose.distance_to(&canonical));
            }
        }

        /// Property: a mirrored query equals the pre-mirrored unmirrored query
        #[test]
        fn prop_mirror_consistency(
            catalog in arb_catalog(),
            query in arb_query(),
            symmetry in arb_symmetry(),
        ) {
            let resolver = resolver(catalog, symmetry);
            let mirrored = resolver.resolve_for_alliance(query, true.into()).unwrap();
            let premirrored = resolver
                .resolve_for_alliance(resolver.field().mirror_point(&query), false.into())
                .unwrap();
            prop_assert_eq!(mirrored.index(), premirrored.index());
            prop_assert_eq!(mirrored.target(), premirrored.target());
        }

        /// Property: duplicated positions always resolve to the earlier entry
        #[test]
        fn prop_tie_break_prefers_earlier(
            x in 0.0..LENGTH,
            y in 0.0..WIDTH,
            query in arb_query(),
        ) {
            let catalog = TargetCatalog::new(vec![
                ScoringTarget::new("first", Pose2d::new(x, y, 0.0), 0.1, 0.2),
                ScoringTarget::new("second", Pose2d::new(x, y, 1.0), 0.3, 0.4),
            ]);
            let resolver = resolver(catalog, FieldSymmetry::Rotational);
            let found = resolver.resolve_nearest(query, false).unwrap();
            prop_assert_eq!(found.name.as_str(), "first");
        }

        /// Property: live pose maps back onto the canonical pose
        #[test]
        fn prop_live_pose_round_trips(
            catalog in arb_catalog(),
            query in arb_query(),
            symmetry in arb_symmetry(),
        ) {
            let resolver = resolver(catalog, symmetry);
            let resolved = resolver.resolve_for_alliance(query, true.into()).unwrap();
            let back = resolver.field().mirror_point(&resolved.live_pose().position);
            prop_assert!((back - resolved.target().pose.position).norm() < 1e-9);
        }
    }
}
