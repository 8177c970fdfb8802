
use _fixtures::{broadcast, projected, region, tagged};
use indexmap::IndexSet;
use proptest::prelude::*;
use region_launcher::access::{AccessRecorder, Permission, Projection, ProjectionInfo};
use region_launcher::error::{ConflictReason, LaunchError};
use region_launcher::requirements::{RegionRequirement, Requirements};

fn descriptor_pool() -> Vec<ProjectionInfo> {
    vec![
        broadcast(),
        projected(1, 1),
        projected(1, 2),
        projected(2, 1),
        tagged(Projection::broadcast(), 7, 0),
        tagged(Projection::broadcast(), 0, 4),
    ]
}

fn arb_descriptor() -> impl Strategy<Value = ProjectionInfo> {
    prop::sample::select(descriptor_pool())
}

fn arb_distinct_pair() -> impl Strategy<Value = (ProjectionInfo, ProjectionInfo)> {
    (arb_descriptor(), arb_descriptor()).prop_filter("distinct descriptors", |(a, b)| a != b)
}

proptest! {
    #[test]
    fn one_requirement_per_distinct_descriptor(
        permission in prop::sample::select(vec![Permission::NoAccess, Permission::Read]),
        descriptors in prop::collection::vec(arb_descriptor(), 1..12),
    ) {
        let target = region(1, 2);
        let mut recorder = AccessRecorder::new();
        for descriptor in &descriptors {
            recorder.declare(target, 3, permission, *descriptor).unwrap();
        }
        let distinct: IndexSet<ProjectionInfo> = descriptors.iter().copied().collect();
        let requirements = Requirements::coalesce(&recorder).unwrap();
        prop_assert_eq!(requirements.len(), distinct.len());
        for (entry, descriptor) in requirements.iter().zip(&distinct) {
            prop_assert_eq!(entry.requirement.permission, permission);
            prop_assert_eq!(entry.requirement.projection, *descriptor);
            prop_assert_eq!(&entry.fields, &vec![3]);
        }
    }

    #[test]
    fn distinct_write_descriptors_always_conflict((first, second) in arb_distinct_pair()) {
        for (a, b) in [(first, second), (second, first)] {
            let mut recorder = AccessRecorder::new();
            recorder.declare(region(1, 1), 0, Permission::Write, a).unwrap();
            let err = recorder
                .declare(region(1, 1), 0, Permission::Write, b)
                .unwrap_err();
            let is_write_collision = matches!(
                err,
                LaunchError::Conflict {
                    reason: ConflictReason::WriteCollision { .. },
                    ..
                }
            );
            prop_assert!(is_write_collision);
            // the failed declaration left the field untouched
            let set = recorder.field_set(&region(1, 1)).unwrap().get(0).unwrap();
            prop_assert_eq!(set.projections(Permission::Write).count(), 1);
        }
    }

    #[test]
    fn read_and_write_promote_or_conflict((a, b) in arb_distinct_pair(), read_first in any::<bool>()) {
        let order = if read_first {
            [Permission::Read, Permission::Write]
        } else {
            [Permission::Write, Permission::Read]
        };

        let mut same = AccessRecorder::new();
        for permission in order {
            same.declare(region(4, 1), 2, permission, a).unwrap();
        }
        let requirements = Requirements::coalesce(&same).unwrap();
        prop_assert_eq!(requirements.len(), 1);
        let entry = requirements.get(0).unwrap();
        prop_assert_eq!(entry.requirement.permission, Permission::ReadWrite);
        prop_assert_eq!(entry.requirement.projection, a);

        let mut mixed = AccessRecorder::new();
        mixed.declare(region(4, 1), 2, order[0], a).unwrap();
        mixed.declare(region(4, 1), 2, order[1], b).unwrap();
        let err = Requirements::coalesce(&mixed).unwrap_err();
        let is_promotion_mismatch = matches!(
            err,
            LaunchError::Conflict {
                reason: ConflictReason::PromotionMismatch { .. },
                ..
            }
        );
        prop_assert!(is_promotion_mismatch);
    }

    #[test]
    fn promoted_fields_resolve_under_their_declared_permission(
        descriptor in arb_descriptor(),
        field_id in 0u32..64,
    ) {
        let target = region(9, 3);
        let mut recorder = AccessRecorder::new();
        recorder.declare(target, field_id, Permission::Read, descriptor).unwrap();
        recorder.declare(target, field_id, Permission::Write, descriptor).unwrap();
        let requirements = Requirements::coalesce(&recorder).unwrap();
        for permission in [Permission::Read, Permission::Write, Permission::ReadWrite] {
            let key = RegionRequirement::new(target, permission, descriptor);
            prop_assert_eq!(requirements.resolve(&key, field_id).unwrap(), 0);
        }
    }
}

#[test]
fn identical_keys_group_fields_in_declaration_order() {
    let target = region(1, 1);
    let mut recorder = AccessRecorder::new();
    for field_id in [5, 2, 9] {
        recorder
            .declare(target, field_id, Permission::Read, broadcast())
            .unwrap();
    }
    let requirements = Requirements::coalesce(&recorder).unwrap();
    assert_eq!(requirements.len(), 1);
    assert_eq!(requirements.get(0).unwrap().fields, vec![5, 2, 9]);
}

#[test]
fn no_access_next_to_one_permission_stays_unmerged() {
    let target = region(1, 1);
    let mut recorder = AccessRecorder::new();
    recorder
        .declare(target, 0, Permission::NoAccess, projected(1, 1))
        .unwrap();
    recorder
        .declare(target, 0, Permission::Read, broadcast())
        .unwrap();
    let requirements = Requirements::coalesce(&recorder).unwrap();
    let permissions: Vec<_> = requirements
        .iter()
        .map(|entry| entry.requirement.permission)
        .collect();
    assert_eq!(permissions, vec![Permission::NoAccess, Permission::Read]);
}

#[test]
fn unknown_field_is_an_internal_consistency_error() {
    let target = region(1, 1);
    let mut recorder = AccessRecorder::new();
    recorder
        .declare(target, 0, Permission::Read, broadcast())
        .unwrap();
    let requirements = Requirements::coalesce(&recorder).unwrap();
    let key = RegionRequirement::new(target, Permission::Write, broadcast());
    assert_eq!(
        requirements.resolve(&key, 0),
        Err(LaunchError::InternalConsistency {
            region: target,
            permission: Permission::Write,
            field_id: 0,
        })
    );
}
