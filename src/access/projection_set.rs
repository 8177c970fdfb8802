use indexmap::{IndexMap, IndexSet};

use crate::error::ConflictReason;

use super::permission::Permission;
use super::projection::ProjectionInfo;

/// Permission and descriptor shared by every field of one coalesced requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessKey {
    /// Resolved permission.
    pub permission: Permission,
    /// Projection descriptor.
    pub projection: ProjectionInfo,
}

impl AccessKey {
    /// Creates a key.
    pub const fn new(permission: Permission, projection: ProjectionInfo) -> Self {
        Self {
            permission,
            projection,
        }
    }
}

/// Accesses declared on a single field of a single region.
///
/// Buckets and the descriptors inside them keep insertion order, which fixes
/// the order of the requirements produced from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionSet {
    entries: IndexMap<Permission, IndexSet<ProjectionInfo>>,
}

impl ProjectionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Permissions declared so far, in insertion order.
    pub fn permissions(&self) -> impl Iterator<Item = Permission> + '_ {
        self.entries.keys().copied()
    }

    /// Descriptors declared under `permission`.
    pub fn projections(
        &self,
        permission: Permission,
    ) -> impl Iterator<Item = &ProjectionInfo> + '_ {
        self.entries.get(&permission).into_iter().flatten()
    }

    /// Records an access. `ReadWrite` is recorded as `Read` followed by `Write`.
    ///
    /// Fails without modifying the set when write access would be shared by two
    /// different descriptors.
    pub fn insert(
        &mut self,
        permission: Permission,
        projection: ProjectionInfo,
    ) -> Result<(), ConflictReason> {
        match permission {
            Permission::ReadWrite => {
                self.check_write(&projection)?;
                self.insert_unchecked(Permission::Read, projection);
                self.insert_unchecked(Permission::Write, projection);
            }
            Permission::Write => {
                self.check_write(&projection)?;
                self.insert_unchecked(Permission::Write, projection);
            }
            Permission::NoAccess | Permission::Read | Permission::Reduction => {
                self.insert_unchecked(permission, projection);
            }
        }
        Ok(())
    }

    fn check_write(&self, incoming: &ProjectionInfo) -> Result<(), ConflictReason> {
        match self
            .entries
            .get(&Permission::Write)
            .and_then(|writes| writes.first())
        {
            Some(existing) if existing != incoming => Err(ConflictReason::WriteCollision {
                existing: *existing,
                incoming: *incoming,
            }),
            _ => Ok(()),
        }
    }

    fn insert_unchecked(&mut self, permission: Permission, projection: ProjectionInfo) {
        self.entries
            .entry(permission)
            .or_default()
            .insert(projection);
    }

    /// Reduces the declared accesses to the keys of the requirements they need.
    ///
    /// * A single permission keeps one key per distinct descriptor.
    /// * Two or more permissions other than `NoAccess` promote to one
    ///   `ReadWrite` key, which requires every declared descriptor (including
    ///   those under `NoAccess`) to be identical.
    /// * `NoAccess` next to exactly one other permission is never merged: every
    ///   bucket contributes its own keys.
    pub fn coalesce(&self) -> Result<Vec<AccessKey>, ConflictReason> {
        if self.entries.len() == 1 {
            return Ok(self.keys_by_bucket());
        }

        let accessing = self
            .entries
            .keys()
            .filter(|permission| **permission != Permission::NoAccess)
            .count();
        if accessing <= 1 {
            return Ok(self.keys_by_bucket());
        }

        let mut all: IndexSet<ProjectionInfo> = IndexSet::new();
        for projections in self.entries.values() {
            all.extend(projections.iter().copied());
        }
        if all.len() > 1 {
            return Err(ConflictReason::PromotionMismatch {
                projections: all.into_iter().collect(),
            });
        }
        Ok(all
            .into_iter()
            .map(|projection| AccessKey::new(Permission::ReadWrite, projection))
            .collect())
    }

    fn keys_by_bucket(&self) -> Vec<AccessKey> {
        self.entries
            .iter()
            .flat_map(|(permission, projections)| {
                projections
                    .iter()
                    .map(move |projection| AccessKey::new(*permission, *projection))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Projection;
    use crate::types::LogicalPartition;

    fn part(id: u32) -> LogicalPartition {
        LogicalPartition {
            tree_id: 1,
            index_partition: id,
            field_space: 1,
        }
    }

    fn projected(id: u32) -> ProjectionInfo {
        Projection::project(part(id), 0).into()
    }

    #[test]
    fn distinct_reads_stay_separate() {
        let mut set = ProjectionSet::new();
        set.insert(Permission::Read, projected(1)).unwrap();
        set.insert(Permission::Read, projected(2)).unwrap();
        set.insert(Permission::Read, projected(1)).unwrap();
        let keys = set.coalesce().unwrap();
        assert_eq!(
            keys,
            vec![
                AccessKey::new(Permission::Read, projected(1)),
                AccessKey::new(Permission::Read, projected(2)),
            ]
        );
    }

    #[test]
    fn second_write_projection_is_rejected_and_set_unchanged() {
        let mut set = ProjectionSet::new();
        set.insert(Permission::Write, projected(1)).unwrap();
        let before = set.clone();
        let err = set
            .insert(Permission::Write, projected(2))
            .expect_err("write collision");
        assert!(matches!(err, ConflictReason::WriteCollision { .. }));
        assert_eq!(set, before);

        let err = set
            .insert(Permission::ReadWrite, projected(3))
            .expect_err("read-write collides through its write half");
        assert!(matches!(err, ConflictReason::WriteCollision { .. }));
        assert_eq!(set, before);
    }

    #[test]
    fn repeated_identical_write_is_accepted() {
        let mut set = ProjectionSet::new();
        set.insert(Permission::Write, projected(1)).unwrap();
        set.insert(Permission::Write, projected(1)).unwrap();
        assert_eq!(set.projections(Permission::Write).count(), 1);
    }

    #[test]
    fn read_write_sugar_promotes_back() {
        let mut set = ProjectionSet::new();
        set.insert(Permission::ReadWrite, projected(4)).unwrap();
        assert_eq!(
            set.permissions().collect::<Vec<_>>(),
            vec![Permission::Read, Permission::Write]
        );
        assert_eq!(
            set.coalesce().unwrap(),
            vec![AccessKey::new(Permission::ReadWrite, projected(4))]
        );
    }

    #[test]
    fn reduction_and_read_promote_to_read_write() {
        let mut set = ProjectionSet::new();
        set.insert(Permission::Reduction, projected(1)).unwrap();
        set.insert(Permission::Read, projected(1)).unwrap();
        assert_eq!(
            set.coalesce().unwrap(),
            vec![AccessKey::new(Permission::ReadWrite, projected(1))]
        );
    }

    #[test]
    fn promotion_with_distinct_projections_conflicts() {
        let mut set = ProjectionSet::new();
        set.insert(Permission::Read, projected(1)).unwrap();
        set.insert(Permission::Write, projected(2)).unwrap();
        let err = set.coalesce().expect_err("mismatch");
        assert_eq!(
            err,
            ConflictReason::PromotionMismatch {
                projections: vec![projected(1), projected(2)],
            }
        );
    }

    #[test]
    fn no_access_is_never_merged() {
        let mut set = ProjectionSet::new();
        set.insert(Permission::NoAccess, projected(1)).unwrap();
        set.insert(Permission::Read, projected(2)).unwrap();
        assert_eq!(
            set.coalesce().unwrap(),
            vec![
                AccessKey::new(Permission::NoAccess, projected(1)),
                AccessKey::new(Permission::Read, projected(2)),
            ]
        );
    }

    #[test]
    fn no_access_descriptor_joins_promotion_union() {
        let mut set = ProjectionSet::new();
        set.insert(Permission::NoAccess, projected(9)).unwrap();
        set.insert(Permission::Read, projected(1)).unwrap();
        set.insert(Permission::Write, projected(1)).unwrap();
        assert!(matches!(
            set.coalesce(),
            Err(ConflictReason::PromotionMismatch { .. })
        ));
    }

    #[test]
    fn empty_set_coalesces_to_nothing() {
        assert!(ProjectionSet::new().coalesce().unwrap().is_empty());
    }
}
