use indexmap::IndexMap;

use crate::error::{LaunchError, LaunchResult};
use crate::types::{FieldId, LogicalRegion};

use super::permission::Permission;
use super::projection::ProjectionInfo;
use super::projection_set::{AccessKey, ProjectionSet};

/// Accesses declared on the fields of one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    region: LogicalRegion,
    fields: IndexMap<FieldId, ProjectionSet>,
}

impl FieldSet {
    /// Creates an empty field set for `region`.
    pub fn new(region: LogicalRegion) -> Self {
        Self {
            region,
            fields: IndexMap::new(),
        }
    }

    /// Region owning the fields.
    pub fn region(&self) -> LogicalRegion {
        self.region
    }

    /// Number of distinct fields declared.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when no field was declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Accesses recorded for `field_id`.
    pub fn get(&self, field_id: FieldId) -> Option<&ProjectionSet> {
        self.fields.get(&field_id)
    }

    /// Records an access on `field_id`.
    pub fn insert(
        &mut self,
        field_id: FieldId,
        permission: Permission,
        projection: ProjectionInfo,
    ) -> LaunchResult<()> {
        self.fields
            .entry(field_id)
            .or_default()
            .insert(permission, projection)
            .map_err(|reason| LaunchError::Conflict {
                region: self.region,
                field_id,
                reason,
            })
    }

    /// Groups the coalesced keys of every field. Fields sharing a key end up in
    /// the same list, in declaration order; keys are ordered by first appearance.
    pub fn coalesce(&self) -> LaunchResult<IndexMap<AccessKey, Vec<FieldId>>> {
        let mut grouped: IndexMap<AccessKey, Vec<FieldId>> = IndexMap::new();
        for (field_id, projections) in &self.fields {
            let keys = projections
                .coalesce()
                .map_err(|reason| LaunchError::Conflict {
                    region: self.region,
                    field_id: *field_id,
                    reason,
                })?;
            for key in keys {
                grouped.entry(key).or_default().push(*field_id);
            }
        }
        Ok(grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Projection;
    use crate::types::IndexSpace;

    fn region() -> LogicalRegion {
        LogicalRegion::new(3, IndexSpace { id: 1, dim: 2 }, 5)
    }

    #[test]
    fn identical_keys_share_one_group() {
        let mut fields = FieldSet::new(region());
        let broadcast = ProjectionInfo::from(Projection::broadcast());
        fields.insert(11, Permission::Read, broadcast).unwrap();
        fields.insert(10, Permission::Read, broadcast).unwrap();
        fields.insert(12, Permission::Write, broadcast).unwrap();

        let grouped = fields.coalesce().unwrap();
        let groups: Vec<_> = grouped.into_iter().collect();
        assert_eq!(
            groups,
            vec![
                (AccessKey::new(Permission::Read, broadcast), vec![11, 10]),
                (AccessKey::new(Permission::Write, broadcast), vec![12]),
            ]
        );
    }

    #[test]
    fn conflicts_name_region_and_field() {
        let mut fields = FieldSet::new(region());
        fields
            .insert(7, Permission::Write, Projection::broadcast().into())
            .unwrap();
        let err = fields
            .insert(7, Permission::Write, Projection::broadcast_reduction(3).into())
            .expect_err("conflict");
        assert!(matches!(
            err,
            LaunchError::Conflict { field_id: 7, region: r, .. } if r == region()
        ));
    }
}
