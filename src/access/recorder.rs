use indexmap::IndexMap;
use tracing::trace;

use crate::error::LaunchResult;
use crate::types::{FieldId, LogicalRegion};

use super::field_set::FieldSet;
use super::permission::Permission;
use super::projection::ProjectionInfo;

/// Collects every region-field access declared for one launch.
///
/// Regions are kept in the order they were first touched; the requirement
/// indices handed out later follow that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRecorder {
    regions: IndexMap<LogicalRegion, FieldSet>,
}

impl AccessRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `permission` on `field_id` of `region` through `projection`.
    pub fn declare(
        &mut self,
        region: LogicalRegion,
        field_id: FieldId,
        permission: Permission,
        projection: ProjectionInfo,
    ) -> LaunchResult<()> {
        trace!(%region, field_id, %permission, %projection, "declare region access");
        self.regions
            .entry(region)
            .or_insert_with(|| FieldSet::new(region))
            .insert(field_id, permission, projection)
    }

    /// Number of regions touched.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` when no access was declared.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Field set of `region`, if it was touched.
    pub fn field_set(&self, region: &LogicalRegion) -> Option<&FieldSet> {
        self.regions.get(region)
    }

    /// Field sets in first-touch order.
    pub fn field_sets(&self) -> impl Iterator<Item = &FieldSet> {
        self.regions.values()
    }
}
