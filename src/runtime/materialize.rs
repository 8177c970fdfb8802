use crate::access::Projection;
use crate::error::LaunchResult;
use crate::requirements::RegionRequirement;
use crate::types::{FieldId, RegionFlags};

use super::dispatch::{add_index_requirement, add_single_requirement};
use super::{IndexRequirement, IndexTaskLike, RequirementTarget, SingleRequirement, SingleTaskLike};

/// Turns a coalesced requirement into calls on a task object.
pub trait Materializer {
    /// Adds the requirement to an index launch.
    fn add(
        &self,
        task: &mut dyn IndexTaskLike,
        requirement: &RegionRequirement,
        fields: &[FieldId],
    ) -> LaunchResult<()>;

    /// Adds the requirement to a single launch.
    fn add_single(
        &self,
        task: &mut dyn SingleTaskLike,
        requirement: &RegionRequirement,
        fields: &[FieldId],
    ) -> LaunchResult<()>;
}

// Broadcast index requirements use the identity functor with the region as its
// own parent and carry no flags. Projected single requirements carry no flags.
impl Materializer for Projection {
    fn add(
        &self,
        task: &mut dyn IndexTaskLike,
        requirement: &RegionRequirement,
        fields: &[FieldId],
    ) -> LaunchResult<()> {
        let req = match *self {
            Projection::Broadcast { .. } => IndexRequirement {
                target: RequirementTarget::Region(requirement.region),
                fields,
                projection: 0,
                parent: Some(requirement.region),
                tag: requirement.tag(),
                flags: RegionFlags::NONE,
            },
            Projection::Project {
                partition, functor, ..
            } => IndexRequirement {
                target: RequirementTarget::Partition(partition),
                fields,
                projection: functor,
                parent: None,
                tag: requirement.tag(),
                flags: requirement.flags(),
            },
        };
        add_index_requirement(task, requirement, req)
    }

    fn add_single(
        &self,
        task: &mut dyn SingleTaskLike,
        requirement: &RegionRequirement,
        fields: &[FieldId],
    ) -> LaunchResult<()> {
        let flags = match self {
            Projection::Broadcast { .. } => requirement.flags(),
            Projection::Project { .. } => RegionFlags::NONE,
        };
        let req = SingleRequirement {
            region: requirement.region,
            fields,
            tag: requirement.tag(),
            flags,
        };
        add_single_requirement(task, requirement, req)
    }
}
