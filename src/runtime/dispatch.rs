use crate::access::Permission;
use crate::error::{LaunchResult, UsageError};
use crate::requirements::RegionRequirement;
use crate::types::ReductionOpId;

use super::{IndexRequirement, IndexTaskLike, SingleRequirement, SingleTaskLike};

/// Forwards `req` to the index-task operation matching the permission of `requirement`.
pub fn add_index_requirement(
    task: &mut dyn IndexTaskLike,
    requirement: &RegionRequirement,
    req: IndexRequirement<'_>,
) -> LaunchResult<()> {
    match requirement.permission {
        Permission::NoAccess => task.add_no_access_requirement(req),
        Permission::Read => task.add_read_requirement(req),
        Permission::Write => task.add_write_requirement(req),
        Permission::ReadWrite => task.add_read_write_requirement(req),
        Permission::Reduction => {
            task.add_reduction_requirement(req, reduction_op(requirement)?);
        }
    }
    Ok(())
}

/// Forwards `req` to the single-task operation matching the permission of `requirement`.
pub fn add_single_requirement(
    task: &mut dyn SingleTaskLike,
    requirement: &RegionRequirement,
    req: SingleRequirement<'_>,
) -> LaunchResult<()> {
    match requirement.permission {
        Permission::NoAccess => task.add_no_access_requirement(req),
        Permission::Read => task.add_read_requirement(req),
        Permission::Write => task.add_write_requirement(req),
        Permission::ReadWrite => task.add_read_write_requirement(req),
        Permission::Reduction => {
            task.add_reduction_requirement(req, reduction_op(requirement)?);
        }
    }
    Ok(())
}

fn reduction_op(requirement: &RegionRequirement) -> LaunchResult<ReductionOpId> {
    requirement
        .projection
        .projection
        .redop()
        .ok_or_else(|| {
            UsageError::MissingReductionOp {
                region: requirement.region,
            }
            .into()
        })
}
