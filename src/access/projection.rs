use core::fmt;
use serde::{Deserialize, Serialize};

use crate::types::{LogicalPartition, MappingTag, ProjectionId, ReductionOpId, RegionFlags};

/// How a region is presented to the points of a launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Projection {
    /// Every point sees the whole region.
    Broadcast {
        /// Reduction operator for reduction requirements.
        redop: Option<ReductionOpId>,
    },
    /// Each point sees the sub-region selected by `functor` from `partition`.
    Project {
        /// Partition the functor indexes into.
        partition: LogicalPartition,
        /// Projection functor id.
        functor: ProjectionId,
        /// Reduction operator for reduction requirements.
        redop: Option<ReductionOpId>,
    },
}

impl Projection {
    /// Broadcast without a reduction operator.
    pub const fn broadcast() -> Self {
        Projection::Broadcast { redop: None }
    }

    /// Broadcast reducing through `redop`.
    pub const fn broadcast_reduction(redop: ReductionOpId) -> Self {
        Projection::Broadcast { redop: Some(redop) }
    }

    /// Projection through `functor` without a reduction operator.
    pub const fn project(partition: LogicalPartition, functor: ProjectionId) -> Self {
        Projection::Project {
            partition,
            functor,
            redop: None,
        }
    }

    /// Projection through `functor` reducing through `redop`.
    pub const fn project_reduction(
        partition: LogicalPartition,
        functor: ProjectionId,
        redop: ReductionOpId,
    ) -> Self {
        Projection::Project {
            partition,
            functor,
            redop: Some(redop),
        }
    }

    /// Reduction operator, if any.
    pub const fn redop(&self) -> Option<ReductionOpId> {
        match *self {
            Projection::Broadcast { redop } | Projection::Project { redop, .. } => redop,
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Broadcast { redop: None } => write!(f, "Broadcast"),
            Projection::Broadcast { redop: Some(redop) } => write!(f, "Broadcast(redop={redop})"),
            Projection::Project {
                partition,
                functor,
                redop: None,
            } => write!(f, "Project({partition}, {functor})"),
            Projection::Project {
                partition,
                functor,
                redop: Some(redop),
            } => write!(f, "Project({partition}, {functor}, redop={redop})"),
        }
    }
}

/// Projection descriptor attached to a declared access: the projection plus the
/// tag and flags its requirement will carry. Two accesses share a requirement
/// only when all three agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectionInfo {
    /// Projection of the region onto the launch points.
    pub projection: Projection,
    /// Mapping tag of the requirement.
    pub tag: MappingTag,
    /// Requirement flags.
    pub flags: RegionFlags,
}

impl ProjectionInfo {
    /// Descriptor with explicit tag and flags.
    pub const fn new(projection: Projection, tag: MappingTag, flags: RegionFlags) -> Self {
        Self {
            projection,
            tag,
            flags,
        }
    }

    /// Descriptor with a zero tag and no flags.
    pub const fn untagged(projection: Projection) -> Self {
        Self::new(projection, 0, RegionFlags::NONE)
    }
}

impl From<Projection> for ProjectionInfo {
    fn from(projection: Projection) -> Self {
        Self::untagged(projection)
    }
}

impl fmt::Display for ProjectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, tag={}, flags={:#x})",
            self.projection, self.tag, self.flags.0
        )
    }
}
