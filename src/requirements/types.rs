use core::fmt;

use crate::access::{Permission, ProjectionInfo};
use crate::types::{FieldId, LogicalRegion, MappingTag, RegionFlags};

/// Concrete region requirement handed to the execution engine.
///
/// The same type doubles as the lookup key of a declared access: a region-field
/// argument remembers the requirement it asked for and resolves the index of
/// the requirement that was actually produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionRequirement {
    /// Region the requirement names.
    pub region: LogicalRegion,
    /// Resolved permission.
    pub permission: Permission,
    /// Projection descriptor, including tag and flags.
    pub projection: ProjectionInfo,
}

impl RegionRequirement {
    /// Creates a requirement.
    pub const fn new(
        region: LogicalRegion,
        permission: Permission,
        projection: ProjectionInfo,
    ) -> Self {
        Self {
            region,
            permission,
            projection,
        }
    }

    /// Mapping tag carried by the descriptor.
    pub const fn tag(&self) -> MappingTag {
        self.projection.tag
    }

    /// Flags carried by the descriptor.
    pub const fn flags(&self) -> RegionFlags {
        self.projection.flags
    }

    /// Same requirement with a different permission.
    pub const fn with_permission(self, permission: Permission) -> Self {
        Self {
            permission,
            ..self
        }
    }
}

impl fmt::Display for RegionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.region, self.permission, self.projection)
    }
}

/// One coalesced requirement together with the fields it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoalescedRequirement {
    /// Position in the task's requirement list.
    pub index: u32,
    /// The requirement itself.
    pub requirement: RegionRequirement,
    /// Fields covered, in declaration order.
    pub fields: Vec<FieldId>,
}
