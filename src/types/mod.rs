//! Opaque handles for objects owned by the execution engine.
//!
//! The launcher never allocates or inspects regions, partitions or futures; it
//! only carries their identities from declaration to the task object. All
//! handles are plain value types compared and hashed by their fields.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Identifier of a field inside a region's field space.
pub type FieldId = u32;

/// Identifier of a registered reduction operator.
pub type ReductionOpId = i32;

/// Identifier of a registered projection functor. `0` is the identity functor.
pub type ProjectionId = u32;

/// Mapper-visible tag attached to a region requirement or a launch.
pub type MappingTag = u64;

/// Engine-wide task identifier after library translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u32);

/// Engine-wide mapper identifier after library translation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MapperId(pub u32);

/// Handle to an index space; used as a sharding space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexSpace {
    /// Engine identifier of the index space.
    pub id: u32,
    /// Dimensionality of the points it contains.
    pub dim: u32,
}

/// Logical region handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicalRegion {
    /// Region tree the region belongs to.
    pub tree_id: u32,
    /// Index space naming the region's points.
    pub index_space: IndexSpace,
    /// Field space naming the region's fields.
    pub field_space: u32,
}

impl LogicalRegion {
    /// Creates a region handle.
    pub const fn new(tree_id: u32, index_space: IndexSpace, field_space: u32) -> Self {
        Self {
            tree_id,
            index_space,
            field_space,
        }
    }

    /// Dimensionality of the region's index space.
    pub const fn dim(&self) -> u32 {
        self.index_space.dim
    }
}

impl fmt::Display for LogicalRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region({}, {}, {})",
            self.tree_id, self.index_space.id, self.field_space
        )
    }
}

/// Logical partition handle; the target of projected requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicalPartition {
    /// Region tree the partition belongs to.
    pub tree_id: u32,
    /// Engine identifier of the index partition.
    pub index_partition: u32,
    /// Field space shared with the parent region.
    pub field_space: u32,
}

impl fmt::Display for LogicalPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Partition({}, {}, {})",
            self.tree_id, self.index_partition, self.field_space
        )
    }
}

/// Region requirement flags, passed through to the engine unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionFlags(pub u32);

impl RegionFlags {
    /// No flags set.
    pub const NONE: RegionFlags = RegionFlags(0);
}

/// Point in an index space of up to any dimensionality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DomainPoint(pub Vec<i64>);

impl DomainPoint {
    /// Creates a point from its coordinates.
    pub fn new(coords: impl Into<Vec<i64>>) -> Self {
        Self(coords.into())
    }

    /// Number of coordinates.
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Coordinates in dimension order.
    pub fn coords(&self) -> &[i64] {
        &self.0
    }
}

impl From<Vec<i64>> for DomainPoint {
    fn from(coords: Vec<i64>) -> Self {
        Self(coords)
    }
}

impl<const N: usize> From<[i64; N]> for DomainPoint {
    fn from(coords: [i64; N]) -> Self {
        Self(coords.to_vec())
    }
}

/// Dense rectangular launch domain with inclusive bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Domain {
    /// Lower corner.
    pub lo: DomainPoint,
    /// Upper corner, inclusive.
    pub hi: DomainPoint,
}

impl Domain {
    /// Creates a domain from inclusive bounds.
    pub fn new(lo: impl Into<DomainPoint>, hi: impl Into<DomainPoint>) -> Self {
        Self {
            lo: lo.into(),
            hi: hi.into(),
        }
    }

    /// Domain `[0, extent)` in every listed dimension.
    pub fn from_extents(extents: &[i64]) -> Self {
        Self {
            lo: DomainPoint(vec![0; extents.len()]),
            hi: DomainPoint(extents.iter().map(|extent| extent - 1).collect()),
        }
    }

    /// Dimensionality of the domain.
    pub fn dim(&self) -> usize {
        self.lo.dim()
    }

    /// Number of points; zero when any dimension is empty or the corners disagree in rank.
    pub fn volume(&self) -> u64 {
        if self.lo.dim() != self.hi.dim() {
            return 0;
        }
        self.lo
            .coords()
            .iter()
            .zip(self.hi.coords())
            .map(|(lo, hi)| if hi < lo { 0 } else { (hi - lo + 1) as u64 })
            .product()
    }
}

/// Handle to a single value produced by an earlier launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FutureHandle(pub u64);

/// Handle to a per-point collection of values produced by an earlier index launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FutureMapHandle(pub u64);
