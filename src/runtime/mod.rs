//! Seams towards the execution engine.
//!
//! The launcher builds task objects through a [`Runtime`] and fills them
//! through [`IndexTaskLike`] / [`SingleTaskLike`]. Each task kind exposes one
//! requirement operation per permission; [`add_index_requirement`] and
//! [`add_single_requirement`] select the operation with an exhaustive match.
//! How a requirement reaches those operations is decided by its projection's
//! [`Materializer`].

mod dispatch;
mod materialize;
pub mod recording;

pub use dispatch::{add_index_requirement, add_single_requirement};
pub use materialize::Materializer;

use crate::args::ArgBuffer;
use crate::types::{
    Domain, DomainPoint, FieldId, FutureHandle, FutureMapHandle, IndexSpace, LogicalPartition,
    LogicalRegion, MapperId, MappingTag, ProjectionId, ReductionOpId, RegionFlags, TaskId,
};

/// Region or partition named by an index-launch requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementTarget {
    /// Every point receives the whole region.
    Region(LogicalRegion),
    /// Every point receives the sub-region its projection selects.
    Partition(LogicalPartition),
}

/// Arguments of an index-launch requirement operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRequirement<'a> {
    /// Region or partition the requirement names.
    pub target: RequirementTarget,
    /// Fields covered.
    pub fields: &'a [FieldId],
    /// Projection functor.
    pub projection: ProjectionId,
    /// Parent region for privilege checks, when it is not implied by the target.
    pub parent: Option<LogicalRegion>,
    /// Mapping tag.
    pub tag: MappingTag,
    /// Requirement flags.
    pub flags: RegionFlags,
}

/// Arguments of a single-launch requirement operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleRequirement<'a> {
    /// Region the requirement names.
    pub region: LogicalRegion,
    /// Fields covered.
    pub fields: &'a [FieldId],
    /// Mapping tag.
    pub tag: MappingTag,
    /// Requirement flags.
    pub flags: RegionFlags,
}

/// Operations shared by both task kinds.
pub trait TaskAttachments {
    /// Attaches a future the task waits on.
    fn add_future(&mut self, future: FutureHandle);
    /// Attaches a future map whose values are distributed to the points.
    fn add_point_future(&mut self, future_map: FutureMapHandle);
    /// Index space used to shard the launch across nodes.
    fn set_sharding_space(&mut self, space: IndexSpace);
    /// Point the launch is attributed to.
    fn set_point(&mut self, point: DomainPoint);
}

/// Index-parallel task object.
pub trait IndexTaskLike: TaskAttachments {
    fn add_no_access_requirement(&mut self, req: IndexRequirement<'_>);
    fn add_read_requirement(&mut self, req: IndexRequirement<'_>);
    fn add_write_requirement(&mut self, req: IndexRequirement<'_>);
    fn add_read_write_requirement(&mut self, req: IndexRequirement<'_>);
    fn add_reduction_requirement(&mut self, req: IndexRequirement<'_>, redop: ReductionOpId);
}

/// Single-point task object.
pub trait SingleTaskLike: TaskAttachments {
    fn add_no_access_requirement(&mut self, req: SingleRequirement<'_>);
    fn add_read_requirement(&mut self, req: SingleRequirement<'_>);
    fn add_write_requirement(&mut self, req: SingleRequirement<'_>);
    fn add_read_write_requirement(&mut self, req: SingleRequirement<'_>);
    fn add_reduction_requirement(&mut self, req: SingleRequirement<'_>, redop: ReductionOpId);
    /// Marks a task without region requirements as runnable on the launching node.
    fn set_local_function(&mut self, local: bool);
}

/// Everything needed to create an index task object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLaunch {
    /// Engine task id.
    pub task_id: TaskId,
    /// Points to launch.
    pub domain: Domain,
    /// Packed arguments, owned by the task from here on.
    pub args: ArgBuffer,
    /// Engine mapper id.
    pub mapper_id: MapperId,
    /// Launch tag.
    pub tag: MappingTag,
}

/// Everything needed to create a single task object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleLaunch {
    /// Engine task id.
    pub task_id: TaskId,
    /// Packed arguments, owned by the task from here on.
    pub args: ArgBuffer,
    /// Engine mapper id.
    pub mapper_id: MapperId,
    /// Launch tag.
    pub tag: MappingTag,
}

/// Value handed back by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// Reduced value of an index launch, or the value of a single launch.
    Future(FutureHandle),
    /// Per-point values of an index launch.
    FutureMap(FutureMapHandle),
}

/// Execution engine the launcher builds and dispatches tasks on.
pub trait Runtime {
    /// Index task object.
    type IndexTask: IndexTaskLike;
    /// Single task object.
    type SingleTask: SingleTaskLike;

    /// Creates an index task object that takes ownership of the arguments.
    fn create_index_task(&self, launch: IndexLaunch) -> Self::IndexTask;

    /// Creates a single task object that takes ownership of the arguments.
    fn create_single_task(&self, launch: SingleLaunch) -> Self::SingleTask;

    /// Launches an index task. With a reduction operator the per-point values
    /// are reduced into one future; otherwise a future map is returned.
    fn dispatch_index(&self, task: Self::IndexTask, redop: Option<ReductionOpId>) -> Dispatched;

    /// Launches a single task.
    fn dispatch_single(&self, task: Self::SingleTask) -> FutureHandle;
}
