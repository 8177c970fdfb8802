//! In-process runtime that records every call made on its task objects.
//!
//! Useful for dry runs: a launcher can be built against a
//! [`RecordingRuntime`] and the resulting [`RecordedIndexTask`] or
//! [`RecordedSingleTask`] inspected without an execution engine.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::access::Permission;
use crate::types::{
    DomainPoint, FieldId, FutureHandle, FutureMapHandle, IndexSpace, LogicalRegion, MappingTag,
    ProjectionId, ReductionOpId, RegionFlags,
};

use super::{
    Dispatched, IndexLaunch, IndexRequirement, IndexTaskLike, RequirementTarget, Runtime,
    SingleLaunch, SingleRequirement, SingleTaskLike, TaskAttachments,
};

/// One recorded requirement operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementCall {
    /// Operation that was invoked.
    pub permission: Permission,
    /// Region or partition named.
    pub target: RequirementTarget,
    /// Fields covered.
    pub fields: Vec<FieldId>,
    /// Projection functor; `None` for single launches.
    pub projection: Option<ProjectionId>,
    /// Parent region, if passed.
    pub parent: Option<LogicalRegion>,
    /// Reduction operator of reduction operations.
    pub redop: Option<ReductionOpId>,
    /// Mapping tag.
    pub tag: MappingTag,
    /// Requirement flags.
    pub flags: RegionFlags,
}

impl RequirementCall {
    fn index(
        permission: Permission,
        req: IndexRequirement<'_>,
        redop: Option<ReductionOpId>,
    ) -> Self {
        Self {
            permission,
            target: req.target,
            fields: req.fields.to_vec(),
            projection: Some(req.projection),
            parent: req.parent,
            redop,
            tag: req.tag,
            flags: req.flags,
        }
    }

    fn single(
        permission: Permission,
        req: SingleRequirement<'_>,
        redop: Option<ReductionOpId>,
    ) -> Self {
        Self {
            permission,
            target: RequirementTarget::Region(req.region),
            fields: req.fields.to_vec(),
            projection: None,
            parent: None,
            redop,
            tag: req.tag,
            flags: req.flags,
        }
    }
}

/// Calls shared by both task kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedAttachments {
    /// Requirement operations in call order.
    pub requirements: Vec<RequirementCall>,
    /// Futures in call order.
    pub futures: Vec<FutureHandle>,
    /// Future maps in call order.
    pub point_futures: Vec<FutureMapHandle>,
    /// Last sharding space set.
    pub sharding_space: Option<IndexSpace>,
    /// Last point set.
    pub point: Option<DomainPoint>,
}

impl TaskAttachments for RecordedAttachments {
    fn add_future(&mut self, future: FutureHandle) {
        self.futures.push(future);
    }

    fn add_point_future(&mut self, future_map: FutureMapHandle) {
        self.point_futures.push(future_map);
    }

    fn set_sharding_space(&mut self, space: IndexSpace) {
        self.sharding_space = Some(space);
    }

    fn set_point(&mut self, point: DomainPoint) {
        self.point = Some(point);
    }
}

/// Index task object produced by [`RecordingRuntime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedIndexTask {
    /// Launch the task was created from.
    pub launch: IndexLaunch,
    /// Calls made after creation.
    pub calls: RecordedAttachments,
}

/// Single task object produced by [`RecordingRuntime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSingleTask {
    /// Launch the task was created from.
    pub launch: SingleLaunch,
    /// Calls made after creation.
    pub calls: RecordedAttachments,
    /// Whether the task was marked as a local function.
    pub local_function: bool,
}

macro_rules! forward_attachments {
    ($ty:ty) => {
        impl TaskAttachments for $ty {
            fn add_future(&mut self, future: FutureHandle) {
                self.calls.add_future(future);
            }

            fn add_point_future(&mut self, future_map: FutureMapHandle) {
                self.calls.add_point_future(future_map);
            }

            fn set_sharding_space(&mut self, space: IndexSpace) {
                self.calls.set_sharding_space(space);
            }

            fn set_point(&mut self, point: DomainPoint) {
                self.calls.set_point(point);
            }
        }
    };
}

forward_attachments!(RecordedIndexTask);
forward_attachments!(RecordedSingleTask);

impl IndexTaskLike for RecordedIndexTask {
    fn add_no_access_requirement(&mut self, req: IndexRequirement<'_>) {
        self.calls
            .requirements
            .push(RequirementCall::index(Permission::NoAccess, req, None));
    }

    fn add_read_requirement(&mut self, req: IndexRequirement<'_>) {
        self.calls
            .requirements
            .push(RequirementCall::index(Permission::Read, req, None));
    }

    fn add_write_requirement(&mut self, req: IndexRequirement<'_>) {
        self.calls
            .requirements
            .push(RequirementCall::index(Permission::Write, req, None));
    }

    fn add_read_write_requirement(&mut self, req: IndexRequirement<'_>) {
        self.calls
            .requirements
            .push(RequirementCall::index(Permission::ReadWrite, req, None));
    }

    fn add_reduction_requirement(&mut self, req: IndexRequirement<'_>, redop: ReductionOpId) {
        self.calls
            .requirements
            .push(RequirementCall::index(Permission::Reduction, req, Some(redop)));
    }
}

impl SingleTaskLike for RecordedSingleTask {
    fn add_no_access_requirement(&mut self, req: SingleRequirement<'_>) {
        self.calls
            .requirements
            .push(RequirementCall::single(Permission::NoAccess, req, None));
    }

    fn add_read_requirement(&mut self, req: SingleRequirement<'_>) {
        self.calls
            .requirements
            .push(RequirementCall::single(Permission::Read, req, None));
    }

    fn add_write_requirement(&mut self, req: SingleRequirement<'_>) {
        self.calls
            .requirements
            .push(RequirementCall::single(Permission::Write, req, None));
    }

    fn add_read_write_requirement(&mut self, req: SingleRequirement<'_>) {
        self.calls
            .requirements
            .push(RequirementCall::single(Permission::ReadWrite, req, None));
    }

    fn add_reduction_requirement(&mut self, req: SingleRequirement<'_>, redop: ReductionOpId) {
        self.calls
            .requirements
            .push(RequirementCall::single(Permission::Reduction, req, Some(redop)));
    }

    fn set_local_function(&mut self, local: bool) {
        self.local_function = local;
    }
}

/// Runtime whose dispatcher hands out sequential handles.
#[derive(Debug, Default)]
pub struct RecordingRuntime {
    dispatched: AtomicU64,
}

impl RecordingRuntime {
    /// Creates a runtime whose first handle is `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::SeqCst)
    }

    fn next_handle(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::SeqCst)
    }
}

impl Runtime for RecordingRuntime {
    type IndexTask = RecordedIndexTask;
    type SingleTask = RecordedSingleTask;

    fn create_index_task(&self, launch: IndexLaunch) -> RecordedIndexTask {
        RecordedIndexTask {
            launch,
            calls: RecordedAttachments::default(),
        }
    }

    fn create_single_task(&self, launch: SingleLaunch) -> RecordedSingleTask {
        RecordedSingleTask {
            launch,
            calls: RecordedAttachments::default(),
            local_function: false,
        }
    }

    fn dispatch_index(&self, _task: RecordedIndexTask, redop: Option<ReductionOpId>) -> Dispatched {
        let handle = self.next_handle();
        match redop {
            Some(_) => Dispatched::Future(FutureHandle(handle)),
            None => Dispatched::FutureMap(FutureMapHandle(handle)),
        }
    }

    fn dispatch_single(&self, _task: RecordedSingleTask) -> FutureHandle {
        FutureHandle(self.next_handle())
    }
}
