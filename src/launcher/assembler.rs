use core::mem;

use tracing::{debug, trace};

use crate::access::{AccessRecorder, Permission, ProjectionInfo};
use crate::args::{
    ArgBuffer, Argument, ArgumentEncoder, ChunkShape, DataType, PointArg, RegionFieldArg, Scalar,
    ScalarArg, ShapeArg,
};
use crate::config::{LauncherOptions, LibraryConfig};
use crate::error::{LaunchResult, UsageError};
use crate::requirements::{RegionRequirement, Requirements};
use crate::runtime::{
    Dispatched, IndexLaunch, Materializer, Runtime, SingleLaunch, SingleTaskLike,
    TaskAttachments,
};
use crate::ser::{self, SerKind};
use crate::types::{
    Domain, DomainPoint, FutureHandle, FutureMapHandle, IndexSpace, MapperId, MappingTag,
    ProjectionId, ReductionOpId, TaskId,
};

use super::store::{Store, StoreStorage};

enum Stage {
    Building,
    Coalesced(Requirements),
    Built,
}

/// Assembles one task launch.
///
/// Accesses and arguments are declared in any order while the launcher is
/// building. [`coalesce`](Self::coalesce) freezes the region requirements;
/// [`build_task`](Self::build_task) or
/// [`build_single_task`](Self::build_single_task) then packs the arguments,
/// creates the task object and fills it. A launcher builds exactly one task.
pub struct TaskLauncher {
    task_id: TaskId,
    mapper_id: MapperId,
    tag: MappingTag,
    stage: Stage,
    encoder: ArgumentEncoder,
    recorder: AccessRecorder,
    futures: Vec<FutureHandle>,
    future_maps: Vec<FutureMapHandle>,
    sharding_space: Option<IndexSpace>,
    point: Option<DomainPoint>,
}

impl TaskLauncher {
    /// Launcher for library-local task `local_task_id` with default options.
    pub fn new(library: &LibraryConfig, local_task_id: u32) -> LaunchResult<Self> {
        Self::with_options(library, local_task_id, LauncherOptions::default())
    }

    /// Launcher for library-local task `local_task_id`.
    pub fn with_options(
        library: &LibraryConfig,
        local_task_id: u32,
        options: LauncherOptions,
    ) -> LaunchResult<Self> {
        let task_id = library.task_id(local_task_id)?;
        let mapper_id = library.mapper_id(options.mapper)?;
        Ok(Self::from_ids(task_id, mapper_id, options.tag))
    }

    /// Launcher for an already translated engine task id.
    pub fn from_ids(task_id: TaskId, mapper_id: MapperId, tag: MappingTag) -> Self {
        Self {
            task_id,
            mapper_id,
            tag,
            stage: Stage::Building,
            encoder: ArgumentEncoder::new(),
            recorder: AccessRecorder::new(),
            futures: Vec::new(),
            future_maps: Vec::new(),
            sharding_space: None,
            point: None,
        }
    }

    /// Engine task id.
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Engine mapper id.
    pub fn mapper_id(&self) -> MapperId {
        self.mapper_id
    }

    /// Number of arguments declared so far.
    pub fn num_args(&self) -> usize {
        self.encoder.len()
    }

    /// Returns `true` once the launcher built its task or failed trying.
    pub fn is_built(&self) -> bool {
        matches!(self.stage, Stage::Built)
    }

    fn ensure_building(&self, operation: &'static str) -> LaunchResult<()> {
        match self.stage {
            Stage::Building => Ok(()),
            Stage::Coalesced(_) => Err(UsageError::LauncherSealed(operation).into()),
            Stage::Built => Err(UsageError::AlreadyBuilt.into()),
        }
    }

    /// Appends a scalar at its own width.
    pub fn add_scalar_arg(&mut self, value: impl Into<Scalar>) -> LaunchResult<()> {
        self.ensure_building("add_scalar_arg")?;
        self.encoder.push_scalar(ScalarArg::Value(value.into()));
        Ok(())
    }

    /// Appends a scalar declared as `dtype`; the value must match it.
    pub fn add_typed_scalar(&mut self, value: Scalar, dtype: DataType) -> LaunchResult<()> {
        self.ensure_building("add_typed_scalar")?;
        self.encoder.push_scalar(ScalarArg::typed(value, dtype)?);
        Ok(())
    }

    /// Appends a count-prefixed array of `element` values.
    pub fn add_scalar_array(
        &mut self,
        element: DataType,
        values: Vec<Scalar>,
    ) -> LaunchResult<()> {
        self.ensure_building("add_scalar_array")?;
        self.encoder.push_scalar(ScalarArg::array(element, values)?);
        Ok(())
    }

    /// Appends a data type tag.
    pub fn add_dtype_arg(&mut self, dtype: DataType) -> LaunchResult<()> {
        self.ensure_building("add_dtype_arg")?;
        self.encoder.push(Argument::Dtype(dtype));
        Ok(())
    }

    /// Appends a point; untyped points carry their dimensionality.
    pub fn add_point(&mut self, point: impl Into<DomainPoint>, untyped: bool) -> LaunchResult<()> {
        self.ensure_building("add_point")?;
        self.encoder
            .push(Argument::Point(PointArg::new(point.into(), untyped)));
        Ok(())
    }

    /// Appends a shape, optionally tiled by `(chunk extents, projection functor)`.
    pub fn add_shape(
        &mut self,
        shape: Vec<i64>,
        chunk: Option<(Vec<i64>, ProjectionId)>,
    ) -> LaunchResult<()> {
        self.ensure_building("add_shape")?;
        let shape = match chunk {
            Some((extents, projection)) => {
                ShapeArg::chunked(shape, ChunkShape::new(projection, extents)?)?
            }
            None => ShapeArg::new(shape),
        };
        self.encoder.push_shape(&shape);
        Ok(())
    }

    /// Declares `store` as read through `projection`.
    pub fn add_input(&mut self, store: &Store, projection: ProjectionInfo) -> LaunchResult<()> {
        self.add_store(store, Permission::Read, projection)
    }

    /// Declares `store` as written through `projection`.
    pub fn add_output(&mut self, store: &Store, projection: ProjectionInfo) -> LaunchResult<()> {
        self.add_store(store, Permission::Write, projection)
    }

    /// Declares `store` as read and written through `projection`.
    pub fn add_inout(&mut self, store: &Store, projection: ProjectionInfo) -> LaunchResult<()> {
        self.add_store(store, Permission::ReadWrite, projection)
    }

    /// Declares `store` as reduced into through `projection`, which must carry
    /// the reduction operator.
    pub fn add_reduction(&mut self, store: &Store, projection: ProjectionInfo) -> LaunchResult<()> {
        self.add_store(store, Permission::Reduction, projection)
    }

    /// Passes `store` without granting access to its data.
    pub fn add_no_access(&mut self, store: &Store, projection: ProjectionInfo) -> LaunchResult<()> {
        self.add_store(store, Permission::NoAccess, projection)
    }

    /// Declares `store` with `permission` and appends its prologue and reference.
    ///
    /// Future-backed stores only accept [`Permission::Read`]; nothing is
    /// recorded or appended when they are declared otherwise.
    pub fn add_store(
        &mut self,
        store: &Store,
        permission: Permission,
        projection: ProjectionInfo,
    ) -> LaunchResult<()> {
        self.ensure_building("add_store")?;
        if store.is_future() && permission != Permission::Read {
            return Err(UsageError::ScalarStoreNotReadOnly(permission).into());
        }
        let ndim = ser::ensure_i32(store.ndim(), SerKind::Store, "ndim")?;
        let reference = match store.storage {
            StoreStorage::Future(future) => {
                self.futures.push(future);
                None
            }
            StoreStorage::RegionField { region, field_id } => {
                self.recorder
                    .declare(region, field_id, permission, projection)?;
                Some(RegionFieldArg {
                    dim: region.dim(),
                    redop: projection.projection.redop(),
                    key: RegionRequirement::new(region, permission, projection),
                    field_id,
                    transform: store.transform.clone(),
                })
            }
        };

        self.encoder
            .push_scalar(ScalarArg::Value(Scalar::Bool(store.is_future())));
        self.encoder.push_scalar(ScalarArg::Value(Scalar::Int32(ndim)));
        self.encoder.push(Argument::Dtype(store.dtype));
        self.encoder.push_shape(&ShapeArg::new(store.shape.clone()));
        if let Some(reference) = reference {
            self.encoder.push(Argument::RegionField(reference));
        }
        Ok(())
    }

    /// Adds a future the task waits on.
    pub fn add_future(&mut self, future: FutureHandle) -> LaunchResult<()> {
        self.ensure_building("add_future")?;
        self.futures.push(future);
        Ok(())
    }

    /// Adds a future map whose values are distributed to the launch points.
    pub fn add_future_map(&mut self, future_map: FutureMapHandle) -> LaunchResult<()> {
        self.ensure_building("add_future_map")?;
        self.future_maps.push(future_map);
        Ok(())
    }

    /// Index space used to shard the launch.
    pub fn set_sharding_space(&mut self, space: IndexSpace) -> LaunchResult<()> {
        self.ensure_building("set_sharding_space")?;
        self.sharding_space = Some(space);
        Ok(())
    }

    /// Point a single launch is attributed to.
    pub fn set_point(&mut self, point: impl Into<DomainPoint>) -> LaunchResult<()> {
        self.ensure_building("set_point")?;
        self.point = Some(point.into());
        Ok(())
    }

    /// Freezes the region requirements; further declarations are rejected.
    ///
    /// Calling it again returns the same requirements.
    ///
    /// A coalescing failure abandons the launcher: every later call reports
    /// [`UsageError::AlreadyBuilt`].
    pub fn coalesce(&mut self) -> LaunchResult<&Requirements> {
        if let Stage::Building = self.stage {
            match Requirements::coalesce(&self.recorder) {
                Ok(requirements) => self.stage = Stage::Coalesced(requirements),
                Err(err) => {
                    self.stage = Stage::Built;
                    return Err(err);
                }
            }
        }
        match &self.stage {
            Stage::Coalesced(requirements) => Ok(requirements),
            Stage::Building | Stage::Built => Err(UsageError::AlreadyBuilt.into()),
        }
    }

    fn seal(&mut self) -> LaunchResult<(Requirements, ArgBuffer)> {
        self.coalesce()?;
        let requirements = match mem::replace(&mut self.stage, Stage::Built) {
            Stage::Coalesced(requirements) => requirements,
            Stage::Building | Stage::Built => return Err(UsageError::AlreadyBuilt.into()),
        };
        let args = self.encoder.pack(&requirements)?;
        trace!(
            task_id = self.task_id.0,
            args = self.encoder.len(),
            bytes = args.len(),
            "packed task arguments"
        );
        Ok((requirements, args))
    }

    /// Builds an index task over `domain`.
    pub fn build_task<R: Runtime>(
        &mut self,
        runtime: &R,
        domain: Domain,
    ) -> LaunchResult<R::IndexTask> {
        let (requirements, args) = self.seal()?;
        let mut task = runtime.create_index_task(IndexLaunch {
            task_id: self.task_id,
            domain,
            args,
            mapper_id: self.mapper_id,
            tag: self.tag,
        });
        if let Some(space) = self.sharding_space {
            task.set_sharding_space(space);
        }
        for entry in &requirements {
            let projection = entry.requirement.projection.projection;
            projection.add(&mut task, &entry.requirement, &entry.fields)?;
        }
        for future in &self.futures {
            task.add_future(*future);
        }
        for future_map in &self.future_maps {
            task.add_point_future(*future_map);
        }
        debug!(
            task_id = self.task_id.0,
            requirements = requirements.len(),
            futures = self.futures.len(),
            future_maps = self.future_maps.len(),
            "built index task"
        );
        Ok(task)
    }

    /// Builds a single task.
    ///
    /// A task without region requirements is marked as a local function.
    pub fn build_single_task<R: Runtime>(&mut self, runtime: &R) -> LaunchResult<R::SingleTask> {
        let (requirements, args) = self.seal()?;
        let mut task = runtime.create_single_task(SingleLaunch {
            task_id: self.task_id,
            args,
            mapper_id: self.mapper_id,
            tag: self.tag,
        });
        for entry in &requirements {
            let projection = entry.requirement.projection.projection;
            projection.add_single(&mut task, &entry.requirement, &entry.fields)?;
        }
        for future in &self.futures {
            task.add_future(*future);
        }
        for future_map in &self.future_maps {
            task.add_point_future(*future_map);
        }
        if requirements.is_empty() {
            task.set_local_function(true);
        }
        if let Some(space) = self.sharding_space {
            task.set_sharding_space(space);
        }
        if let Some(point) = self.point.take() {
            task.set_point(point);
        }
        debug!(
            task_id = self.task_id.0,
            requirements = requirements.len(),
            futures = self.futures.len(),
            local = requirements.is_empty(),
            "built single task"
        );
        Ok(task)
    }

    /// Builds and dispatches an index task. With `redop` the per-point values
    /// are reduced into a future.
    pub fn execute<R: Runtime>(
        &mut self,
        runtime: &R,
        domain: Domain,
        redop: Option<ReductionOpId>,
    ) -> LaunchResult<Dispatched> {
        let task = self.build_task(runtime, domain)?;
        Ok(runtime.dispatch_index(task, redop))
    }

    /// Builds and dispatches a single task.
    pub fn execute_single<R: Runtime>(&mut self, runtime: &R) -> LaunchResult<FutureHandle> {
        let task = self.build_single_task(runtime)?;
        Ok(runtime.dispatch_single(task))
    }
}
