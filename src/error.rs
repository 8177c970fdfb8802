//! Error taxonomy for task assembly.
//!
//! Every failure is raised synchronously while a single launcher is being
//! assembled. None of them are transient: the launcher that produced the error
//! is abandoned and other launchers are unaffected.

use thiserror::Error;

use crate::access::{Permission, ProjectionInfo};
use crate::args::DataType;
use crate::ser::SerError;
use crate::types::{FieldId, LogicalRegion, ProjectionId};

/// Result alias used throughout the launcher.
pub type LaunchResult<T> = core::result::Result<T, LaunchError>;

/// Errors raised while declaring accesses, packing arguments or building tasks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    /// Two accesses to the same field cannot be satisfied by one requirement.
    #[error("interfering requirements found on field {field_id} of {region}: {reason}")]
    Conflict {
        /// Region owning the field.
        region: LogicalRegion,
        /// Field that received the interfering accesses.
        field_id: FieldId,
        /// Which coalescing rule was violated.
        reason: ConflictReason,
    },
    /// The data type has no wire encoder.
    #[error("unsupported data type: {0}")]
    UnsupportedType(DataType),
    /// A scalar value does not match the data type it was declared with.
    #[error("scalar of type {found} cannot be packed as {expected}")]
    ScalarTypeMismatch {
        /// Declared data type.
        expected: DataType,
        /// Type of the supplied value.
        found: DataType,
    },
    /// The launcher was used in a way its current state does not allow.
    #[error(transparent)]
    InvalidUsage(#[from] UsageError),
    /// A packed region-field argument has no coalesced requirement to point at.
    #[error(
        "no requirement index recorded for field {field_id} of {region} \
         under {permission} or its read-write promotion"
    )]
    InternalConsistency {
        /// Region of the unresolved argument.
        region: LogicalRegion,
        /// Permission the argument was declared with.
        permission: Permission,
        /// Field of the unresolved argument.
        field_id: FieldId,
    },
    /// A value could not be encoded into the argument buffer.
    #[error("argument serialization failed: {0}")]
    Serialization(#[from] SerError),
}

/// Coalescing rule violated by a [`LaunchError::Conflict`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictReason {
    /// A second, different projection was declared for write access.
    #[error("write access requested through both {existing} and {incoming}")]
    WriteCollision {
        /// Projection already holding write access.
        existing: ProjectionInfo,
        /// Projection that attempted to join it.
        incoming: ProjectionInfo,
    },
    /// Mixed permissions were promoted to read-write but disagree on the projection.
    #[error(
        "mixed permissions promote to read-write but use {} distinct projections",
        .projections.len()
    )]
    PromotionMismatch {
        /// Every distinct projection declared on the field.
        projections: Vec<ProjectionInfo>,
    },
}

/// Misuse of the launcher API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// Future-backed stores can only be read.
    #[error("future-backed stores must be read only, requested {0}")]
    ScalarStoreNotReadOnly(Permission),
    /// The operation arrived after requirements were coalesced.
    #[error("`{0}` is not accepted once region requirements are coalesced")]
    LauncherSealed(&'static str),
    /// The launcher already produced its task object.
    #[error("the launcher has already built its task")]
    AlreadyBuilt,
    /// A chunk shape must have the same rank as the shape it tiles.
    #[error("chunk shape of rank {chunk} does not match shape of rank {shape}")]
    ChunkRankMismatch {
        /// Rank of the shape.
        shape: usize,
        /// Rank of the chunk shape.
        chunk: usize,
    },
    /// A chunk projection functor id cannot be packed as an `int32`.
    #[error("projection functor {0} does not fit the packed int32 chunk projection")]
    ProjectionIdOutOfRange(ProjectionId),
    /// An affine transform's matrix or offsets do not match its dimensions.
    #[error("affine transform {m}x{n} has mismatched matrix or offset lengths")]
    TransformShape {
        /// Output rank.
        m: usize,
        /// Input rank.
        n: usize,
    },
    /// A reduction operator was attached to a non-reduction requirement.
    #[error("projection {projection} carries a reduction operator but the requirement is {permission}")]
    UnexpectedReductionOp {
        /// Offending projection.
        projection: ProjectionInfo,
        /// Resolved permission of the requirement.
        permission: Permission,
    },
    /// A reduction requirement has no operator to reduce with.
    #[error("reduction requirement on {region} has no reduction operator")]
    MissingReductionOp {
        /// Region of the requirement.
        region: LogicalRegion,
    },
    /// A library-local task id falls outside the library's reserved range.
    #[error("task id {local} is outside the {count} task ids reserved for `{library}`")]
    TaskIdOutOfRange {
        /// Library name.
        library: String,
        /// Library-local id that was requested.
        local: u32,
        /// Number of reserved ids.
        count: u32,
    },
    /// A library-local mapper id falls outside the library's reserved range.
    #[error("mapper id {local} is outside the {count} mapper ids reserved for `{library}`")]
    MapperIdOutOfRange {
        /// Library name.
        library: String,
        /// Library-local id that was requested.
        local: u32,
        /// Number of reserved ids.
        count: u32,
    },
}
