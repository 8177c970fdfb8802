use crate::error::{LaunchResult, UsageError};
use crate::types::ProjectionId;

use super::scalar::{Scalar, ScalarArg};

/// Sentinel packed in place of a projection id when a shape has no chunk suffix.
pub const NO_PROJECTION: i32 = -1;

/// Tiling of a shape used by the receiving side to compute per-point bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkShape {
    /// Projection functor that maps launch points onto tiles.
    pub projection: i32,
    /// Extent of one tile in every dimension.
    pub extents: Vec<i64>,
}

impl ChunkShape {
    /// Creates a chunk shape for projection functor `projection`.
    ///
    /// The functor is packed as an `int32`, so ids that do not fit, or that
    /// would collide with [`NO_PROJECTION`], are rejected.
    pub fn new(projection: ProjectionId, extents: Vec<i64>) -> LaunchResult<Self> {
        match i32::try_from(projection) {
            Ok(packed) if packed != NO_PROJECTION => Ok(Self {
                projection: packed,
                extents,
            }),
            _ => Err(UsageError::ProjectionIdOutOfRange(projection).into()),
        }
    }
}

/// Shape tuple with an optional chunk suffix.
///
/// Packs as an `int64` array, then an `int32` projection id (or
/// [`NO_PROJECTION`]), then the chunk extents as a second `int64` array when
/// present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeArg {
    /// Extent in every dimension.
    pub extents: Vec<i64>,
    /// Optional tiling.
    pub chunk: Option<ChunkShape>,
}

impl ShapeArg {
    /// Shape without a chunk suffix.
    pub fn new(extents: Vec<i64>) -> Self {
        Self {
            extents,
            chunk: None,
        }
    }

    /// Shape tiled by `chunk`; both must have the same rank.
    pub fn chunked(extents: Vec<i64>, chunk: ChunkShape) -> LaunchResult<Self> {
        if extents.len() != chunk.extents.len() {
            return Err(UsageError::ChunkRankMismatch {
                shape: extents.len(),
                chunk: chunk.extents.len(),
            }
            .into());
        }
        Ok(Self {
            extents,
            chunk: Some(chunk),
        })
    }

    /// Rank of the shape.
    pub fn ndim(&self) -> usize {
        self.extents.len()
    }

    /// Scalar arguments the shape expands into, in packing order.
    pub fn to_arguments(&self) -> Vec<ScalarArg> {
        let mut args = vec![ScalarArg::i64_array(&self.extents)];
        match &self.chunk {
            Some(chunk) => {
                args.push(ScalarArg::Value(Scalar::Int32(chunk.projection)));
                args.push(ScalarArg::i64_array(&chunk.extents));
            }
            None => args.push(ScalarArg::Value(Scalar::Int32(NO_PROJECTION))),
        }
        args
    }
}
