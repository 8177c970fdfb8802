use crate::args::{AffineTransform, DataType};
use crate::types::{FieldId, FutureHandle, LogicalRegion};

/// Backing storage of a [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStorage {
    /// Scalar value produced by an earlier launch.
    Future(FutureHandle),
    /// One field of a region.
    RegionField {
        /// Region holding the data.
        region: LogicalRegion,
        /// Field holding the data.
        field_id: FieldId,
    },
}

/// Typed, shaped view of a future or a region field passed to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    /// Element type.
    pub dtype: DataType,
    /// Extent in every dimension.
    pub shape: Vec<i64>,
    /// Where the data lives.
    pub storage: StoreStorage,
    /// Mapping from store coordinates to region coordinates, if not the identity.
    pub transform: Option<AffineTransform>,
}

impl Store {
    /// Store backed by a future.
    pub fn future(dtype: DataType, shape: Vec<i64>, future: FutureHandle) -> Self {
        Self {
            dtype,
            shape,
            storage: StoreStorage::Future(future),
            transform: None,
        }
    }

    /// Store backed by `field_id` of `region`.
    pub fn region_field(
        dtype: DataType,
        shape: Vec<i64>,
        region: LogicalRegion,
        field_id: FieldId,
    ) -> Self {
        Self {
            dtype,
            shape,
            storage: StoreStorage::RegionField { region, field_id },
            transform: None,
        }
    }

    /// Same store seen through `transform`.
    pub fn with_transform(mut self, transform: AffineTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Rank of the store.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Returns `true` for future-backed stores.
    pub fn is_future(&self) -> bool {
        matches!(self.storage, StoreStorage::Future(_))
    }
}
