use crate::ser::{self, ByteReader, SerError, SerKind, SerResult};
use crate::types::{DomainPoint, FieldId, ReductionOpId};

use super::dtype::DataType;
use super::region_field::{AffineTransform, ABSENT};
use super::scalar::Scalar;
use super::shape::{ChunkShape, ShapeArg, NO_PROJECTION};

/// Region-field reference as seen by the receiving task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFieldRef {
    /// Rank the task observes.
    pub dim: i32,
    /// Reduction operator, if any.
    pub redop: Option<ReductionOpId>,
    /// Index into the task's region requirements.
    pub requirement_index: u32,
    /// Field accessed.
    pub field_id: FieldId,
    /// Store-to-region transform, if any.
    pub transform: Option<AffineTransform>,
}

/// Store prologue packed ahead of every store access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHeader {
    /// Whether the store is backed by a future rather than a region field.
    pub is_future: bool,
    /// Rank of the store.
    pub ndim: i32,
    /// Element type.
    pub dtype: DataType,
    /// Shape of the store.
    pub shape: ShapeArg,
}

/// Store prologue plus the region-field reference that follows it for
/// region-backed stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreArg {
    /// Prologue.
    pub header: StoreHeader,
    /// Region-field reference; `None` for future-backed stores.
    pub region_field: Option<RegionFieldRef>,
}

/// Sequential reader over a packed argument buffer.
///
/// The reader has no framing to go on: callers read entries in the order the
/// launcher appended them, exactly as the receiving task does.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentReader<'a> {
    cursor: ByteReader<'a>,
}

impl<'a> ArgumentReader<'a> {
    /// Creates a reader over `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: ByteReader::new(bytes),
        }
    }

    /// Offset of the next entry.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    /// Reads a boolean.
    pub fn read_bool(&mut self) -> SerResult<bool> {
        ser::read_bool(&mut self.cursor, SerKind::Scalar, "bool")
    }

    /// Reads an `int32`.
    pub fn read_i32(&mut self) -> SerResult<i32> {
        ser::read_i32(&mut self.cursor, SerKind::Scalar, "int32")
    }

    /// Reads an `int64`.
    pub fn read_i64(&mut self) -> SerResult<i64> {
        ser::read_i64(&mut self.cursor, SerKind::Scalar, "int64")
    }

    /// Reads a scalar of type `dtype`.
    pub fn read_scalar(&mut self, dtype: DataType) -> SerResult<Scalar> {
        read_scalar(&mut self.cursor, dtype, SerKind::Scalar)
    }

    /// Reads a count-prefixed array of `element` values.
    pub fn read_array(&mut self, element: DataType) -> SerResult<Vec<Scalar>> {
        ser::read_vec(&mut self.cursor, SerKind::Array, "count", |cursor, _| {
            read_scalar(cursor, element, SerKind::Array)
        })
    }

    /// Reads a data type tag.
    pub fn read_dtype(&mut self) -> SerResult<DataType> {
        let code = ser::read_i32(&mut self.cursor, SerKind::Dtype, "code")?;
        DataType::from_code(code).ok_or_else(|| SerError::invalid_value(SerKind::Dtype, "code"))
    }

    /// Reads a shape and its optional chunk suffix.
    pub fn read_shape(&mut self) -> SerResult<ShapeArg> {
        let extents = ser::read_i64_vec(&mut self.cursor, SerKind::Shape, "extents")?;
        let projection = ser::read_i32(&mut self.cursor, SerKind::Shape, "projection")?;
        if projection == NO_PROJECTION {
            return Ok(ShapeArg::new(extents));
        }
        let chunk = ser::read_i64_vec(&mut self.cursor, SerKind::Shape, "chunk")?;
        if chunk.len() != extents.len() {
            return Err(SerError::invalid_length(SerKind::Shape, "chunk"));
        }
        Ok(ShapeArg {
            extents,
            chunk: Some(ChunkShape {
                projection,
                extents: chunk,
            }),
        })
    }

    /// Reads a typed point of known rank.
    pub fn read_point(&mut self, dim: usize) -> SerResult<DomainPoint> {
        let mut coords = Vec::with_capacity(dim.min(self.remaining() / 8));
        for _ in 0..dim {
            coords.push(ser::read_i64(&mut self.cursor, SerKind::Point, "coord")?);
        }
        Ok(DomainPoint(coords))
    }

    /// Reads a point preceded by its rank.
    pub fn read_untyped_point(&mut self) -> SerResult<DomainPoint> {
        let dim = ser::read_u32(&mut self.cursor, SerKind::Point, "dim")? as usize;
        self.read_point(dim)
    }

    /// Reads a region-field reference.
    pub fn read_region_field(&mut self) -> SerResult<RegionFieldRef> {
        let kind = SerKind::RegionField;
        let dim = ser::read_i32(&mut self.cursor, kind, "dim")?;
        let redop = match ser::read_i32(&mut self.cursor, kind, "redop")? {
            ABSENT => None,
            redop => Some(redop),
        };
        let requirement_index = ser::read_u32(&mut self.cursor, kind, "requirement_index")?;
        let field_id = ser::read_u32(&mut self.cursor, kind, "field_id")?;
        let transform = match ser::read_i32(&mut self.cursor, SerKind::Transform, "m")? {
            ABSENT => None,
            m => Some(self.read_transform(m)?),
        };
        Ok(RegionFieldRef {
            dim,
            redop,
            requirement_index,
            field_id,
            transform,
        })
    }

    fn read_transform(&mut self, m: i32) -> SerResult<AffineTransform> {
        let kind = SerKind::Transform;
        let m = usize::try_from(m).map_err(|_| SerError::invalid_value(kind, "m"))?;
        let n = ser::read_i32(&mut self.cursor, kind, "n")?;
        let n = usize::try_from(n).map_err(|_| SerError::invalid_value(kind, "n"))?;
        let entries = m
            .checked_mul(n)
            .filter(|entries| entries.saturating_add(m).saturating_mul(8) <= self.remaining())
            .ok_or_else(|| SerError::unexpected_end(kind, "matrix"))?;
        let mut matrix = Vec::with_capacity(entries);
        for _ in 0..entries {
            matrix.push(ser::read_i64(&mut self.cursor, kind, "matrix")?);
        }
        let mut offset = Vec::with_capacity(m);
        for _ in 0..m {
            offset.push(ser::read_i64(&mut self.cursor, kind, "offset")?);
        }
        AffineTransform::new(m, n, matrix, offset)
            .map_err(|_| SerError::invalid_length(kind, "matrix"))
    }

    /// Reads a store prologue.
    pub fn read_store_header(&mut self) -> SerResult<StoreHeader> {
        let is_future = ser::read_bool(&mut self.cursor, SerKind::Store, "is_future")?;
        let ndim = ser::read_i32(&mut self.cursor, SerKind::Store, "ndim")?;
        let dtype = self.read_dtype()?;
        let shape = self.read_shape()?;
        if usize::try_from(ndim).ok() != Some(shape.ndim()) {
            return Err(SerError::invalid_value(SerKind::Store, "ndim"));
        }
        Ok(StoreHeader {
            is_future,
            ndim,
            dtype,
            shape,
        })
    }

    /// Reads a store prologue and, for region-backed stores, its region-field reference.
    pub fn read_store(&mut self) -> SerResult<StoreArg> {
        let header = self.read_store_header()?;
        let region_field = if header.is_future {
            None
        } else {
            Some(self.read_region_field()?)
        };
        Ok(StoreArg {
            header,
            region_field,
        })
    }

    /// Fails when bytes remain unread.
    pub fn finish(self) -> SerResult<()> {
        ser::ensure_consumed(&self.cursor, SerKind::Buffer)
    }
}

fn read_scalar(cursor: &mut ByteReader<'_>, dtype: DataType, kind: SerKind) -> SerResult<Scalar> {
    let field = "value";
    Ok(match dtype {
        DataType::Bool => Scalar::Bool(ser::read_bool(cursor, kind, field)?),
        DataType::Int8 => Scalar::Int8(ser::read_i8(cursor, kind, field)?),
        DataType::Int16 => Scalar::Int16(ser::read_i16(cursor, kind, field)?),
        DataType::Int32 => Scalar::Int32(ser::read_i32(cursor, kind, field)?),
        DataType::Int64 => Scalar::Int64(ser::read_i64(cursor, kind, field)?),
        DataType::UInt8 => Scalar::UInt8(ser::read_u8(cursor, kind, field)?),
        DataType::UInt16 => Scalar::UInt16(ser::read_u16(cursor, kind, field)?),
        DataType::UInt32 => Scalar::UInt32(ser::read_u32(cursor, kind, field)?),
        DataType::UInt64 => Scalar::UInt64(ser::read_u64(cursor, kind, field)?),
        DataType::Float32 => Scalar::Float32(ser::read_f32(cursor, kind, field)?),
        DataType::Float64 => Scalar::Float64(ser::read_f64(cursor, kind, field)?),
        DataType::Float16 | DataType::Complex64 | DataType::Complex128 => {
            return Err(SerError::invalid_value(kind, "dtype"))
        }
    })
}
