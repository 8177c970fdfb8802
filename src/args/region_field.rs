use crate::error::{LaunchResult, UsageError};
use crate::requirements::{RegionRequirement, Requirements};
use crate::ser::{self, SerKind};
use crate::types::{FieldId, ReductionOpId};

/// Sentinel packed when a region-field argument has no reduction operator or no
/// transform.
pub const ABSENT: i32 = -1;

/// Affine map from an `n`-dimensional store point to an `m`-dimensional region
/// point: `region = matrix * store + offset`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AffineTransform {
    m: usize,
    n: usize,
    matrix: Vec<i64>,
    offset: Vec<i64>,
}

impl AffineTransform {
    /// Creates a transform from a row-major `m x n` matrix and `m` offsets.
    pub fn new(m: usize, n: usize, matrix: Vec<i64>, offset: Vec<i64>) -> LaunchResult<Self> {
        if m.checked_mul(n) != Some(matrix.len()) || offset.len() != m {
            return Err(UsageError::TransformShape { m, n }.into());
        }
        Ok(Self {
            m,
            n,
            matrix,
            offset,
        })
    }

    /// Region rank.
    pub fn m(&self) -> usize {
        self.m
    }

    /// Store rank, which is the rank the task observes.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Row-major matrix entries.
    pub fn matrix(&self) -> &[i64] {
        &self.matrix
    }

    /// Offsets, one per region dimension.
    pub fn offset(&self) -> &[i64] {
        &self.offset
    }
}

/// Deferred reference to one field of a region.
///
/// The argument stores the requirement it was declared under; the index of the
/// requirement that finally covers the field is only known once the launcher's
/// accesses are coalesced, so packing takes the [`Requirements`] table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFieldArg {
    /// Rank of the region.
    pub dim: u32,
    /// Reduction operator of the access, if any.
    pub redop: Option<ReductionOpId>,
    /// Requirement the access was declared under.
    pub key: RegionRequirement,
    /// Field accessed.
    pub field_id: FieldId,
    /// Store-to-region transform, if any.
    pub transform: Option<AffineTransform>,
}

impl RegionFieldArg {
    /// Rank the receiving task observes: the transform's input rank when there
    /// is one, otherwise the region's.
    pub fn packed_dim(&self) -> usize {
        match &self.transform {
            Some(transform) => transform.n(),
            None => self.dim as usize,
        }
    }

    /// Appends the argument, resolving its requirement index.
    pub fn pack(&self, out: &mut Vec<u8>, requirements: &Requirements) -> LaunchResult<()> {
        let index = requirements.resolve(&self.key, self.field_id)?;
        ser::write_i32(
            out,
            ser::ensure_i32(self.packed_dim(), SerKind::RegionField, "dim")?,
        );
        ser::write_i32(out, self.redop.unwrap_or(ABSENT));
        ser::write_u32(out, index);
        ser::write_u32(out, self.field_id);
        match &self.transform {
            Some(transform) => {
                ser::write_i32(out, ser::ensure_i32(transform.m, SerKind::Transform, "m")?);
                ser::write_i32(out, ser::ensure_i32(transform.n, SerKind::Transform, "n")?);
                for entry in &transform.matrix {
                    ser::write_i64(out, *entry);
                }
                for offset in &transform.offset {
                    ser::write_i64(out, *offset);
                }
            }
            None => ser::write_i32(out, ABSENT),
        }
        Ok(())
    }
}
