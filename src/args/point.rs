use crate::ser::{self, SerKind, SerResult};
use crate::types::DomainPoint;

/// Point argument. Untyped points are prefixed with their dimensionality so the
/// receiver can decode them without knowing it in advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointArg {
    /// Coordinates to pack.
    pub point: DomainPoint,
    /// Whether a `u32` dimension prefix precedes the coordinates.
    pub untyped: bool,
}

impl PointArg {
    /// Creates a point argument.
    pub fn new(point: DomainPoint, untyped: bool) -> Self {
        Self { point, untyped }
    }

    /// Appends the argument.
    pub fn pack(&self, out: &mut Vec<u8>) -> SerResult<()> {
        if self.untyped {
            let dim = ser::ensure_u32(self.point.dim(), SerKind::Point, "dim")?;
            ser::write_u32(out, dim);
        }
        for coord in self.point.coords() {
            ser::write_i64(out, *coord);
        }
        Ok(())
    }
}
