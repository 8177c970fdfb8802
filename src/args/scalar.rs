use serde::{Deserialize, Serialize};

use crate::error::{LaunchError, LaunchResult};
use crate::ser::{self, SerKind, SerResult};

use super::dtype::DataType;

/// Fixed-width scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
}

impl Scalar {
    /// Data type of the value.
    pub const fn dtype(&self) -> DataType {
        match self {
            Scalar::Bool(_) => DataType::Bool,
            Scalar::Int8(_) => DataType::Int8,
            Scalar::Int16(_) => DataType::Int16,
            Scalar::Int32(_) => DataType::Int32,
            Scalar::Int64(_) => DataType::Int64,
            Scalar::UInt8(_) => DataType::UInt8,
            Scalar::UInt16(_) => DataType::UInt16,
            Scalar::UInt32(_) => DataType::UInt32,
            Scalar::UInt64(_) => DataType::UInt64,
            Scalar::Float32(_) => DataType::Float32,
            Scalar::Float64(_) => DataType::Float64,
        }
    }

    /// Appends the value at its declared width.
    pub fn write(&self, out: &mut Vec<u8>) {
        match *self {
            Scalar::Bool(value) => ser::write_bool(out, value),
            Scalar::Int8(value) => ser::write_i8(out, value),
            Scalar::Int16(value) => ser::write_i16(out, value),
            Scalar::Int32(value) => ser::write_i32(out, value),
            Scalar::Int64(value) => ser::write_i64(out, value),
            Scalar::UInt8(value) => ser::write_u8(out, value),
            Scalar::UInt16(value) => ser::write_u16(out, value),
            Scalar::UInt32(value) => ser::write_u32(out, value),
            Scalar::UInt64(value) => ser::write_u64(out, value),
            Scalar::Float32(value) => ser::write_f32(out, value),
            Scalar::Float64(value) => ser::write_f64(out, value),
        }
    }

    /// Fails unless the value can be packed as `dtype`.
    pub fn check(&self, dtype: DataType) -> LaunchResult<()> {
        if !dtype.has_scalar_encoder() {
            return Err(LaunchError::UnsupportedType(dtype));
        }
        if self.dtype() != dtype {
            return Err(LaunchError::ScalarTypeMismatch {
                expected: dtype,
                found: self.dtype(),
            });
        }
        Ok(())
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value)
                }
            }
        )*
    };
}

scalar_from! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
}

/// Scalar argument: a single value or a homogeneous, count-prefixed array.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarArg {
    /// One value at its own width.
    Value(Scalar),
    /// `u32` count followed by the elements.
    Array {
        /// Element type every value matches.
        element: DataType,
        /// Elements in order.
        values: Vec<Scalar>,
    },
}

impl ScalarArg {
    /// Scalar declared with an explicit data type.
    pub fn typed(value: Scalar, dtype: DataType) -> LaunchResult<Self> {
        value.check(dtype)?;
        Ok(ScalarArg::Value(value))
    }

    /// Homogeneous array of `element` values.
    pub fn array(element: DataType, values: Vec<Scalar>) -> LaunchResult<Self> {
        if !element.has_scalar_encoder() {
            return Err(LaunchError::UnsupportedType(element));
        }
        for value in &values {
            value.check(element)?;
        }
        Ok(ScalarArg::Array { element, values })
    }

    /// `int64` array, used for shapes and chunk shapes.
    pub fn i64_array(values: &[i64]) -> Self {
        ScalarArg::Array {
            element: DataType::Int64,
            values: values.iter().copied().map(Scalar::Int64).collect(),
        }
    }

    /// Appends the argument.
    pub fn pack(&self, out: &mut Vec<u8>) -> SerResult<()> {
        match self {
            ScalarArg::Value(value) => {
                value.write(out);
                Ok(())
            }
            ScalarArg::Array { values, .. } => {
                ser::write_vec(out, values, SerKind::Array, "values", |out, value| {
                    value.write(out);
                    Ok(())
                })
            }
        }
    }
}

impl From<Scalar> for ScalarArg {
    fn from(value: Scalar) -> Self {
        ScalarArg::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_pack_at_declared_width() {
        let mut out = Vec::new();
        for value in [Scalar::Bool(true), Scalar::Int16(-2), Scalar::Float32(1.5)] {
            ScalarArg::from(value).pack(&mut out).unwrap();
        }
        assert_eq!(out, vec![1, 0xfe, 0xff, 0x00, 0x00, 0xc0, 0x3f]);
    }

    #[test]
    fn arrays_carry_u32_count() {
        let arg =
            ScalarArg::array(DataType::UInt8, vec![Scalar::UInt8(9), Scalar::UInt8(8)]).unwrap();
        let mut out = Vec::new();
        arg.pack(&mut out).unwrap();
        assert_eq!(out, vec![2, 0, 0, 0, 9, 8]);
    }

    #[test]
    fn types_without_encoder_are_rejected() {
        assert_eq!(
            ScalarArg::typed(Scalar::Float32(1.0), DataType::Float16),
            Err(LaunchError::UnsupportedType(DataType::Float16))
        );
        assert_eq!(
            ScalarArg::array(DataType::Complex64, Vec::new()),
            Err(LaunchError::UnsupportedType(DataType::Complex64))
        );
    }

    #[test]
    fn mismatched_values_are_rejected() {
        assert_eq!(
            ScalarArg::array(DataType::Int32, vec![Scalar::Int32(1), Scalar::Int64(2)]),
            Err(LaunchError::ScalarTypeMismatch {
                expected: DataType::Int32,
                found: DataType::Int64,
            })
        );
    }
}
