use core::fmt;
use serde::{Deserialize, Serialize};

/// Element type tag shared with the receiving side.
///
/// Packed as its `i32` code. Only the fixed-width boolean, integer and IEEE
/// float types have a scalar encoder; the remaining tags may still be packed as
/// dtype arguments or used as store types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum DataType {
    /// 1-byte boolean.
    Bool = 1,
    /// Signed 8-bit integer.
    Int8 = 2,
    /// Signed 16-bit integer.
    Int16 = 3,
    /// Signed 32-bit integer.
    Int32 = 4,
    /// Signed 64-bit integer.
    Int64 = 5,
    /// Unsigned 8-bit integer.
    UInt8 = 6,
    /// Unsigned 16-bit integer.
    UInt16 = 7,
    /// Unsigned 32-bit integer.
    UInt32 = 8,
    /// Unsigned 64-bit integer.
    UInt64 = 9,
    /// IEEE half precision float.
    Float16 = 10,
    /// IEEE single precision float.
    Float32 = 11,
    /// IEEE double precision float.
    Float64 = 12,
    /// Pair of single precision floats.
    Complex64 = 13,
    /// Pair of double precision floats.
    Complex128 = 14,
}

impl DataType {
    /// Returns the wire code.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Parses a wire code.
    pub const fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            1 => DataType::Bool,
            2 => DataType::Int8,
            3 => DataType::Int16,
            4 => DataType::Int32,
            5 => DataType::Int64,
            6 => DataType::UInt8,
            7 => DataType::UInt16,
            8 => DataType::UInt32,
            9 => DataType::UInt64,
            10 => DataType::Float16,
            11 => DataType::Float32,
            12 => DataType::Float64,
            13 => DataType::Complex64,
            14 => DataType::Complex128,
            _ => return None,
        })
    }

    /// Returns `true` when scalars of this type can be packed.
    pub const fn has_scalar_encoder(self) -> bool {
        !matches!(
            self,
            DataType::Float16 | DataType::Complex64 | DataType::Complex128
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Bool => "bool",
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::UInt8 => "uint8",
            DataType::UInt16 => "uint16",
            DataType::UInt32 => "uint32",
            DataType::UInt64 => "uint64",
            DataType::Float16 => "float16",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::Complex64 => "complex64",
            DataType::Complex128 => "complex128",
        };
        f.write_str(name)
    }
}
