use super::cursor::ByteReader;
use super::error::{SerError, SerKind, SerResult};

macro_rules! le_codec {
    ($($ty:ty => $write:ident, $read:ident;)*) => {
        $(
            #[doc = concat!("Encodes a `", stringify!($ty), "` in little-endian order.")]
            pub fn $write(out: &mut Vec<u8>, value: $ty) {
                out.extend_from_slice(&value.to_le_bytes());
            }

            #[doc = concat!("Reads a little-endian `", stringify!($ty), "` from the cursor.")]
            pub fn $read(
                cursor: &mut ByteReader<'_>,
                kind: SerKind,
                field: &'static str,
            ) -> SerResult<$ty> {
                let bytes = cursor.take_array::<{ core::mem::size_of::<$ty>() }>(kind, field)?;
                Ok(<$ty>::from_le_bytes(bytes))
            }
        )*
    };
}

le_codec! {
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    i8 => write_i8, read_i8;
    i16 => write_i16, read_i16;
    i32 => write_i32, read_i32;
    i64 => write_i64, read_i64;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
}

/// Writes a boolean flag as a single byte (`0` or `1`).
pub fn write_bool(out: &mut Vec<u8>, value: bool) {
    write_u8(out, value as u8);
}

/// Reads a boolean flag encoded as `0` or `1`.
pub fn read_bool(
    cursor: &mut ByteReader<'_>,
    kind: SerKind,
    field: &'static str,
) -> SerResult<bool> {
    match read_u8(cursor, kind, field)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(SerError::invalid_value(kind, field)),
    }
}

/// Converts a `usize` into a `u32` length prefix.
pub fn ensure_u32(value: usize, kind: SerKind, field: &'static str) -> SerResult<u32> {
    u32::try_from(value).map_err(|_| SerError::invalid_length(kind, field))
}

/// Converts a `usize` into an `i32` dimension or count.
pub fn ensure_i32(value: usize, kind: SerKind, field: &'static str) -> SerResult<i32> {
    i32::try_from(value).map_err(|_| SerError::invalid_length(kind, field))
}
