//! Canonical serialization helpers for packed task arguments.
//!
//! Every value is written little-endian at its declared width with no padding
//! and no alignment. Counts are `u32` prefixes; sentinels such as "no
//! reduction operator" or "no transform" are `i32` values of `-1`. The readers
//! mirror the writers one-to-one and attach a [`SerKind`] plus a field name to
//! every failure so that a truncated buffer can be traced back to the argument
//! that produced it.

mod collections;
mod cursor;
mod error;
mod ints;

pub use collections::{read_i64_vec, read_vec, write_i64_vec, write_vec};
pub use cursor::{ensure_consumed, ByteReader};
pub use error::{SerError, SerKind, SerResult};
pub use ints::{
    ensure_i32, ensure_u32, read_bool, read_f32, read_f64, read_i16, read_i32, read_i64, read_i8,
    read_u16, read_u32, read_u64, read_u8, write_bool, write_f32, write_f64, write_i16, write_i32,
    write_i64, write_i8, write_u16, write_u32, write_u64, write_u8,
};
