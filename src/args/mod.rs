//! Task arguments and their wire format.
//!
//! Arguments are appended to an [`ArgumentEncoder`] while a launch is declared
//! and packed in insertion order once its region requirements are final.
//!
//! | Entry | Layout |
//! |-------|--------|
//! | scalar | value at its declared width |
//! | array | `u32` count, elements |
//! | dtype | `i32` type code |
//! | shape | `int64` array, `i32` projection or `-1`, optional `int64` chunk array |
//! | point | optional `u32` rank, `i64` coordinates |
//! | region field | `i32` rank, `i32` redop or `-1`, `u32` requirement index, `u32` field id, transform block or `i32 -1` |
//!
//! The transform block is `i32 m`, `i32 n`, `m * n` row-major `i64` entries and
//! `m` `i64` offsets. [`ArgumentReader`] parses the same layout.

mod decode;
mod dtype;
mod encoder;
mod point;
mod region_field;
mod scalar;
mod shape;

pub use decode::{ArgumentReader, RegionFieldRef, StoreArg, StoreHeader};
pub use dtype::DataType;
pub use encoder::{ArgBuffer, Argument, ArgumentEncoder};
pub use point::PointArg;
pub use region_field::{AffineTransform, RegionFieldArg, ABSENT};
pub use scalar::{Scalar, ScalarArg};
pub use shape::{ChunkShape, ShapeArg, NO_PROJECTION};
