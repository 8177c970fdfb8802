//! Access declarations and their per-field bookkeeping.
//!
//! An [`AccessRecorder`] owns one [`FieldSet`] per region, which owns one
//! [`ProjectionSet`] per field. Write collisions are rejected as soon as they
//! are declared; mixed permissions are only resolved when the sets are
//! coalesced into requirement keys.

mod field_set;
mod permission;
mod projection;
mod projection_set;
mod recorder;

pub use field_set::FieldSet;
pub use permission::Permission;
pub use projection::{Projection, ProjectionInfo};
pub use projection_set::{AccessKey, ProjectionSet};
pub use recorder::AccessRecorder;
