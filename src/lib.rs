//! Task-launch assembly for index-space task runtimes.
//!
//! A launch is described by the data it accesses and the arguments it is
//! passed. This crate turns those declarations into
//!
//! * the minimal set of region requirements that covers every access without
//!   conflicts, with stable requirement indices, and
//! * one little-endian, padding-free argument buffer whose region-field
//!   references point at those indices.
//!
//! The execution engine itself stays behind the [`runtime::Runtime`] trait;
//! [`runtime::recording::RecordingRuntime`] is an in-process stand-in that
//! records what a launch would do.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`access`] | Permissions, projection descriptors and per-field access sets. |
//! | [`requirements`] | Coalescing of recorded accesses into indexed requirements. |
//! | [`args`] | Argument types, the encoder and the matching decoder. |
//! | [`launcher`] | [`TaskLauncher`] and stores. |
//! | [`runtime`] | Engine-facing traits and the recording runtime. |
//! | [`config`] | Library id ranges and launch options. |
//! | [`ser`] | Little-endian primitives shared by the encoder and decoder. |

pub mod access;
pub mod args;
pub mod config;
pub mod error;
pub mod launcher;
pub mod requirements;
pub mod runtime;
pub mod ser;
pub mod types;

pub use access::{Permission, Projection, ProjectionInfo};
pub use args::{ArgBuffer, ArgumentReader, DataType, Scalar};
pub use config::{LauncherOptions, LibraryConfig};
pub use error::{ConflictReason, LaunchError, LaunchResult, UsageError};
pub use launcher::{Store, TaskLauncher};
pub use requirements::{RegionRequirement, Requirements};
pub use runtime::Runtime;
