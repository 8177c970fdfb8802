//! Task assembly.
//!
//! A [`TaskLauncher`] collects the arguments, store accesses, futures and
//! launch settings of one task and turns them into a task object of some
//! [`Runtime`](crate::runtime::Runtime):
//!
//! 1. declarations append to the argument list and the access recorder;
//! 2. [`TaskLauncher::coalesce`] fixes the region requirements;
//! 3. building packs the arguments, moves the buffer into a new task object
//!    and materializes every requirement on it.

mod assembler;
mod batch;
mod store;

pub use assembler::TaskLauncher;
pub use batch::build_all;
pub use store::{Store, StoreStorage};
