//! Coalesced region requirements and the index table argument packing reads.

mod coalescer;
mod types;

pub use coalescer::Requirements;
pub use types::{CoalescedRequirement, RegionRequirement};
