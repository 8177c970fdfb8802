#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::LaunchResult;
use crate::runtime::Runtime;
use crate::types::Domain;

use super::assembler::TaskLauncher;

/// Builds one index task per `(launcher, domain)` pair.
///
/// Launchers share no state, so with the `parallel` feature they are built on
/// the rayon pool. Results keep the input order either way.
#[cfg(feature = "parallel")]
pub fn build_all<R>(
    runtime: &R,
    launches: Vec<(TaskLauncher, Domain)>,
) -> Vec<LaunchResult<R::IndexTask>>
where
    R: Runtime + Sync,
    R::IndexTask: Send,
{
    launches
        .into_par_iter()
        .map(|(mut launcher, domain)| launcher.build_task(runtime, domain))
        .collect()
}

/// Builds one index task per `(launcher, domain)` pair.
#[cfg(not(feature = "parallel"))]
pub fn build_all<R>(
    runtime: &R,
    launches: Vec<(TaskLauncher, Domain)>,
) -> Vec<LaunchResult<R::IndexTask>>
where
    R: Runtime + Sync,
    R::IndexTask: Send,
{
    launches
        .into_iter()
        .map(|(mut launcher, domain)| launcher.build_task(runtime, domain))
        .collect()
}
