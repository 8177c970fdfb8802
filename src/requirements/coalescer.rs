use std::collections::HashMap;

use tracing::debug;

use crate::access::{AccessRecorder, Permission};
use crate::error::{LaunchError, LaunchResult, UsageError};
use crate::ser::{ensure_u32, SerKind};
use crate::types::FieldId;

use super::types::{CoalescedRequirement, RegionRequirement};

/// Final, indexed requirement list of one launch.
///
/// Produced once from an [`AccessRecorder`]; region-field arguments resolve
/// their requirement index against it while the argument buffer is packed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements {
    entries: Vec<CoalescedRequirement>,
    indices: HashMap<(RegionRequirement, FieldId), u32>,
}

impl Requirements {
    /// Coalesces every recorded access into indexed requirements.
    ///
    /// Regions are visited in first-touch order and, within a region, keys in
    /// grouping order; each key receives the next index. Requirements whose
    /// reduction operator disagrees with their permission are rejected here so
    /// that materialization cannot fail halfway through a task.
    pub fn coalesce(recorder: &AccessRecorder) -> LaunchResult<Self> {
        let mut requirements = Requirements::default();
        for field_set in recorder.field_sets() {
            let region = field_set.region();
            for (key, fields) in field_set.coalesce()? {
                let requirement = RegionRequirement::new(region, key.permission, key.projection);
                check_reduction(&requirement)?;
                let index = ensure_u32(
                    requirements.entries.len(),
                    SerKind::RegionField,
                    "requirement_index",
                )?;
                for field_id in &fields {
                    requirements
                        .indices
                        .insert((requirement, *field_id), index);
                }
                requirements.entries.push(CoalescedRequirement {
                    index,
                    requirement,
                    fields,
                });
            }
        }
        debug!(
            regions = recorder.len(),
            requirements = requirements.entries.len(),
            "coalesced region requirements"
        );
        Ok(requirements)
    }

    /// Number of requirements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the launch has no region requirements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Requirement at `index`.
    pub fn get(&self, index: u32) -> Option<&CoalescedRequirement> {
        self.entries.get(index as usize)
    }

    /// Requirements in index order.
    pub fn iter(&self) -> impl Iterator<Item = &CoalescedRequirement> {
        self.entries.iter()
    }

    /// Index of the requirement covering `field_id` under the declared `key`.
    ///
    /// When the field's accesses were promoted, the declared permission no
    /// longer matches; the lookup is retried once as `ReadWrite`.
    pub fn resolve(&self, key: &RegionRequirement, field_id: FieldId) -> LaunchResult<u32> {
        if let Some(index) = self.indices.get(&(*key, field_id)) {
            return Ok(*index);
        }
        let promoted = key.with_permission(Permission::ReadWrite);
        self.indices
            .get(&(promoted, field_id))
            .copied()
            .ok_or(LaunchError::InternalConsistency {
                region: key.region,
                permission: key.permission,
                field_id,
            })
    }
}

impl<'a> IntoIterator for &'a Requirements {
    type Item = &'a CoalescedRequirement;
    type IntoIter = core::slice::Iter<'a, CoalescedRequirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn check_reduction(requirement: &RegionRequirement) -> LaunchResult<()> {
    let redop = requirement.projection.projection.redop();
    match (requirement.permission, redop) {
        (Permission::Reduction, None) => Err(UsageError::MissingReductionOp {
            region: requirement.region,
        }
        .into()),
        (Permission::Reduction, Some(_)) | (_, None) => Ok(()),
        (permission, Some(_)) => Err(UsageError::UnexpectedReductionOp {
            projection: requirement.projection,
            permission,
        }
        .into()),
    }
}
