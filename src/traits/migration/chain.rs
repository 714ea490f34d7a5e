//! The version chain and its static table of upgrade steps.

use std::fmt;
use std::sync::Arc;

use super::context::UpgradeContext;
use super::traits::{UpgradeFrom, VersionedModel};
use crate::errors::{MetadataError, MetadataResult};
use crate::metadata::{
    MetadataPayload, MetadataV9, MetadataV10, MetadataV11, MetadataV12, MetadataV13, MetadataV14,
    MetadataV15,
};

/// Newest schema version this crate understands.
pub const LATEST_VERSION: u32 = 15;

/// Oldest schema version this crate accepts.
pub const EARLIEST_VERSION: u32 = 9;

/// All supported versions, newest first.
pub const KNOWN_VERSIONS: [u32; 7] = [15, 14, 13, 12, 11, 10, 9];

/// Version the calls-only projection is pinned to.
///
/// The reduction is defined over the V14 pallet shape, the oldest layout
/// with a portable registry. Revisit when the chain grows past V15.
pub const CALLS_ONLY_VERSION: u32 = 14;

type StepFn = fn(&MetadataPayload, &UpgradeContext<'_>) -> MetadataResult<MetadataPayload>;

/// One link in the chain: lifts a payload from `from` to `to = from + 1`.
#[derive(Clone, Copy)]
pub struct UpgradeStep {
    pub from: u32,
    pub to: u32,
    apply: StepFn,
}

impl UpgradeStep {
    pub const fn of<Old, New>() -> Self
    where
        Old: VersionedModel,
        New: VersionedModel + UpgradeFrom<Old>,
    {
        Self {
            from: Old::VERSION,
            to: New::VERSION,
            apply: apply_step::<Old, New>,
        }
    }

    /// Run the step. Fails with `SchemaMismatch` if `payload` is not at `from`.
    pub fn apply(
        &self,
        payload: &MetadataPayload,
        ctx: &UpgradeContext<'_>,
    ) -> MetadataResult<MetadataPayload> {
        (self.apply)(payload, ctx)
    }
}

impl fmt::Debug for UpgradeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpgradeStep")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

fn apply_step<Old, New>(
    payload: &MetadataPayload,
    ctx: &UpgradeContext<'_>,
) -> MetadataResult<MetadataPayload>
where
    Old: VersionedModel,
    New: VersionedModel + UpgradeFrom<Old>,
{
    let old = Old::from_payload(payload).ok_or(MetadataError::SchemaMismatch {
        expected: Old::VERSION,
        found: payload.version(),
    })?;
    Ok(New::into_payload(Arc::new(New::upgrade_from(&old, ctx))))
}

/// Upgrade steps in ascending order; entry `i` produces version
/// `EARLIEST_VERSION + 1 + i`.
pub static UPGRADE_STEPS: [UpgradeStep; 6] = [
    UpgradeStep::of::<MetadataV9, MetadataV10>(),
    UpgradeStep::of::<MetadataV10, MetadataV11>(),
    UpgradeStep::of::<MetadataV11, MetadataV12>(),
    UpgradeStep::of::<MetadataV12, MetadataV13>(),
    UpgradeStep::of::<MetadataV13, MetadataV14>(),
    UpgradeStep::of::<MetadataV14, MetadataV15>(),
];

pub fn is_known(version: u32) -> bool {
    (EARLIEST_VERSION..=LATEST_VERSION).contains(&version)
}

/// The step whose output is `version`.
pub fn step_to(version: u32) -> MetadataResult<&'static UpgradeStep> {
    if version <= EARLIEST_VERSION || version > LATEST_VERSION {
        return Err(MetadataError::UnknownVersion(version));
    }
    let step = &UPGRADE_STEPS[(version - EARLIEST_VERSION - 1) as usize];
    if step.to != version {
        return Err(MetadataError::SchemaMismatch {
            expected: version,
            found: step.to,
        });
    }
    Ok(step)
}
