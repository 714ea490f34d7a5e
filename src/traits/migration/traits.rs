//! Core migration traits for metadata version conversion.

use std::sync::Arc;

use super::chain::LATEST_VERSION;
use super::context::UpgradeContext;
use crate::metadata::MetadataPayload;

/// Trait for upgrading from the immediately preceding metadata layout.
///
/// Implement this for each adjacent pair `V -> V+1`. The chain in
/// [`UPGRADE_STEPS`](super::UPGRADE_STEPS) strings these together so a record
/// can be lifted any number of versions, one step at a time.
///
/// Upgrades borrow the older layout and build a new value; the source is
/// never modified. They must be pure: the same input and context always
/// produce the same output.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chain_metadata::metadata::{MetadataV9, MetadataV10};
/// use chain_metadata::registry::TypeRegistry;
/// use chain_metadata::traits::migration::{UpgradeContext, UpgradeFrom};
///
/// let registry = Arc::new(TypeRegistry::new());
/// let ctx = UpgradeContext::new(9, &registry);
/// let v10 = MetadataV10::upgrade_from(&MetadataV9::default(), &ctx);
/// assert!(v10.modules.is_empty());
/// ```
pub trait UpgradeFrom<OldVersion>: Sized {
    /// Build this layout from the previous one.
    fn upgrade_from(old: &OldVersion, ctx: &UpgradeContext<'_>) -> Self;
}

/// Trait for the layouts that make up the version chain.
///
/// Implemented for every `MetadataVN` type; ties each layout to its version
/// number and to its variant of [`MetadataPayload`].
pub trait VersionedModel: Sized + Send + Sync + 'static {
    /// The schema version of this layout.
    const VERSION: u32;

    /// Whether this is the newest layout in the chain.
    const IS_LATEST: bool = Self::VERSION == LATEST_VERSION;

    /// Borrow the layout out of a payload when the variant matches.
    fn from_payload(payload: &MetadataPayload) -> Option<Arc<Self>>;

    /// Wrap the layout in its payload variant.
    fn into_payload(model: Arc<Self>) -> MetadataPayload;
}

/// A single executed upgrade step, recorded for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpgradeEvent {
    /// Input layout version.
    pub from: u32,
    /// Output layout version.
    pub to: u32,
    /// Intrinsic version of the record being upgraded.
    pub original_version: u32,
}
