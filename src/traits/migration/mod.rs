//! Migration traits for versioned metadata evolution.
//!
//! Metadata layouts are tagged with schema versions 9 through
//! [`LATEST_VERSION`]. Each version implements `UpgradeFrom<PreviousVersion>`
//! to define the forward path, and [`UPGRADE_STEPS`] strings those
//! implementations into a chain indexed by target version. There is no
//! downgrade path.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chain_metadata::metadata::{MetadataPayload, MetadataV11};
//! use chain_metadata::registry::TypeRegistry;
//! use chain_metadata::traits::migration::{step_to, UpgradeContext};
//!
//! let registry = Arc::new(TypeRegistry::new());
//! let ctx = UpgradeContext::new(11, &registry);
//! let v11 = MetadataPayload::from(MetadataV11::default());
//!
//! let v12 = step_to(12)?.apply(&v11, &ctx)?;
//! assert_eq!(v12.version(), 12);
//! # Ok::<(), chain_metadata::errors::MetadataError>(())
//! ```

mod chain;
mod context;
mod traits;

pub use chain::*;
pub use context::*;
pub use traits::*;
