//! Prelude module for convenient imports.
//!
//! ```rust
//! use chain_metadata::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - [`MetadataVersioned`]: a record with lazy access to every newer layout
//! - [`VersionedRecord`] and [`MetadataPayload`]: the decoded container
//! - `MetadataV9` through `MetadataV15` and [`MetadataLatest`]
//! - [`TypeRegistry`] and [`TypeLookup`]: type resolution
//! - [`MetadataConfig`]: calls-only pin and decode options
//! - [`MetadataError`] / [`MetadataResult`]
//! - [`UpgradeFrom`], [`VersionedModel`] and the version-chain constants
//!
//! # Common Patterns
//!
//! ## Reading whatever the node sent, as the newest layout
//!
//! ```rust
//! use std::sync::Arc;
//! use chain_metadata::prelude::*;
//!
//! let registry = Arc::new(TypeRegistry::new());
//! let hex = VersionedRecord::new(MetadataV10::default()).to_hex()?;
//!
//! let metadata = MetadataVersioned::from_hex(registry, &hex)?;
//! let latest: Arc<MetadataLatest> = metadata.as_latest()?;
//! assert_eq!(latest.extrinsic.version, 4);
//! # Ok::<(), MetadataError>(())
//! ```
//!
//! ## Pinning the calls-only projection
//!
//! ```rust
//! use std::sync::Arc;
//! use chain_metadata::prelude::*;
//!
//! let config = MetadataConfig::builder().calls_only_version(15).build();
//! let metadata = MetadataVersioned::with_config(
//!     Arc::new(TypeRegistry::new()),
//!     VersionedRecord::new(MetadataV13::default()),
//!     config,
//! )?;
//! assert_eq!(metadata.as_calls_only()?.version(), 15);
//! # Ok::<(), MetadataError>(())
//! ```

pub use crate::config::MetadataConfig;
pub use crate::errors::{MetadataError, MetadataResult};
pub use crate::metadata::{
    MAGIC_NUMBER, MetadataLatest, MetadataPayload, MetadataV9, MetadataV10, MetadataV11,
    MetadataV12, MetadataV13, MetadataV14, MetadataV15, MetadataVersion, VersionedRecord,
};
pub use crate::registry::TypeRegistry;
pub use crate::traits::lookup::{TypeDescriptor, TypeLookup};
pub use crate::traits::migration::{
    CALLS_ONLY_VERSION, EARLIEST_VERSION, KNOWN_VERSIONS, LATEST_VERSION, UpgradeContext,
    UpgradeEvent, UpgradeFrom, VersionedModel,
};
pub use crate::versioned::MetadataVersioned;
