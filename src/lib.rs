//! # Chain Metadata
//!
//! Self-describing, versioned chain metadata records exposed uniformly to
//! callers, whatever schema version they were produced in.
//!
//! ## Features
//!
//! - **Forward-only upgrades**: records at V9..V15 are lifted one version at
//!   a time to any newer layout; downgrades are rejected
//! - **Memoized**: each upgraded layout is built once per record and shared
//! - **Typed layouts**: one Rust type per schema version, one
//!   `UpgradeFrom` implementation per step
//! - **Derived views**: a calls-only projection and unique type extraction
//! - **Binary and JSON**: bincode container with a magic-number header,
//!   serde JSON projection
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use chain_metadata::prelude::*;
//!
//! let registry = Arc::new(TypeRegistry::new());
//! let bytes = VersionedRecord::new(MetadataV13::default()).encode()?;
//!
//! let metadata = MetadataVersioned::from_bytes(registry, &bytes)?;
//! assert_eq!(metadata.version(), 13);
//!
//! let latest = metadata.as_latest()?;
//! assert_eq!(latest.pallets.len(), 0);
//! assert_eq!(metadata.upgrade_trace().len(), 2);
//! # Ok::<(), MetadataError>(())
//! ```

pub mod config;
pub mod errors;
pub mod metadata;
pub mod prelude;
pub mod projection;
pub mod registry;
pub mod traits;
pub mod versioned;
