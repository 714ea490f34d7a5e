//! [`MetadataVersioned`]: a record plus lazy, memoized access to every newer
//! layout.
//!
//! A record is decoded at whatever version its producer emitted. Callers ask
//! for the shape they understand and the record is lifted one step at a time
//! through the version chain. Results are cached per record, so repeated
//! requests hand back the same `Arc`.
//!
//! ```
//! use std::sync::Arc;
//! use chain_metadata::prelude::*;
//!
//! let registry = Arc::new(TypeRegistry::new());
//! let metadata = MetadataVersioned::new(registry, VersionedRecord::new(MetadataV12::default()));
//!
//! assert_eq!(metadata.version(), 12);
//! let latest = metadata.as_latest()?;
//! assert!(latest.pallets.is_empty());
//! assert!(Arc::ptr_eq(&latest, &metadata.as_latest()?));
//!
//! // No way back.
//! assert!(matches!(
//!     metadata.as_version(11),
//!     Err(MetadataError::Downgrade { from: 12, to: 11 })
//! ));
//! # Ok::<(), MetadataError>(())
//! ```

pub mod cache;

use std::collections::BTreeSet;
use std::sync::Arc;

use log::debug;

pub use cache::{CacheKey, UpgradeCache};

use crate::config::MetadataConfig;
use crate::errors::{MetadataError, MetadataResult};
use crate::metadata::{
    MetadataLatest, MetadataPayload, MetadataV9, MetadataV10, MetadataV11, MetadataV12,
    MetadataV13, MetadataV14, MetadataV15, VersionedRecord,
};
use crate::projection;
use crate::registry::TypeRegistry;
use crate::traits::migration::{
    LATEST_VERSION, UpgradeContext, UpgradeEvent, VersionedModel, is_known,
};

#[derive(Debug)]
pub struct MetadataVersioned {
    registry: Arc<TypeRegistry>,
    record: VersionedRecord,
    config: MetadataConfig,
    // The only mutable state; everything else is fixed at construction.
    cache: UpgradeCache,
}

impl MetadataVersioned {
    pub fn new(registry: Arc<TypeRegistry>, record: VersionedRecord) -> Self {
        Self {
            registry,
            record,
            config: MetadataConfig::default(),
            cache: UpgradeCache::new(),
        }
    }

    pub fn with_config(
        registry: Arc<TypeRegistry>,
        record: VersionedRecord,
        config: MetadataConfig,
    ) -> MetadataResult<Self> {
        config.validate()?;
        Ok(Self {
            registry,
            record,
            config,
            cache: UpgradeCache::new(),
        })
    }

    /// Decode an encoded record and bind it to `registry`.
    pub fn from_bytes(registry: Arc<TypeRegistry>, bytes: &[u8]) -> MetadataResult<Self> {
        Self::from_bytes_with(registry, bytes, MetadataConfig::default())
    }

    pub fn from_bytes_with(
        registry: Arc<TypeRegistry>,
        bytes: &[u8],
        config: MetadataConfig,
    ) -> MetadataResult<Self> {
        let record = VersionedRecord::decode_with(bytes, config.verify_magic_number)?;
        debug!(
            "MetadataVersioned: decoded v{} record ({} bytes)",
            record.version(),
            bytes.len()
        );
        Self::with_config(registry, record, config)
    }

    pub fn from_hex(registry: Arc<TypeRegistry>, hex_str: &str) -> MetadataResult<Self> {
        let trimmed = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        Self::from_bytes(registry, &hex::decode(trimmed)?)
    }

    /// The intrinsic version of the wrapped record.
    pub fn version(&self) -> u32 {
        self.record.version()
    }

    pub fn magic_number(&self) -> u32 {
        self.record.magic_number
    }

    pub fn record(&self) -> &VersionedRecord {
        &self.record
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &MetadataConfig {
        &self.config
    }

    fn context(&self) -> UpgradeContext<'_> {
        UpgradeContext::new(self.version(), &self.registry)
    }

    // Checked on every call, cache hits included.
    fn ensure_reachable(&self, version: u32) -> MetadataResult<()> {
        if version < self.version() {
            return Err(MetadataError::Downgrade {
                from: self.version(),
                to: version,
            });
        }
        if !is_known(version) {
            return Err(MetadataError::UnknownVersion(version));
        }
        Ok(())
    }

    /// The payload lifted to exactly `version`.
    ///
    /// At the intrinsic version this is the record's own payload. Above it the
    /// result is built on first use and cached. Below it the call fails with
    /// [`MetadataError::Downgrade`].
    pub fn as_version(&self, version: u32) -> MetadataResult<MetadataPayload> {
        self.ensure_reachable(version)?;
        if version == self.version() {
            return Ok(self.record.payload.clone());
        }
        self.cache
            .resolve(&self.record.payload, version, &self.context())
    }

    /// Typed form of [`as_version`](Self::as_version).
    pub fn as_model<T: VersionedModel>(&self) -> MetadataResult<Arc<T>> {
        let payload = self.as_version(T::VERSION)?;
        T::from_payload(&payload).ok_or(MetadataError::SchemaMismatch {
            expected: T::VERSION,
            found: payload.version(),
        })
    }

    pub fn as_v9(&self) -> MetadataResult<Arc<MetadataV9>> {
        self.as_model()
    }

    pub fn as_v10(&self) -> MetadataResult<Arc<MetadataV10>> {
        self.as_model()
    }

    pub fn as_v11(&self) -> MetadataResult<Arc<MetadataV11>> {
        self.as_model()
    }

    pub fn as_v12(&self) -> MetadataResult<Arc<MetadataV12>> {
        self.as_model()
    }

    pub fn as_v13(&self) -> MetadataResult<Arc<MetadataV13>> {
        self.as_model()
    }

    pub fn as_v14(&self) -> MetadataResult<Arc<MetadataV14>> {
        self.as_model()
    }

    pub fn as_v15(&self) -> MetadataResult<Arc<MetadataV15>> {
        self.as_model()
    }

    /// The record in the newest layout, with the latest-version normalization
    /// applied: named types of its portable registry are registered with the
    /// bound [`TypeRegistry`]. Cached separately from `as_version(LATEST_VERSION)`.
    pub fn as_latest(&self) -> MetadataResult<Arc<MetadataLatest>> {
        let payload =
            self.cache
                .resolve_latest(&self.record.payload, &self.context(), |payload| {
                    let latest = MetadataLatest::from_payload(payload).ok_or(
                        MetadataError::SchemaMismatch {
                            expected: LATEST_VERSION,
                            found: payload.version(),
                        },
                    )?;
                    self.registry.register_lookup(&latest.lookup);
                    Ok(())
                })?;

        MetadataLatest::from_payload(&payload).ok_or(MetadataError::SchemaMismatch {
            expected: LATEST_VERSION,
            found: payload.version(),
        })
    }

    /// A reduced record keeping only what is needed to interpret calls.
    /// See [`projection::calls_only`].
    pub fn as_calls_only(&self) -> MetadataResult<MetadataVersioned> {
        projection::calls_only::project(self)
    }

    /// Every distinct type identifier the latest layout mentions.
    /// See [`projection::unique_types`].
    pub fn unique_types(&self, throw_on_unresolved: bool) -> MetadataResult<BTreeSet<String>> {
        let latest = self.as_latest()?;
        projection::unique_types::extract(&latest, self.registry.as_ref(), throw_on_unresolved)
    }

    /// JSON form of the wrapped record, produced after `as_latest` has run so
    /// the registry reflects the normalized latest layout.
    pub fn to_json(&self) -> MetadataResult<serde_json::Value> {
        self.as_latest()?;
        Ok(serde_json::to_value(&self.record)?)
    }

    /// Binary form of the wrapped record at its intrinsic version.
    pub fn to_bytes(&self) -> MetadataResult<Vec<u8>> {
        self.record.encode()
    }

    /// Upgrade steps executed for this record so far.
    pub fn upgrade_trace(&self) -> Vec<UpgradeEvent> {
        self.cache.trace()
    }

    pub fn cache(&self) -> &UpgradeCache {
        &self.cache
    }
}
