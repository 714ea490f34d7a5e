//! Per-record memo table of upgraded payloads.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::trace;

use crate::errors::MetadataResult;
use crate::metadata::MetadataPayload;
use crate::traits::migration::{LATEST_VERSION, UpgradeContext, UpgradeEvent, step_to};

/// Cache slot. `Latest` is kept apart from `Specific(LATEST_VERSION)` so the
/// two can diverge once the chain grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheKey {
    Specific(u32),
    Latest,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, MetadataPayload>,
    trace: Vec<UpgradeEvent>,
}

impl CacheState {
    /// Lift `native` to `target`, starting from the highest cached version
    /// below it. Every intermediate result is cached under its own key.
    fn walk(
        &mut self,
        native: &MetadataPayload,
        target: u32,
        ctx: &UpgradeContext<'_>,
    ) -> MetadataResult<MetadataPayload> {
        let source = native.version();
        if target <= source {
            return Ok(native.clone());
        }
        if let Some(hit) = self.entries.get(&CacheKey::Specific(target)) {
            return Ok(hit.clone());
        }

        let (mut version, mut current) = ((source + 1)..target)
            .rev()
            .find_map(|version| {
                self.entries
                    .get(&CacheKey::Specific(version))
                    .map(|payload| (version, payload.clone()))
            })
            .unwrap_or_else(|| (source, native.clone()));

        while version < target {
            let step = step_to(version + 1)?;
            let next = step.apply(&current, ctx)?;
            trace!(
                "UpgradeCache: applied v{} -> v{} (original v{})",
                step.from,
                step.to,
                ctx.original_version
            );
            self.trace.push(UpgradeEvent {
                from: step.from,
                to: step.to,
                original_version: ctx.original_version,
            });
            self.entries
                .insert(CacheKey::Specific(step.to), next.clone());
            version = step.to;
            current = next;
        }

        Ok(current)
    }
}

/// Memo table owned by exactly one record.
///
/// The whole check-compute-store sequence runs under one mutex, so each key
/// is computed at most once even when the record is shared across threads.
/// Entries are never evicted.
#[derive(Debug, Default)]
pub struct UpgradeCache {
    state: Mutex<CacheState>,
}

impl UpgradeCache {
    pub fn new() -> Self {
        Self::default()
    }

    // Entries are immutable once inserted, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: CacheKey) -> Option<MetadataPayload> {
        self.lock().entries.get(&key).cloned()
    }

    pub fn contains(&self, key: CacheKey) -> bool {
        self.lock().entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Steps executed so far, in execution order.
    pub fn trace(&self) -> Vec<UpgradeEvent> {
        self.lock().trace.clone()
    }

    /// The payload at `version`, computing and caching it on a miss.
    pub fn resolve(
        &self,
        native: &MetadataPayload,
        version: u32,
        ctx: &UpgradeContext<'_>,
    ) -> MetadataResult<MetadataPayload> {
        self.lock().walk(native, version, ctx)
    }

    /// The latest payload. On a miss, `normalize` runs once on the result
    /// before it is stored under [`CacheKey::Latest`].
    pub fn resolve_latest<F>(
        &self,
        native: &MetadataPayload,
        ctx: &UpgradeContext<'_>,
        normalize: F,
    ) -> MetadataResult<MetadataPayload>
    where
        F: FnOnce(&MetadataPayload) -> MetadataResult<()>,
    {
        let mut state = self.lock();
        if let Some(hit) = state.entries.get(&CacheKey::Latest) {
            return Ok(hit.clone());
        }
        let latest = state.walk(native, LATEST_VERSION, ctx)?;
        normalize(&latest)?;
        state.entries.insert(CacheKey::Latest, latest.clone());
        Ok(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MetadataV11, MetadataV12};
    use crate::registry::TypeRegistry;

    #[test]
    fn test_walk_caches_every_intermediate_version() {
        let registry = TypeRegistry::new();
        let ctx = UpgradeContext::new(11, &registry);
        let native = MetadataPayload::from(MetadataV11::default());
        let cache = UpgradeCache::new();

        let v13 = cache.resolve(&native, 13, &ctx).unwrap();
        assert_eq!(v13.version(), 13);
        assert!(cache.contains(CacheKey::Specific(12)));
        assert!(cache.contains(CacheKey::Specific(13)));
        assert!(!cache.contains(CacheKey::Specific(11)));
        assert_eq!(cache.trace().len(), 2);

        // Resuming from the cached v13 costs exactly one more step.
        cache.resolve(&native, 14, &ctx).unwrap();
        assert_eq!(cache.trace().len(), 3);
        assert_eq!(cache.trace()[2].from, 13);
    }

    #[test]
    fn test_native_version_is_not_cached() {
        let registry = TypeRegistry::new();
        let ctx = UpgradeContext::new(12, &registry);
        let native = MetadataPayload::from(MetadataV12::default());
        let cache = UpgradeCache::new();

        let same = cache.resolve(&native, 12, &ctx).unwrap();
        assert!(same.ptr_eq(&native));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_latest_normalization_runs_once() {
        let registry = TypeRegistry::new();
        let ctx = UpgradeContext::new(12, &registry);
        let native = MetadataPayload::from(MetadataV12::default());
        let cache = UpgradeCache::new();
        let mut calls = 0;

        let first = cache
            .resolve_latest(&native, &ctx, |_| {
                calls += 1;
                Ok(())
            })
            .unwrap();
        let second = cache
            .resolve_latest(&native, &ctx, |_| panic!("normalized twice"))
            .unwrap();

        assert_eq!(calls, 1);
        assert!(first.ptr_eq(&second));
        assert!(
            cache
                .get(CacheKey::Latest)
                .unwrap()
                .ptr_eq(&cache.get(CacheKey::Specific(LATEST_VERSION)).unwrap())
        );
    }
}
