//! The calls-only projection.
//!
//! Consumers that only decode and encode extrinsics need pallet names,
//! indices, call variants and the types those calls reference. Everything
//! else (storage, events, errors, constants, runtime APIs, docs) is dropped.
//! The reduced value is built in the V14 pallet shape and re-wrapped as a
//! fresh record at the configured pin, [`CALLS_ONLY_VERSION`] by default.

use log::debug;

use crate::errors::MetadataResult;
use crate::metadata::v14::{ExtrinsicMetadataV14, PalletMetadataV14};
use crate::metadata::{MetadataLatest, MetadataPayload, MetadataV14, VersionedRecord};
use crate::traits::migration::CALLS_ONLY_VERSION;
use crate::versioned::MetadataVersioned;

/// Reduce the latest layout to its call-dispatch information.
///
/// Lookup ids are preserved, so every call type reference stays valid; only
/// docs are stripped from the registry.
pub fn reduce(latest: &MetadataLatest) -> MetadataV14 {
    let pallets = latest
        .pallets
        .iter()
        .map(|pallet| PalletMetadataV14 {
            name: pallet.name.clone(),
            storage: None,
            calls: pallet.calls,
            events: None,
            constants: Vec::new(),
            errors: None,
            index: pallet.index,
        })
        .collect();

    // V14 has a single extrinsic type; the call type is the one dispatch needs.
    let extrinsic = ExtrinsicMetadataV14 {
        ty: latest.extrinsic.call_type,
        version: latest.extrinsic.version,
        signed_extensions: latest.extrinsic.signed_extensions.clone(),
    };

    MetadataV14 {
        lookup: latest.lookup.without_docs(),
        pallets,
        extrinsic,
        ty: latest.ty,
    }
}

/// Build the calls-only record for `source`.
///
/// The result shares the source's registry and configuration but has its own
/// empty cache and its own intrinsic version (the pin).
pub fn project(source: &MetadataVersioned) -> MetadataResult<MetadataVersioned> {
    let latest = source.as_latest()?;
    let reduced = MetadataPayload::from(reduce(&latest));
    let config = *source.config();
    let pin = config.calls_only_version;

    let payload = if pin == CALLS_ONLY_VERSION {
        reduced
    } else {
        let staged = MetadataVersioned::with_config(
            source.registry().clone(),
            VersionedRecord {
                magic_number: source.magic_number(),
                payload: reduced,
            },
            config,
        )?;
        staged.as_version(pin)?
    };

    debug!(
        "CallsOnly: projected v{} record to v{} ({} pallets)",
        source.version(),
        pin,
        latest.pallets.len()
    );

    MetadataVersioned::with_config(
        source.registry().clone(),
        VersionedRecord {
            magic_number: source.magic_number(),
            payload,
        },
        config,
    )
}
