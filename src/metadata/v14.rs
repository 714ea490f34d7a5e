//! Metadata layout V14: pallets referencing a portable type registry.
//!
//! The 13 to 14 step is the largest in the chain. Legacy type expressions
//! become historic compatibility entries, and the per-module call, event and
//! error lists are folded into one variant type each.

use log::trace;
use serde::{Deserialize, Serialize};

use super::legacy::{ErrorMetadata, EventMetadata, FunctionMetadata, StorageEntryModifier, StorageHasher};
use super::portable::{
    PortableRegistry, PortableRegistryBuilder, SiField, SiType, SiTypeDef, SiVariant,
};
use super::v13::{MetadataV13, StorageEntryTypeV13};
use crate::traits::migration::{UpgradeContext, UpgradeFrom};

/// Extrinsic version assumed for records that predate extrinsic metadata.
pub const LEGACY_EXTRINSIC_VERSION: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageEntryTypeV14 {
    Plain(u32),
    #[serde(rename_all = "camelCase")]
    Map {
        hashers: Vec<StorageHasher>,
        key: u32,
        value: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntryMetadataV14 {
    pub name: String,
    pub modifier: StorageEntryModifier,
    #[serde(rename = "type")]
    pub ty: StorageEntryTypeV14,
    pub fallback: Vec<u8>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletStorageMetadataV14 {
    pub prefix: String,
    pub items: Vec<StorageEntryMetadataV14>,
}

/// Points at the variant type listing a pallet's calls, events or errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletTypeRef {
    #[serde(rename = "type")]
    pub ty: u32,
}

pub type PalletCallMetadataV14 = PalletTypeRef;
pub type PalletEventMetadataV14 = PalletTypeRef;
pub type PalletErrorMetadataV14 = PalletTypeRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletConstantMetadataV14 {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: u32,
    pub value: Vec<u8>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletMetadataV14 {
    pub name: String,
    pub storage: Option<PalletStorageMetadataV14>,
    pub calls: Option<PalletCallMetadataV14>,
    pub events: Option<PalletEventMetadataV14>,
    pub constants: Vec<PalletConstantMetadataV14>,
    pub errors: Option<PalletErrorMetadataV14>,
    pub index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedExtensionMetadataV14 {
    pub identifier: String,
    #[serde(rename = "type")]
    pub ty: u32,
    pub additional_signed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrinsicMetadataV14 {
    #[serde(rename = "type")]
    pub ty: u32,
    pub version: u8,
    pub signed_extensions: Vec<SignedExtensionMetadataV14>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataV14 {
    pub lookup: PortableRegistry,
    pub pallets: Vec<PalletMetadataV14>,
    pub extrinsic: ExtrinsicMetadataV14,
    #[serde(rename = "type")]
    pub ty: u32,
}

fn calls_variant(builder: &mut PortableRegistryBuilder, calls: &[FunctionMetadata]) -> SiType {
    let variants = calls
        .iter()
        .enumerate()
        .map(|(index, call)| SiVariant {
            name: call.name.clone(),
            fields: call
                .args
                .iter()
                .map(|arg| SiField {
                    name: Some(arg.name.clone()),
                    ty: builder.compat(&arg.ty),
                    type_name: Some(arg.ty.clone()),
                    docs: Vec::new(),
                })
                .collect(),
            index: index as u8,
            docs: call.docs.clone(),
        })
        .collect();
    SiType::anonymous(SiTypeDef::Variant(variants))
}

fn events_variant(builder: &mut PortableRegistryBuilder, events: &[EventMetadata]) -> SiType {
    let variants = events
        .iter()
        .enumerate()
        .map(|(index, event)| SiVariant {
            name: event.name.clone(),
            fields: event
                .args
                .iter()
                .map(|arg| SiField {
                    name: None,
                    ty: builder.compat(arg),
                    type_name: Some(arg.clone()),
                    docs: Vec::new(),
                })
                .collect(),
            index: index as u8,
            docs: event.docs.clone(),
        })
        .collect();
    SiType::anonymous(SiTypeDef::Variant(variants))
}

fn errors_variant(errors: &[ErrorMetadata]) -> SiType {
    let variants = errors
        .iter()
        .enumerate()
        .map(|(index, error)| SiVariant {
            name: error.name.clone(),
            fields: Vec::new(),
            index: index as u8,
            docs: error.docs.clone(),
        })
        .collect();
    SiType::anonymous(SiTypeDef::Variant(variants))
}

fn storage_type(builder: &mut PortableRegistryBuilder, ty: &StorageEntryTypeV13) -> StorageEntryTypeV14 {
    match ty {
        StorageEntryTypeV13::Plain(value) => StorageEntryTypeV14::Plain(builder.compat(value)),
        StorageEntryTypeV13::Map { hasher, key, value } => StorageEntryTypeV14::Map {
            hashers: vec![*hasher],
            key: builder.compat(key),
            value: builder.compat(value),
        },
        StorageEntryTypeV13::DoubleMap {
            hasher,
            key1,
            key2,
            value,
            key2_hasher,
        } => StorageEntryTypeV14::Map {
            hashers: vec![*hasher, *key2_hasher],
            key: builder.compat_tuple(&[key1.clone(), key2.clone()]),
            value: builder.compat(value),
        },
        StorageEntryTypeV13::NMap {
            keys,
            hashers,
            value,
        } => StorageEntryTypeV14::Map {
            hashers: hashers.clone(),
            key: builder.compat_tuple(keys),
            value: builder.compat(value),
        },
    }
}

impl UpgradeFrom<MetadataV13> for MetadataV14 {
    fn upgrade_from(old: &MetadataV13, ctx: &UpgradeContext<'_>) -> Self {
        let mut builder = PortableRegistryBuilder::new();

        let pallets = old
            .modules
            .iter()
            .map(|module| {
                let storage = module.storage.as_ref().map(|storage| PalletStorageMetadataV14 {
                    prefix: storage.prefix.clone(),
                    items: storage
                        .items
                        .iter()
                        .map(|item| StorageEntryMetadataV14 {
                            name: item.name.clone(),
                            modifier: item.modifier,
                            ty: storage_type(&mut builder, &item.ty),
                            fallback: item.fallback.clone(),
                            docs: item.docs.clone(),
                        })
                        .collect(),
                });

                let calls = module.calls.as_ref().map(|calls| {
                    let ty = calls_variant(&mut builder, calls);
                    PalletTypeRef {
                        ty: builder.push(ty),
                    }
                });
                let events = module.events.as_ref().map(|events| {
                    let ty = events_variant(&mut builder, events);
                    PalletTypeRef {
                        ty: builder.push(ty),
                    }
                });
                let errors = (!module.errors.is_empty()).then(|| PalletTypeRef {
                    ty: builder.push(errors_variant(&module.errors)),
                });
                let constants = module
                    .constants
                    .iter()
                    .map(|constant| PalletConstantMetadataV14 {
                        name: constant.name.clone(),
                        ty: builder.compat(&constant.ty),
                        value: constant.value.clone(),
                        docs: constant.docs.clone(),
                    })
                    .collect();

                PalletMetadataV14 {
                    name: module.name.clone(),
                    storage,
                    calls,
                    events,
                    constants,
                    errors,
                    index: module.index,
                }
            })
            .collect();

        // Records that never carried extrinsic metadata get the legacy default.
        let version = if ctx.original_version < 11 && old.extrinsic.version == 0 {
            LEGACY_EXTRINSIC_VERSION
        } else {
            old.extrinsic.version
        };
        let null = builder.compat("Null");
        let signed_extensions = old
            .extrinsic
            .signed_extensions
            .iter()
            .map(|identifier| SignedExtensionMetadataV14 {
                identifier: identifier.clone(),
                ty: null,
                additional_signed: null,
            })
            .collect();
        let extrinsic = ExtrinsicMetadataV14 {
            ty: builder.compat("Extrinsic"),
            version,
            signed_extensions,
        };
        let ty = builder.compat("Runtime");

        trace!(
            "MetadataV14: built portable registry with {} types (original v{})",
            builder.len(),
            ctx.original_version
        );

        MetadataV14 {
            lookup: builder.build(),
            pallets,
            extrinsic,
            ty,
        }
    }
}
