//! Metadata layout V11: extrinsic metadata, the `Identity` hasher, and
//! storage maps without the `linked` flag.

use serde::{Deserialize, Serialize};

use super::legacy::{
    ErrorMetadata, EventMetadata, FunctionMetadata, ModuleConstantMetadata, StorageEntryModifier,
    StorageHasher,
};
use super::v10::{MetadataV10, StorageEntryTypeV10, StorageHasherV10};
use crate::traits::migration::{UpgradeContext, UpgradeFrom};

impl From<StorageHasherV10> for StorageHasher {
    fn from(hasher: StorageHasherV10) -> Self {
        match hasher {
            StorageHasherV10::Blake2_128 => Self::Blake2_128,
            StorageHasherV10::Blake2_256 => Self::Blake2_256,
            StorageHasherV10::Blake2_128Concat => Self::Blake2_128Concat,
            StorageHasherV10::Twox128 => Self::Twox128,
            StorageHasherV10::Twox256 => Self::Twox256,
            StorageHasherV10::Twox64Concat => Self::Twox64Concat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageEntryTypeV11 {
    Plain(String),
    #[serde(rename_all = "camelCase")]
    Map {
        hasher: StorageHasher,
        key: String,
        value: String,
    },
    #[serde(rename_all = "camelCase")]
    DoubleMap {
        hasher: StorageHasher,
        key1: String,
        key2: String,
        value: String,
        key2_hasher: StorageHasher,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntryMetadataV11 {
    pub name: String,
    pub modifier: StorageEntryModifier,
    #[serde(rename = "type")]
    pub ty: StorageEntryTypeV11,
    pub fallback: Vec<u8>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageMetadataV11 {
    pub prefix: String,
    pub items: Vec<StorageEntryMetadataV11>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadataV11 {
    pub name: String,
    pub storage: Option<StorageMetadataV11>,
    pub calls: Option<Vec<FunctionMetadata>>,
    pub events: Option<Vec<EventMetadata>>,
    pub constants: Vec<ModuleConstantMetadata>,
    pub errors: Vec<ErrorMetadata>,
}

/// Extrinsic format description. A `version` of 0 means the producer did
/// not report one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrinsicMetadataV11 {
    pub version: u8,
    pub signed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataV11 {
    pub modules: Vec<ModuleMetadataV11>,
    pub extrinsic: ExtrinsicMetadataV11,
}

fn entry_type(ty: &StorageEntryTypeV10) -> StorageEntryTypeV11 {
    match ty {
        StorageEntryTypeV10::Plain(value) => StorageEntryTypeV11::Plain(value.clone()),
        StorageEntryTypeV10::Map {
            hasher, key, value, ..
        } => StorageEntryTypeV11::Map {
            hasher: (*hasher).into(),
            key: key.clone(),
            value: value.clone(),
        },
        StorageEntryTypeV10::DoubleMap {
            hasher,
            key1,
            key2,
            value,
            key2_hasher,
        } => StorageEntryTypeV11::DoubleMap {
            hasher: (*hasher).into(),
            key1: key1.clone(),
            key2: key2.clone(),
            value: value.clone(),
            key2_hasher: (*key2_hasher).into(),
        },
    }
}

impl UpgradeFrom<MetadataV10> for MetadataV11 {
    fn upgrade_from(old: &MetadataV10, _ctx: &UpgradeContext<'_>) -> Self {
        let modules = old
            .modules
            .iter()
            .map(|module| ModuleMetadataV11 {
                name: module.name.clone(),
                storage: module.storage.as_ref().map(|storage| StorageMetadataV11 {
                    prefix: storage.prefix.clone(),
                    items: storage
                        .items
                        .iter()
                        .map(|item| StorageEntryMetadataV11 {
                            name: item.name.clone(),
                            modifier: item.modifier,
                            ty: entry_type(&item.ty),
                            fallback: item.fallback.clone(),
                            docs: item.docs.clone(),
                        })
                        .collect(),
                }),
                calls: module.calls.clone(),
                events: module.events.clone(),
                constants: module.constants.clone(),
                errors: module.errors.clone(),
            })
            .collect();

        MetadataV11 {
            modules,
            extrinsic: ExtrinsicMetadataV11::default(),
        }
    }
}
