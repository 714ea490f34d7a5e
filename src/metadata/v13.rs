//! Metadata layout V13: adds n-ary storage maps. Last string-typed layout.

use serde::{Deserialize, Serialize};

use super::legacy::{
    ErrorMetadata, EventMetadata, FunctionMetadata, ModuleConstantMetadata, StorageEntryModifier,
    StorageHasher,
};
use super::v11::StorageEntryTypeV11;
use super::v12::{ExtrinsicMetadataV12, MetadataV12};
use crate::traits::migration::{UpgradeContext, UpgradeFrom};

pub type ExtrinsicMetadataV13 = ExtrinsicMetadataV12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageEntryTypeV13 {
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
    #[serde(rename_all = "camelCase")]
    NMap {
        keys: Vec<String>,
        hashers: Vec<StorageHasher>,
        value: String,
    },
}

impl From<&StorageEntryTypeV11> for StorageEntryTypeV13 {
    fn from(ty: &StorageEntryTypeV11) -> Self {
        match ty.clone() {
            StorageEntryTypeV11::Plain(value) => Self::Plain(value),
            StorageEntryTypeV11::Map { hasher, key, value } => Self::Map { hasher, key, value },
            StorageEntryTypeV11::DoubleMap {
                hasher,
                key1,
                key2,
                value,
                key2_hasher,
            } => Self::DoubleMap {
                hasher,
                key1,
                key2,
                value,
                key2_hasher,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntryMetadataV13 {
    pub name: String,
    pub modifier: StorageEntryModifier,
    #[serde(rename = "type")]
    pub ty: StorageEntryTypeV13,
    pub fallback: Vec<u8>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageMetadataV13 {
    pub prefix: String,
    pub items: Vec<StorageEntryMetadataV13>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadataV13 {
    pub name: String,
    pub storage: Option<StorageMetadataV13>,
    pub calls: Option<Vec<FunctionMetadata>>,
    pub events: Option<Vec<EventMetadata>>,
    pub constants: Vec<ModuleConstantMetadata>,
    pub errors: Vec<ErrorMetadata>,
    pub index: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataV13 {
    pub modules: Vec<ModuleMetadataV13>,
    pub extrinsic: ExtrinsicMetadataV13,
}

impl UpgradeFrom<MetadataV12> for MetadataV13 {
    fn upgrade_from(old: &MetadataV12, _ctx: &UpgradeContext<'_>) -> Self {
        let modules = old
            .modules
            .iter()
            .map(|module| ModuleMetadataV13 {
                name: module.name.clone(),
                storage: module.storage.as_ref().map(|storage| StorageMetadataV13 {
                    prefix: storage.prefix.clone(),
                    items: storage
                        .items
                        .iter()
                        .map(|item| StorageEntryMetadataV13 {
                            name: item.name.clone(),
                            modifier: item.modifier,
                            ty: (&item.ty).into(),
                            fallback: item.fallback.clone(),
                            docs: item.docs.clone(),
                        })
                        .collect(),
                }),
                calls: module.calls.clone(),
                events: module.events.clone(),
                constants: module.constants.clone(),
                errors: module.errors.clone(),
                index: module.index,
            })
            .collect();

        MetadataV13 {
            modules,
            extrinsic: old.extrinsic.clone(),
        }
    }
}
