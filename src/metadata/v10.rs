//! Metadata layout V10: adds the `Blake2_128Concat` storage hasher.

use serde::{Deserialize, Serialize};

use super::legacy::{
    ErrorMetadata, EventMetadata, FunctionMetadata, ModuleConstantMetadata, StorageEntryModifier,
};
use super::v9::{MetadataV9, StorageEntryTypeV9, StorageHasherV9};
use crate::traits::migration::{UpgradeContext, UpgradeFrom};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageHasherV10 {
    Blake2_128,
    Blake2_256,
    Blake2_128Concat,
    Twox128,
    Twox256,
    Twox64Concat,
}

impl From<StorageHasherV9> for StorageHasherV10 {
    fn from(hasher: StorageHasherV9) -> Self {
        match hasher {
            StorageHasherV9::Blake2_128 => Self::Blake2_128,
            StorageHasherV9::Blake2_256 => Self::Blake2_256,
            StorageHasherV9::Twox128 => Self::Twox128,
            StorageHasherV9::Twox256 => Self::Twox256,
            StorageHasherV9::Twox64Concat => Self::Twox64Concat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageEntryTypeV10 {
    Plain(String),
    #[serde(rename_all = "camelCase")]
    Map {
        hasher: StorageHasherV10,
        key: String,
        value: String,
        linked: bool,
    },
    #[serde(rename_all = "camelCase")]
    DoubleMap {
        hasher: StorageHasherV10,
        key1: String,
        key2: String,
        value: String,
        key2_hasher: StorageHasherV10,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntryMetadataV10 {
    pub name: String,
    pub modifier: StorageEntryModifier,
    #[serde(rename = "type")]
    pub ty: StorageEntryTypeV10,
    pub fallback: Vec<u8>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageMetadataV10 {
    pub prefix: String,
    pub items: Vec<StorageEntryMetadataV10>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadataV10 {
    pub name: String,
    pub storage: Option<StorageMetadataV10>,
    pub calls: Option<Vec<FunctionMetadata>>,
    pub events: Option<Vec<EventMetadata>>,
    pub constants: Vec<ModuleConstantMetadata>,
    pub errors: Vec<ErrorMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataV10 {
    pub modules: Vec<ModuleMetadataV10>,
}

fn entry_type(ty: &StorageEntryTypeV9) -> StorageEntryTypeV10 {
    match ty {
        StorageEntryTypeV9::Plain(value) => StorageEntryTypeV10::Plain(value.clone()),
        StorageEntryTypeV9::Map {
            hasher,
            key,
            value,
            linked,
        } => StorageEntryTypeV10::Map {
            hasher: (*hasher).into(),
            key: key.clone(),
            value: value.clone(),
            linked: *linked,
        },
        StorageEntryTypeV9::DoubleMap {
            hasher,
            key1,
            key2,
            value,
            key2_hasher,
        } => StorageEntryTypeV10::DoubleMap {
            hasher: (*hasher).into(),
            key1: key1.clone(),
            key2: key2.clone(),
            value: value.clone(),
            key2_hasher: (*key2_hasher).into(),
        },
    }
}

impl UpgradeFrom<MetadataV9> for MetadataV10 {
    fn upgrade_from(old: &MetadataV9, _ctx: &UpgradeContext<'_>) -> Self {
        let modules = old
            .modules
            .iter()
            .map(|module| ModuleMetadataV10 {
                name: module.name.clone(),
                storage: module.storage.as_ref().map(|storage| StorageMetadataV10 {
                    prefix: storage.prefix.clone(),
                    items: storage
                        .items
                        .iter()
                        .map(|item| StorageEntryMetadataV10 {
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

        MetadataV10 { modules }
    }
}
