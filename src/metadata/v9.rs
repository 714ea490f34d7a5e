//! Metadata layout V9, the oldest version this crate accepts.

use serde::{Deserialize, Serialize};

use super::legacy::{
    ErrorMetadata, EventMetadata, FunctionMetadata, ModuleConstantMetadata, StorageEntryModifier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageHasherV9 {
    Blake2_128,
    Blake2_256,
    Twox128,
    Twox256,
    Twox64Concat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageEntryTypeV9 {
    Plain(String),
    #[serde(rename_all = "camelCase")]
    Map {
        hasher: StorageHasherV9,
        key: String,
        value: String,
        linked: bool,
    },
    #[serde(rename_all = "camelCase")]
    DoubleMap {
        hasher: StorageHasherV9,
        key1: String,
        key2: String,
        value: String,
        key2_hasher: StorageHasherV9,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntryMetadataV9 {
    pub name: String,
    pub modifier: StorageEntryModifier,
    #[serde(rename = "type")]
    pub ty: StorageEntryTypeV9,
    pub fallback: Vec<u8>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageMetadataV9 {
    pub prefix: String,
    pub items: Vec<StorageEntryMetadataV9>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadataV9 {
    pub name: String,
    pub storage: Option<StorageMetadataV9>,
    pub calls: Option<Vec<FunctionMetadata>>,
    pub events: Option<Vec<EventMetadata>>,
    pub constants: Vec<ModuleConstantMetadata>,
    pub errors: Vec<ErrorMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataV9 {
    pub modules: Vec<ModuleMetadataV9>,
}
