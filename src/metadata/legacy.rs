//! Building blocks shared by the string-typed metadata layouts (V9 through V13).
//!
//! Before V14 every type reference is a plain type expression such as
//! `Vec<(T::AccountId, Balance)>`. Call, event, constant and error
//! descriptions kept the same shape across all of those versions; only the
//! storage and module envelopes changed between them.

use serde::{Deserialize, Serialize};

/// Whether a storage entry yields `Option<T>` or falls back to a default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageEntryModifier {
    Optional,
    Default,
}

/// Storage key hashers available from V11 onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageHasher {
    Blake2_128,
    Blake2_256,
    Blake2_128Concat,
    Twox128,
    Twox256,
    Twox64Concat,
    Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionArgumentMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A dispatchable call in a legacy module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMetadata {
    pub name: String,
    pub args: Vec<FunctionArgumentMetadata>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub name: String,
    pub args: Vec<String>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConstantMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: Vec<u8>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMetadata {
    pub name: String,
    pub docs: Vec<String>,
}
