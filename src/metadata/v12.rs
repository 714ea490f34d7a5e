//! Metadata layout V12: modules carry an explicit dispatch index.

use serde::{Deserialize, Serialize};

use super::legacy::{ErrorMetadata, EventMetadata, FunctionMetadata, ModuleConstantMetadata};
use super::v11::{ExtrinsicMetadataV11, MetadataV11, StorageMetadataV11};
use crate::traits::migration::{UpgradeContext, UpgradeFrom};

pub type ExtrinsicMetadataV12 = ExtrinsicMetadataV11;
pub type StorageMetadataV12 = StorageMetadataV11;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadataV12 {
    pub name: String,
    pub storage: Option<StorageMetadataV12>,
    pub calls: Option<Vec<FunctionMetadata>>,
    pub events: Option<Vec<EventMetadata>>,
    pub constants: Vec<ModuleConstantMetadata>,
    pub errors: Vec<ErrorMetadata>,
    pub index: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataV12 {
    pub modules: Vec<ModuleMetadataV12>,
    pub extrinsic: ExtrinsicMetadataV12,
}

impl UpgradeFrom<MetadataV11> for MetadataV12 {
    fn upgrade_from(old: &MetadataV11, _ctx: &UpgradeContext<'_>) -> Self {
        // Older runtimes dispatched by declaration order.
        let modules = old
            .modules
            .iter()
            .enumerate()
            .map(|(index, module)| ModuleMetadataV12 {
                name: module.name.clone(),
                storage: module.storage.clone(),
                calls: module.calls.clone(),
                events: module.events.clone(),
                constants: module.constants.clone(),
                errors: module.errors.clone(),
                index: u8::try_from(index).unwrap_or(u8::MAX),
            })
            .collect();

        MetadataV12 {
            modules,
            extrinsic: old.extrinsic.clone(),
        }
    }
}
