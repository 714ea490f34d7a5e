//! Metadata layout V15: runtime APIs, outer enums, pallet docs and custom
//! metadata. This is the latest layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::portable::PortableRegistry;
use super::v14::{
    MetadataV14, PalletCallMetadataV14, PalletConstantMetadataV14, PalletErrorMetadataV14,
    PalletEventMetadataV14, PalletStorageMetadataV14, SignedExtensionMetadataV14,
};
use crate::traits::migration::{UpgradeContext, UpgradeFrom};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletMetadataV15 {
    pub name: String,
    pub storage: Option<PalletStorageMetadataV14>,
    pub calls: Option<PalletCallMetadataV14>,
    pub events: Option<PalletEventMetadataV14>,
    pub constants: Vec<PalletConstantMetadataV14>,
    pub errors: Option<PalletErrorMetadataV14>,
    pub index: u8,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrinsicMetadataV15 {
    pub version: u8,
    pub address_type: u32,
    pub call_type: u32,
    pub signature_type: u32,
    pub extra_type: u32,
    pub signed_extensions: Vec<SignedExtensionMetadataV14>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeApiMethodParamMetadataV15 {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeApiMethodMetadataV15 {
    pub name: String,
    pub inputs: Vec<RuntimeApiMethodParamMetadataV15>,
    pub output: u32,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeApiMetadataV15 {
    pub name: String,
    pub methods: Vec<RuntimeApiMethodMetadataV15>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OuterEnumsV15 {
    pub call_type: u32,
    pub event_type: u32,
    pub error_type: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomValueMetadataV15 {
    #[serde(rename = "type")]
    pub ty: u32,
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomMetadataV15 {
    pub map: BTreeMap<String, CustomValueMetadataV15>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataV15 {
    pub lookup: PortableRegistry,
    pub pallets: Vec<PalletMetadataV15>,
    pub extrinsic: ExtrinsicMetadataV15,
    #[serde(rename = "type")]
    pub ty: u32,
    pub apis: Vec<RuntimeApiMetadataV15>,
    pub outer_enums: OuterEnumsV15,
    pub custom: CustomMetadataV15,
}

impl UpgradeFrom<MetadataV14> for MetadataV15 {
    fn upgrade_from(old: &MetadataV14, _ctx: &UpgradeContext<'_>) -> Self {
        let pallets = old
            .pallets
            .iter()
            .map(|pallet| PalletMetadataV15 {
                name: pallet.name.clone(),
                storage: pallet.storage.clone(),
                calls: pallet.calls,
                events: pallet.events,
                constants: pallet.constants.clone(),
                errors: pallet.errors,
                index: pallet.index,
                docs: Vec::new(),
            })
            .collect();

        // V14 only knew the opaque extrinsic type, so every component points at it.
        let extrinsic = ExtrinsicMetadataV15 {
            version: old.extrinsic.version,
            address_type: old.extrinsic.ty,
            call_type: old.extrinsic.ty,
            signature_type: old.extrinsic.ty,
            extra_type: old.extrinsic.ty,
            signed_extensions: old.extrinsic.signed_extensions.clone(),
        };

        MetadataV15 {
            lookup: old.lookup.clone(),
            pallets,
            extrinsic,
            ty: old.ty,
            apis: Vec::new(),
            outer_enums: OuterEnumsV15::default(),
            custom: CustomMetadataV15::default(),
        }
    }
}
