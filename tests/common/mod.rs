// Common test fixtures and helpers

#![allow(dead_code)]

use std::sync::Arc;

use chain_metadata::metadata::legacy::{
    ErrorMetadata, EventMetadata, FunctionArgumentMetadata, FunctionMetadata,
    ModuleConstantMetadata, StorageEntryModifier,
};
use chain_metadata::metadata::portable::{
    PortableRegistry, PortableType, SiField, SiPrimitive, SiType, SiTypeDef, SiVariant,
};
use chain_metadata::metadata::v9::{
    ModuleMetadataV9, StorageEntryMetadataV9, StorageEntryTypeV9, StorageHasherV9,
    StorageMetadataV9,
};
use chain_metadata::metadata::v14::{
    ExtrinsicMetadataV14, PalletConstantMetadataV14, PalletMetadataV14, PalletStorageMetadataV14,
    PalletTypeRef, SignedExtensionMetadataV14, StorageEntryMetadataV14, StorageEntryTypeV14,
};
use chain_metadata::prelude::*;
use chain_metadata::traits::migration::step_to;

fn docs(line: &str) -> Vec<String> {
    vec![line.to_string()]
}

fn call(name: &str, args: &[(&str, &str)]) -> FunctionMetadata {
    FunctionMetadata {
        name: name.to_string(),
        args: args
            .iter()
            .map(|(name, ty)| FunctionArgumentMetadata {
                name: name.to_string(),
                ty: ty.to_string(),
            })
            .collect(),
        docs: docs(&format!("Dispatch {name}.")),
    }
}

/// A small two-pallet runtime in the V9 layout.
pub fn sample_v9() -> MetadataV9 {
    let system = ModuleMetadataV9 {
        name: "System".to_string(),
        storage: Some(StorageMetadataV9 {
            prefix: "System".to_string(),
            items: vec![
                StorageEntryMetadataV9 {
                    name: "Account".to_string(),
                    modifier: StorageEntryModifier::Default,
                    ty: StorageEntryTypeV9::Map {
                        hasher: StorageHasherV9::Blake2_256,
                        key: "T::AccountId".to_string(),
                        value: "AccountInfo".to_string(),
                        linked: false,
                    },
                    fallback: vec![0; 4],
                    docs: docs("The full account information for a particular account ID."),
                },
                StorageEntryMetadataV9 {
                    name: "Number".to_string(),
                    modifier: StorageEntryModifier::Default,
                    ty: StorageEntryTypeV9::Plain("T::BlockNumber".to_string()),
                    fallback: vec![0; 4],
                    docs: docs("The current block number being processed."),
                },
            ],
        }),
        calls: Some(vec![call("remark", &[("_remark", "Vec<u8>")])]),
        events: Some(vec![EventMetadata {
            name: "ExtrinsicSuccess".to_string(),
            args: vec!["DispatchInfo".to_string()],
            docs: docs("An extrinsic completed successfully."),
        }]),
        constants: vec![ModuleConstantMetadata {
            name: "BlockHashCount".to_string(),
            ty: "T::BlockNumber".to_string(),
            value: vec![96, 9, 0, 0],
            docs: docs("Maximum number of block number to block hash mappings to keep."),
        }],
        errors: vec![ErrorMetadata {
            name: "InvalidSpecName".to_string(),
            docs: docs("The runtime name changed across the upgrade."),
        }],
    };

    let balances = ModuleMetadataV9 {
        name: "Balances".to_string(),
        storage: Some(StorageMetadataV9 {
            prefix: "Balances".to_string(),
            items: vec![StorageEntryMetadataV9 {
                name: "Locks".to_string(),
                modifier: StorageEntryModifier::Default,
                ty: StorageEntryTypeV9::DoubleMap {
                    hasher: StorageHasherV9::Twox64Concat,
                    key1: "T::AccountId".to_string(),
                    key2: "LockIdentifier".to_string(),
                    value: "Vec<BalanceLock<T::Balance>>".to_string(),
                    key2_hasher: StorageHasherV9::Blake2_256,
                },
                fallback: vec![0],
                docs: docs("Any liquidity locks on some account balances."),
            }],
        }),
        calls: Some(vec![call(
            "transfer",
            &[("dest", "LookupSource"), ("value", "Compact<T::Balance>")],
        )]),
        events: Some(vec![EventMetadata {
            name: "Transfer".to_string(),
            args: vec![
                "AccountId".to_string(),
                "AccountId".to_string(),
                "Balance".to_string(),
            ],
            docs: docs("Transfer succeeded."),
        }]),
        constants: vec![ModuleConstantMetadata {
            name: "ExistentialDeposit".to_string(),
            ty: "T::Balance".to_string(),
            value: vec![0; 16],
            docs: docs("The minimum amount required to keep an account open."),
        }],
        errors: vec![ErrorMetadata {
            name: "InsufficientBalance".to_string(),
            docs: docs("Balance too low to send value."),
        }],
    };

    let timestamp = ModuleMetadataV9 {
        name: "Timestamp".to_string(),
        storage: None,
        calls: Some(vec![call("set", &[("now", "Compact<T::Moment>")])]),
        events: None,
        constants: Vec::new(),
        errors: Vec::new(),
    };

    MetadataV9 {
        modules: vec![system, balances, timestamp],
    }
}

/// Identifiers `sample_v9` mentions once upgraded to the latest layout.
pub const SAMPLE_V9_TYPES: &[&str] = &[
    "AccountId",
    "AccountInfo",
    "Balance",
    "BalanceLock",
    "BlockNumber",
    "Compact",
    "DispatchInfo",
    "LockIdentifier",
    "LookupSource",
    "Moment",
    "Vec",
    "u8",
];

/// `sample_v9` lifted to `version` by applying the steps directly.
pub fn sample_at(version: u32) -> MetadataPayload {
    let registry = TypeRegistry::new();
    let ctx = UpgradeContext::new(EARLIEST_VERSION, &registry);
    let mut payload = MetadataPayload::from(sample_v9());
    for target in (EARLIEST_VERSION + 1)..=version {
        payload = step_to(target)
            .and_then(|step| step.apply(&payload, &ctx))
            .expect("fixture upgrade");
    }
    payload
}

fn named(path: &[&str], def: SiTypeDef) -> SiType {
    SiType {
        path: path.iter().map(|segment| segment.to_string()).collect(),
        params: Vec::new(),
        def,
        docs: docs(&format!("{} docs", path.join("::"))),
    }
}

fn field(name: &str, ty: u32, type_name: &str) -> SiField {
    SiField {
        name: Some(name.to_string()),
        ty,
        type_name: Some(type_name.to_string()),
        docs: docs(name),
    }
}

/// A single-pallet runtime emitted natively in the V14 layout.
pub fn sample_v14() -> MetadataV14 {
    let types = vec![
        SiType::anonymous(SiTypeDef::Primitive(SiPrimitive::U8)),
        SiType::anonymous(SiTypeDef::Array { len: 32, ty: 0 }),
        named(
            &["sp_core", "crypto", "AccountId32"],
            SiTypeDef::Composite(vec![SiField {
                name: None,
                ty: 1,
                type_name: Some("[u8; 32]".to_string()),
                docs: Vec::new(),
            }]),
        ),
        SiType::anonymous(SiTypeDef::Primitive(SiPrimitive::U128)),
        SiType::anonymous(SiTypeDef::Compact(3)),
        named(
            &["pallet_balances", "pallet", "Call"],
            SiTypeDef::Variant(vec![SiVariant {
                name: "transfer".to_string(),
                fields: vec![field("dest", 2, "AccountIdLookupOf<T>"), field("value", 4, "T::Balance")],
                index: 0,
                docs: docs("Transfer some liquid free balance to another account."),
            }]),
        ),
        named(
            &["pallet_balances", "pallet", "Event"],
            SiTypeDef::Variant(vec![SiVariant {
                name: "Transfer".to_string(),
                fields: vec![
                    field("from", 2, "T::AccountId"),
                    field("to", 2, "T::AccountId"),
                    field("amount", 3, "T::Balance"),
                ],
                index: 2,
                docs: docs("Transfer succeeded."),
            }]),
        ),
        SiType::anonymous(SiTypeDef::HistoricMetaCompat("Weight".to_string())),
    ];

    let lookup = PortableRegistry {
        types: types
            .into_iter()
            .enumerate()
            .map(|(id, ty)| PortableType { id: id as u32, ty })
            .collect(),
    };

    let balances = PalletMetadataV14 {
        name: "Balances".to_string(),
        storage: Some(PalletStorageMetadataV14 {
            prefix: "Balances".to_string(),
            items: vec![StorageEntryMetadataV14 {
                name: "TotalIssuance".to_string(),
                modifier: StorageEntryModifier::Default,
                ty: StorageEntryTypeV14::Plain(3),
                fallback: vec![0; 16],
                docs: docs("The total units issued in the system."),
            }],
        }),
        calls: Some(PalletTypeRef { ty: 5 }),
        events: Some(PalletTypeRef { ty: 6 }),
        constants: vec![PalletConstantMetadataV14 {
            name: "TransferWeight".to_string(),
            ty: 7,
            value: vec![0; 8],
            docs: docs("Weight charged for a transfer."),
        }],
        errors: None,
        index: 5,
    };

    MetadataV14 {
        lookup,
        pallets: vec![balances],
        extrinsic: ExtrinsicMetadataV14 {
            ty: 1,
            version: 4,
            signed_extensions: vec![SignedExtensionMetadataV14 {
                identifier: "CheckNonce".to_string(),
                ty: 0,
                additional_signed: 0,
            }],
        },
        ty: 0,
    }
}

/// Identifiers `sample_v14` mentions.
pub const SAMPLE_V14_TYPES: &[&str] = &[
    "Weight",
    "pallet_balances::pallet::Call",
    "pallet_balances::pallet::Event",
    "sp_core::crypto::AccountId32",
    "u128",
    "u8",
];

/// A registry that knows the chain-specific names used by `sample_v9`.
pub fn chain_registry() -> Arc<TypeRegistry> {
    let registry = TypeRegistry::new();
    for (name, target) in [
        ("AccountId", "[u8; 32]"),
        ("AccountInfo", "(u32, u128)"),
        ("Balance", "u128"),
        ("BalanceLock", "(LockIdentifier, Balance)"),
        ("BlockNumber", "u32"),
        ("DispatchInfo", "(u64, bool)"),
        ("LockIdentifier", "[u8; 8]"),
        ("LookupSource", "AccountId"),
        ("Moment", "u64"),
    ] {
        registry.register_alias(name, target);
    }
    Arc::new(registry)
}

pub fn versioned(payload: impl Into<MetadataPayload>) -> MetadataVersioned {
    MetadataVersioned::new(Arc::new(TypeRegistry::new()), VersionedRecord::new(payload))
}

pub fn sample_versioned(version: u32) -> MetadataVersioned {
    versioned(sample_at(version))
}
