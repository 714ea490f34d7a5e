/// Record container tests
///
/// This test suite validates:
/// - Binary round trips through the magic-number header
/// - Rejection of foreign, truncated and unknown records
/// - The JSON projection of a record
mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use chain_metadata::prelude::*;

use common::{sample_at, sample_v14, sample_versioned, versioned};

#[test]
fn test_binary_round_trip_every_version() {
    for version in KNOWN_VERSIONS {
        let metadata = sample_versioned(version);
        let bytes = metadata.to_bytes().unwrap();
        assert_eq!(&bytes[..4], b"meta");
        assert_eq!(u32::from(bytes[4]), version);

        let decoded = MetadataVersioned::from_bytes(Arc::new(TypeRegistry::new()), &bytes).unwrap();
        assert_eq!(decoded.version(), version);
        assert_eq!(decoded.record(), metadata.record());
    }
}

#[test]
fn test_decoded_record_upgrades_like_the_original() {
    let bytes = sample_versioned(9).to_bytes().unwrap();
    let decoded = MetadataVersioned::from_bytes(Arc::new(TypeRegistry::new()), &bytes).unwrap();
    assert_eq!(decoded.as_version(13).unwrap(), sample_at(13));
}

#[test]
fn test_hex_round_trip() {
    let record = VersionedRecord::new(sample_v14());
    let hex = record.to_hex().unwrap();
    let metadata = MetadataVersioned::from_hex(Arc::new(TypeRegistry::new()), &hex).unwrap();
    assert_eq!(metadata.record(), &record);
}

#[test]
fn test_foreign_magic_number() {
    let mut bytes = sample_versioned(12).to_bytes().unwrap();
    bytes[..4].copy_from_slice(&0xdead_beef_u32.to_le_bytes());

    assert_matches!(
        MetadataVersioned::from_bytes(Arc::new(TypeRegistry::new()), &bytes),
        Err(MetadataError::InvalidMagicNumber {
            expected: MAGIC_NUMBER,
            found: 0xdead_beef
        })
    );

    let config = MetadataConfig::builder().verify_magic_number(false).build();
    let lenient =
        MetadataVersioned::from_bytes_with(Arc::new(TypeRegistry::new()), &bytes, config).unwrap();
    assert_eq!(lenient.magic_number(), 0xdead_beef);
    assert_eq!(lenient.version(), 12);
}

#[test]
fn test_truncated_header() {
    assert_matches!(
        VersionedRecord::decode(b"met"),
        Err(MetadataError::Truncated { needed: 5, found: 3 })
    );
}

#[test]
fn test_truncated_body() {
    let bytes = sample_versioned(11).to_bytes().unwrap();
    assert_matches!(
        VersionedRecord::decode(&bytes[..bytes.len() / 2]),
        Err(MetadataError::Decode(_))
    );
}

#[test]
fn test_unknown_version_byte() {
    let mut bytes = sample_versioned(13).to_bytes().unwrap();
    bytes[4] = 16;
    assert_matches!(
        VersionedRecord::decode(&bytes),
        Err(MetadataError::UnknownVersion(16))
    );
}

#[test]
fn test_bad_hex() {
    assert_matches!(
        MetadataVersioned::from_hex(Arc::new(TypeRegistry::new()), "0xzz"),
        Err(MetadataError::Hex(_))
    );
}

#[test_log::test]
fn test_json_projection() {
    let registry = Arc::new(TypeRegistry::new());
    let metadata = MetadataVersioned::new(registry.clone(), VersionedRecord::new(sample_v14()));
    let json = metadata.to_json().unwrap();

    assert_eq!(json["magicNumber"], serde_json::json!(MAGIC_NUMBER));
    let body = &json["metadata"]["v14"];
    assert_eq!(body["pallets"][0]["name"], "Balances");
    assert_eq!(body["extrinsic"]["signedExtensions"][0]["identifier"], "CheckNonce");

    // Serialization ran after normalization.
    assert!(registry.has_type("pallet_balances::pallet::Event"));
    assert!(metadata.cache().len() >= 1);
}

#[test]
fn test_json_keeps_intrinsic_version() {
    let json = sample_versioned(9).to_json().unwrap();
    let payload = json["metadata"].as_object().unwrap();
    assert_eq!(payload.keys().collect::<Vec<_>>(), vec!["v9"]);
    assert_eq!(payload["v9"]["modules"].as_array().unwrap().len(), 3);
}

#[test]
fn test_json_round_trip() {
    let metadata = versioned(MetadataV11::default());
    let json = metadata.to_json().unwrap();
    let record: VersionedRecord = serde_json::from_value(json).unwrap();
    assert_eq!(&record, metadata.record());
}
