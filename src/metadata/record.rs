//! The self-describing record container: magic number plus tagged payload.

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{
    MetadataPayload, MetadataV9, MetadataV10, MetadataV11, MetadataV12, MetadataV13, MetadataV14,
    MetadataV15,
};
use crate::errors::{MetadataError, MetadataResult};
use crate::traits::migration::{MetadataHeader, VersionedModel, is_known};

/// `"meta"` read as a little-endian `u32`.
pub const MAGIC_NUMBER: u32 = 0x6174_656d;

/// A decoded metadata record.
///
/// The payload variant is the record's intrinsic version and never changes;
/// upgraded shapes are separate values built by
/// [`MetadataVersioned`](crate::versioned::MetadataVersioned).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedRecord {
    pub magic_number: u32,
    #[serde(rename = "metadata")]
    pub payload: MetadataPayload,
}

impl VersionedRecord {
    pub fn new(payload: impl Into<MetadataPayload>) -> Self {
        Self {
            magic_number: MAGIC_NUMBER,
            payload: payload.into(),
        }
    }

    pub fn version(&self) -> u32 {
        self.payload.version()
    }

    /// Encode as header followed by the bincode body of the payload.
    ///
    /// ```
    /// use chain_metadata::metadata::{MetadataV13, VersionedRecord};
    ///
    /// let record = VersionedRecord::new(MetadataV13::default());
    /// let bytes = record.encode()?;
    /// assert_eq!(&bytes[..4], b"meta");
    /// assert_eq!(bytes[4], 13);
    /// assert_eq!(VersionedRecord::decode(&bytes)?, record);
    /// # Ok::<(), chain_metadata::errors::MetadataError>(())
    /// ```
    pub fn encode(&self) -> MetadataResult<Vec<u8>> {
        let header = MetadataHeader {
            magic_number: self.magic_number,
            version: self.version() as u8,
        };
        let body = match &self.payload {
            MetadataPayload::V9(model) => encode_body(model.as_ref())?,
            MetadataPayload::V10(model) => encode_body(model.as_ref())?,
            MetadataPayload::V11(model) => encode_body(model.as_ref())?,
            MetadataPayload::V12(model) => encode_body(model.as_ref())?,
            MetadataPayload::V13(model) => encode_body(model.as_ref())?,
            MetadataPayload::V14(model) => encode_body(model.as_ref())?,
            MetadataPayload::V15(model) => encode_body(model.as_ref())?,
        };

        let mut bytes = Vec::with_capacity(MetadataHeader::SIZE + body.len());
        bytes.extend_from_slice(&header.to_bytes());
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    /// Decode, rejecting foreign magic numbers.
    pub fn decode(bytes: &[u8]) -> MetadataResult<Self> {
        Self::decode_with(bytes, true)
    }

    pub fn decode_with(bytes: &[u8], verify_magic: bool) -> MetadataResult<Self> {
        let header = MetadataHeader::from_bytes(bytes)?;
        if verify_magic && !header.has_valid_magic() {
            return Err(MetadataError::InvalidMagicNumber {
                expected: MAGIC_NUMBER,
                found: header.magic_number,
            });
        }

        let version = u32::from(header.version);
        if !is_known(version) {
            return Err(MetadataError::UnknownVersion(version));
        }

        let body = &bytes[MetadataHeader::SIZE..];
        let payload = match version {
            9 => decode_body::<MetadataV9>(body)?,
            10 => decode_body::<MetadataV10>(body)?,
            11 => decode_body::<MetadataV11>(body)?,
            12 => decode_body::<MetadataV12>(body)?,
            13 => decode_body::<MetadataV13>(body)?,
            14 => decode_body::<MetadataV14>(body)?,
            15 => decode_body::<MetadataV15>(body)?,
            other => return Err(MetadataError::UnknownVersion(other)),
        };

        Ok(Self {
            magic_number: header.magic_number,
            payload,
        })
    }

    /// Decode from a hex string, with or without a `0x` prefix.
    pub fn from_hex(hex_str: &str) -> MetadataResult<Self> {
        let trimmed = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        Self::decode(&hex::decode(trimmed)?)
    }

    pub fn to_hex(&self) -> MetadataResult<String> {
        Ok(format!("0x{}", hex::encode(self.encode()?)))
    }
}

fn encode_body<T: Serialize>(model: &T) -> MetadataResult<Vec<u8>> {
    Ok(bincode::serde::encode_to_vec(
        model,
        bincode::config::standard(),
    )?)
}

fn decode_body<T>(body: &[u8]) -> MetadataResult<MetadataPayload>
where
    T: VersionedModel + DeserializeOwned,
{
    let (model, read): (T, usize) =
        bincode::serde::decode_from_slice(body, bincode::config::standard())?;
    if read < body.len() {
        debug!(
            "VersionedRecord: ignoring {} trailing bytes after v{} body",
            body.len() - read,
            T::VERSION
        );
    }
    Ok(T::into_payload(std::sync::Arc::new(model)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_version_is_rejected() {
        let mut bytes = VersionedRecord::new(MetadataV9::default()).encode().unwrap();
        bytes[4] = 8;
        assert!(matches!(
            VersionedRecord::decode(&bytes),
            Err(MetadataError::UnknownVersion(8))
        ));
    }

    #[test]
    fn test_magic_check_can_be_disabled() {
        let mut bytes = VersionedRecord::new(MetadataV11::default()).encode().unwrap();
        bytes[0] = 0;
        assert!(matches!(
            VersionedRecord::decode(&bytes),
            Err(MetadataError::InvalidMagicNumber { .. })
        ));
        let record = VersionedRecord::decode_with(&bytes, false).unwrap();
        assert_eq!(record.version(), 11);
        assert_ne!(record.magic_number, MAGIC_NUMBER);
    }

    #[test]
    fn test_hex_round_trip() {
        let record = VersionedRecord::new(MetadataV12::default());
        let encoded = record.to_hex().unwrap();
        assert!(encoded.starts_with("0x6d657461"));
        assert_eq!(VersionedRecord::from_hex(&encoded).unwrap(), record);
        assert_eq!(
            VersionedRecord::from_hex(encoded.trim_start_matches("0x")).unwrap(),
            record
        );
    }
}
