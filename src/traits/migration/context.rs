//! Upgrade context and the binary record header.
//!
//! Every upgrade step receives an [`UpgradeContext`] carrying the intrinsic
//! version of the record being upgraded (not the version of the intermediate
//! layout the step consumes) and the type registry the record is bound to.
//!
//! # Wire Format
//!
//! Encoded records start with a [`MetadataHeader`]:
//!
//! ```text
//! +---------+---------+---------+---------+---------+
//! | Magic[0]| Magic[1]| Magic[2]| Magic[3]| Version |
//! | u32 little-endian ("meta")            | u8      |
//! +---------+---------+---------+---------+---------+
//!   4 bytes                                 1 byte    = 5 bytes header
//! ```
//!
//! The layout body for that version follows directly after the header.

use crate::errors::{MetadataError, MetadataResult};
use crate::metadata::MAGIC_NUMBER;
use crate::registry::TypeRegistry;

/// Context passed to every [`UpgradeFrom`](super::UpgradeFrom) call.
#[derive(Debug, Clone, Copy)]
pub struct UpgradeContext<'a> {
    /// The intrinsic version of the record being upgraded.
    pub original_version: u32,
    /// Registry the record resolves its types against.
    pub registry: &'a TypeRegistry,
}

impl<'a> UpgradeContext<'a> {
    pub fn new(original_version: u32, registry: &'a TypeRegistry) -> Self {
        Self {
            original_version,
            registry,
        }
    }
}

/// Header prepended to encoded metadata records.
///
/// # Example
///
/// ```
/// use chain_metadata::traits::migration::MetadataHeader;
///
/// let header = MetadataHeader::new(14);
/// let bytes = header.to_bytes();
/// assert_eq!(bytes.len(), MetadataHeader::SIZE);
/// assert_eq!(&bytes[..4], b"meta");
///
/// let parsed = MetadataHeader::from_bytes(&bytes).unwrap();
/// assert_eq!(parsed.version, 14);
/// assert!(parsed.has_valid_magic());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataHeader {
    pub magic_number: u32,
    pub version: u8,
}

impl MetadataHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = 5; // 4 (magic) + 1 (version)

    pub fn new(version: u8) -> Self {
        Self {
            magic_number: MAGIC_NUMBER,
            version,
        }
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic_number == MAGIC_NUMBER
    }

    /// Parse the header from the start of `data`. The magic number is not
    /// checked here.
    pub fn from_bytes(data: &[u8]) -> MetadataResult<Self> {
        if data.len() < Self::SIZE {
            return Err(MetadataError::Truncated {
                needed: Self::SIZE,
                found: data.len(),
            });
        }
        let magic_number = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        Ok(Self {
            magic_number,
            version: data[4],
        })
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let magic = self.magic_number.to_le_bytes();
        [magic[0], magic[1], magic[2], magic[3], self.version]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_rejects_short_input() {
        let err = MetadataHeader::from_bytes(&[0x6d, 0x65, 0x74]).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::Truncated {
                needed: 5,
                found: 3
            }
        ));
    }

    #[test]
    fn test_header_detects_foreign_magic() {
        let header = MetadataHeader::from_bytes(&[0, 0, 0, 0, 14]).unwrap();
        assert_eq!(header.version, 14);
        assert!(!header.has_valid_magic());
    }
}
