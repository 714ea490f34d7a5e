//! Concrete metadata layouts, one module per schema version, and the tagged
//! payload that carries exactly one of them.
//!
//! Each `vN` module defines the layout for version N and, from V10 on, the
//! [`UpgradeFrom`](crate::traits::migration::UpgradeFrom) implementation that
//! produces it from version N-1.

pub mod legacy;
pub mod portable;
pub mod record;
pub mod v10;
pub mod v11;
pub mod v12;
pub mod v13;
pub mod v14;
pub mod v15;
pub mod v9;

use std::sync::Arc;

use derive_more::From;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumDiscriminants, EnumIter, IntoDiscriminant};

use crate::traits::migration::VersionedModel;

pub use record::{MAGIC_NUMBER, VersionedRecord};
pub use v9::MetadataV9;
pub use v10::MetadataV10;
pub use v11::MetadataV11;
pub use v12::MetadataV12;
pub use v13::MetadataV13;
pub use v14::MetadataV14;
pub use v15::MetadataV15;

/// The newest layout. `as_latest` always yields this shape.
pub type MetadataLatest = MetadataV15;

/// A metadata body tagged with its schema version.
///
/// Variants hold their layout behind an `Arc` so that upgraded copies can be
/// handed out without cloning the underlying tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, From, EnumDiscriminants)]
#[strum_discriminants(
    name(MetadataVersion),
    derive(EnumIter, AsRefStr, Display, Hash, PartialOrd, Ord)
)]
#[serde(rename_all = "lowercase")]
pub enum MetadataPayload {
    V9(Arc<MetadataV9>),
    V10(Arc<MetadataV10>),
    V11(Arc<MetadataV11>),
    V12(Arc<MetadataV12>),
    V13(Arc<MetadataV13>),
    V14(Arc<MetadataV14>),
    V15(Arc<MetadataV15>),
}

impl MetadataVersion {
    pub fn number(self) -> u32 {
        match self {
            MetadataVersion::V9 => 9,
            MetadataVersion::V10 => 10,
            MetadataVersion::V11 => 11,
            MetadataVersion::V12 => 12,
            MetadataVersion::V13 => 13,
            MetadataVersion::V14 => 14,
            MetadataVersion::V15 => 15,
        }
    }

    pub fn from_number(version: u32) -> Option<Self> {
        match version {
            9 => Some(MetadataVersion::V9),
            10 => Some(MetadataVersion::V10),
            11 => Some(MetadataVersion::V11),
            12 => Some(MetadataVersion::V12),
            13 => Some(MetadataVersion::V13),
            14 => Some(MetadataVersion::V14),
            15 => Some(MetadataVersion::V15),
            _ => None,
        }
    }
}

impl MetadataPayload {
    /// Schema version of the carried layout.
    pub fn version(&self) -> u32 {
        self.discriminant().number()
    }

    /// The carried layout, if it is `T`.
    pub fn downcast<T: VersionedModel>(&self) -> Option<Arc<T>> {
        T::from_payload(self)
    }

    /// Whether both payloads share the same allocation.
    pub fn ptr_eq(&self, other: &MetadataPayload) -> bool {
        match (self, other) {
            (Self::V9(a), Self::V9(b)) => Arc::ptr_eq(a, b),
            (Self::V10(a), Self::V10(b)) => Arc::ptr_eq(a, b),
            (Self::V11(a), Self::V11(b)) => Arc::ptr_eq(a, b),
            (Self::V12(a), Self::V12(b)) => Arc::ptr_eq(a, b),
            (Self::V13(a), Self::V13(b)) => Arc::ptr_eq(a, b),
            (Self::V14(a), Self::V14(b)) => Arc::ptr_eq(a, b),
            (Self::V15(a), Self::V15(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! versioned_model {
    ($($model:ident => $variant:ident = $version:literal),* $(,)?) => {
        $(
            impl VersionedModel for $model {
                const VERSION: u32 = $version;

                fn from_payload(payload: &MetadataPayload) -> Option<Arc<Self>> {
                    match payload {
                        MetadataPayload::$variant(model) => Some(Arc::clone(model)),
                        _ => None,
                    }
                }

                fn into_payload(model: Arc<Self>) -> MetadataPayload {
                    MetadataPayload::$variant(model)
                }
            }

            impl From<$model> for MetadataPayload {
                fn from(model: $model) -> Self {
                    MetadataPayload::$variant(Arc::new(model))
                }
            }
        )*
    };
}

versioned_model! {
    MetadataV9 => V9 = 9,
    MetadataV10 => V10 = 10,
    MetadataV11 => V11 = 11,
    MetadataV12 => V12 = 12,
    MetadataV13 => V13 = 13,
    MetadataV14 => V14 = 14,
    MetadataV15 => V15 = 15,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_version_numbers_round_trip() {
        for version in MetadataVersion::iter() {
            assert_eq!(MetadataVersion::from_number(version.number()), Some(version));
        }
        assert_eq!(MetadataVersion::from_number(8), None);
        assert_eq!(MetadataVersion::from_number(16), None);
    }

    #[test]
    fn test_payload_reports_version() {
        let payload = MetadataPayload::from(MetadataV12::default());
        assert_eq!(payload.version(), 12);
        assert_eq!(payload.discriminant().as_ref(), "V12");
        assert!(payload.downcast::<MetadataV12>().is_some());
        assert!(payload.downcast::<MetadataV13>().is_none());
    }

    #[test]
    fn test_ptr_eq_tracks_allocation() {
        let payload = MetadataPayload::from(MetadataV9::default());
        let shared = payload.clone();
        let copy = MetadataPayload::from(MetadataV9::default());
        assert!(payload.ptr_eq(&shared));
        assert!(!payload.ptr_eq(&copy));
        assert_eq!(payload, copy);
    }
}
