//! Configuration for metadata handling.
//!
//! Built with `typed-builder`; every field has a default so
//! `MetadataConfig::builder().build()` is equivalent to `MetadataConfig::default()`.

use typed_builder::TypedBuilder;

use crate::errors::{MetadataError, MetadataResult};
use crate::traits::migration::{CALLS_ONLY_VERSION, LATEST_VERSION};

/// Settings for a [`MetadataVersioned`](crate::versioned::MetadataVersioned).
///
/// # Examples
///
/// ```
/// use chain_metadata::config::MetadataConfig;
///
/// let config = MetadataConfig::default();
/// assert_eq!(config.calls_only_version, 14);
/// assert!(config.verify_magic_number);
///
/// let config = MetadataConfig::builder()
///     .calls_only_version(15)
///     .verify_magic_number(false)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
#[builder(doc)]
pub struct MetadataConfig {
    /// Version the calls-only projection is tagged with. Must lie between
    /// [`CALLS_ONLY_VERSION`] and [`LATEST_VERSION`].
    #[builder(default = CALLS_ONLY_VERSION)]
    pub calls_only_version: u32,

    /// Reject encoded records whose magic number is not `"meta"`.
    #[builder(default = true)]
    pub verify_magic_number: bool,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MetadataConfig {
    /// Check that the calls-only pin is producible.
    pub fn validate(&self) -> MetadataResult<()> {
        if !(CALLS_ONLY_VERSION..=LATEST_VERSION).contains(&self.calls_only_version) {
            return Err(MetadataError::UnknownVersion(self.calls_only_version));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MetadataConfig::default();
        assert_eq!(config.calls_only_version, CALLS_ONLY_VERSION);
        assert_eq!(config.verify_magic_number, true);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_unproducible_pin() {
        for pin in [9, 13, 16] {
            let config = MetadataConfig::builder().calls_only_version(pin).build();
            assert!(matches!(
                config.validate(),
                Err(MetadataError::UnknownVersion(v)) if v == pin
            ));
        }
    }
}
