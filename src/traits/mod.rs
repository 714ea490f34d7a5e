pub mod lookup;
pub mod migration;

// Re-export commonly used types
pub use lookup::{TypeDescriptor, TypeLookup};
pub use migration::{UpgradeFrom, VersionedModel};
