//! The seam between metadata and whatever knows how to decode named types.

use serde::{Deserialize, Serialize};

/// What a registry knows about a named type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// A built-in scalar such as `u32` or `bool`.
    Primitive,
    /// A built-in generic container such as `Vec<T>` taking `params` arguments.
    Generic { params: usize },
    /// A name defined as another type expression.
    Alias(String),
    /// A named entry of a portable registry, by id.
    Lookup(u32),
}

/// Resolves type identifiers to descriptors.
///
/// Unique-type extraction only needs this much of a registry; it never
/// creates or owns one.
pub trait TypeLookup: Send + Sync {
    fn resolve(&self, name: &str) -> Option<TypeDescriptor>;

    fn has_type(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }
}
