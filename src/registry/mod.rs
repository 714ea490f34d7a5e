//! An in-memory [`TypeLookup`] implementation.
//!
//! A fresh [`TypeRegistry`] knows the built-in scalars and generic
//! containers. Chain-specific names are added with [`TypeRegistry::register`]
//! or [`TypeRegistry::register_alias`], and the named entries of a portable
//! registry with [`TypeRegistry::register_lookup`], which the latest-version
//! normalization calls for every record bound to the registry.

mod expr;

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use log::debug;

pub use expr::type_names;

use crate::metadata::portable::PortableRegistry;
use crate::traits::lookup::{TypeDescriptor, TypeLookup};

const PRIMITIVES: &[&str] = &[
    "bool", "char", "str", "u8", "u16", "u32", "u64", "u128", "u256", "i8", "i16", "i32", "i64",
    "i128", "i256", "Null", "Text", "Bytes",
];

const GENERICS: &[(&str, usize)] = &[
    ("Vec", 1),
    ("Option", 1),
    ("Compact", 1),
    ("Box", 1),
    ("BTreeSet", 1),
    ("BTreeMap", 2),
    ("Result", 2),
];

#[derive(Debug)]
pub struct TypeRegistry {
    types: RwLock<BTreeMap<String, TypeDescriptor>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// A registry pre-populated with the built-in types.
    pub fn new() -> Self {
        let mut types = BTreeMap::new();
        for name in PRIMITIVES {
            types.insert(name.to_string(), TypeDescriptor::Primitive);
        }
        for (name, params) in GENERICS {
            types.insert(name.to_string(), TypeDescriptor::Generic { params: *params });
        }
        Self {
            types: RwLock::new(types),
        }
    }

    /// A registry that knows nothing.
    pub fn empty() -> Self {
        Self {
            types: RwLock::new(BTreeMap::new()),
        }
    }

    /// Add or replace a definition.
    pub fn register(&self, name: impl Into<String>, descriptor: TypeDescriptor) {
        self.types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), descriptor);
    }

    pub fn register_alias(&self, name: impl Into<String>, target: impl Into<String>) {
        self.register(name, TypeDescriptor::Alias(target.into()));
    }

    /// Register every named type of `lookup` that is not already known.
    ///
    /// Returns the number of newly added names.
    pub fn register_lookup(&self, lookup: &PortableRegistry) -> usize {
        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        let mut added = 0;
        for entry in &lookup.types {
            if let Some(name) = entry.ty.path_name() {
                if !types.contains_key(&name) {
                    types.insert(name, TypeDescriptor::Lookup(entry.id));
                    added += 1;
                }
            }
        }
        debug!("TypeRegistry: registered {} lookup types", added);
        added
    }

    pub fn len(&self) -> usize {
        self.types.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TypeLookup for TypeRegistry {
    fn resolve(&self, name: &str) -> Option<TypeDescriptor> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}
