//! Collecting the distinct type identifiers a latest-layout record mentions.

use std::collections::{BTreeSet, HashSet};

use log::{debug, warn};

use crate::errors::{MetadataError, MetadataResult};
use crate::metadata::MetadataLatest;
use crate::metadata::portable::{PortableRegistry, SiTypeDef};
use crate::metadata::v14::StorageEntryTypeV14;
use crate::registry::type_names;
use crate::traits::lookup::TypeLookup;

struct TypeWalker<'a> {
    lookup: &'a PortableRegistry,
    visited: HashSet<u32>,
    pending: Vec<u32>,
    names: BTreeSet<String>,
}

impl<'a> TypeWalker<'a> {
    fn new(lookup: &'a PortableRegistry) -> Self {
        Self {
            lookup,
            visited: HashSet::new(),
            pending: Vec::new(),
            names: BTreeSet::new(),
        }
    }

    fn push(&mut self, id: u32) {
        if self.visited.insert(id) {
            self.pending.push(id);
        }
    }

    fn run(&mut self) {
        let lookup = self.lookup;
        while let Some(id) = self.pending.pop() {
            let Some(ty) = lookup.resolve(id) else {
                // Dangling reference: keep it so resolution reports it.
                self.names.insert(format!("lookup#{id}"));
                continue;
            };

            if let Some(name) = ty.path_name() {
                self.names.insert(name);
            }
            for param in &ty.params {
                if let Some(param_ty) = param.ty {
                    self.push(param_ty);
                }
            }

            match &ty.def {
                SiTypeDef::Composite(fields) => {
                    for field in fields {
                        self.push(field.ty);
                    }
                }
                SiTypeDef::Variant(variants) => {
                    for field in variants.iter().flat_map(|variant| &variant.fields) {
                        self.push(field.ty);
                    }
                }
                SiTypeDef::Sequence(inner) | SiTypeDef::Compact(inner) => self.push(*inner),
                SiTypeDef::Array { ty, .. } => self.push(*ty),
                SiTypeDef::Tuple(members) => {
                    for member in members {
                        self.push(*member);
                    }
                }
                SiTypeDef::Primitive(primitive) => {
                    self.names.insert(primitive.as_ref().to_string());
                }
                SiTypeDef::BitSequence {
                    bit_store_type,
                    bit_order_type,
                } => {
                    self.push(*bit_store_type);
                    self.push(*bit_order_type);
                }
                SiTypeDef::HistoricMetaCompat(expression) => {
                    self.names.extend(type_names(expression));
                }
            }
        }
    }
}

/// Walk every pallet's call, event, error, storage and constant types through
/// the portable registry and collect the identifiers found.
///
/// Each identifier is checked against `registry`. With
/// `throw_on_unresolved` the first unresolved one (in sorted order) fails the
/// call with [`MetadataError::UnresolvedType`]; otherwise unresolved
/// identifiers stay in the result.
pub fn extract(
    latest: &MetadataLatest,
    registry: &dyn TypeLookup,
    throw_on_unresolved: bool,
) -> MetadataResult<BTreeSet<String>> {
    let mut walker = TypeWalker::new(&latest.lookup);

    for pallet in &latest.pallets {
        for type_ref in [pallet.calls, pallet.events, pallet.errors].into_iter().flatten() {
            walker.push(type_ref.ty);
        }
        for item in pallet.storage.iter().flat_map(|storage| &storage.items) {
            match &item.ty {
                StorageEntryTypeV14::Plain(value) => walker.push(*value),
                StorageEntryTypeV14::Map { key, value, .. } => {
                    walker.push(*key);
                    walker.push(*value);
                }
            }
        }
        for constant in &pallet.constants {
            walker.push(constant.ty);
        }
    }
    walker.run();

    let names = walker.names;
    let mut unresolved = 0;
    for name in &names {
        if registry.has_type(name) {
            continue;
        }
        if throw_on_unresolved {
            return Err(MetadataError::UnresolvedType(name.clone()));
        }
        warn!("UniqueTypes: unable to resolve {}", name);
        unresolved += 1;
    }

    debug!(
        "UniqueTypes: {} identifiers across {} pallets ({} unresolved)",
        names.len(),
        latest.pallets.len(),
        unresolved
    );
    Ok(names)
}
