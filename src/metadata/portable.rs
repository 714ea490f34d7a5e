//! The portable type registry used by V14 and later layouts.
//!
//! From V14 on, metadata stops embedding type expressions inline. Every type
//! is stored once in a [`PortableRegistry`] and referenced by its numeric id.
//! Records upgraded from string-typed layouts carry their legacy expressions
//! as [`SiTypeDef::HistoricMetaCompat`] entries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SiPrimitive {
    Bool,
    Char,
    Str,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    I8,
    I16,
    I32,
    I64,
    I128,
    I256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiField {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: u32,
    pub type_name: Option<String>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiVariant {
    pub name: String,
    pub fields: Vec<SiField>,
    pub index: u8,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiTypeParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SiTypeDef {
    Composite(Vec<SiField>),
    Variant(Vec<SiVariant>),
    Sequence(u32),
    #[serde(rename_all = "camelCase")]
    Array { len: u32, ty: u32 },
    Tuple(Vec<u32>),
    Primitive(SiPrimitive),
    Compact(u32),
    #[serde(rename_all = "camelCase")]
    BitSequence { bit_store_type: u32, bit_order_type: u32 },
    HistoricMetaCompat(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiType {
    pub path: Vec<String>,
    pub params: Vec<SiTypeParameter>,
    pub def: SiTypeDef,
    pub docs: Vec<String>,
}

impl SiType {
    /// A type with no path, parameters, or docs.
    pub fn anonymous(def: SiTypeDef) -> Self {
        Self {
            path: Vec::new(),
            params: Vec::new(),
            def,
            docs: Vec::new(),
        }
    }

    /// The `::`-joined path, or `None` for anonymous types.
    pub fn path_name(&self) -> Option<String> {
        (!self.path.is_empty()).then(|| self.path.join("::"))
    }

    fn without_docs(&self) -> Self {
        let strip_fields = |fields: &[SiField]| -> Vec<SiField> {
            fields
                .iter()
                .map(|field| SiField {
                    docs: Vec::new(),
                    ..field.clone()
                })
                .collect()
        };

        let def = match &self.def {
            SiTypeDef::Composite(fields) => SiTypeDef::Composite(strip_fields(fields)),
            SiTypeDef::Variant(variants) => SiTypeDef::Variant(
                variants
                    .iter()
                    .map(|variant| SiVariant {
                        name: variant.name.clone(),
                        fields: strip_fields(&variant.fields),
                        index: variant.index,
                        docs: Vec::new(),
                    })
                    .collect(),
            ),
            other => other.clone(),
        };

        Self {
            path: self.path.clone(),
            params: self.params.clone(),
            def,
            docs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortableType {
    pub id: u32,
    #[serde(rename = "type")]
    pub ty: SiType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortableRegistry {
    pub types: Vec<PortableType>,
}

impl PortableRegistry {
    /// Look up a type by id.
    ///
    /// Registries built by this crate store type `n` at position `n`, so the
    /// direct index is tried before falling back to a scan.
    pub fn resolve(&self, id: u32) -> Option<&SiType> {
        match self.types.get(id as usize) {
            Some(entry) if entry.id == id => Some(&entry.ty),
            _ => self
                .types
                .iter()
                .find(|entry| entry.id == id)
                .map(|entry| &entry.ty),
        }
    }

    /// A copy of this registry with every doc comment removed. Ids are kept.
    pub fn without_docs(&self) -> Self {
        Self {
            types: self
                .types
                .iter()
                .map(|entry| PortableType {
                    id: entry.id,
                    ty: entry.ty.without_docs(),
                })
                .collect(),
        }
    }
}

/// Incrementally assembles a [`PortableRegistry`], interning legacy type
/// expressions so each distinct expression gets exactly one id.
#[derive(Debug, Default)]
pub struct PortableRegistryBuilder {
    types: Vec<PortableType>,
    compat: HashMap<String, u32>,
}

impl PortableRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a type and return its id.
    pub fn push(&mut self, ty: SiType) -> u32 {
        let id = self.types.len() as u32;
        self.types.push(PortableType { id, ty });
        id
    }

    /// Id of the historic compatibility entry for `expression`, created on first use.
    pub fn compat(&mut self, expression: &str) -> u32 {
        if let Some(id) = self.compat.get(expression) {
            return *id;
        }
        let id = self.push(SiType::anonymous(SiTypeDef::HistoricMetaCompat(
            expression.to_string(),
        )));
        self.compat.insert(expression.to_string(), id);
        id
    }

    /// Id of a tuple over the compatibility entries for `expressions`.
    pub fn compat_tuple(&mut self, expressions: &[String]) -> u32 {
        let members = expressions
            .iter()
            .map(|expression| self.compat(expression))
            .collect();
        self.push(SiType::anonymous(SiTypeDef::Tuple(members)))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn build(self) -> PortableRegistry {
        PortableRegistry { types: self.types }
    }
}
