//! The extracted object model consumed by the generator.
//!
//! These types mirror the JSON document produced by the upstream extraction
//! stage. They are read-only input: nothing in the generator mutates them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Container types whose single generic argument is treated as the declared
/// element type of a field.
pub const COLLECTION_TYPES: &[&str] = &[
    "List",
    "Set",
    "Collection",
    "Iterable",
    "ArrayList",
    "LinkedList",
    "HashSet",
    "LinkedHashSet",
    "TreeSet",
    "java.util.List",
    "java.util.Set",
    "java.util.Collection",
    "java.lang.Iterable",
    "java.util.ArrayList",
    "java.util.LinkedList",
    "java.util.HashSet",
    "java.util.LinkedHashSet",
    "java.util.TreeSet",
];

/// Root of an extracted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceModel {
    /// Name of the project the model was extracted from.
    pub project_name: String,
    /// Root package. Its own name is not used for the generated root.
    pub root: SourcePackage,
}

impl SourceModel {
    /// Build a lookup table of every type in the model by qualified name.
    pub fn index(&self) -> ModelIndex<'_> {
        ModelIndex::new(self)
    }
}

/// A package of the extracted model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcePackage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub subpackages: Vec<SourcePackage>,
    #[serde(default)]
    pub types: Vec<SourceType>,
}

impl SourcePackage {
    /// Returns true if neither this package nor any subpackage contains a type.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.subpackages.iter().all(SourcePackage::is_empty)
    }

    /// Iterate over every type in this package and its subpackages, depth-first.
    pub fn all_types(&self) -> Box<dyn Iterator<Item = &SourceType> + '_> {
        Box::new(
            self.types
                .iter()
                .chain(self.subpackages.iter().flat_map(|p| p.all_types())),
        )
    }
}

/// An extracted class, interface, or enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceType {
    /// Simple name, e.g. `Order`.
    pub name: String,
    /// Qualified name, e.g. `app.Order`. Identity of the type.
    pub full_name: String,
    /// Declared inside another type rather than directly in a package.
    #[serde(default)]
    pub nested: bool,
    #[serde(default)]
    pub super_interfaces: Vec<String>,
    #[serde(default)]
    pub fields: Vec<SourceField>,
    #[serde(default)]
    pub operations: Vec<SourceOperation>,
    #[serde(default)]
    pub type_parameters: Vec<SourceTypeParameter>,
    #[serde(flatten)]
    pub kind: TypeKind,
}

impl SourceType {
    /// Super-class name, if this is a class that declares one.
    pub fn super_class(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Class { super_class, .. } => super_class.as_deref(),
            _ => None,
        }
    }

    /// All super-type names in resolution order: interfaces, then the class.
    pub fn super_type_names(&self) -> impl Iterator<Item = &str> {
        self.super_interfaces
            .iter()
            .map(String::as_str)
            .chain(self.super_class())
    }

    pub fn is_enumeration(&self) -> bool {
        matches!(self.kind, TypeKind::Enumeration { .. })
    }
}

/// Variant-specific attributes of a source type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeKind {
    Class {
        #[serde(default)]
        is_abstract: bool,
        #[serde(default)]
        super_class: Option<String>,
    },
    Interface,
    Enumeration {
        #[serde(default)]
        literals: Vec<SourceLiteral>,
    },
}

/// A literal of an extracted enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceLiteral {
    pub name: String,
    /// Index reported by the extractor. Not used for generated ordinals.
    #[serde(default)]
    pub ordinal: Option<u32>,
}

/// A field of an extracted type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceField {
    pub identifier: String,
    #[serde(rename = "type")]
    pub data_type: SourceDataType,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_static: bool,
}

/// An operation (method) of an extracted type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceOperation {
    pub name: String,
    /// Absent for operations without a return value.
    #[serde(default)]
    pub return_type: Option<SourceDataType>,
    #[serde(default)]
    pub throws: Vec<SourceDataType>,
    #[serde(default)]
    pub parameters: Vec<SourceParameter>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
}

/// A parameter of an extracted operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceParameter {
    pub identifier: String,
    #[serde(rename = "type")]
    pub data_type: SourceDataType,
}

/// Raw type descriptor as produced by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDataType {
    pub full_type: String,
    #[serde(default)]
    pub generic_arguments: Vec<SourceDataType>,
    #[serde(default)]
    pub array_dimension: u32,
}

impl SourceDataType {
    /// Plain, non-generic, non-array type.
    pub fn named(full_type: impl Into<String>) -> Self {
        Self {
            full_type: full_type.into(),
            generic_arguments: Vec::new(),
            array_dimension: 0,
        }
    }

    /// Returns true for a recognised collection container with one argument.
    pub fn is_list(&self) -> bool {
        self.generic_arguments.len() == 1 && COLLECTION_TYPES.contains(&self.full_type.as_str())
    }

    /// Returns true if a value of this type holds many elements.
    pub fn is_many(&self) -> bool {
        self.is_list() || self.array_dimension > 0
    }

    /// The type name a field of this type refers to.
    ///
    /// For collection containers this is the element type, otherwise the
    /// type itself.
    pub fn referenced_type_name(&self) -> &str {
        if self.is_list() {
            &self.generic_arguments[0].full_type
        } else {
            &self.full_type
        }
    }
}

/// A generic type parameter declared by a source type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceTypeParameter {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<SourceDataType>,
}

/// Lookup of model types by qualified name.
///
/// If a name occurs more than once, the first occurrence in depth-first
/// package order wins.
#[derive(Debug, Clone)]
pub struct ModelIndex<'m> {
    types: HashMap<&'m str, &'m SourceType>,
}

impl<'m> ModelIndex<'m> {
    pub fn new(model: &'m SourceModel) -> Self {
        let mut types = HashMap::new();
        for ty in model.root.all_types() {
            types.entry(ty.full_name.as_str()).or_insert(ty);
        }
        Self { types }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&'m SourceType> {
        self.types.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
