//! The generated schema graph.
//!
//! Declarations live in the [`Registry`](crate::Registry) and are addressed
//! by qualified name. Packages and super-type edges hold those names rather
//! than references, so a declaration can be referenced before its members
//! exist.

use indexmap::IndexMap;
use serde::Serialize;

use crate::diagnostics::Diagnostic;
use crate::error::GenerateError;

/// A generated class, interface, or enumeration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SchemaDeclaration {
    Class(SchemaClass),
    Enum(SchemaEnum),
}

impl SchemaDeclaration {
    /// Simple name.
    pub fn name(&self) -> &str {
        match self {
            SchemaDeclaration::Class(class) => &class.name,
            SchemaDeclaration::Enum(schema_enum) => &schema_enum.name,
        }
    }

    /// Qualified name; identity of the declaration.
    pub fn qualified_name(&self) -> &str {
        match self {
            SchemaDeclaration::Class(class) => &class.qualified_name,
            SchemaDeclaration::Enum(schema_enum) => &schema_enum.qualified_name,
        }
    }

    pub fn as_class(&self) -> Option<&SchemaClass> {
        match self {
            SchemaDeclaration::Class(class) => Some(class),
            SchemaDeclaration::Enum(_) => None,
        }
    }

    pub fn as_enum(&self) -> Option<&SchemaEnum> {
        match self {
            SchemaDeclaration::Enum(schema_enum) => Some(schema_enum),
            SchemaDeclaration::Class(_) => None,
        }
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, SchemaDeclaration::Enum(_))
    }

    pub fn type_parameters(&self) -> &[SchemaTypeParameter] {
        match self {
            SchemaDeclaration::Class(class) => &class.type_parameters,
            SchemaDeclaration::Enum(schema_enum) => &schema_enum.type_parameters,
        }
    }

    pub(crate) fn set_type_parameters(&mut self, parameters: Vec<SchemaTypeParameter>) {
        match self {
            SchemaDeclaration::Class(class) => class.type_parameters = parameters,
            SchemaDeclaration::Enum(schema_enum) => schema_enum.type_parameters = parameters,
        }
    }
}

/// A generated class or interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaClass {
    pub name: String,
    pub qualified_name: String,
    pub is_abstract: bool,
    pub is_interface: bool,
    /// Qualified names of direct super-types, interfaces first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub super_types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<SchemaTypeParameter>,
    pub fields: Vec<SchemaField>,
    pub operations: Vec<SchemaOperation>,
    #[serde(skip)]
    completed: bool,
}

impl SchemaClass {
    /// Create a bare class: no super-types, no members.
    pub fn new(
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        is_abstract: bool,
        is_interface: bool,
    ) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            is_abstract,
            is_interface,
            super_types: Vec::new(),
            type_parameters: Vec::new(),
            fields: Vec::new(),
            operations: Vec::new(),
            completed: false,
        }
    }

    /// Returns true once fields and operations have been added.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Add the resolved members. Rejects a second completion.
    pub(crate) fn complete(
        &mut self,
        fields: Vec<SchemaField>,
        operations: Vec<SchemaOperation>,
    ) -> Result<(), GenerateError> {
        if self.completed {
            return Err(GenerateError::AlreadyCompleted {
                name: self.qualified_name.clone(),
            });
        }
        self.fields = fields;
        self.operations = operations;
        self.completed = true;
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A generated enumeration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaEnum {
    pub name: String,
    pub qualified_name: String,
    pub literals: Vec<SchemaLiteral>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<SchemaTypeParameter>,
}

impl SchemaEnum {
    pub fn new(name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            literals: Vec::new(),
            type_parameters: Vec::new(),
        }
    }

    /// Append a literal. Its value is the number of literals already present.
    pub fn add_literal(&mut self, name: impl Into<String>) {
        let value = self.literals.len();
        self.literals.push(SchemaLiteral {
            name: name.into(),
            value,
        });
    }

    pub fn literal(&self, name: &str) -> Option<&SchemaLiteral> {
        self.literals.iter().find(|l| l.name == name)
    }
}

/// Enumeration literal with its positional ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaLiteral {
    pub name: String,
    pub value: usize,
}

/// A field of a generated class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaField {
    pub name: String,
    /// False for fields declared final in the source.
    pub changeable: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl SchemaField {
    pub fn is_reference(&self) -> bool {
        matches!(self.kind, FieldKind::Reference { .. })
    }
}

/// How a field holds its value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "feature", rename_all = "lowercase")]
pub enum FieldKind {
    /// Owned reference to another generated class or interface.
    Reference {
        target: String,
        /// Always true: references are compositions, never associations.
        containment: bool,
        many: bool,
    },
    /// Primitive, enumeration, or external value.
    Attribute { data_type: TypeRef },
}

/// A generated operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaOperation {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<TypeRef>,
    pub parameters: Vec<SchemaParameter>,
}

impl SchemaOperation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            exceptions: Vec::new(),
            parameters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaParameter {
    pub name: String,
    pub data_type: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaTypeParameter {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeRef>,
}

/// A resolved reference to a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    Primitive {
        name: String,
    },
    /// A declaration present in the registry.
    Declaration {
        name: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        arguments: Vec<TypeRef>,
    },
    /// A type outside the extracted model.
    External {
        name: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        arguments: Vec<TypeRef>,
    },
    /// A type parameter of the owning declaration.
    TypeParameter {
        name: String,
    },
    Wildcard,
    Array {
        element: Box<TypeRef>,
        dimensions: u32,
    },
}

impl TypeRef {
    /// Name of the referenced type, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Primitive { name }
            | TypeRef::Declaration { name, .. }
            | TypeRef::External { name, .. }
            | TypeRef::TypeParameter { name } => Some(name),
            TypeRef::Wildcard => None,
            TypeRef::Array { element, .. } => element.name(),
        }
    }
}

/// A generated package.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaPackage {
    pub name: String,
    pub ns_prefix: String,
    /// Unset on the root package.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ns_uri: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subpackages: Vec<SchemaPackage>,
    /// Qualified names of the declarations filed directly in this package.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classifiers: Vec<String>,
}

impl SchemaPackage {
    /// Package whose name doubles as its namespace prefix.
    pub fn new(name: impl Into<String>, ns_uri: Option<String>) -> Self {
        let name = name.into();
        Self {
            ns_prefix: name.clone(),
            name,
            ns_uri,
            subpackages: Vec::new(),
            classifiers: Vec::new(),
        }
    }

    pub fn subpackage(&self, name: &str) -> Option<&SchemaPackage> {
        self.subpackages.iter().find(|p| p.name == name)
    }

    /// Find a direct subpackage by name, creating it if missing.
    pub fn subpackage_or_insert_with(
        &mut self,
        name: &str,
        create: impl FnOnce() -> SchemaPackage,
    ) -> &mut SchemaPackage {
        match self.subpackages.iter().position(|p| p.name == name) {
            Some(index) => &mut self.subpackages[index],
            None => {
                self.subpackages.push(create());
                let last = self.subpackages.len() - 1;
                &mut self.subpackages[last]
            }
        }
    }

    /// Follow a dotted path of subpackage names.
    pub fn find(&self, path: &str) -> Option<&SchemaPackage> {
        path.split('.')
            .try_fold(self, |package, segment| package.subpackage(segment))
    }
}

/// Result of a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaGraph {
    pub root: SchemaPackage,
    /// Every generated declaration, in creation order.
    pub declarations: IndexMap<String, SchemaDeclaration>,
    /// Referenced types outside the extracted model, sorted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl SchemaGraph {
    pub fn declaration(&self, qualified_name: &str) -> Option<&SchemaDeclaration> {
        self.declarations.get(qualified_name)
    }

    pub fn class(&self, qualified_name: &str) -> Option<&SchemaClass> {
        self.declaration(qualified_name)
            .and_then(SchemaDeclaration::as_class)
    }

    pub fn enumeration(&self, qualified_name: &str) -> Option<&SchemaEnum> {
        self.declaration(qualified_name)
            .and_then(SchemaDeclaration::as_enum)
    }
}
