//! Translation of raw extracted type descriptors into schema type references.

use crate::error::GenerateError;
use crate::externals::ExternalTypeRegistry;
use crate::model::{SourceDataType, SourceType};
use crate::registry::Registry;
use crate::schema::{SchemaTypeParameter, TypeRef};

/// Type names mapped to schema primitives, with the primitive they map to.
pub const PRIMITIVE_TYPES: &[(&str, &str)] = &[
    ("boolean", "boolean"),
    ("byte", "byte"),
    ("char", "char"),
    ("short", "short"),
    ("int", "int"),
    ("long", "long"),
    ("float", "float"),
    ("double", "double"),
    ("string", "string"),
    ("String", "string"),
    ("java.lang.String", "string"),
];

/// Look up the schema primitive for a raw type name.
pub fn primitive_name(full_type: &str) -> Option<&'static str> {
    PRIMITIVE_TYPES
        .iter()
        .find(|(raw, _)| *raw == full_type)
        .map(|(_, primitive)| *primitive)
}

/// Resolves raw type descriptors for fields, parameters, return values,
/// exceptions, and type-parameter bounds.
pub trait DataTypeResolver {
    /// Resolve `raw` as seen from inside `owner`.
    ///
    /// May report new entries to `externals`.
    fn attach(
        &mut self,
        raw: &SourceDataType,
        owner: &SourceType,
        registry: &Registry,
        externals: &mut dyn ExternalTypeRegistry,
    ) -> Result<TypeRef, GenerateError>;

    /// Resolve the generic parameters declared by `owner`.
    fn type_parameters(
        &mut self,
        owner: &SourceType,
        registry: &Registry,
        externals: &mut dyn ExternalTypeRegistry,
    ) -> Result<Vec<SchemaTypeParameter>, GenerateError> {
        owner
            .type_parameters
            .iter()
            .map(|parameter| {
                let bounds = parameter
                    .bounds
                    .iter()
                    .map(|bound| self.attach(bound, owner, registry, externals))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SchemaTypeParameter {
                    name: parameter.name.clone(),
                    bounds,
                })
            })
            .collect()
    }
}

/// Default resolver.
///
/// Order of precedence: primitives, wildcard, the owner's type parameters,
/// registered declarations, and finally external types.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDataTypes;

impl DataTypeResolver for DefaultDataTypes {
    fn attach(
        &mut self,
        raw: &SourceDataType,
        owner: &SourceType,
        registry: &Registry,
        externals: &mut dyn ExternalTypeRegistry,
    ) -> Result<TypeRef, GenerateError> {
        let name = raw.full_type.trim();
        if name.is_empty() {
            return Err(GenerateError::InvalidDataType {
                owner: owner.full_name.clone(),
                message: "empty type name".to_string(),
            });
        }

        let base = if let Some(primitive) = primitive_name(name) {
            TypeRef::Primitive {
                name: primitive.to_string(),
            }
        } else if name == "?" {
            TypeRef::Wildcard
        } else if owner.type_parameters.iter().any(|p| p.name == name) {
            TypeRef::TypeParameter {
                name: name.to_string(),
            }
        } else {
            let arguments = raw
                .generic_arguments
                .iter()
                .map(|argument| self.attach(argument, owner, registry, externals))
                .collect::<Result<Vec<_>, _>>()?;
            if registry.contains(name) {
                TypeRef::Declaration {
                    name: name.to_string(),
                    arguments,
                }
            } else {
                externals.report(name);
                TypeRef::External {
                    name: name.to_string(),
                    arguments,
                }
            }
        };

        if raw.array_dimension > 0 {
            Ok(TypeRef::Array {
                element: Box::new(base),
                dimensions: raw.array_dimension,
            })
        } else {
            Ok(base)
        }
    }
}
