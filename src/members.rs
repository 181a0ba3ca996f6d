//! Member resolution: fields and operations of a registered class.

use crate::datatype::DataTypeResolver;
use crate::error::GenerateError;
use crate::externals::ExternalTypeRegistry;
use crate::model::{SourceField, SourceOperation, SourceType};
use crate::registry::Registry;
use crate::schema::{FieldKind, SchemaField, SchemaOperation, SchemaParameter};
use crate::selection::{Candidate, SelectionPolicy};

/// Turns a source type's fields and operations into schema members.
///
/// Never triggers new declarations: by the time members are resolved every
/// type that could be referenced is already registered.
pub struct MemberResolver<'a> {
    selection: &'a mut dyn SelectionPolicy,
    data_types: &'a mut dyn DataTypeResolver,
    externals: &'a mut dyn ExternalTypeRegistry,
}

impl<'a> MemberResolver<'a> {
    pub fn new(
        selection: &'a mut dyn SelectionPolicy,
        data_types: &'a mut dyn DataTypeResolver,
        externals: &'a mut dyn ExternalTypeRegistry,
    ) -> Self {
        Self {
            selection,
            data_types,
            externals,
        }
    }

    /// Add fields, then operations, of `source` to the class registered as
    /// `name`.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::AlreadyCompleted` if the class already has its
    /// members, and propagates data-type resolution errors unchanged.
    pub fn complete_members(
        &mut self,
        registry: &mut Registry,
        name: &str,
        source: &SourceType,
    ) -> Result<(), GenerateError> {
        if registry.class_mut(name)?.is_completed() {
            return Err(GenerateError::AlreadyCompleted {
                name: name.to_string(),
            });
        }

        let fields = self.resolve_fields(registry, source)?;
        let operations = self.resolve_operations(registry, source)?;
        registry.class_mut(name)?.complete(fields, operations)
    }

    fn resolve_fields(
        &mut self,
        registry: &Registry,
        source: &SourceType,
    ) -> Result<Vec<SchemaField>, GenerateError> {
        let mut fields = Vec::new();
        for field in &source.fields {
            if self.selection.allows(Candidate::Field(field)) {
                fields.push(self.resolve_field(registry, source, field)?);
            }
        }
        Ok(fields)
    }

    fn resolve_field(
        &mut self,
        registry: &Registry,
        source: &SourceType,
        field: &SourceField,
    ) -> Result<SchemaField, GenerateError> {
        let target = field.data_type.referenced_type_name();
        let kind = if registry.is_class(target) {
            FieldKind::Reference {
                target: target.to_string(),
                containment: true,
                many: field.data_type.is_many(),
            }
        } else {
            FieldKind::Attribute {
                data_type: self.data_types.attach(
                    &field.data_type,
                    source,
                    registry,
                    self.externals,
                )?,
            }
        };

        Ok(SchemaField {
            name: field.identifier.clone(),
            changeable: !field.is_final,
            kind,
        })
    }

    fn resolve_operations(
        &mut self,
        registry: &Registry,
        source: &SourceType,
    ) -> Result<Vec<SchemaOperation>, GenerateError> {
        let mut operations = Vec::new();
        for operation in &source.operations {
            if self.selection.allows(Candidate::Operation(operation)) {
                operations.push(self.resolve_operation(registry, source, operation)?);
            }
        }
        Ok(operations)
    }

    fn resolve_operation(
        &mut self,
        registry: &Registry,
        source: &SourceType,
        operation: &SourceOperation,
    ) -> Result<SchemaOperation, GenerateError> {
        let mut schema_operation = SchemaOperation::new(&operation.name);

        // absent return type means no return value
        if let Some(return_type) = &operation.return_type {
            schema_operation.return_type =
                Some(self.data_types.attach(return_type, source, registry, self.externals)?);
        }
        for exception in &operation.throws {
            let exception = self.data_types.attach(exception, source, registry, self.externals)?;
            schema_operation.exceptions.push(exception);
        }
        for parameter in &operation.parameters {
            let data_type =
                self.data_types
                    .attach(&parameter.data_type, source, registry, self.externals)?;
            schema_operation.parameters.push(SchemaParameter {
                name: parameter.identifier.clone(),
                data_type,
            });
        }
        Ok(schema_operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatype::DefaultDataTypes;
    use crate::externals::ExternalTypeHierarchy;
    use crate::schema::{SchemaClass, SchemaDeclaration, SchemaEnum, TypeRef};
    use crate::selection::AllowAll;
    use serde_json::json;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .insert(SchemaDeclaration::Class(SchemaClass::new(
                "Customer",
                "app.Customer",
                false,
                false,
            )))
            .unwrap();
        registry
            .insert(SchemaDeclaration::Class(SchemaClass::new(
                "Order", "app.Order", false, false,
            )))
            .unwrap();
        registry
            .insert(SchemaDeclaration::Enum(SchemaEnum::new("State", "app.State")))
            .unwrap();
        registry
    }

    fn customer() -> SourceType {
        serde_json::from_value(json!({
            "kind": "class",
            "name": "Customer",
            "full_name": "app.Customer",
            "fields": [
                { "identifier": "orders", "type": { "full_type": "List", "generic_arguments": [{ "full_type": "app.Order" }] } },
                { "identifier": "favourite", "type": { "full_type": "app.Order" } },
                { "identifier": "state", "type": { "full_type": "app.State" } },
                { "identifier": "id", "type": { "full_type": "long" }, "is_final": true },
                { "identifier": "clock", "type": { "full_type": "lib.Clock" } }
            ],
            "operations": [
                {
                    "name": "place",
                    "return_type": { "full_type": "app.Order" },
                    "throws": [{ "full_type": "lib.Failure" }],
                    "parameters": [
                        { "identifier": "total", "type": { "full_type": "double" } },
                        { "identifier": "state", "type": { "full_type": "app.State" } }
                    ]
                },
                { "name": "reset" },
                { "name": "reset" }
            ]
        }))
        .unwrap()
    }

    fn complete(registry: &mut Registry, source: &SourceType) -> Result<(), GenerateError> {
        let mut selection = AllowAll;
        let mut data_types = DefaultDataTypes;
        let mut externals = ExternalTypeHierarchy::new();
        MemberResolver::new(&mut selection, &mut data_types, &mut externals).complete_members(
            registry,
            &source.full_name,
            source,
        )
    }

    #[test]
    fn fields_are_classified_by_registry_presence() {
        let mut registry = registry();
        complete(&mut registry, &customer()).unwrap();
        let class = registry.get("app.Customer").unwrap().as_class().unwrap();

        assert_eq!(
            class.field("orders").unwrap().kind,
            FieldKind::Reference {
                target: "app.Order".into(),
                containment: true,
                many: true
            }
        );
        assert!(matches!(
            class.field("favourite").unwrap().kind,
            FieldKind::Reference { many: false, containment: true, .. }
        ));
        assert!(matches!(
            &class.field("state").unwrap().kind,
            FieldKind::Attribute { data_type: TypeRef::Declaration { name, .. } } if name == "app.State"
        ));
        assert!(matches!(
            &class.field("clock").unwrap().kind,
            FieldKind::Attribute { data_type: TypeRef::External { name, .. } } if name == "lib.Clock"
        ));
    }

    #[test]
    fn final_fields_are_not_changeable() {
        let mut registry = registry();
        complete(&mut registry, &customer()).unwrap();
        let class = registry.get("app.Customer").unwrap().as_class().unwrap();

        assert!(!class.field("id").unwrap().changeable);
        assert!(class.field("orders").unwrap().changeable);
    }

    #[test]
    fn operations_keep_source_order_and_duplicates() {
        let mut registry = registry();
        complete(&mut registry, &customer()).unwrap();
        let class = registry.get("app.Customer").unwrap().as_class().unwrap();

        let names: Vec<&str> = class.operations.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["place", "reset", "reset"]);

        let place = &class.operations[0];
        assert_eq!(place.return_type.as_ref().and_then(TypeRef::name), Some("app.Order"));
        assert_eq!(place.exceptions[0].name(), Some("lib.Failure"));
        let params: Vec<&str> = place.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, vec!["total", "state"]);

        assert!(class.operations[1].return_type.is_none());
    }

    #[test]
    fn second_completion_is_rejected() {
        let mut registry = registry();
        let source = customer();
        complete(&mut registry, &source).unwrap();

        let result = complete(&mut registry, &source);
        assert!(matches!(result, Err(GenerateError::AlreadyCompleted { .. })));
        let class = registry.get("app.Customer").unwrap().as_class().unwrap();
        assert_eq!(class.fields.len(), 5);
    }
}
