//! Qualified-name registry of generated declarations.

use indexmap::IndexMap;

use crate::error::GenerateError;
use crate::schema::{SchemaClass, SchemaDeclaration};

/// Insertion-ordered map from qualified name to declaration.
///
/// A name is inserted at most once and its declaration is never replaced;
/// later phases only mutate it in place. Iteration follows creation order.
#[derive(Debug, Default)]
pub struct Registry {
    declarations: IndexMap<String, SchemaDeclaration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration under its qualified name.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::DuplicateDeclaration` if the name is taken.
    pub fn insert(&mut self, declaration: SchemaDeclaration) -> Result<(), GenerateError> {
        let name = declaration.qualified_name().to_string();
        if self.declarations.contains_key(&name) {
            return Err(GenerateError::DuplicateDeclaration { name });
        }
        self.declarations.insert(name, declaration);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&SchemaDeclaration> {
        self.declarations.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Result<&mut SchemaDeclaration, GenerateError> {
        self.declarations
            .get_mut(name)
            .ok_or_else(|| GenerateError::UnknownDeclaration {
                name: name.to_string(),
            })
    }

    /// Mutable access to a registered class.
    pub(crate) fn class_mut(&mut self, name: &str) -> Result<&mut SchemaClass, GenerateError> {
        match self.get_mut(name)? {
            SchemaDeclaration::Class(class) => Ok(class),
            SchemaDeclaration::Enum(_) => Err(GenerateError::UnknownDeclaration {
                name: name.to_string(),
            }),
        }
    }

    /// Returns true if `name` is registered as a class or interface.
    pub fn is_class(&self, name: &str) -> bool {
        self.get(name).is_some_and(|d| !d.is_enum())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterate in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaDeclaration)> {
        self.declarations.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> IndexMap<String, SchemaDeclaration> {
        self.declarations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaEnum;

    fn class(name: &str) -> SchemaDeclaration {
        let simple = name.rsplit('.').next().unwrap_or(name);
        SchemaDeclaration::Class(SchemaClass::new(simple, name, false, false))
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut registry = Registry::new();
        registry.insert(class("app.Order")).unwrap();

        let result = registry.insert(class("app.Order"));
        assert!(matches!(
            result,
            Err(GenerateError::DuplicateDeclaration { name }) if name == "app.Order"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut registry = Registry::new();
        for name in ["z.Last", "a.First", "m.Middle"] {
            registry.insert(class(name)).unwrap();
        }
        let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["z.Last", "a.First", "m.Middle"]);
    }

    #[test]
    fn is_class_excludes_enums_and_unknown_names() {
        let mut registry = Registry::new();
        registry.insert(class("app.Order")).unwrap();
        registry
            .insert(SchemaDeclaration::Enum(SchemaEnum::new("State", "app.State")))
            .unwrap();

        assert!(registry.is_class("app.Order"));
        assert!(!registry.is_class("app.State"));
        assert!(!registry.is_class("app.Missing"));
    }

    #[test]
    fn class_mut_rejects_enums() {
        let mut registry = Registry::new();
        registry
            .insert(SchemaDeclaration::Enum(SchemaEnum::new("State", "app.State")))
            .unwrap();
        assert!(registry.class_mut("app.State").is_err());
    }
}
