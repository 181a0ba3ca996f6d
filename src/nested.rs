//! Placement of nested-type declarations below their owner package.

use crate::error::GenerateError;
use crate::schema::SchemaPackage;

/// Files nested declarations into a package hierarchy.
pub trait NestedTypeStructurer {
    /// Place `declaration` (a qualified name) under `owner`.
    ///
    /// `relative_path` is the declaration's qualified name relative to the
    /// owner package, e.g. `Outer.Inner`.
    fn place(
        &mut self,
        declaration: &str,
        relative_path: &str,
        owner: &mut SchemaPackage,
    ) -> Result<(), GenerateError>;
}

/// Default structurer: one subpackage per enclosing type.
///
/// `Outer.Inner` ends up in subpackage `Outer` of the owner; deeper nesting
/// produces deeper subpackages. Subpackages are reused when they already
/// exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct InnerTypeHierarchy;

impl NestedTypeStructurer for InnerTypeHierarchy {
    fn place(
        &mut self,
        declaration: &str,
        relative_path: &str,
        owner: &mut SchemaPackage,
    ) -> Result<(), GenerateError> {
        let segments: Vec<&str> = relative_path.split('.').collect();
        if relative_path.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(GenerateError::InvalidNestedPath {
                name: declaration.to_string(),
                path: relative_path.to_string(),
            });
        }

        let mut package = owner;
        for segment in &segments[..segments.len() - 1] {
            let ns_uri = package.ns_uri.as_ref().map(|uri| format!("{}.{}", uri, segment));
            package = package.subpackage_or_insert_with(segment, || {
                SchemaPackage::new(*segment, ns_uri)
            });
        }
        package.classifiers.push(declaration.to_string());
        Ok(())
    }
}
