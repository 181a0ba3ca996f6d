//! Package tree builder: mirrors the source package hierarchy.

use tracing::debug;

use crate::classifier::SchemaGraphBuilder;
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::model::SourcePackage;
use crate::nested::NestedTypeStructurer;
use crate::schema::SchemaPackage;
use crate::selection::Candidate;

/// Namespace URI of a non-root package.
///
/// Depends only on its inputs, so repeated runs over the same model produce
/// identical URIs.
pub fn namespace_uri(project_name: &str, package_path: &str) -> String {
    format!("{}/{}", project_name, package_path)
}

/// Path of a nested type's qualified name relative to its package.
///
/// Names that are not below the package are returned unchanged.
pub fn relative_path<'a>(type_name: &'a str, package_path: &str) -> &'a str {
    if package_path.is_empty() {
        return type_name;
    }
    type_name
        .strip_prefix(package_path)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(type_name)
}

/// Walks the source package tree once, depth-first, creating the matching
/// schema packages and asking the graph builder for each contained type.
pub struct PackageTreeBuilder<'g, 'm> {
    classifiers: &'g mut SchemaGraphBuilder<'m>,
    nested: &'g mut dyn NestedTypeStructurer,
    config: &'g GeneratorConfig,
    project_name: &'g str,
}

impl<'g, 'm> PackageTreeBuilder<'g, 'm> {
    pub fn new(
        classifiers: &'g mut SchemaGraphBuilder<'m>,
        nested: &'g mut dyn NestedTypeStructurer,
        config: &'g GeneratorConfig,
        project_name: &'g str,
    ) -> Self {
        Self {
            classifiers,
            nested,
            config,
            project_name,
        }
    }

    /// Build the schema package tree for `root`, then run the completion
    /// pass and the selection summary.
    ///
    /// # Errors
    ///
    /// Propagates any error from declaration resolution, nested-type
    /// placement, or member completion.
    pub fn build_package_tree(
        &mut self,
        root: &'m SourcePackage,
    ) -> Result<SchemaPackage, GenerateError> {
        let mut package = self.build_root()?;
        self.populate(&mut package, root)?;
        self.classifiers.complete_all()?;
        self.classifiers.report_selection();
        Ok(package)
    }

    /// Root package: configured name, no namespace URI, optional placeholder.
    fn build_root(&mut self) -> Result<SchemaPackage, GenerateError> {
        let mut root = SchemaPackage::new(&self.config.default_package, None);
        if self.config.dummy_class {
            let placeholder = self
                .classifiers
                .declare_placeholder(&self.config.dummy_name)?
                .qualified_name()
                .to_string();
            root.classifiers.push(placeholder);
        }
        Ok(root)
    }

    fn build_package(&mut self, source: &'m SourcePackage) -> Result<SchemaPackage, GenerateError> {
        let uri = namespace_uri(self.project_name, &source.full_name);
        debug!(package = %source.full_name, %uri, "building package");
        let mut package = SchemaPackage::new(&source.name, Some(uri));
        self.populate(&mut package, source)?;
        Ok(package)
    }

    /// Add allowed subpackages, then allowed types.
    fn populate(
        &mut self,
        package: &mut SchemaPackage,
        source: &'m SourcePackage,
    ) -> Result<(), GenerateError> {
        for subpackage in &source.subpackages {
            if self.classifiers.allows(Candidate::Package(subpackage)) {
                let child = self.build_package(subpackage)?;
                package.subpackages.push(child);
            }
        }

        for ty in &source.types {
            if !self.classifiers.allows(Candidate::Type(ty)) {
                continue;
            }
            let name = self.classifiers.resolve(ty)?.qualified_name().to_string();
            if ty.nested {
                let path = relative_path(&ty.full_name, &source.full_name);
                self.nested.place(&name, path, package)?;
            } else {
                package.classifiers.push(name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_uri_joins_project_and_path() {
        assert_eq!(namespace_uri("P", "a.b.c"), "P/a.b.c");
    }

    #[test]
    fn relative_path_strips_package_prefix() {
        assert_eq!(relative_path("app.Outer.Inner", "app"), "Outer.Inner");
        assert_eq!(relative_path("app.Outer.Inner", ""), "app.Outer.Inner");
        assert_eq!(relative_path("other.Inner", "app"), "other.Inner");
        assert_eq!(relative_path("application.Inner", "app"), "application.Inner");
    }
}
