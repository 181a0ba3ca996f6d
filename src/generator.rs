//! Generation entry points.

use tracing::info;

use crate::classifier::SchemaGraphBuilder;
use crate::config::GeneratorConfig;
use crate::datatype::{DataTypeResolver, DefaultDataTypes};
use crate::error::GenerateError;
use crate::externals::{ExternalTypeHierarchy, ExternalTypeRegistry};
use crate::model::SourceModel;
use crate::nested::{InnerTypeHierarchy, NestedTypeStructurer};
use crate::packages::PackageTreeBuilder;
use crate::schema::SchemaGraph;
use crate::selection::{ConfigSelection, SelectionPolicy};

/// Generate a schema graph with the default collaborators.
///
/// # Errors
///
/// Returns `GenerateError` if the model violates a generation precondition,
/// e.g. an inheritance cycle.
pub fn generate(model: &SourceModel, config: &GeneratorConfig) -> Result<SchemaGraph, GenerateError> {
    Generator::new(config.clone()).generate(model)
}

/// A configured generation run.
///
/// Collaborators default to the config-driven selection policy, the default
/// data-type resolver, and the default structuring hierarchies; each can be
/// replaced before calling [`generate`](Generator::generate).
pub struct Generator {
    config: GeneratorConfig,
    selection: Box<dyn SelectionPolicy>,
    data_types: Box<dyn DataTypeResolver>,
    externals: Box<dyn ExternalTypeRegistry>,
    nested: Box<dyn NestedTypeStructurer>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            selection: Box::new(ConfigSelection::new(&config)),
            data_types: Box::new(DefaultDataTypes),
            externals: Box::new(ExternalTypeHierarchy::new()),
            nested: Box::new(InnerTypeHierarchy),
            config,
        }
    }

    pub fn with_selection(mut self, selection: impl SelectionPolicy + 'static) -> Self {
        self.selection = Box::new(selection);
        self
    }

    pub fn with_data_types(mut self, data_types: impl DataTypeResolver + 'static) -> Self {
        self.data_types = Box::new(data_types);
        self
    }

    pub fn with_externals(mut self, externals: impl ExternalTypeRegistry + 'static) -> Self {
        self.externals = Box::new(externals);
        self
    }

    pub fn with_nested(mut self, nested: impl NestedTypeStructurer + 'static) -> Self {
        self.nested = Box::new(nested);
        self
    }

    /// Run generation over the whole model.
    pub fn generate(self, model: &SourceModel) -> Result<SchemaGraph, GenerateError> {
        let Generator {
            config,
            selection,
            data_types,
            externals,
            mut nested,
        } = self;

        let mut classifiers = SchemaGraphBuilder::new(model, selection, data_types, externals);
        let root = PackageTreeBuilder::new(
            &mut classifiers,
            nested.as_mut(),
            &config,
            &model.project_name,
        )
        .build_package_tree(&model.root)?;

        let (registry, external_types, diagnostics) = classifiers.into_parts();
        info!(
            project = %model.project_name,
            declarations = registry.len(),
            external_types = external_types.len(),
            "generated schema graph"
        );

        Ok(SchemaGraph {
            root,
            declarations: registry.into_inner(),
            external_types,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::AllowAll;
    use serde_json::json;

    fn model() -> SourceModel {
        serde_json::from_value(json!({
            "project_name": "shop",
            "root": {
                "subpackages": [{
                    "name": "app",
                    "full_name": "app",
                    "types": [{
                        "kind": "class",
                        "name": "Counter",
                        "full_name": "app.Counter",
                        "fields": [{ "identifier": "total", "type": { "full_type": "int" }, "is_static": true }]
                    }]
                }]
            }
        }))
        .unwrap()
    }

    #[test]
    fn default_selection_drops_static_fields() {
        let graph = generate(&model(), &GeneratorConfig::default()).unwrap();
        assert!(graph.class("app.Counter").unwrap().fields.is_empty());
    }

    #[test]
    fn replaced_selection_is_used() {
        let graph = Generator::new(GeneratorConfig::default())
            .with_selection(AllowAll)
            .generate(&model())
            .unwrap();
        assert_eq!(graph.class("app.Counter").unwrap().fields.len(), 1);
    }
}
