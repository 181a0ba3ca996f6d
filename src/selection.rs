//! Inclusion policy consulted before generating any model element.

use serde::Serialize;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::model::{SourceField, SourceOperation, SourcePackage, SourceType};

/// An element the generator is about to produce.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    Package(&'a SourcePackage),
    Type(&'a SourceType),
    Field(&'a SourceField),
    Operation(&'a SourceOperation),
}

/// Yes/no gate for packages, types, fields, and operations.
///
/// `allows` must not change what the generator sees; implementations may
/// count decisions for [`report`](SelectionPolicy::report).
pub trait SelectionPolicy {
    fn allows(&mut self, candidate: Candidate<'_>) -> bool;

    /// Emit a summary of the decisions made so far.
    fn report(&self) {}
}

/// Allowed and excluded counts for one kind of candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionCount {
    pub allowed: usize,
    pub excluded: usize,
}

impl SelectionCount {
    fn record(&mut self, allowed: bool) -> bool {
        if allowed {
            self.allowed += 1;
        } else {
            self.excluded += 1;
        }
        allowed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionReport {
    pub packages: SelectionCount,
    pub types: SelectionCount,
    pub fields: SelectionCount,
    pub operations: SelectionCount,
}

/// Selection driven by the extraction toggles of a [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct ConfigSelection {
    config: GeneratorConfig,
    report: SelectionReport,
}

impl ConfigSelection {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            config: config.clone(),
            report: SelectionReport::default(),
        }
    }

    pub fn summary(&self) -> &SelectionReport {
        &self.report
    }

    fn allows_package(&self, package: &SourcePackage) -> bool {
        self.config.extract_empty_packages || !package.is_empty()
    }

    fn allows_type(&self, ty: &SourceType) -> bool {
        !ty.nested || self.config.extract_nested_types
    }

    fn allows_field(&self, field: &SourceField) -> bool {
        !field.is_static || self.config.extract_static_attributes
    }

    fn allows_operation(&self, operation: &SourceOperation) -> bool {
        (!operation.is_static || self.config.extract_static_methods)
            && (!operation.is_abstract || self.config.extract_abstract_methods)
    }
}

impl SelectionPolicy for ConfigSelection {
    fn allows(&mut self, candidate: Candidate<'_>) -> bool {
        match candidate {
            Candidate::Package(package) => {
                let allowed = self.allows_package(package);
                self.report.packages.record(allowed)
            }
            Candidate::Type(ty) => {
                let allowed = self.allows_type(ty);
                self.report.types.record(allowed)
            }
            Candidate::Field(field) => {
                let allowed = self.allows_field(field);
                self.report.fields.record(allowed)
            }
            Candidate::Operation(operation) => {
                let allowed = self.allows_operation(operation);
                self.report.operations.record(allowed)
            }
        }
    }

    fn report(&self) {
        let r = &self.report;
        info!(
            packages = r.packages.allowed,
            types = r.types.allowed,
            fields = r.fields.allowed,
            operations = r.operations.allowed,
            "generated elements"
        );
        info!(
            packages = r.packages.excluded,
            types = r.types.excluded,
            fields = r.fields.excluded,
            operations = r.operations.excluded,
            "excluded elements"
        );
    }
}

/// Policy that allows everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl SelectionPolicy for AllowAll {
    fn allows(&mut self, _candidate: Candidate<'_>) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceDataType;

    fn field(is_static: bool) -> SourceField {
        SourceField {
            identifier: "count".into(),
            data_type: SourceDataType::named("int"),
            is_final: false,
            is_static,
        }
    }

    fn operation(is_static: bool, is_abstract: bool) -> SourceOperation {
        SourceOperation {
            name: "run".into(),
            return_type: None,
            throws: Vec::new(),
            parameters: Vec::new(),
            is_static,
            is_abstract,
        }
    }

    #[test]
    fn static_fields_excluded_by_default() {
        let mut selection = ConfigSelection::new(&GeneratorConfig::default());
        assert!(selection.allows(Candidate::Field(&field(false))));
        assert!(!selection.allows(Candidate::Field(&field(true))));
        assert_eq!(
            selection.summary().fields,
            SelectionCount {
                allowed: 1,
                excluded: 1
            }
        );
    }

    #[test]
    fn static_fields_allowed_when_enabled() {
        let config = GeneratorConfig::new().extract_static_attributes(true);
        let mut selection = ConfigSelection::new(&config);
        assert!(selection.allows(Candidate::Field(&field(true))));
    }

    #[test]
    fn operation_toggles() {
        let mut selection = ConfigSelection::new(&GeneratorConfig::default());
        assert!(selection.allows(Candidate::Operation(&operation(false, false))));
        assert!(!selection.allows(Candidate::Operation(&operation(true, false))));
        assert!(!selection.allows(Candidate::Operation(&operation(false, true))));

        let config = GeneratorConfig::new()
            .extract_static_methods(true)
            .extract_abstract_methods(true);
        let mut selection = ConfigSelection::new(&config);
        assert!(selection.allows(Candidate::Operation(&operation(true, true))));
    }

    #[test]
    fn empty_packages_follow_toggle() {
        let empty = SourcePackage {
            name: "util".into(),
            full_name: "app.util".into(),
            ..SourcePackage::default()
        };

        let mut selection = ConfigSelection::new(&GeneratorConfig::default());
        assert!(selection.allows(Candidate::Package(&empty)));

        let config = GeneratorConfig::new().extract_empty_packages(false);
        let mut selection = ConfigSelection::new(&config);
        assert!(!selection.allows(Candidate::Package(&empty)));
        assert_eq!(selection.summary().packages.excluded, 1);
    }
}
