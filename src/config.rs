//! Generator configuration.

use serde::{Deserialize, Serialize};

/// Default name and namespace prefix of the generated root package.
pub const DEFAULT_PACKAGE: &str = "DEFAULT";

/// Default name of the placeholder class seeded into the root package.
pub const DEFAULT_DUMMY_NAME: &str = "DummyClass";

/// Feature toggles and default names for a generation run.
///
/// Every key is optional in a configuration file; missing keys take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Name and prefix of the root package.
    pub default_package: String,
    /// Seed the root package with one placeholder class.
    pub dummy_class: bool,
    /// Name of the placeholder class.
    pub dummy_name: String,
    pub extract_empty_packages: bool,
    pub extract_nested_types: bool,
    pub extract_abstract_methods: bool,
    pub extract_static_methods: bool,
    pub extract_static_attributes: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_package: DEFAULT_PACKAGE.to_string(),
            dummy_class: false,
            dummy_name: DEFAULT_DUMMY_NAME.to_string(),
            extract_empty_packages: true,
            extract_nested_types: true,
            extract_abstract_methods: false,
            extract_static_methods: false,
            extract_static_attributes: false,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root package name.
    pub fn default_package(mut self, name: impl Into<String>) -> Self {
        self.default_package = name.into();
        self
    }

    /// Seed the root package with a placeholder class of the given name.
    pub fn dummy_class(mut self, name: impl Into<String>) -> Self {
        self.dummy_class = true;
        self.dummy_name = name.into();
        self
    }

    pub fn extract_empty_packages(mut self, extract: bool) -> Self {
        self.extract_empty_packages = extract;
        self
    }

    pub fn extract_nested_types(mut self, extract: bool) -> Self {
        self.extract_nested_types = extract;
        self
    }

    pub fn extract_abstract_methods(mut self, extract: bool) -> Self {
        self.extract_abstract_methods = extract;
        self
    }

    pub fn extract_static_methods(mut self, extract: bool) -> Self {
        self.extract_static_methods = extract;
        self
    }

    pub fn extract_static_attributes(mut self, extract: bool) -> Self {
        self.extract_static_attributes = extract;
        self
    }
}
