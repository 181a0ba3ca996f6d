//! Schema Graph Generator
//!
//! Turns an extracted, language-agnostic object model (packages, classes,
//! interfaces, enumerations and their members) into a schema graph: class and
//! enum declarations connected by inheritance edges and typed fields and
//! operations, organized into a package hierarchy.
//!
//! # Example
//!
//! ```
//! use schema_graph::{generate, FieldKind, GeneratorConfig, SourceModel};
//! use serde_json::json;
//!
//! let model: SourceModel = serde_json::from_value(json!({
//!     "project_name": "shop",
//!     "root": {
//!         "subpackages": [{
//!             "name": "app",
//!             "full_name": "app",
//!             "types": [
//!                 {
//!                     "kind": "class", "name": "Order", "full_name": "app.Order",
//!                     "fields": [{ "identifier": "total", "type": { "full_type": "double" } }]
//!                 },
//!                 {
//!                     "kind": "class", "name": "Customer", "full_name": "app.Customer",
//!                     "fields": [{
//!                         "identifier": "orders",
//!                         "type": { "full_type": "List", "generic_arguments": [{ "full_type": "app.Order" }] }
//!                     }]
//!                 }
//!             ]
//!         }]
//!     }
//! }))
//! .unwrap();
//!
//! let graph = generate(&model, &GeneratorConfig::default()).unwrap();
//!
//! assert_eq!(graph.root.subpackages[0].ns_uri.as_deref(), Some("shop/app"));
//! let orders = graph.class("app.Customer").unwrap().field("orders").unwrap();
//! assert!(matches!(orders.kind, FieldKind::Reference { containment: true, .. }));
//! ```
//!
//! # Field Classification
//!
//! | Declared type | Generated field |
//! |---------------|-----------------|
//! | Generated class or interface | Owned reference, `containment: true` |
//! | Collection or array of one | Owned reference, `many: true` |
//! | Generated enumeration | Attribute |
//! | Primitive or external type | Attribute |
//!
//! # Construction Order
//!
//! Declarations are registered as soon as their inheritance edges exist and
//! receive their members in a single completion pass after the whole package
//! tree is built, so mutually referencing types resolve to each other.

mod classifier;
mod config;
mod datatype;
mod diagnostics;
mod error;
mod externals;
mod generator;
mod loader;
mod members;
mod model;
mod nested;
mod packages;
mod registry;
mod schema;
mod selection;
mod validator;

pub use classifier::SchemaGraphBuilder;
pub use config::{GeneratorConfig, DEFAULT_DUMMY_NAME, DEFAULT_PACKAGE};
pub use datatype::{primitive_name, DataTypeResolver, DefaultDataTypes, PRIMITIVE_TYPES};
pub use diagnostics::{check_model, CheckResult, Diagnostic, Severity};
pub use error::{GenerateError, LoadError, ModelError, ValidateError};
pub use externals::{ExternalTypeHierarchy, ExternalTypeRegistry};
pub use generator::{generate, Generator};
pub use loader::{
    is_url, load_config, load_json, load_json_auto, load_json_str, load_model, parse_model,
};
pub use members::MemberResolver;
pub use model::{
    ModelIndex, SourceDataType, SourceField, SourceLiteral, SourceModel, SourceOperation,
    SourcePackage, SourceParameter, SourceType, SourceTypeParameter, TypeKind, COLLECTION_TYPES,
};
pub use nested::{InnerTypeHierarchy, NestedTypeStructurer};
pub use packages::{namespace_uri, relative_path, PackageTreeBuilder};
pub use registry::Registry;
pub use schema::{
    FieldKind, SchemaClass, SchemaDeclaration, SchemaEnum, SchemaField, SchemaGraph,
    SchemaLiteral, SchemaOperation, SchemaPackage, SchemaParameter, SchemaTypeParameter, TypeRef,
};
pub use selection::{
    AllowAll, Candidate, ConfigSelection, SelectionCount, SelectionPolicy, SelectionReport,
};
pub use validator::{model_schema, validate_model, validate_model_source};

#[cfg(feature = "remote")]
pub use loader::load_json_url;
