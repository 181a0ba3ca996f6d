//! Validation of raw model JSON against the extraction input format.

use serde_json::{json, Value};

use crate::error::{ModelError, ValidateError};
use crate::loader::load_json_auto;

/// JSON Schema of the extracted-model input format.
pub fn model_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "Extracted object model",
        "type": "object",
        "required": ["project_name", "root"],
        "properties": {
            "project_name": { "type": "string", "minLength": 1 },
            "root": { "$ref": "#/$defs/package" }
        },
        "$defs": {
            "package": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "full_name": { "type": "string" },
                    "subpackages": { "type": "array", "items": { "$ref": "#/$defs/package" } },
                    "types": { "type": "array", "items": { "$ref": "#/$defs/type" } }
                }
            },
            "type": {
                "type": "object",
                "required": ["kind", "name", "full_name"],
                "properties": {
                    "kind": { "enum": ["class", "interface", "enumeration"] },
                    "name": { "type": "string", "minLength": 1 },
                    "full_name": { "type": "string", "minLength": 1 },
                    "nested": { "type": "boolean" },
                    "is_abstract": { "type": "boolean" },
                    "super_class": { "type": ["string", "null"] },
                    "super_interfaces": { "type": "array", "items": { "type": "string" } },
                    "fields": { "type": "array", "items": { "$ref": "#/$defs/field" } },
                    "operations": { "type": "array", "items": { "$ref": "#/$defs/operation" } },
                    "literals": { "type": "array", "items": { "$ref": "#/$defs/literal" } },
                    "type_parameters": {
                        "type": "array",
                        "items": { "$ref": "#/$defs/type_parameter" }
                    }
                }
            },
            "field": {
                "type": "object",
                "required": ["identifier", "type"],
                "properties": {
                    "identifier": { "type": "string", "minLength": 1 },
                    "type": { "$ref": "#/$defs/data_type" },
                    "is_final": { "type": "boolean" },
                    "is_static": { "type": "boolean" }
                }
            },
            "operation": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": { "type": "string", "minLength": 1 },
                    "return_type": {
                        "anyOf": [{ "type": "null" }, { "$ref": "#/$defs/data_type" }]
                    },
                    "throws": { "type": "array", "items": { "$ref": "#/$defs/data_type" } },
                    "parameters": { "type": "array", "items": { "$ref": "#/$defs/parameter" } },
                    "is_static": { "type": "boolean" },
                    "is_abstract": { "type": "boolean" }
                }
            },
            "parameter": {
                "type": "object",
                "required": ["identifier", "type"],
                "properties": {
                    "identifier": { "type": "string" },
                    "type": { "$ref": "#/$defs/data_type" }
                }
            },
            "data_type": {
                "type": "object",
                "required": ["full_type"],
                "properties": {
                    "full_type": { "type": "string", "minLength": 1 },
                    "generic_arguments": {
                        "type": "array",
                        "items": { "$ref": "#/$defs/data_type" }
                    },
                    "array_dimension": { "type": "integer", "minimum": 0 }
                }
            },
            "literal": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": { "type": "string", "minLength": 1 },
                    "ordinal": { "type": ["integer", "null"], "minimum": 0 }
                }
            },
            "type_parameter": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": { "type": "string", "minLength": 1 },
                    "bounds": { "type": "array", "items": { "$ref": "#/$defs/data_type" } }
                }
            }
        }
    })
}

/// Validate raw model JSON against the input format.
///
/// Collects every violation rather than stopping at the first.
///
/// # Errors
///
/// Returns `ValidateError::Invalid` listing each violation with its JSON
/// Pointer path.
pub fn validate_model(model: &Value) -> Result<(), ValidateError> {
    let schema = model_schema();
    let validator = jsonschema::validator_for(&schema).map_err(|e| {
        ValidateError::Invalid {
            errors: vec![ModelError {
                path: String::new(),
                message: format!("internal model schema rejected: {}", e),
            }],
        }
    })?;

    let errors: Vec<ModelError> = validator
        .iter_errors(model)
        .map(|e| ModelError {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Invalid { errors })
    }
}

/// Load raw JSON from a file path or URL and validate it.
pub fn validate_model_source(source: &str) -> Result<Value, ValidateError> {
    let value = load_json_auto(source)?;
    validate_model(&value)?;
    Ok(value)
}
