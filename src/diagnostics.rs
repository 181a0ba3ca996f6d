//! Diagnostics and static checks of extracted models.
//!
//! [`check_model`] inspects a model for problems that would make generation
//! fail or degrade, without generating anything:
//! - duplicate qualified names
//! - inheritance cycles
//! - enumerations used as super-types
//! - super-types outside the model
//! - nested types filed outside their package

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{ModelIndex, SourceModel, SourcePackage, SourceType};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: String,
    /// Qualified name of the offending type or package.
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    fn error(code: &str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            path: path.into(),
            message: message.into(),
        }
    }

    fn warning(code: &str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Super-type named by `subtype` is not part of the model.
    pub fn external_super_type(subtype: &str, supertype: &str) -> Self {
        Self::warning(
            "W001",
            subtype,
            format!("could not use external type as super type: {}", supertype),
        )
    }
}

/// Result of checking a model.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub project: String,
    pub types_checked: usize,
    pub errors: usize,
    pub warnings: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    /// Returns true if no errors were found.
    pub fn is_ok(&self) -> bool {
        self.errors == 0
    }
}

/// Check a model for structural problems.
pub fn check_model(model: &SourceModel) -> CheckResult {
    let index = model.index();
    let mut diagnostics = Vec::new();

    check_duplicates(&model.root, &mut diagnostics);
    let types_checked = model.root.all_types().count();
    for ty in model.root.all_types() {
        check_super_types(ty, &index, &mut diagnostics);
    }
    check_cycles(model, &index, &mut diagnostics);
    check_nested_paths(&model.root, &mut diagnostics);

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = diagnostics.len() - errors;

    CheckResult {
        project: model.project_name.clone(),
        types_checked,
        errors,
        warnings,
        diagnostics,
    }
}

fn check_duplicates(root: &SourcePackage, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for ty in root.all_types() {
        let name = ty.full_name.as_str();
        if !seen.insert(name) && reported.insert(name) {
            diagnostics.push(Diagnostic::error(
                "E001",
                name,
                format!("duplicate qualified name: {}", name),
            ));
        }
    }
}

/// Flag enumeration super-types and super-types outside the model.
fn check_super_types(ty: &SourceType, index: &ModelIndex<'_>, diagnostics: &mut Vec<Diagnostic>) {
    for name in ty.super_type_names() {
        match index.get(name) {
            Some(super_type) if super_type.is_enumeration() => {
                diagnostics.push(Diagnostic::error(
                    "E003",
                    &ty.full_name,
                    format!("cannot inherit from enumeration: {}", name),
                ));
            }
            Some(_) => {}
            None => diagnostics.push(Diagnostic::external_super_type(&ty.full_name, name)),
        }
    }
}

/// Report each inheritance cycle once, at its first member in model order.
fn check_cycles(model: &SourceModel, index: &ModelIndex<'_>, diagnostics: &mut Vec<Diagnostic>) {
    let mut done: HashSet<&str> = HashSet::new();
    let mut in_cycle: HashSet<String> = HashSet::new();

    for ty in model.root.all_types() {
        let mut stack = Vec::new();
        find_cycle(ty, index, &mut stack, &mut done, &mut in_cycle, diagnostics);
    }
}

fn find_cycle<'m>(
    ty: &'m SourceType,
    index: &ModelIndex<'m>,
    stack: &mut Vec<&'m str>,
    done: &mut HashSet<&'m str>,
    in_cycle: &mut HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let name = ty.full_name.as_str();
    if done.contains(name) {
        return;
    }
    if let Some(start) = stack.iter().position(|n| *n == name) {
        let chain = &stack[start..];
        if chain.iter().all(|n| !in_cycle.contains(*n)) {
            in_cycle.extend(chain.iter().map(|n| n.to_string()));
            let mut path: Vec<&str> = chain.to_vec();
            path.push(name);
            diagnostics.push(Diagnostic::error(
                "E002",
                chain[0],
                format!("inheritance cycle: {}", path.join(" -> ")),
            ));
        }
        return;
    }

    stack.push(name);
    for super_name in ty.super_type_names() {
        if let Some(super_type) = index.get(super_name) {
            find_cycle(super_type, index, stack, done, in_cycle, diagnostics);
        }
    }
    stack.pop();
    done.insert(name);
}

/// Nested types must be named below the package that files them.
fn check_nested_paths(package: &SourcePackage, diagnostics: &mut Vec<Diagnostic>) {
    for ty in package.types.iter().filter(|t| t.nested) {
        let prefix = format!("{}.", package.full_name);
        let under_package = package.full_name.is_empty() || ty.full_name.starts_with(&prefix);
        if !under_package {
            diagnostics.push(Diagnostic::warning(
                "W002",
                &ty.full_name,
                format!("nested type is not named below package {}", package.full_name),
            ));
        }
    }
    for subpackage in &package.subpackages {
        check_nested_paths(subpackage, diagnostics);
    }
}
