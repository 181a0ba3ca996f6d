//! Schema graph builder: one declaration per source type.
//!
//! Construction is two-phase. [`SchemaGraphBuilder::resolve`] creates a bare
//! declaration with its inheritance edges, registers it, and queues it for
//! completion. [`SchemaGraphBuilder::complete_all`] later attaches type
//! parameters and adds fields and operations to every queued declaration.
//! Because every declaration is registered before any member or bound is
//! resolved, fields may refer to types that refer back to their owner.
//!
//! Super-types are resolved eagerly and recursively. An inheritance cycle is
//! invalid input; it is detected through the chain of declarations under
//! construction and rejected with [`GenerateError::InheritanceCycle`].

use tracing::{debug, warn};

use crate::datatype::DataTypeResolver;
use crate::diagnostics::Diagnostic;
use crate::error::GenerateError;
use crate::externals::ExternalTypeRegistry;
use crate::members::MemberResolver;
use crate::model::{ModelIndex, SourceModel, SourceType, TypeKind};
use crate::registry::Registry;
use crate::schema::{SchemaClass, SchemaDeclaration, SchemaEnum};
use crate::selection::{Candidate, SelectionPolicy};

/// Maps source types to schema declarations, memoized by qualified name.
pub struct SchemaGraphBuilder<'m> {
    model: ModelIndex<'m>,
    registry: Registry,
    /// Declarations awaiting members, in registration order.
    pending: Vec<(String, &'m SourceType)>,
    /// Declarations whose type parameters are attached at completion.
    parameterized: Vec<(String, &'m SourceType)>,
    /// Qualified names whose super-types are being resolved.
    in_progress: Vec<String>,
    completed: bool,
    diagnostics: Vec<Diagnostic>,
    selection: Box<dyn SelectionPolicy>,
    data_types: Box<dyn DataTypeResolver>,
    externals: Box<dyn ExternalTypeRegistry>,
}

impl<'m> SchemaGraphBuilder<'m> {
    pub fn new(
        model: &'m SourceModel,
        selection: Box<dyn SelectionPolicy>,
        data_types: Box<dyn DataTypeResolver>,
        externals: Box<dyn ExternalTypeRegistry>,
    ) -> Self {
        Self {
            model: model.index(),
            registry: Registry::new(),
            pending: Vec::new(),
            parameterized: Vec::new(),
            in_progress: Vec::new(),
            completed: false,
            diagnostics: Vec::new(),
            selection,
            data_types,
            externals,
        }
    }

    /// Return the declaration for `ty`, creating it on first request.
    ///
    /// Repeated calls for the same qualified name return the same registered
    /// declaration. A newly created class has its super-types attached but
    /// no members until [`complete_all`](Self::complete_all) runs.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::InheritanceCycle` if `ty` inherits from itself,
    /// `GenerateError::InvalidSuperType` if it inherits from an enumeration,
    /// and `GenerateError::CompletionClosed` if called for a new type after
    /// the completion pass.
    pub fn resolve(&mut self, ty: &'m SourceType) -> Result<&SchemaDeclaration, GenerateError> {
        self.ensure_declared(ty)?;
        self.registry
            .get(&ty.full_name)
            .ok_or_else(|| GenerateError::UnknownDeclaration {
                name: ty.full_name.clone(),
            })
    }

    /// Register a member-less placeholder class under `name`.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::DuplicateDeclaration` if `name` is already
    /// registered or names a type of the model.
    pub fn declare_placeholder(&mut self, name: &str) -> Result<&SchemaDeclaration, GenerateError> {
        if self.model.contains(name) {
            return Err(GenerateError::DuplicateDeclaration {
                name: name.to_string(),
            });
        }
        let mut class = SchemaClass::new(name, name, false, false);
        class.complete(Vec::new(), Vec::new())?;
        self.registry.insert(SchemaDeclaration::Class(class))?;
        self.registry
            .get(name)
            .ok_or_else(|| GenerateError::UnknownDeclaration {
                name: name.to_string(),
            })
    }

    /// Consult the selection policy.
    pub fn allows(&mut self, candidate: Candidate<'_>) -> bool {
        self.selection.allows(candidate)
    }

    /// Let the selection policy emit its summary.
    pub fn report_selection(&self) {
        self.selection.report();
    }

    /// Attach type parameters, then add fields and operations to every
    /// pending declaration, in the order they were registered, then finalize
    /// external-type ordering.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::CompletionClosed` if the pass already ran, and
    /// propagates member-resolution errors unchanged.
    pub fn complete_all(&mut self) -> Result<(), GenerateError> {
        if self.completed {
            return Err(GenerateError::CompletionClosed);
        }
        self.completed = true;

        for (name, source) in std::mem::take(&mut self.parameterized) {
            let parameters =
                self.data_types
                    .type_parameters(source, &self.registry, self.externals.as_mut())?;
            self.registry.get_mut(&name)?.set_type_parameters(parameters);
        }

        let pending = std::mem::take(&mut self.pending);
        debug!(count = pending.len(), "completing declarations");
        let mut members = MemberResolver::new(
            self.selection.as_mut(),
            self.data_types.as_mut(),
            self.externals.as_mut(),
        );
        for (name, source) in pending {
            members.complete_members(&mut self.registry, &name, source)?;
        }
        self.externals.finalize_ordering();
        Ok(())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Hand over the registry, external types, and recorded diagnostics.
    pub fn into_parts(self) -> (Registry, Vec<String>, Vec<Diagnostic>) {
        (self.registry, self.externals.entries(), self.diagnostics)
    }

    fn ensure_declared(&mut self, ty: &'m SourceType) -> Result<(), GenerateError> {
        if self.registry.contains(&ty.full_name) {
            return Ok(());
        }
        if self.completed {
            return Err(GenerateError::CompletionClosed);
        }
        if let Some(start) = self.in_progress.iter().position(|n| *n == ty.full_name) {
            let mut chain = self.in_progress[start..].to_vec();
            chain.push(ty.full_name.clone());
            return Err(GenerateError::InheritanceCycle { chain });
        }

        self.in_progress.push(ty.full_name.clone());
        let result = self.declare(ty);
        self.in_progress.pop();
        result
    }

    fn declare(&mut self, ty: &'m SourceType) -> Result<(), GenerateError> {
        let declaration = match &ty.kind {
            TypeKind::Interface => SchemaDeclaration::Class(self.bare_class(ty, true, true)?),
            TypeKind::Class { is_abstract, .. } => {
                SchemaDeclaration::Class(self.bare_class(ty, *is_abstract, false)?)
            }
            TypeKind::Enumeration { literals } => {
                let mut schema_enum = SchemaEnum::new(&ty.name, &ty.full_name);
                for literal in literals {
                    schema_enum.add_literal(&literal.name);
                }
                SchemaDeclaration::Enum(schema_enum)
            }
        };

        let is_class = !declaration.is_enum();
        self.registry.insert(declaration)?;
        if is_class {
            self.pending.push((ty.full_name.clone(), ty));
        }
        if !ty.type_parameters.is_empty() {
            self.parameterized.push((ty.full_name.clone(), ty));
        }
        debug!(name = %ty.full_name, "registered declaration");
        Ok(())
    }

    /// Build a class with its super-types attached: interfaces first, then
    /// the super-class.
    fn bare_class(
        &mut self,
        ty: &'m SourceType,
        is_abstract: bool,
        is_interface: bool,
    ) -> Result<SchemaClass, GenerateError> {
        let mut class = SchemaClass::new(&ty.name, &ty.full_name, is_abstract, is_interface);
        for name in ty.super_type_names() {
            if let Some(super_type) = self.resolve_named_super_type(name, &ty.full_name)? {
                class.super_types.push(super_type);
            }
        }
        Ok(class)
    }

    /// Resolve a super-type by name. Returns the qualified name of the edge
    /// target, or `None` if no edge should be added.
    fn resolve_named_super_type(
        &mut self,
        name: &str,
        subtype: &str,
    ) -> Result<Option<String>, GenerateError> {
        if !self.registry.contains(name) {
            match self.model.get(name) {
                Some(source) => {
                    if !self.selection.allows(Candidate::Type(source)) {
                        debug!(%subtype, supertype = %name, "super type excluded by selection");
                        return Ok(None);
                    }
                    self.ensure_declared(source)?;
                }
                None => {
                    warn!(%subtype, supertype = %name, "could not use external type as super type");
                    self.diagnostics
                        .push(Diagnostic::external_super_type(subtype, name));
                    self.externals.report(name);
                    return Ok(None);
                }
            }
        }

        match self.registry.get(name) {
            Some(declaration) if declaration.is_enum() => Err(GenerateError::InvalidSuperType {
                subtype: subtype.to_string(),
                supertype: name.to_string(),
            }),
            Some(_) => Ok(Some(name.to_string())),
            None => Err(GenerateError::UnknownDeclaration {
                name: name.to_string(),
            }),
        }
    }
}
