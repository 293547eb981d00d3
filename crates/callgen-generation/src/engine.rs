//! Processing engine
//!
//! The engine drives one generation run: it unions explicitly marked
//! containers with types owning marked methods, validates and resolves each
//! unit, generates the source text per surviving container, and writes it
//! through the output sink. Problems with one container or method drop that
//! unit and never abort the run; only programming-contract violations panic.

use callgen_model::{Diagnostic, DiagnosticSink, TypeDecl, TypeSystem};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{resolve_container_config, resolve_method_config};
use crate::generator::SourceGenerator;
use crate::models::{ContainerModel, MethodModel};
use crate::outcome::Outcome;
use crate::output::SourceSink;
use crate::validation::{verify_method, verify_top_level};

/// Host options passed through to the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostOptions {
    /// Text encoding the host compiles with. Passed through untouched; it
    /// never influences generation.
    pub encoding: Option<String>,
}

/// What one generation run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Qualified names of the generated units, in emission order.
    pub generated: Vec<String>,
    /// Containers dropped by validation, configuration, or output errors.
    pub dropped_containers: usize,
    /// Marked methods dropped by validation or configuration errors.
    pub dropped_methods: usize,
}

/// One-shot generation driver over a set of discovered declarations.
pub struct Engine<'t> {
    types: &'t TypeSystem,
    options: HostOptions,
}

impl<'t> Engine<'t> {
    /// An engine over the given type utilities with default options.
    pub fn new(types: &'t TypeSystem) -> Self {
        Self {
            types,
            options: HostOptions::default(),
        }
    }

    /// An engine with explicit host options.
    pub fn with_options(types: &'t TypeSystem, options: HostOptions) -> Self {
        Self { types, options }
    }

    /// Runs generation over the discovered declarations.
    ///
    /// A declaration counts as a container when it carries the container
    /// marker or owns at least one marked method. Containers are processed
    /// independently; methods within a container in declaration order.
    ///
    /// # Arguments
    /// * `declarations` - Everything discovery turned up, marked or not
    /// * `diagnostics` - Sink for user-facing errors and warnings
    /// * `sink` - Destination for the generated source units
    ///
    /// # Returns
    /// Summary of what was generated and what was dropped
    pub fn process(
        &self,
        declarations: &[TypeDecl],
        diagnostics: &mut dyn DiagnosticSink,
        sink: &mut dyn SourceSink,
    ) -> RunSummary {
        debug!(declarations = declarations.len(), "generation run start");
        if let Some(encoding) = &self.options.encoding {
            debug!(%encoding, "host encoding passed through");
        }

        let mut summary = RunSummary::default();
        let containers = self.find_containers(declarations, diagnostics, &mut summary);
        debug!(containers = containers.len(), "containers discovered");

        for decl in containers {
            let Some(model) = self.to_model(decl, diagnostics, &mut summary) else {
                continue;
            };
            debug!(
                container = model.simple_name(),
                methods = model.methods().len(),
                "valid container"
            );
            let source = SourceGenerator::generate(&model);
            let qualified_name = model.qualified_name();
            match sink.write_source(&qualified_name, &source) {
                Ok(()) => summary.generated.push(qualified_name),
                Err(error) => {
                    debug!(%error, container = model.simple_name(), "source write failed");
                    let package = if model.package_name().is_empty() {
                        "default package".to_string()
                    } else {
                        model.package_name().to_string()
                    };
                    diagnostics.report(Diagnostic::error(
                        decl.position.clone(),
                        format!(
                            "Cannot generate a callable container class {} into {}",
                            model.simple_name(),
                            package
                        ),
                    ));
                    summary.dropped_containers += 1;
                }
            }
        }
        debug!(generated = summary.generated.len(), "generation run done");
        summary
    }

    /// Containers: declarations carrying the container marker, plus declaring
    /// types of marked methods, with non-top-level candidates dropped.
    fn find_containers<'a>(
        &self,
        declarations: &'a [TypeDecl],
        diagnostics: &mut dyn DiagnosticSink,
        summary: &mut RunSummary,
    ) -> Vec<&'a TypeDecl> {
        let mut containers = Vec::new();
        for decl in declarations {
            let explicit = decl.container.is_some();
            let implicit = decl.methods.iter().any(|method| method.marked.is_some());
            if !explicit && !implicit {
                continue;
            }
            match settle(verify_top_level(decl), diagnostics) {
                Some(()) => containers.push(decl),
                None => summary.dropped_containers += 1,
            }
        }
        containers
    }

    fn to_model<'a>(
        &self,
        decl: &'a TypeDecl,
        diagnostics: &mut dyn DiagnosticSink,
        summary: &mut RunSummary,
    ) -> Option<ContainerModel<'a>>
    where
        't: 'a,
    {
        let container_values = decl.container.clone().unwrap_or_default();
        let Some(config) = settle(resolve_container_config(&container_values), diagnostics) else {
            summary.dropped_containers += 1;
            return None;
        };

        let mut methods = Vec::new();
        for method in &decl.methods {
            let Some(values) = &method.marked else {
                continue;
            };
            debug!(method = %method.name, "marked method found");
            if settle(verify_method(self.types, method), diagnostics).is_none() {
                summary.dropped_methods += 1;
                continue;
            }
            let Some(method_config) = settle(resolve_method_config(values), diagnostics) else {
                summary.dropped_methods += 1;
                continue;
            };
            methods.push(MethodModel::new(self.types, method_config, method));
        }
        Some(ContainerModel::new(self.types, config, decl, methods))
    }
}

/// Forwards an outcome's diagnostics to the sink and returns its value.
fn settle<T>(outcome: Outcome<T>, diagnostics: &mut dyn DiagnosticSink) -> Option<T> {
    let (value, reported) = outcome.into_parts();
    for diagnostic in reported {
        diagnostics.report(diagnostic);
    }
    value
}
