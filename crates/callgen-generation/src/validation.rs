//! Structural validation of containers and marked methods
//!
//! Pure functions: each check returns an [`Outcome`] with the diagnostics it
//! produced, and the caller decides what to do with the dropped unit. A
//! rejected method never aborts its container, and a rejected container never
//! aborts the run.

use callgen_model::{type_system, Diagnostic, MethodDecl, TypeDecl, TypeRef, TypeSystem};

use crate::outcome::Outcome;

/// Verifies that a container is a top-level declaration.
pub fn verify_top_level(decl: &TypeDecl) -> Outcome<()> {
    if decl.is_top_level() {
        Outcome::accepted(())
    } else {
        Outcome::dropped(vec![Diagnostic::error(
            decl.position.clone(),
            format!("The container class {} must be top level", decl.simple_name),
        )])
    }
}

/// Verifies a marked method: it must not be private, and everything it throws
/// must stay inside the `Exception`/`Error` hierarchies.
///
/// Both checks run even when the first fails, so one pass reports every
/// problem with the method.
pub fn verify_method(types: &TypeSystem, decl: &MethodDecl) -> Outcome<()> {
    let mut diagnostics = Vec::new();
    if decl.modifiers.is_private {
        diagnostics.push(Diagnostic::error(
            decl.position.clone(),
            format!("The callable method \"{}\" must not be private", decl.name),
        ));
    }
    let unsupported = unsupported_exceptions(types, &decl.thrown_types);
    if !unsupported.is_empty() {
        let listed: Vec<String> = unsupported.iter().map(ToString::to_string).collect();
        diagnostics.push(Diagnostic::error(
            decl.position.clone(),
            format!(
                "The callable method \"{}\" can throw only subclass of Exception or Error: [{}]",
                decl.name,
                listed.join(", ")
            ),
        ));
    }
    if diagnostics.is_empty() {
        Outcome::accepted(())
    } else {
        Outcome::dropped(diagnostics)
    }
}

/// The subset of thrown types the generator cannot re-declare: type variables
/// and anything outside the `Exception` and `Error` hierarchies.
pub fn unsupported_exceptions<'a>(
    types: &TypeSystem,
    thrown_types: &'a [TypeRef],
) -> Vec<&'a TypeRef> {
    let exception = TypeRef::declared(type_system::names::EXCEPTION);
    let error = TypeRef::declared(type_system::names::ERROR);
    thrown_types
        .iter()
        .filter(|ty| {
            matches!(ty, TypeRef::Variable(_))
                || (!types.is_subtype(ty, &exception) && !types.is_subtype(ty, &error))
        })
        .collect()
}
