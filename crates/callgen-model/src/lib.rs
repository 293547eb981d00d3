#![warn(missing_docs)]

//! Declaration and type model for callgen
//!
//! Everything a host environment hands to the generator lives here: type and
//! method declarations with their modifiers, Java type references, raw
//! annotation option values, source positions, and the read-only type-system
//! utilities (subtype test, erasure, declared-type construction). The model is
//! plain data; the host that discovered the declarations is free to populate
//! it from any introspection source.

pub mod annotation;
pub mod decl;
pub mod diagnostics;
pub mod type_system;
pub mod types;

// Re-export public API
pub use annotation::{AnnotationValue, AnnotationValues, OptionValue};
pub use decl::{MethodDecl, Modifiers, Param, TypeDecl, TypeParam};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, Severity, SourcePosition};
pub use type_system::TypeSystem;
pub use types::{DeclaredType, PrimitiveKind, TypeRef, TypeVariable};
