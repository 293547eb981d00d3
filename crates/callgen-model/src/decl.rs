//! Declarations handed over by the host environment
//!
//! [`TypeDecl`] and [`MethodDecl`] are the read-only snapshot of what the host
//! compiler discovered: names, modifiers, generic parameters, parameter lists,
//! thrown types, and the raw annotation values attached to each declaration.
//! The generator never mutates these and never caches them across runs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationValues;
use crate::diagnostics::SourcePosition;
use crate::types::TypeRef;

/// Access and member modifiers of a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// `public`
    pub is_public: bool,
    /// `protected`
    pub is_protected: bool,
    /// `private`
    pub is_private: bool,
    /// `static`
    pub is_static: bool,
}

impl Modifiers {
    /// `public` modifiers.
    pub fn public() -> Self {
        Self {
            is_public: true,
            ..Self::default()
        }
    }

    /// `protected` modifiers.
    pub fn protected() -> Self {
        Self {
            is_protected: true,
            ..Self::default()
        }
    }

    /// `private` modifiers.
    pub fn private() -> Self {
        Self {
            is_private: true,
            ..Self::default()
        }
    }

    /// Package-private modifiers (no access keyword).
    pub fn package() -> Self {
        Self::default()
    }

    /// Adds the `static` modifier.
    pub fn and_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A formal type parameter, e.g. `T` or `T extends Number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParam {
    /// Parameter name.
    pub name: String,
    /// Upper bounds; empty means implicitly `java.lang.Object`.
    pub bounds: Vec<TypeRef>,
}

impl TypeParam {
    /// An unbounded type parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// A bounded type parameter.
    pub fn bounded(name: impl Into<String>, bounds: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }
}

impl fmt::Display for TypeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.bounds.is_empty() {
            let bounds: Vec<String> = self.bounds.iter().map(ToString::to_string).collect();
            write!(f, " extends {}", bounds.join(" & "))?;
        }
        Ok(())
    }
}

/// A formal method parameter: declared type plus simple name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Declared type.
    pub ty: TypeRef,
    /// Simple name.
    pub name: String,
}

impl Param {
    /// Creates a parameter.
    pub fn new(ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    /// Simple name.
    pub name: String,
    /// Modifiers.
    pub modifiers: Modifiers,
    /// Formal type parameters declared by the method itself.
    pub type_params: Vec<TypeParam>,
    /// Return type; [`TypeRef::Void`] for `void` methods.
    pub return_type: TypeRef,
    /// Parameters in declaration order.
    pub params: Vec<Param>,
    /// Thrown types in declaration order.
    pub thrown_types: Vec<TypeRef>,
    /// Raw values of the marked-method annotation; `None` when unmarked.
    pub marked: Option<AnnotationValues>,
    /// Source position, when the host knows it.
    pub position: Option<SourcePosition>,
}

impl Default for MethodDecl {
    fn default() -> Self {
        Self {
            name: String::new(),
            modifiers: Modifiers::default(),
            type_params: Vec::new(),
            return_type: TypeRef::Void,
            params: Vec::new(),
            thrown_types: Vec::new(),
            marked: None,
            position: None,
        }
    }
}

/// A type declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Enclosing package; empty for the unnamed package.
    pub package: String,
    /// Simple name.
    pub simple_name: String,
    /// Modifiers.
    pub modifiers: Modifiers,
    /// Formal type parameters.
    pub type_params: Vec<TypeParam>,
    /// Qualified name of the declaring type; `None` for top-level types.
    pub declaring_type: Option<String>,
    /// Methods in declaration order.
    pub methods: Vec<MethodDecl>,
    /// Raw values of the container annotation; `None` when only implicitly a
    /// container (a type owning marked methods).
    pub container: Option<AnnotationValues>,
    /// Source position, when the host knows it.
    pub position: Option<SourcePosition>,
}

impl TypeDecl {
    /// Fully qualified name, or the simple name for the unnamed package.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.package, self.simple_name)
        }
    }

    /// Whether this declaration is top-level.
    pub fn is_top_level(&self) -> bool {
        self.declaring_type.is_none()
    }
}
