//! Java type references
//!
//! A [`TypeRef`] is the textual, structural view of a Java type as it appears
//! in a declaration: primitives, `void`, declared (class/interface) types with
//! optional type arguments, type variables, and arrays. Rendering a reference
//! with `Display` yields the Java source text for it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of Java primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// `boolean`
    Boolean,
    /// `byte`
    Byte,
    /// `char`
    Char,
    /// `double`
    Double,
    /// `float`
    Float,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `short`
    Short,
}

impl PrimitiveKind {
    /// Java keyword for this primitive.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Double => "double",
            Self::Float => "float",
            Self::Int => "int",
            Self::Long => "long",
            Self::Short => "short",
        }
    }

    /// Qualified name of the boxed counterpart in `java.lang`.
    ///
    /// The mapping is exhaustive over the closed primitive set, so there is no
    /// failure case.
    pub fn boxed_name(&self) -> &'static str {
        match self {
            Self::Boolean => "java.lang.Boolean",
            Self::Byte => "java.lang.Byte",
            Self::Char => "java.lang.Character",
            Self::Double => "java.lang.Double",
            Self::Float => "java.lang.Float",
            Self::Int => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Short => "java.lang.Short",
        }
    }

    /// Boxed counterpart as a declared type.
    pub fn boxed(&self) -> DeclaredType {
        DeclaredType::raw(self.boxed_name())
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A declared (class or interface) type: a qualified name plus optional type
/// arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredType {
    /// Fully qualified name, e.g. `java.util.List`.
    pub name: String,
    /// Type arguments; empty for a raw type.
    pub args: Vec<TypeRef>,
}

impl DeclaredType {
    /// A raw declared type with no type arguments.
    pub fn raw(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A parameterized declared type.
    pub fn with_args(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            let args: Vec<String> = self.args.iter().map(ToString::to_string).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        Ok(())
    }
}

/// A type variable declared by a generic method or class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeVariable {
    /// Variable name, e.g. `T`.
    pub name: String,
    /// Upper bound; erasure falls back to `java.lang.Object` when absent.
    pub bound: Option<Box<TypeRef>>,
}

impl TypeVariable {
    /// An unbounded type variable.
    pub fn unbounded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bound: None,
        }
    }
}

impl fmt::Display for TypeVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A reference to a Java type as written in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    /// A primitive type.
    Primitive(PrimitiveKind),
    /// The `void` pseudo-type.
    Void,
    /// A declared class or interface type.
    Declared(DeclaredType),
    /// A type variable.
    Variable(TypeVariable),
    /// An array type.
    Array(Box<TypeRef>),
}

impl TypeRef {
    /// A raw declared type reference.
    pub fn declared(name: impl Into<String>) -> Self {
        Self::Declared(DeclaredType::raw(name))
    }

    /// An unbounded type variable reference.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(TypeVariable::unbounded(name))
    }

    /// An array of the given component type.
    pub fn array(component: TypeRef) -> Self {
        Self::Array(Box::new(component))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => kind.fmt(f),
            Self::Void => f.write_str("void"),
            Self::Declared(declared) => declared.fmt(f),
            Self::Variable(variable) => variable.fmt(f),
            Self::Array(component) => write!(f, "{component}[]"),
        }
    }
}
