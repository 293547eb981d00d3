//! Read-only type-system utilities
//!
//! The host registers the supertype edges it knows about; the generator asks
//! only the questions the original compiler utilities answered: subtype test,
//! erasure, declared-type construction, the `void` type, and lookup by
//! qualified name. Nothing here is mutated during a generation run.

use std::collections::{BTreeMap, BTreeSet};

use crate::decl::{TypeDecl, TypeParam};
use crate::types::{DeclaredType, TypeRef, TypeVariable};

/// Qualified names of the well-known types the generator relies on.
pub mod names {
    /// `java.lang.Object`
    pub const OBJECT: &str = "java.lang.Object";
    /// `java.lang.Throwable`
    pub const THROWABLE: &str = "java.lang.Throwable";
    /// `java.lang.Exception`
    pub const EXCEPTION: &str = "java.lang.Exception";
    /// `java.lang.Error`
    pub const ERROR: &str = "java.lang.Error";
    /// `java.lang.RuntimeException`
    pub const RUNTIME_EXCEPTION: &str = "java.lang.RuntimeException";
    /// `java.io.Serializable`
    pub const SERIALIZABLE: &str = "java.io.Serializable";
    /// `java.lang.Void`
    pub const VOID: &str = "java.lang.Void";
}

/// Registry of declared types and their supertype edges.
#[derive(Debug, Clone, Default)]
pub struct TypeSystem {
    supertypes: BTreeMap<String, Vec<String>>,
}

impl TypeSystem {
    /// An empty type system with no registered types.
    pub fn new() -> Self {
        Self::default()
    }

    /// A type system pre-seeded with the `java.lang`/`java.io` types every
    /// realistic host environment provides.
    pub fn with_defaults() -> Self {
        let mut types = Self::new();
        types.register(names::OBJECT, &[]);
        types.register(names::THROWABLE, &[names::OBJECT]);
        types.register(names::EXCEPTION, &[names::THROWABLE]);
        types.register(names::ERROR, &[names::THROWABLE]);
        types.register(names::RUNTIME_EXCEPTION, &[names::EXCEPTION]);
        types.register("java.lang.IllegalArgumentException", &[names::RUNTIME_EXCEPTION]);
        types.register("java.lang.IllegalStateException", &[names::RUNTIME_EXCEPTION]);
        types.register("java.io.IOException", &[names::EXCEPTION]);
        types.register(names::SERIALIZABLE, &[]);
        types.register("java.lang.String", &[names::OBJECT, names::SERIALIZABLE]);
        types.register(names::VOID, &[names::OBJECT]);
        types.register("java.lang.Boolean", &[names::OBJECT, names::SERIALIZABLE]);
        types.register("java.lang.Byte", &[names::OBJECT, names::SERIALIZABLE]);
        types.register("java.lang.Character", &[names::OBJECT, names::SERIALIZABLE]);
        types.register("java.lang.Double", &[names::OBJECT, names::SERIALIZABLE]);
        types.register("java.lang.Float", &[names::OBJECT, names::SERIALIZABLE]);
        types.register("java.lang.Integer", &[names::OBJECT, names::SERIALIZABLE]);
        types.register("java.lang.Long", &[names::OBJECT, names::SERIALIZABLE]);
        types.register("java.lang.Short", &[names::OBJECT, names::SERIALIZABLE]);
        types
    }

    /// Registers a declared type and its direct supertypes.
    pub fn register(&mut self, qualified_name: impl Into<String>, supertypes: &[&str]) {
        self.supertypes.insert(
            qualified_name.into(),
            supertypes.iter().map(|s| (*s).to_string()).collect(),
        );
    }

    /// Looks up a registered declared type by qualified name.
    pub fn declared(&self, qualified_name: &str) -> Option<DeclaredType> {
        self.supertypes
            .contains_key(qualified_name)
            .then(|| DeclaredType::raw(qualified_name))
    }

    /// The `void` pseudo-type.
    pub fn void_type(&self) -> TypeRef {
        TypeRef::Void
    }

    /// Builds a declared-type expression from a declaration and optional type
    /// arguments.
    pub fn declared_type(&self, decl: &TypeDecl, args: &[TypeRef]) -> DeclaredType {
        DeclaredType::with_args(decl.qualified_name(), args.to_vec())
    }

    /// Builds a type-variable reference for a formal type parameter.
    pub fn type_variable(&self, param: &TypeParam) -> TypeRef {
        TypeRef::Variable(TypeVariable {
            name: param.name.clone(),
            bound: param.bounds.first().cloned().map(Box::new),
        })
    }

    /// Whether `candidate` is a subtype of `supertype`.
    ///
    /// Only declared types participate: primitives, `void`, arrays and type
    /// variables are never subtypes of a declared type here. The test is
    /// reflexive and walks the registered supertype edges.
    pub fn is_subtype(&self, candidate: &TypeRef, supertype: &TypeRef) -> bool {
        let (TypeRef::Declared(candidate), TypeRef::Declared(supertype)) = (candidate, supertype)
        else {
            return false;
        };
        if candidate.name == supertype.name {
            return true;
        }
        let mut seen = BTreeSet::new();
        let mut pending = vec![candidate.name.as_str()];
        while let Some(name) = pending.pop() {
            if !seen.insert(name) {
                continue;
            }
            let Some(parents) = self.supertypes.get(name) else {
                continue;
            };
            for parent in parents {
                if parent == &supertype.name {
                    return true;
                }
                pending.push(parent);
            }
        }
        false
    }

    /// Erasure of a type reference.
    ///
    /// Declared types lose their type arguments, arrays erase their component,
    /// type variables erase to their bound (or `java.lang.Object`), primitives
    /// and `void` are unchanged.
    pub fn erasure(&self, ty: &TypeRef) -> TypeRef {
        match ty {
            TypeRef::Declared(declared) => TypeRef::declared(declared.name.clone()),
            TypeRef::Array(component) => TypeRef::array(self.erasure(component)),
            TypeRef::Variable(variable) => match &variable.bound {
                Some(bound) => self.erasure(bound),
                None => TypeRef::declared(names::OBJECT),
            },
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveKind;

    #[test]
    fn test_subtype_is_reflexive() {
        let types = TypeSystem::with_defaults();
        let exception = TypeRef::declared(names::EXCEPTION);
        assert!(types.is_subtype(&exception, &exception));
    }

    #[test]
    fn test_subtype_walks_edges() {
        let types = TypeSystem::with_defaults();
        let illegal = TypeRef::declared("java.lang.IllegalArgumentException");
        assert!(types.is_subtype(&illegal, &TypeRef::declared(names::EXCEPTION)));
        assert!(types.is_subtype(&illegal, &TypeRef::declared(names::THROWABLE)));
        assert!(!types.is_subtype(&illegal, &TypeRef::declared(names::ERROR)));
    }

    #[test]
    fn test_subtype_rejects_non_declared() {
        let types = TypeSystem::with_defaults();
        let exception = TypeRef::declared(names::EXCEPTION);
        assert!(!types.is_subtype(&TypeRef::variable("E"), &exception));
        assert!(!types.is_subtype(&TypeRef::Primitive(PrimitiveKind::Int), &exception));
    }

    #[test]
    fn test_unknown_type_has_no_supertypes() {
        let types = TypeSystem::with_defaults();
        let unknown = TypeRef::declared("com.example.Mystery");
        assert!(!types.is_subtype(&unknown, &TypeRef::declared(names::EXCEPTION)));
        assert!(types.is_subtype(&unknown, &unknown));
    }

    #[test]
    fn test_erasure_drops_type_arguments() {
        let types = TypeSystem::new();
        let list = TypeRef::Declared(DeclaredType::with_args(
            "java.util.List",
            vec![TypeRef::declared("java.lang.String")],
        ));
        assert_eq!(types.erasure(&list).to_string(), "java.util.List");
    }

    #[test]
    fn test_erasure_of_type_variable() {
        let types = TypeSystem::new();
        let unbounded = TypeRef::variable("T");
        assert_eq!(types.erasure(&unbounded).to_string(), "java.lang.Object");

        let bounded = TypeRef::Variable(TypeVariable {
            name: "N".to_string(),
            bound: Some(Box::new(TypeRef::declared("java.lang.Number"))),
        });
        assert_eq!(types.erasure(&bounded).to_string(), "java.lang.Number");
    }

    #[test]
    fn test_erasure_of_array() {
        let types = TypeSystem::new();
        let array = TypeRef::array(TypeRef::Declared(DeclaredType::with_args(
            "java.util.List",
            vec![TypeRef::variable("T")],
        )));
        assert_eq!(types.erasure(&array).to_string(), "java.util.List[]");
    }

    #[test]
    fn test_declared_lookup() {
        let types = TypeSystem::with_defaults();
        assert!(types.declared(names::SERIALIZABLE).is_some());
        assert!(types.declared("com.example.Nope").is_none());
    }

    #[test]
    fn test_natural_type_construction() {
        let types = TypeSystem::new();
        let decl = TypeDecl {
            package: "com.example".to_string(),
            simple_name: "Box".to_string(),
            type_params: vec![TypeParam::new("T")],
            ..TypeDecl::default()
        };
        let var = types.type_variable(&decl.type_params[0]);
        let declared = types.declared_type(&decl, &[var]);
        assert_eq!(declared.to_string(), "com.example.Box<T>");
    }
}
