//! Resolved container and method models
//!
//! A [`ContainerModel`] is the queryable view the generator works from: the
//! original declaration, its resolved configuration, and the ordered list of
//! [`MethodModel`]s that survived validation. Models are built once per
//! container per run and discarded after the file is emitted.

use callgen_model::{DeclaredType, MethodDecl, Param, TypeDecl, TypeParam, TypeRef, TypeSystem};

use crate::config::{AccessPolicy, ContainerConfig, MethodConfig};
use crate::names::format_pattern;

/// Effective access of a generated container class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerAccess {
    /// `public`
    Public,
    /// package-private
    Package,
}

impl ContainerAccess {
    /// The access keyword, or `None` for package-private.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Public => Some("public"),
            Self::Package => None,
        }
    }
}

/// Effective access of a generated delegate method.
///
/// Delegates never narrow below what callers could already reach by direct
/// invocation, so `private` is unrepresentable; the nested command classes
/// are always public regardless of this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodAccess {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// package-private
    Package,
}

impl MethodAccess {
    /// The access keyword, or `None` for package-private.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Public => Some("public"),
            Self::Protected => Some("protected"),
            Self::Package => None,
        }
    }
}

/// Resolved view of one marked method.
#[derive(Debug)]
pub struct MethodModel<'a> {
    types: &'a TypeSystem,
    config: MethodConfig,
    decl: &'a MethodDecl,
}

impl<'a> MethodModel<'a> {
    /// Wraps a validated method declaration with its resolved configuration.
    pub fn new(types: &'a TypeSystem, config: MethodConfig, decl: &'a MethodDecl) -> Self {
        Self {
            types,
            config,
            decl,
        }
    }

    /// Effective access of the generated delegate.
    ///
    /// `Public`/`Package` overrides win; `Default` mirrors the original's
    /// public, protected, or package-private access.
    pub fn access(&self) -> MethodAccess {
        match self.config.access_override() {
            AccessPolicy::Public => MethodAccess::Public,
            AccessPolicy::Package => MethodAccess::Package,
            AccessPolicy::Default => {
                if self.decl.modifiers.is_public {
                    MethodAccess::Public
                } else if self.decl.modifiers.is_protected {
                    MethodAccess::Protected
                } else {
                    MethodAccess::Package
                }
            }
        }
    }

    /// Formal type parameters re-declared on the delegate.
    pub fn type_params(&self) -> &[TypeParam] {
        &self.decl.type_params
    }

    /// Return type of the invocation target.
    pub fn return_type(&self) -> &TypeRef {
        &self.decl.return_type
    }

    /// Name of the generated command class (and the delegate's return type).
    pub fn name(&self) -> &str {
        self.config.name_override().unwrap_or(&self.decl.name)
    }

    /// Name of the method actually invoked at run time; never affected by the
    /// name override.
    pub fn target_name(&self) -> &str {
        &self.decl.name
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[Param] {
        &self.decl.params
    }

    /// Thrown types in declaration order.
    pub fn thrown_types(&self) -> &[TypeRef] {
        &self.decl.thrown_types
    }

    /// Marker interfaces attached to the generated command class.
    pub fn extra_marker_interfaces(&self) -> &[DeclaredType] {
        self.config.extra_marker_interfaces()
    }

    /// Whether the target is a class (static) method.
    pub fn is_static(&self) -> bool {
        self.decl.modifiers.is_static
    }

    /// Whether the target returns no value.
    pub fn is_void(&self) -> bool {
        self.decl.return_type == self.types.void_type()
    }
}

/// Resolved view of one container and its surviving methods.
#[derive(Debug)]
pub struct ContainerModel<'a> {
    types: &'a TypeSystem,
    config: ContainerConfig,
    decl: &'a TypeDecl,
    simple_name: String,
    methods: Vec<MethodModel<'a>>,
}

impl<'a> ContainerModel<'a> {
    /// Wraps a validated container declaration, its resolved configuration,
    /// and the methods that passed validation, in declaration order.
    ///
    /// # Panics
    ///
    /// Panics when the configuration carries a name pattern that was never
    /// run through configuration resolution; models are only built from
    /// resolved configs.
    pub fn new(
        types: &'a TypeSystem,
        config: ContainerConfig,
        decl: &'a TypeDecl,
        methods: Vec<MethodModel<'a>>,
    ) -> Self {
        // the pattern was validated during configuration resolution
        let simple_name = format_pattern(config.name_pattern(), &decl.simple_name)
            .expect("container name pattern was validated");
        Self {
            types,
            config,
            decl,
            simple_name,
            methods,
        }
    }

    /// Effective access of the generated container class.
    ///
    /// `Public`/`Package` overrides win; `Default` mirrors the original's
    /// public/non-public status.
    pub fn access(&self) -> ContainerAccess {
        match self.config.access_override() {
            AccessPolicy::Public => ContainerAccess::Public,
            AccessPolicy::Package => ContainerAccess::Package,
            AccessPolicy::Default => {
                if self.decl.modifiers.is_public {
                    ContainerAccess::Public
                } else {
                    ContainerAccess::Package
                }
            }
        }
    }

    /// Simple name of the generated container class: the name pattern applied
    /// to the original simple name.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// Qualified name of the generated container class.
    pub fn qualified_name(&self) -> String {
        if self.decl.package.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.decl.package, self.simple_name)
        }
    }

    /// Package of the generated class; empty for the unnamed package.
    pub fn package_name(&self) -> &str {
        &self.decl.package
    }

    /// Qualified name of the original class the container wraps.
    pub fn origin_qualified_name(&self) -> String {
        self.decl.qualified_name()
    }

    /// Formal type parameters re-declared on the container class.
    pub fn type_params(&self) -> &[TypeParam] {
        &self.decl.type_params
    }

    /// The natural type of the wrapped class: the declared type parameterized
    /// by its own type variables (`Box<A, B>` for `class Box<A, B extends
    /// Foo>`), or the plain declared type when non-generic.
    pub fn natural_type(&self) -> TypeRef {
        if self.decl.type_params.is_empty() {
            return TypeRef::Declared(self.types.declared_type(self.decl, &[]));
        }
        let args: Vec<TypeRef> = self
            .decl
            .type_params
            .iter()
            .map(|param| self.types.type_variable(param))
            .collect();
        TypeRef::Declared(self.types.declared_type(self.decl, &args))
    }

    /// The surviving method models, in declaration order.
    pub fn methods(&self) -> &[MethodModel<'a>] {
        &self.methods
    }

    /// The type utilities the model was built with.
    pub fn types(&self) -> &'a TypeSystem {
        self.types
    }
}
