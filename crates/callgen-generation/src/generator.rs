//! Source generation for one container
//!
//! [`SourceGenerator`] walks a [`ContainerModel`] front to back and drives the
//! [`SourceWriter`] through the fixed emission sequence: head comments,
//! package declaration, container class with holder field and constructor,
//! one delegate per method, then one nested command class per method. The
//! output is composed fully in memory; persisting it is the engine's job.

use callgen_model::{type_system, TypeRef, TypeSystem};

use crate::models::{ContainerModel, MethodModel};
use crate::writer::{SourceWriter, TemplateArg};

const INDENT_UNIT: &str = "    ";

/// Name of the captured receiver field inside generated classes.
const THIS: &str = "__this__";

/// Type variable carrying the boxed result type on generated command classes.
const RESULT_TYPE_VAR: &str = "R";

/// Computes the 32-bit Java `String.hashCode` of a string.
///
/// Iterates UTF-16 code units with wrapping arithmetic so the value matches
/// what a JVM would compute for the same text.
pub fn java_string_hash(text: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in text.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    hash
}

/// Computes the structural compatibility tag emitted as `serialVersionUID`.
///
/// Starting from zero: an instance method adds one plus the hash of the
/// erased receiver type's text; each parameter in order multiplies the
/// running total by 31 and adds the hash of its erased type's text. The tag
/// fingerprints the captured-state shape, so it is sensitive to parameter
/// types and order but not to names.
pub fn compatibility_tag(container: &ContainerModel<'_>, method: &MethodModel<'_>) -> i64 {
    let types = container.types();
    let mut result: i64 = 0;
    if !method.is_static() {
        let receiver = types.erasure(&container.natural_type());
        result = result.wrapping_add(1);
        result = result.wrapping_add(i64::from(java_string_hash(&receiver.to_string())));
    }
    for param in method.parameters() {
        let erased = types.erasure(&param.ty);
        result = result.wrapping_mul(31);
        result = result.wrapping_add(i64::from(java_string_hash(&erased.to_string())));
    }
    result
}

/// Emits the complete source unit for one container.
pub struct SourceGenerator<'a> {
    types: &'a TypeSystem,
    out: SourceWriter,
    container: &'a ContainerModel<'a>,
}

impl<'a> SourceGenerator<'a> {
    /// Composes the full source text for the container.
    pub fn generate(container: &ContainerModel<'_>) -> String {
        let mut generator = SourceGenerator {
            types: container.types(),
            out: SourceWriter::new(),
            container,
        };
        generator.head_comments();
        generator.package_decl();
        generator.container_class();
        generator.out.into_string()
    }

    fn head_comments(&mut self) {
        let lines = self.head_comment_lines();
        if lines.is_empty() {
            return;
        }
        self.out.line("/*", &[]);
        self.out.begin(" * ");
        for line in &lines {
            self.out.line(line, &[]);
        }
        self.out.end();
        self.out.line(" */", &[]);
    }

    fn head_comment_lines(&self) -> Vec<String> {
        vec![
            format!(
                "Deferred-invocation wrappers for {}.",
                self.container.origin_qualified_name()
            ),
            "Generated by callgen. Do not edit.".to_string(),
        ]
    }

    fn package_decl(&mut self) {
        let package = self.container.package_name();
        if !package.is_empty() {
            self.out
                .line("package ${[0]};", &[TemplateArg::text(package)]);
        }
    }

    fn container_class(&mut self) {
        self.out.line(
            "${[0] }class ${[1]}${<[2]>} {",
            &[
                TemplateArg::opt(self.container.access().keyword()),
                TemplateArg::text(self.container.simple_name()),
                TemplateArg::list(self.container.type_params()),
            ],
        );
        self.out.begin(INDENT_UNIT);
        self.container_body();
        self.out.end();
        self.out.line("}", &[]);
    }

    fn container_body(&mut self) {
        self.this_field();
        self.container_constructor();
        for method in self.container.methods() {
            self.delegate(method);
        }
        for method in self.container.methods() {
            self.command_class(method);
        }
    }

    fn this_field(&mut self) {
        self.out.line(
            "private ${[0]} ${[1]};",
            &[
                TemplateArg::text(self.container.natural_type()),
                TemplateArg::text(THIS),
            ],
        );
    }

    fn container_constructor(&mut self) {
        self.out.line(
            "public ${[0]}(${[1]} target) {",
            &[
                TemplateArg::text(self.container.simple_name()),
                TemplateArg::text(self.container.natural_type()),
            ],
        );
        self.out.begin(INDENT_UNIT);
        self.out
            .line("this.${[0]} = target;", &[TemplateArg::text(THIS)]);
        self.out.end();
        self.out.line("}", &[]);
    }

    fn delegate(&mut self, method: &MethodModel<'_>) {
        self.out.line(
            "${[0] }${[1] }${<[2]> }${[3]}<${[4]}> ${[5]}(${[6]})${ throws [7]} {",
            &[
                TemplateArg::opt(method.access().keyword()),
                if method.is_static() {
                    TemplateArg::text("static")
                } else {
                    TemplateArg::Omit
                },
                TemplateArg::list(method.type_params()),
                TemplateArg::text(method.name()),
                TemplateArg::text(self.boxing(method.return_type())),
                TemplateArg::text(method.target_name()),
                TemplateArg::list(method.parameters()),
                TemplateArg::list(method.thrown_types()),
            ],
        );
        self.out.begin(INDENT_UNIT);
        self.delegate_body(method);
        self.out.end();
        self.out.line("}", &[]);
    }

    fn delegate_body(&mut self, method: &MethodModel<'_>) {
        let arguments = [
            TemplateArg::text(method.name()),
            TemplateArg::text(self.boxing(method.return_type())),
            TemplateArg::text(THIS),
            TemplateArg::list(method.parameters().iter().map(|param| &param.name)),
        ];
        if method.is_static() {
            self.out
                .line("return new ${[0]}<${[1]}>(${[3]});", &arguments);
        } else {
            self.out
                .line("return new ${[0]}<${[1]}>(this.${[2]}${, [3]});", &arguments);
        }
    }

    fn command_class(&mut self, method: &MethodModel<'_>) {
        self.out.line(
            "public static class ${[0]}<${[1]}> implements java.util.concurrent.Callable<${[1]}>${, [2]} {",
            &[
                TemplateArg::text(method.name()),
                TemplateArg::text(RESULT_TYPE_VAR),
                TemplateArg::list(method.extra_marker_interfaces()),
            ],
        );
        self.out.begin(INDENT_UNIT);
        self.command_fields(method);
        self.command_constructor(method);
        self.call_method(method);
        self.out.end();
        self.out.line("}", &[]);
    }

    fn command_fields(&mut self, method: &MethodModel<'_>) {
        self.out.line(
            "private static final long serialVersionUID = ${[0]}L;",
            &[TemplateArg::text(compatibility_tag(self.container, method))],
        );
        if !method.is_static() {
            self.out.line(
                "private ${[0]} ${[1]};",
                &[
                    TemplateArg::text(self.erased_container_type()),
                    TemplateArg::text(THIS),
                ],
            );
        }
        for field in self.erased_parameter_fields(method) {
            self.out.line("private ${[0]};", &[TemplateArg::text(field)]);
        }
    }

    fn command_constructor(&mut self, method: &MethodModel<'_>) {
        let arguments = [
            TemplateArg::text(method.name()),
            TemplateArg::text(self.erased_container_type()),
            TemplateArg::text(THIS),
            TemplateArg::list(self.erased_parameter_fields(method)),
        ];
        if method.is_static() {
            self.out.line("${[0]}(${[3]}) {", &arguments);
        } else {
            self.out.line("${[0]}(${[1]} ${[2]} ${, [3]}) {", &arguments);
        }
        self.out.begin(INDENT_UNIT);
        if !method.is_static() {
            self.out
                .line("this.${[0]} = ${[0]};", &[TemplateArg::text(THIS)]);
        }
        for index in 0..method.parameters().len() {
            self.out
                .line("this.${[0]} = ${[0]};", &[TemplateArg::text(argument_name(index))]);
        }
        self.out.end();
        self.out.line("}", &[]);
    }

    fn call_method(&mut self, method: &MethodModel<'_>) {
        self.out.line(
            "public ${[0]} call()${ throws [1]} {",
            &[
                TemplateArg::text(RESULT_TYPE_VAR),
                TemplateArg::list(method.thrown_types()),
            ],
        );
        self.out.begin(INDENT_UNIT);
        let receiver = if method.is_static() {
            TemplateArg::text(self.erased_container_type())
        } else {
            TemplateArg::text(THIS)
        };
        if method.is_void() {
            self.out.line(
                "${[0]}.${[1]}(${[2]});",
                &[
                    receiver,
                    TemplateArg::text(method.target_name()),
                    TemplateArg::list(argument_names(method)),
                ],
            );
            self.out.line("return null;", &[]);
        } else {
            self.out.line(
                "return (${[3]}) ${([4]) }${[0]}.${[1]}(${[2]});",
                &[
                    receiver,
                    TemplateArg::text(method.target_name()),
                    TemplateArg::list(argument_names(method)),
                    TemplateArg::text(RESULT_TYPE_VAR),
                    match self.boxing_if_primitive(method.return_type()) {
                        Some(boxed) => TemplateArg::text(boxed),
                        None => TemplateArg::Omit,
                    },
                ],
            );
        }
        self.out.end();
        self.out.line("}", &[]);
    }

    fn erased_container_type(&self) -> TypeRef {
        self.types.erasure(&self.container.natural_type())
    }

    fn erased_parameter_fields(&self, method: &MethodModel<'_>) -> Vec<String> {
        method
            .parameters()
            .iter()
            .enumerate()
            .map(|(index, param)| {
                format!("{} {}", self.types.erasure(&param.ty), argument_name(index))
            })
            .collect()
    }

    fn boxing(&self, ty: &TypeRef) -> TypeRef {
        if *ty == self.types.void_type() {
            return TypeRef::declared(type_system::names::VOID);
        }
        match ty {
            TypeRef::Primitive(kind) => TypeRef::Declared(kind.boxed()),
            other => other.clone(),
        }
    }

    fn boxing_if_primitive(&self, ty: &TypeRef) -> Option<TypeRef> {
        match ty {
            TypeRef::Primitive(_) => Some(self.boxing(ty)),
            _ => None,
        }
    }
}

fn argument_name(index: usize) -> String {
    format!("a{index}")
}

fn argument_names(method: &MethodModel<'_>) -> Vec<String> {
    (0..method.parameters().len()).map(argument_name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use callgen_model::{
        DeclaredType, MethodDecl, Modifiers, Param, PrimitiveKind, TypeDecl, TypeParam,
    };

    use crate::config::{AccessPolicy, ContainerConfig, MethodConfig};

    fn default_container_config() -> ContainerConfig {
        ContainerConfig::new(AccessPolicy::Default, "{0}Callables")
    }

    fn default_method_config() -> MethodConfig {
        MethodConfig::new(AccessPolicy::Default, None, Vec::new())
    }

    fn add_method() -> MethodDecl {
        MethodDecl {
            name: "add".to_string(),
            modifiers: Modifiers::public().and_static(),
            return_type: TypeRef::Primitive(PrimitiveKind::Int),
            params: vec![
                Param::new(TypeRef::Primitive(PrimitiveKind::Int), "a"),
                Param::new(TypeRef::declared("java.lang.String"), "b"),
            ],
            ..MethodDecl::default()
        }
    }

    fn calc_decl(methods: Vec<MethodDecl>) -> TypeDecl {
        TypeDecl {
            package: "com.example".to_string(),
            simple_name: "Calc".to_string(),
            modifiers: Modifiers::public(),
            methods,
            ..TypeDecl::default()
        }
    }

    fn model_for<'a>(types: &'a TypeSystem, decl: &'a TypeDecl) -> ContainerModel<'a> {
        let methods = decl
            .methods
            .iter()
            .map(|method| MethodModel::new(types, default_method_config(), method))
            .collect();
        ContainerModel::new(types, default_container_config(), decl, methods)
    }

    #[test]
    fn test_java_string_hash_known_values() {
        assert_eq!(java_string_hash(""), 0);
        assert_eq!(java_string_hash("a"), 97);
        assert_eq!(java_string_hash("abc"), 96354);
        assert_eq!(java_string_hash("java.lang.String"), 1195259493);
    }

    #[test]
    fn test_full_static_method_file() {
        let types = TypeSystem::with_defaults();
        let decl = calc_decl(vec![add_method()]);
        let model = model_for(&types, &decl);
        let source = SourceGenerator::generate(&model);

        let expected = "\
/*
 * Deferred-invocation wrappers for com.example.Calc.
 * Generated by callgen. Do not edit.
 */
package com.example;
public class CalcCallables {
    private com.example.Calc __this__;
    public CalcCallables(com.example.Calc target) {
        this.__this__ = target;
    }
    public static add<java.lang.Integer> add(int a, java.lang.String b) {
        return new add<java.lang.Integer>(a, b);
    }
    public static class add<R> implements java.util.concurrent.Callable<R> {
        private static final long serialVersionUID = 1198496854L;
        private int a0;
        private java.lang.String a1;
        add(int a0, java.lang.String a1) {
            this.a0 = a0;
            this.a1 = a1;
        }
        public R call() {
            return (R) (java.lang.Integer) com.example.Calc.add(a0, a1);
        }
    }
}
";
        assert_eq!(source, expected);
    }

    #[test]
    fn test_void_method_returns_null_after_call() {
        let types = TypeSystem::with_defaults();
        let mut method = add_method();
        method.return_type = TypeRef::Void;
        let decl = calc_decl(vec![method]);
        let model = model_for(&types, &decl);
        let source = SourceGenerator::generate(&model);

        assert!(source.contains("public static add<java.lang.Void> add(int a, java.lang.String b) {"));
        assert!(source.contains("            com.example.Calc.add(a0, a1);\n            return null;\n"));
        assert!(!source.contains("(java.lang.Void)"));
    }

    #[test]
    fn test_instance_method_captures_receiver() {
        let types = TypeSystem::with_defaults();
        let method = MethodDecl {
            name: "reset".to_string(),
            modifiers: Modifiers::public(),
            return_type: TypeRef::Void,
            ..MethodDecl::default()
        };
        let decl = calc_decl(vec![method]);
        let model = model_for(&types, &decl);
        let source = SourceGenerator::generate(&model);

        assert!(source.contains("public reset<java.lang.Void> reset() {"));
        assert!(source.contains("return new reset<java.lang.Void>(this.__this__);"));
        assert!(source.contains("private com.example.Calc __this__;"));
        assert!(source.contains("reset(com.example.Calc __this__ ) {"));
        assert!(source.contains("__this__.reset();"));
        // instance tag: 1 + hash("com.example.Calc")
        assert!(source.contains("serialVersionUID = 812469191L;"));
    }

    #[test]
    fn test_thrown_types_redeclared() {
        let types = TypeSystem::with_defaults();
        let method = MethodDecl {
            name: "load".to_string(),
            modifiers: Modifiers::public(),
            return_type: TypeRef::declared("java.lang.String"),
            thrown_types: vec![TypeRef::declared("java.io.IOException")],
            ..MethodDecl::default()
        };
        let decl = calc_decl(vec![method]);
        let model = model_for(&types, &decl);
        let source = SourceGenerator::generate(&model);

        assert!(source.contains("load() throws java.io.IOException {"));
        assert!(source.contains("public R call() throws java.io.IOException {"));
        // reference return type needs no boxing cast
        assert!(source.contains("return (R) __this__.load();"));
    }

    #[test]
    fn test_generic_container_erases_captured_receiver() {
        let types = TypeSystem::with_defaults();
        let method = MethodDecl {
            name: "first".to_string(),
            modifiers: Modifiers::public(),
            return_type: TypeRef::variable("T"),
            ..MethodDecl::default()
        };
        let decl = TypeDecl {
            package: "com.example".to_string(),
            simple_name: "Box".to_string(),
            modifiers: Modifiers::public(),
            type_params: vec![TypeParam::new("T")],
            methods: vec![method],
            ..TypeDecl::default()
        };
        let model = model_for(&types, &decl);
        let source = SourceGenerator::generate(&model);

        assert!(source.contains("public class BoxCallables<T> {"));
        assert!(source.contains("private com.example.Box<T> __this__;"));
        assert!(source.contains("public BoxCallables(com.example.Box<T> target) {"));
        // captured field and constructor use the erased type
        assert!(source.contains("first(com.example.Box __this__ ) {"));
    }

    #[test]
    fn test_marker_interfaces_appended() {
        let types = TypeSystem::with_defaults();
        let method = add_method();
        let decl = calc_decl(vec![method]);
        let config = MethodConfig::new(
            AccessPolicy::Default,
            None,
            vec![DeclaredType::raw("java.io.Serializable")],
        );
        let methods = vec![MethodModel::new(&types, config, &decl.methods[0])];
        let model = ContainerModel::new(&types, default_container_config(), &decl, methods);
        let source = SourceGenerator::generate(&model);

        assert!(source.contains(
            "public static class add<R> implements java.util.concurrent.Callable<R>, java.io.Serializable {"
        ));
    }

    #[test]
    fn test_name_override_renames_command_but_not_target() {
        let types = TypeSystem::with_defaults();
        let decl = calc_decl(vec![add_method()]);
        let config = MethodConfig::new(AccessPolicy::Default, Some("Plus".to_string()), Vec::new());
        let methods = vec![MethodModel::new(&types, config, &decl.methods[0])];
        let model = ContainerModel::new(&types, default_container_config(), &decl, methods);
        let source = SourceGenerator::generate(&model);

        assert!(source.contains("public static Plus<java.lang.Integer> add(int a, java.lang.String b) {"));
        assert!(source.contains("return new Plus<java.lang.Integer>(a, b);"));
        assert!(source.contains("public static class Plus<R>"));
        assert!(source.contains("com.example.Calc.add(a0, a1);"));
    }

    #[test]
    fn test_unnamed_package_has_no_package_decl() {
        let types = TypeSystem::with_defaults();
        let decl = TypeDecl {
            simple_name: "Calc".to_string(),
            modifiers: Modifiers::public(),
            methods: vec![add_method()],
            ..TypeDecl::default()
        };
        let model = model_for(&types, &decl);
        let source = SourceGenerator::generate(&model);

        assert!(!source.contains("package "));
        assert!(source.contains("public class CalcCallables {"));
    }

    #[test]
    fn test_tag_is_order_sensitive() {
        let types = TypeSystem::with_defaults();
        let forward = add_method();
        let mut reversed = add_method();
        reversed.params.reverse();
        let decl_forward = calc_decl(vec![forward]);
        let decl_reversed = calc_decl(vec![reversed]);
        let model_forward = model_for(&types, &decl_forward);
        let model_reversed = model_for(&types, &decl_reversed);

        let tag_forward = compatibility_tag(&model_forward, &model_forward.methods()[0]);
        let tag_reversed = compatibility_tag(&model_reversed, &model_reversed.methods()[0]);
        assert_eq!(tag_forward, 1198496854);
        assert_eq!(tag_reversed, 37053148714);
        assert_ne!(tag_forward, tag_reversed);
    }

    #[test]
    fn test_tag_ignores_parameter_names() {
        let types = TypeSystem::with_defaults();
        let renamed = MethodDecl {
            params: vec![
                Param::new(TypeRef::Primitive(PrimitiveKind::Int), "x"),
                Param::new(TypeRef::declared("java.lang.String"), "y"),
            ],
            ..add_method()
        };
        let decl_original = calc_decl(vec![add_method()]);
        let decl_renamed = calc_decl(vec![renamed]);
        let model_original = model_for(&types, &decl_original);
        let model_renamed = model_for(&types, &decl_renamed);

        assert_eq!(
            compatibility_tag(&model_original, &model_original.methods()[0]),
            compatibility_tag(&model_renamed, &model_renamed.methods()[0]),
        );
    }
}
