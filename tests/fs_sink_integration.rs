//! Filesystem sink integration
//!
//! Generates real `.java` files under a temporary root and checks the
//! package-to-directory mapping and failure isolation between containers.

use std::fs;

use callgen_generation::{Engine, FsSourceSink};
use callgen_model::{
    AnnotationValues, CollectingSink, MethodDecl, Modifiers, Param, PrimitiveKind, TypeDecl,
    TypeRef, TypeSystem,
};

fn container(package: &str, simple_name: &str) -> TypeDecl {
    TypeDecl {
        package: package.to_string(),
        simple_name: simple_name.to_string(),
        modifiers: Modifiers::public(),
        methods: vec![MethodDecl {
            name: "run".to_string(),
            modifiers: Modifiers::public(),
            return_type: TypeRef::Primitive(PrimitiveKind::Int),
            params: vec![Param::new(TypeRef::Primitive(PrimitiveKind::Int), "n")],
            marked: Some(AnnotationValues::new()),
            ..MethodDecl::default()
        }],
        ..TypeDecl::default()
    }
}

#[test]
fn test_files_written_under_package_directories() {
    let dir = tempfile::tempdir().unwrap();
    let types = TypeSystem::with_defaults();
    let declarations = vec![
        container("com.example", "Calc"),
        container("", "Rootward"),
    ];
    let mut diagnostics = CollectingSink::new();
    let mut sink = FsSourceSink::new(dir.path());

    let summary = Engine::new(&types).process(&declarations, &mut diagnostics, &mut sink);
    assert_eq!(summary.generated.len(), 2);
    assert!(!diagnostics.has_errors());

    let nested = fs::read_to_string(dir.path().join("com/example/CalcCallables.java")).unwrap();
    assert!(nested.contains("public class CalcCallables {"));
    assert!(nested.contains("package com.example;"));

    let root = fs::read_to_string(dir.path().join("RootwardCallables.java")).unwrap();
    assert!(root.contains("public class RootwardCallables {"));
    assert!(!root.contains("package "));
}

#[test]
fn test_unwritable_destination_fails_only_that_container() {
    let dir = tempfile::tempdir().unwrap();
    // occupy the directory the first container's package needs with a file
    fs::write(dir.path().join("blocked"), "not a directory").unwrap();

    let types = TypeSystem::with_defaults();
    let declarations = vec![
        container("blocked.pkg", "Jammed"),
        container("open.pkg", "Fine"),
    ];
    let mut diagnostics = CollectingSink::new();
    let mut sink = FsSourceSink::new(dir.path());

    let summary = Engine::new(&types).process(&declarations, &mut diagnostics, &mut sink);
    assert_eq!(summary.generated, vec!["open.pkg.FineCallables".to_string()]);
    assert_eq!(summary.dropped_containers, 1);
    assert!(diagnostics
        .error_messages()
        .iter()
        .any(|message| message
            .contains("Cannot generate a callable container class JammedCallables into blocked.pkg")));

    let fine = fs::read_to_string(dir.path().join("open/pkg/FineCallables.java")).unwrap();
    assert!(fine.contains("class FineCallables {"));
}
