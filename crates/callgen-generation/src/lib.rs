#![warn(missing_docs)]

//! Deferred-invocation wrapper generation for Java sources
//!
//! Given type declarations whose methods are marked for deferred invocation,
//! this crate emits one companion source file per container: a holder class
//! wrapping an instance of the original type, one delegate method per marked
//! method returning a command object instead of invoking the target, and one
//! nested `java.util.concurrent.Callable` implementation per marked method
//! capturing the receiver and arguments.
//!
//! The pipeline is: configuration resolution and validation build
//! [`ContainerModel`]/[`MethodModel`] views over the declarations, the
//! [`SourceGenerator`] drives the [`SourceWriter`] template emitter over each
//! model, and the [`Engine`] orchestrates the whole run against a
//! [`SourceSink`], reporting problems through the host's diagnostic sink.

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod models;
pub mod names;
pub mod outcome;
pub mod output;
pub mod validation;
pub mod writer;

// Re-export public API
pub use config::{
    resolve_container_config, resolve_method_config, AccessPolicy, ContainerConfig, MethodConfig,
};
pub use engine::{Engine, HostOptions, RunSummary};
pub use error::GenerationError;
pub use generator::SourceGenerator;
pub use models::{ContainerAccess, ContainerModel, MethodAccess, MethodModel};
pub use names::{format_pattern, is_java_identifier, PatternError};
pub use outcome::Outcome;
pub use output::{FsSourceSink, MemorySourceSink, SourceSink};
pub use writer::{SourceWriter, TemplateArg};
