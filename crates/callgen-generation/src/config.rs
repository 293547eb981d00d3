//! Configuration resolution
//!
//! Raw annotation values become two immutable settings objects:
//! [`ContainerConfig`] for the container and [`MethodConfig`] per marked
//! method. Every recognized option key must resolve to an explicit value or
//! the option's declared default after merging; a key that is still missing
//! is a programming-contract violation on the host's side and panics rather
//! than silently defaulting.

use callgen_model::{
    type_system, AnnotationValue, AnnotationValues, DeclaredType, OptionValue, SourcePosition,
};
use serde::{Deserialize, Serialize};

use crate::names::{validate_container_pattern, validate_method_name};
use crate::outcome::Outcome;

/// Recognized annotation option keys.
pub mod keys {
    /// Access override, shared by containers and methods.
    pub const ACCESSIBLE: &str = "accessible";
    /// Container name pattern / method name override.
    pub const NAME: &str = "name";
    /// Whether the generated command class is serializable.
    pub const SERIALIZABLE: &str = "serializable";
}

/// Default container name pattern.
pub const CONTAINER_NAME_PATTERN_DEFAULT: &str = "{0}Callables";

/// Sentinel meaning "no method name override".
///
/// The sentinel is itself a valid identifier because the raw value is
/// validated before it is compared against the default.
pub const METHOD_NAME_DEFAULT: &str = "__default__";

/// Access override carried by the `accessible` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessPolicy {
    /// Mirror the original declaration.
    Default,
    /// Force `public`.
    Public,
    /// Force package-private.
    Package,
}

/// Immutable container-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerConfig {
    access: AccessPolicy,
    name_pattern: String,
}

impl ContainerConfig {
    /// Creates a config from an access override and a validated name pattern.
    pub fn new(access: AccessPolicy, name_pattern: impl Into<String>) -> Self {
        Self {
            access,
            name_pattern: name_pattern.into(),
        }
    }

    /// The access override.
    pub fn access_override(&self) -> AccessPolicy {
        self.access
    }

    /// The name rewrite pattern.
    pub fn name_pattern(&self) -> &str {
        &self.name_pattern
    }
}

/// Immutable per-method settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodConfig {
    access: AccessPolicy,
    name: Option<String>,
    marker_interfaces: Vec<DeclaredType>,
}

impl MethodConfig {
    /// Creates a config; `name` is `None` to keep the original simple name.
    pub fn new(
        access: AccessPolicy,
        name: Option<String>,
        marker_interfaces: Vec<DeclaredType>,
    ) -> Self {
        Self {
            access,
            name,
            marker_interfaces,
        }
    }

    /// The access override.
    pub fn access_override(&self) -> AccessPolicy {
        self.access
    }

    /// The name override, if any.
    pub fn name_override(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Marker interfaces to attach to the generated command class, beyond the
    /// `Callable` contract itself.
    pub fn extra_marker_interfaces(&self) -> &[DeclaredType] {
        &self.marker_interfaces
    }
}

fn container_defaults() -> AnnotationValues {
    AnnotationValues::new()
        .with(keys::ACCESSIBLE, OptionValue::EnumConst("DEFAULT".into()))
        .with(
            keys::NAME,
            OptionValue::Text(CONTAINER_NAME_PATTERN_DEFAULT.into()),
        )
}

fn method_defaults() -> AnnotationValues {
    AnnotationValues::new()
        .with(keys::ACCESSIBLE, OptionValue::EnumConst("DEFAULT".into()))
        .with(keys::NAME, OptionValue::Text(METHOD_NAME_DEFAULT.into()))
        .with(keys::SERIALIZABLE, OptionValue::Flag(false))
}

/// Resolves container-level settings from raw annotation values.
///
/// Returns a dropped outcome when the name pattern is rejected; the caller
/// skips the whole container.
pub fn resolve_container_config(values: &AnnotationValues) -> Outcome<ContainerConfig> {
    let merged = values.merged_with_defaults(&container_defaults());
    let access = access_policy(&merged);
    let (pattern, position) = text_value(&merged, keys::NAME);
    validate_container_pattern(&pattern, position.as_ref())
        .map(|pattern| ContainerConfig::new(access, pattern))
}

/// Resolves per-method settings from raw annotation values.
///
/// Returns a dropped outcome when the name override is not a valid
/// identifier; the caller skips the method.
pub fn resolve_method_config(values: &AnnotationValues) -> Outcome<MethodConfig> {
    let merged = values.merged_with_defaults(&method_defaults());
    let access = access_policy(&merged);
    let markers = if flag_value(&merged, keys::SERIALIZABLE) {
        vec![DeclaredType::raw(type_system::names::SERIALIZABLE)]
    } else {
        Vec::new()
    };
    let (name, position) = text_value(&merged, keys::NAME);
    validate_method_name(&name, position.as_ref()).map(|name| {
        let name = (name != METHOD_NAME_DEFAULT).then_some(name);
        MethodConfig::new(access, name, markers)
    })
}

/// # Panics
///
/// Panics when the key is missing after the default merge; the recognized
/// option set is closed, so a missing key means the defaults table and the
/// host disagree about the contract.
fn expect_value<'v>(values: &'v AnnotationValues, key: &str) -> &'v AnnotationValue {
    values.get(key).unwrap_or_else(|| {
        panic!("annotation option `{key}` has neither an explicit value nor a default")
    })
}

fn access_policy(values: &AnnotationValues) -> AccessPolicy {
    let value = expect_value(values, keys::ACCESSIBLE);
    match &value.value {
        OptionValue::EnumConst(constant) => match constant.as_str() {
            "DEFAULT" => AccessPolicy::Default,
            "PUBLIC" => AccessPolicy::Public,
            "PACKAGE" => AccessPolicy::Package,
            other => panic!("unknown access policy constant `{other}`"),
        },
        other => panic!("annotation option `accessible` must be an enum constant, got {other:?}"),
    }
}

fn text_value(values: &AnnotationValues, key: &str) -> (String, Option<SourcePosition>) {
    let value = expect_value(values, key);
    match &value.value {
        OptionValue::Text(text) => (text.clone(), value.position.clone()),
        other => panic!("annotation option `{key}` must be a string, got {other:?}"),
    }
}

fn flag_value(values: &AnnotationValues, key: &str) -> bool {
    let value = expect_value(values, key);
    match &value.value {
        OptionValue::Flag(flag) => *flag,
        other => panic!("annotation option `{key}` must be a boolean, got {other:?}"),
    }
}
