//! Raw annotation option values
//!
//! The host reports each annotation as a map of option keys to values, each
//! value optionally carrying its own source position so diagnostics can point
//! at the offending text. Resolution against an option set's declared defaults
//! happens in the generator's configuration resolver, not here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diagnostics::SourcePosition;

/// A single annotation option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionValue {
    /// An enum constant, identified by its simple name.
    EnumConst(String),
    /// A string value.
    Text(String),
    /// A boolean value.
    Flag(bool),
}

/// An option value together with its source position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationValue {
    /// The value itself.
    pub value: OptionValue,
    /// Position of the value in source, when the host knows it.
    pub position: Option<SourcePosition>,
}

impl AnnotationValue {
    /// A value with no position (defaults, synthesized values).
    pub fn unpositioned(value: OptionValue) -> Self {
        Self {
            value,
            position: None,
        }
    }
}

/// The option key/value map of one annotation occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationValues {
    values: BTreeMap<String, AnnotationValue>,
}

impl AnnotationValues {
    /// An empty value map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unpositioned value, builder style.
    pub fn with(mut self, key: impl Into<String>, value: OptionValue) -> Self {
        self.values
            .insert(key.into(), AnnotationValue::unpositioned(value));
        self
    }

    /// Adds a positioned value, builder style.
    pub fn with_at(
        mut self,
        key: impl Into<String>,
        value: OptionValue,
        position: SourcePosition,
    ) -> Self {
        self.values.insert(
            key.into(),
            AnnotationValue {
                value,
                position: Some(position),
            },
        );
        self
    }

    /// Looks up a value by option key.
    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        self.values.get(key)
    }

    /// Merges this map over the given defaults: explicit values win, defaults
    /// fill every key this map does not supply.
    pub fn merged_with_defaults(&self, defaults: &AnnotationValues) -> AnnotationValues {
        let mut merged = defaults.clone();
        for (key, value) in &self.values {
            merged.values.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
