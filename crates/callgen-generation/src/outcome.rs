//! Outcome of a validation or resolution step
//!
//! Every step that can drop a container or a method returns an [`Outcome`]:
//! either a value to keep working with or an explicit dropped state, plus the
//! diagnostics to report either way. Callers forward the diagnostics and
//! branch on the value; there is no sentinel null and no shared mutable
//! validation state.

use callgen_model::Diagnostic;

/// A value-or-dropped result carrying its diagnostics.
#[derive(Debug)]
pub struct Outcome<T> {
    value: Option<T>,
    diagnostics: Vec<Diagnostic>,
}

impl<T> Outcome<T> {
    /// An accepted value with no diagnostics.
    pub fn accepted(value: T) -> Self {
        Self {
            value: Some(value),
            diagnostics: Vec::new(),
        }
    }

    /// An accepted value that still produced diagnostics (warnings).
    pub fn accepted_with(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            value: Some(value),
            diagnostics,
        }
    }

    /// A dropped unit and the diagnostics explaining why.
    pub fn dropped(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            value: None,
            diagnostics,
        }
    }

    /// Whether the unit was dropped.
    pub fn is_dropped(&self) -> bool {
        self.value.is_none()
    }

    /// The diagnostics produced by the step.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Maps the accepted value, keeping the dropped state and diagnostics.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: self.value.map(f),
            diagnostics: self.diagnostics,
        }
    }

    /// Splits into the optional value and the diagnostics.
    pub fn into_parts(self) -> (Option<T>, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }
}
