//! Error types for wrapper generation

use thiserror::Error;

use crate::names::PatternError;

/// Errors that can occur while generating or persisting wrapper sources.
///
/// User-facing problems with individual containers or methods are not errors;
/// they are reported as diagnostics and the affected unit is dropped. This
/// type covers the recoverable environment failures that cross API
/// boundaries.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A name pattern could not be applied.
    #[error("invalid name pattern: {0}")]
    InvalidPattern(#[from] PatternError),

    /// IO error from an output sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
