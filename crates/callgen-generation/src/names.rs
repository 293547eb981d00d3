//! Identifier and name-pattern validation
//!
//! Container names are rewritten through a `MessageFormat`-style pattern with
//! a single `{0}` slot; method names can be overridden outright. Both paths
//! must yield valid Java identifiers, and a pattern that ignores its input is
//! accepted with a warning. Validation probes the pattern with two distinct
//! sample identifiers instead of inspecting its syntax.

use callgen_model::{Diagnostic, SourcePosition};
use thiserror::Error;

use crate::outcome::Outcome;

/// First sample identifier used to probe a name pattern.
const SAMPLE_ONE: &str = "Class1";
/// Second, distinct sample used to detect patterns that ignore their input.
const SAMPLE_TWO: &str = "Class2";

/// Malformed name-pattern syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `{` with no closing `}`.
    #[error("unterminated argument slot")]
    UnterminatedSlot,
    /// An argument slot whose index is empty or not a number.
    #[error("argument slot index is not a number: {{{0}}}")]
    InvalidSlotIndex(String),
}

/// Applies a name pattern to one argument.
///
/// The pattern language is the `java.text.MessageFormat` subset the generator
/// recognizes: `{0}` is replaced by the argument, `''` is a literal quote,
/// `'...'` is quoted literal text (an unterminated quoted section runs to the
/// end of the pattern), and a slot index other than `0` is rendered literally
/// since no argument exists for it.
///
/// # Arguments
/// * `pattern` - The rewrite pattern
/// * `argument` - The text substituted into `{0}` slots
///
/// # Returns
/// The rewritten text, or the syntax error that makes the pattern unusable
pub fn format_pattern(pattern: &str, argument: &str) -> Result<String, PatternError> {
    let mut out = String::new();
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    out.push('\'');
                    continue;
                }
                // quoted section
                loop {
                    match chars.next() {
                        None => break,
                        Some('\'') => {
                            if chars.peek() == Some(&'\'') {
                                chars.next();
                                out.push('\'');
                            } else {
                                break;
                            }
                        }
                        Some(literal) => out.push(literal),
                    }
                }
            }
            '{' => {
                let mut index = String::new();
                loop {
                    match chars.next() {
                        None => return Err(PatternError::UnterminatedSlot),
                        Some('}') => break,
                        Some(digit) if digit.is_ascii_digit() => index.push(digit),
                        Some(other) => {
                            index.push(other);
                            return Err(PatternError::InvalidSlotIndex(index));
                        }
                    }
                }
                if index.is_empty() {
                    return Err(PatternError::InvalidSlotIndex(index));
                }
                if index == "0" {
                    out.push_str(argument);
                } else {
                    // no argument at that position; rendered literally
                    out.push('{');
                    out.push_str(&index);
                    out.push('}');
                }
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Whether the text is a valid Java identifier.
///
/// Start characters are letters, `_` and `$`; continuation characters
/// additionally allow digits.
pub fn is_java_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        None => return false,
        Some(first) if !is_identifier_start(first) => return false,
        Some(_) => {}
    }
    chars.all(is_identifier_part)
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_numeric()
}

/// Validates a container name pattern.
///
/// Accepted patterns map any legal identifier to a legal identifier. A
/// pattern whose output does not change between two distinct samples is
/// accepted with a warning; malformed syntax or a non-identifier result is an
/// error and the container is dropped.
pub fn validate_container_pattern(
    pattern: &str,
    position: Option<&SourcePosition>,
) -> Outcome<String> {
    let sample = match format_pattern(pattern, SAMPLE_ONE) {
        Ok(sample) => sample,
        Err(_) => {
            return Outcome::dropped(vec![Diagnostic::error(
                position.cloned(),
                format!("\"name\" must be a valid MessageFormat pattern (\"{pattern}\")"),
            )]);
        }
    };
    if !is_java_identifier(&sample) {
        return Outcome::dropped(vec![Diagnostic::error(
            position.cloned(),
            format!("\"name\" must be a valid Java name pattern (\"{pattern}\")"),
        )]);
    }
    let mut diagnostics = Vec::new();
    if let Ok(second) = format_pattern(pattern, SAMPLE_TWO) {
        if sample == second {
            diagnostics.push(Diagnostic::warning(
                position.cloned(),
                format!("\"name\" should contain a parameter {{0}} (\"{pattern}\")"),
            ));
        }
    }
    Outcome::accepted_with(pattern.to_string(), diagnostics)
}

/// Validates a method name override.
pub fn validate_method_name(name: &str, position: Option<&SourcePosition>) -> Outcome<String> {
    if is_java_identifier(name) {
        Outcome::accepted(name.to_string())
    } else {
        Outcome::dropped(vec![Diagnostic::error(
            position.cloned(),
            format!("\"name\" must be a valid Java name (\"{name}\")"),
        )])
    }
}
