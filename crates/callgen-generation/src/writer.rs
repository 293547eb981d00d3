//! Structured source-text emission
//!
//! [`SourceWriter`] composes one source unit in memory, line by line. Two
//! mechanisms keep the generator free of formatting branches:
//!
//! - indentation scoping: `begin`/`end` push and pop line prefixes, and every
//!   emitted line is preceded by all active prefixes in push order;
//! - placeholder substitution: a line pattern may contain
//!   `${<prefix>[<index>]<suffix>}` placeholders resolved positionally against
//!   a [`TemplateArg`] list, where an omitted, empty-list or empty-text
//!   argument removes the whole placeholder including its prefix and suffix.

use std::fmt;

use regex::Regex;

/// A typed template argument: omitted, scalar text, or an ordered sequence.
///
/// Sequences render as their elements joined by `", "`. Empty text and empty
/// sequences behave exactly like [`TemplateArg::Omit`], so optional fragments
/// (an access modifier, a `throws` clause, a parameter list) are data-driven
/// instead of branching in the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateArg {
    /// Omit the placeholder entirely.
    Omit,
    /// Scalar text.
    Text(String),
    /// An ordered sequence, joined by `", "`.
    List(Vec<String>),
}

impl TemplateArg {
    /// Scalar text from anything displayable.
    pub fn text(value: impl fmt::Display) -> Self {
        Self::Text(value.to_string())
    }

    /// A sequence from anything displayable.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        Self::List(items.into_iter().map(|item| item.to_string()).collect())
    }

    /// Scalar text when present, omitted otherwise.
    pub fn opt(value: Option<impl fmt::Display>) -> Self {
        match value {
            Some(value) => Self::text(value),
            None => Self::Omit,
        }
    }

    fn render(&self) -> Option<String> {
        match self {
            Self::Omit => None,
            Self::Text(text) if text.is_empty() => None,
            Self::Text(text) => Some(text.clone()),
            Self::List(items) if items.is_empty() => None,
            Self::List(items) => Some(items.join(", ")),
        }
    }
}

/// Indentation-scoped, placeholder-substituting line emitter.
#[derive(Debug)]
pub struct SourceWriter {
    buffer: String,
    line_head: Vec<String>,
    placeholder: Regex,
}

impl SourceWriter {
    /// An empty writer with no active prefixes.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            line_head: Vec::new(),
            placeholder: Regex::new(r"\$\{(.*?)\[(.*?)\](.*?)\}").unwrap(),
        }
    }

    /// Emits one line: active prefixes, then the pattern with its
    /// placeholders substituted, then a newline.
    ///
    /// # Panics
    ///
    /// Panics when a placeholder index is not a number or is out of range of
    /// `arguments`; both are generator bugs, not input errors.
    pub fn line(&mut self, pattern: &str, arguments: &[TemplateArg]) {
        for head in &self.line_head {
            self.buffer.push_str(head);
        }
        let expanded = self.apply(pattern, arguments);
        self.buffer.push_str(&expanded);
        self.buffer.push('\n');
    }

    fn apply(&self, pattern: &str, arguments: &[TemplateArg]) -> String {
        let mut out = String::new();
        let mut last = 0;
        for caps in self.placeholder.captures_iter(pattern) {
            let all = caps.get(0).unwrap();
            out.push_str(&pattern[last..all.start()]);
            let index: usize = caps[2]
                .parse()
                .unwrap_or_else(|_| panic!("placeholder index `{}` is not a number", &caps[2]));
            let argument = arguments.get(index).unwrap_or_else(|| {
                panic!(
                    "placeholder index {index} out of range for {} arguments",
                    arguments.len()
                )
            });
            if let Some(replacement) = argument.render() {
                out.push_str(&caps[1]);
                out.push_str(&replacement);
                out.push_str(&caps[3]);
            }
            last = all.end();
        }
        out.push_str(&pattern[last..]);
        out
    }

    /// Opens a block: every following line is additionally prefixed with
    /// `head` until the matching [`end`](Self::end).
    pub fn begin(&mut self, head: impl Into<String>) {
        self.line_head.push(head.into());
    }

    /// Closes the most recently opened block.
    ///
    /// # Panics
    ///
    /// Panics when no block is open; unbalanced scopes are a generator bug.
    pub fn end(&mut self) {
        assert!(
            self.line_head.pop().is_some(),
            "SourceWriter::end() called with no open block"
        );
    }

    /// The composed text.
    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl Default for SourceWriter {
    fn default() -> Self {
        Self::new()
    }
}
