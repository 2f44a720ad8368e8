//! Error types shared by every timestamp function.
//!
//! There are three layers:
//! - [`ParseError`] for timestamp text that is not valid RFC3339
//! - [`FormatError`] for strftime patterns that cannot be compiled or rendered
//! - [`FunctionError`] for a failed call, wrapping the two above with the
//!   argument they came from

/// Why a timestamp failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("empty input")]
    Empty,

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("expected {expected} at byte {position}, found {found:?}")]
    Unexpected {
        expected: &'static str,
        found: char,
        position: usize,
    },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: u32 },

    #[error("missing UTC offset, expected 'Z' or ±HH:MM")]
    MissingOffset,

    #[error("unexpected trailing text {rest:?}")]
    TrailingText { rest: String },

    #[error("date-time cannot be represented")]
    Unrepresentable,
}

/// A timestamp that is not valid RFC3339, with the text that was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parsing time {input:?}: {kind}")]
pub struct ParseError {
    input: String,
    kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(input: &str, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }

    /// The rejected input text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The reason the input was rejected.
    #[must_use]
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

/// A strftime pattern that could not be compiled or rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unknown directive '%{directive}' at byte {position}")]
    UnknownDirective { directive: char, position: usize },

    #[error("stray '%' at end of pattern (byte {position})")]
    TrailingPercent { position: usize },

    #[error("failed to render pattern")]
    Render,
}

/// A failed function call, as reported back to the host.
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    /// One of the timestamp arguments did not parse.
    #[error("Invalid {argument}: {source}")]
    InvalidTimestamp {
        argument: &'static str,
        #[source]
        source: ParseError,
    },

    /// The strftime pattern did not compile or render.
    #[error("Invalid strftime format: {0}")]
    InvalidFormat(#[from] FormatError),

    /// Wrong number of arguments for the function.
    #[error("{function} takes {expected} argument(s), got {actual}")]
    Arity {
        function: &'static str,
        expected: usize,
        actual: usize,
    },

    /// No function is registered under this name.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// The result record could not be encoded as JSON.
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl FunctionError {
    /// Adapter for `map_err` that labels a [`ParseError`] with its argument.
    pub(crate) fn invalid_timestamp(argument: &'static str) -> impl FnOnce(ParseError) -> Self {
        move |source| Self::InvalidTimestamp { argument, source }
    }

    pub(crate) fn arity(definition: &crate::FunctionDefinition, actual: usize) -> Self {
        Self::Arity {
            function: definition.name,
            expected: definition.parameters.len(),
            actual,
        }
    }
}
