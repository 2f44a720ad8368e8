//! Render a timestamp with a strftime pattern.

use tracing::debug;

use crate::error::FunctionError;
use crate::function::{FunctionDefinition, Parameter, ReturnType};
use crate::pattern::Pattern;
use crate::timestamp::Timestamp;

pub(super) const DEFINITION: FunctionDefinition = FunctionDefinition {
    name: "strftime",
    summary: "Format timestamp using strftime",
    description: "Takes an RFC3339 timestamp and formats it using strftime format specifiers \
                  (e.g., '%Y-%m-%d %H:%M:%S')",
    parameters: &[
        Parameter {
            name: "format",
            description: "strftime format string (e.g., '%Y-%m-%d %H:%M:%S')",
        },
        super::TIMESTAMP,
    ],
    returns: ReturnType::String,
};

pub(super) fn run(args: &[&str]) -> Result<String, FunctionError> {
    match args {
        [format, timestamp] => strftime(format, timestamp),
        _ => Err(FunctionError::arity(&DEFINITION, args.len())),
    }
}

/// Render `timestamp` through the strftime `format`.
///
/// The timestamp is validated first, so an invalid timestamp is reported
/// even when the format is also invalid.
///
/// ```
/// use timeutils_core::functions::strftime;
///
/// assert_eq!(strftime("%Y-%m-%d", "2024-01-15T10:30:00Z").unwrap(), "2024-01-15");
/// assert!(strftime("%Q", "2024-01-15T10:30:00Z").is_err());
/// ```
pub fn strftime(format: &str, timestamp: &str) -> Result<String, FunctionError> {
    let ts = Timestamp::parse(timestamp)
        .map_err(FunctionError::invalid_timestamp("RFC3339 timestamp"))?;
    let pattern = Pattern::compile(format)?;
    let rendered = pattern.render(&ts)?;
    debug!(format, timestamp, rendered = %rendered, "strftime");
    Ok(rendered)
}
