//! Decompose a timestamp into calendar components.

use tracing::debug;

use crate::error::FunctionError;
use crate::function::{FunctionDefinition, ReturnType};
use crate::timestamp::Timestamp;
use crate::types::Components;

pub(super) const DEFINITION: FunctionDefinition = FunctionDefinition {
    name: "parse_rfc3339",
    summary: "Parse RFC3339 timestamp into components",
    description: "Parses an RFC3339 timestamp and returns a JSON string with year, month, day, \
                  hour, minute, second, unix timestamp and weekday (0 = Sunday)",
    parameters: &[super::TIMESTAMP],
    returns: ReturnType::String,
};

pub(super) fn run(args: &[&str]) -> Result<String, FunctionError> {
    match args {
        [timestamp] => parse_rfc3339(timestamp),
        _ => Err(FunctionError::arity(&DEFINITION, args.len())),
    }
}

/// Calendar fields of `timestamp` as a JSON object of decimal strings.
///
/// Fields come from the timestamp's own offset; `unix` is the absolute
/// instant.
///
/// ```
/// use timeutils_core::functions::parse_rfc3339;
///
/// let json = parse_rfc3339("2024-01-15T10:30:45Z").unwrap();
/// assert_eq!(
///     json,
///     r#"{"year":"2024","month":"1","day":"15","hour":"10","minute":"30","second":"45","unix":"1705314645","weekday":"1"}"#
/// );
/// ```
pub fn parse_rfc3339(timestamp: &str) -> Result<String, FunctionError> {
    let ts = Timestamp::parse(timestamp)
        .map_err(FunctionError::invalid_timestamp("RFC3339 timestamp"))?;
    let components = Components::from(&ts);
    debug!(timestamp, ?components, "parse_rfc3339");
    Ok(serde_json::to_string(&components)?)
}
