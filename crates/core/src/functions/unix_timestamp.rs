//! RFC3339 to Unix epoch seconds.

use tracing::debug;

use crate::error::FunctionError;
use crate::function::{FunctionDefinition, ReturnType};
use crate::timestamp::Timestamp;

pub(super) const DEFINITION: FunctionDefinition = FunctionDefinition {
    name: "unix_timestamp",
    summary: "Convert RFC3339 timestamp to Unix timestamp",
    description: "Takes an RFC3339 formatted timestamp string and returns the Unix timestamp \
                  (seconds since epoch) as a string.",
    parameters: &[super::TIMESTAMP],
    returns: ReturnType::String,
};

pub(super) fn run(args: &[&str]) -> Result<String, FunctionError> {
    match args {
        [timestamp] => unix_timestamp(timestamp),
        _ => Err(FunctionError::arity(&DEFINITION, args.len())),
    }
}

/// Seconds since 1970-01-01T00:00:00Z as decimal text.
///
/// ```
/// use timeutils_core::functions::unix_timestamp;
///
/// assert_eq!(unix_timestamp("2024-01-15T10:30:00-08:00").unwrap(), "1705343400");
/// ```
pub fn unix_timestamp(timestamp: &str) -> Result<String, FunctionError> {
    let ts = Timestamp::parse(timestamp)
        .map_err(FunctionError::invalid_timestamp("RFC3339 timestamp"))?;
    let seconds = ts.unix_seconds();
    debug!(timestamp, seconds, "unix_timestamp");
    Ok(seconds.to_string())
}
