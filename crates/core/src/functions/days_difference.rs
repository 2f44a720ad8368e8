//! Whole days between two timestamps.

use tracing::debug;

use crate::error::FunctionError;
use crate::function::{FunctionDefinition, Parameter, ReturnType};
use crate::timestamp::Timestamp;

pub(super) const DEFINITION: FunctionDefinition = FunctionDefinition {
    name: "days_difference",
    summary: "Calculate days between timestamps",
    description: "Returns the number of complete days between two RFC3339 timestamps as an \
                  integer string. Positive if end is after start.",
    parameters: &[
        Parameter {
            name: "start_timestamp",
            description: "RFC3339 formatted start timestamp",
        },
        Parameter {
            name: "end_timestamp",
            description: "RFC3339 formatted end timestamp",
        },
    ],
    returns: ReturnType::String,
};

pub(super) fn run(args: &[&str]) -> Result<String, FunctionError> {
    match args {
        [start, end] => days_difference(start, end),
        _ => Err(FunctionError::arity(&DEFINITION, args.len())),
    }
}

/// Whole days from `start` to `end`, truncated toward zero.
///
/// Both 23h59m and -23h59m are 0 days; -25h is -1 day.
///
/// ```
/// use timeutils_core::functions::days_difference;
///
/// assert_eq!(days_difference("2024-01-15T10:30:00Z", "2024-01-20T10:30:00Z").unwrap(), "5");
/// assert_eq!(days_difference("2024-01-20T10:30:00Z", "2024-01-15T10:30:00Z").unwrap(), "-5");
/// ```
pub fn days_difference(start: &str, end: &str) -> Result<String, FunctionError> {
    let start_ts =
        Timestamp::parse(start).map_err(FunctionError::invalid_timestamp("start timestamp"))?;
    let end_ts = Timestamp::parse(end).map_err(FunctionError::invalid_timestamp("end timestamp"))?;

    // num_days() truncates toward zero, never floors
    let days = end_ts.signed_duration_since(&start_ts).num_days();
    debug!(start, end, days, "days_difference");
    Ok(days.to_string())
}
