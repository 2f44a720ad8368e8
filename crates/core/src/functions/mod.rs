//! The registered timestamp functions.
//!
//! Each function is a pure string transform: ordered string arguments in,
//! a string or a [`FunctionError`](crate::FunctionError) out. Nothing is
//! shared between calls.

mod days_difference;
mod parse_rfc3339;
mod strftime;
mod unix_timestamp;

pub use days_difference::days_difference;
pub use parse_rfc3339::parse_rfc3339;
pub use strftime::strftime;
pub use unix_timestamp::unix_timestamp;

use crate::function::{Function, Parameter};

/// Parameter shared by every single-timestamp function.
const TIMESTAMP: Parameter = Parameter {
    name: "timestamp",
    description: "RFC3339 formatted timestamp string",
};

/// The registration table, in the order the provider declares them.
pub static FUNCTIONS: &[Function] = &[
    Function::new(unix_timestamp::DEFINITION, unix_timestamp::run),
    Function::new(strftime::DEFINITION, strftime::run),
    Function::new(days_difference::DEFINITION, days_difference::run),
    Function::new(parse_rfc3339::DEFINITION, parse_rfc3339::run),
];
