//! Serializable result and metadata types.

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use crate::function::FunctionDefinition;
use crate::timestamp::Timestamp;

/// Calendar components of a timestamp, all as decimal strings.
///
/// Fields are read in the timestamp's own offset, except `unix` which is the
/// absolute instant. Serialization keeps the declared field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components {
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
    pub minute: String,
    pub second: String,
    pub unix: String,
    /// 0 = Sunday .. 6 = Saturday
    pub weekday: String,
}

impl From<&Timestamp> for Components {
    fn from(ts: &Timestamp) -> Self {
        let dt = ts.as_datetime();
        Self {
            year: dt.year().to_string(),
            month: dt.month().to_string(),
            day: dt.day().to_string(),
            hour: dt.hour().to_string(),
            minute: dt.minute().to_string(),
            second: dt.second().to_string(),
            unix: ts.unix_seconds().to_string(),
            weekday: dt.weekday().num_days_from_sunday().to_string(),
        }
    }
}

/// Identity of the provider as seen by a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    /// Provider type name (e.g., "timeutils")
    pub type_name: &'static str,
    pub version: String,
}

/// Everything a host needs to register the provider in one document.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSchema {
    pub provider: ProviderMetadata,
    pub description: &'static str,
    pub functions: Vec<FunctionDefinition>,
    pub resources: Vec<&'static str>,
    pub data_sources: Vec<&'static str>,
}
