//! TimeUtils Core
//!
//! Pure timestamp functions for a plugin host: whole-day differences,
//! RFC3339 decomposition, strftime rendering and Unix epoch conversion.
//! Every function takes ordered string arguments and returns a string or a
//! descriptive [`FunctionError`].
//!
//! # Quick Start
//!
//! ```
//! use timeutils_core::TimeUtils;
//!
//! let provider = TimeUtils::default();
//!
//! let unix = provider.call("unix_timestamp", &["2024-01-15T10:30:00Z"]).unwrap();
//! assert_eq!(unix, "1705314600");
//!
//! let date = provider.call("strftime", &["%A, %B %d", "2024-01-15T10:30:00Z"]).unwrap();
//! assert_eq!(date, "Monday, January 15");
//! ```
//!
//! # Errors
//!
//! ```
//! use timeutils_core::TimeUtils;
//!
//! let provider = TimeUtils::default();
//! let err = provider
//!     .call("days_difference", &["invalid", "2024-01-15T10:30:00Z"])
//!     .unwrap_err();
//! assert!(err.to_string().starts_with("Invalid start timestamp:"));
//! ```

pub mod error;
pub mod function;
pub mod functions;
pub mod pattern;
pub mod timestamp;
pub mod types;

pub use error::{FormatError, FunctionError, ParseError, ParseErrorKind};
pub use function::{Function, FunctionDefinition, Parameter, ReturnType};
pub use pattern::Pattern;
pub use timestamp::Timestamp;
pub use types::*;

use tracing::debug;

/// The provider: a version string and the registered function table.
#[derive(Debug, Clone)]
pub struct TimeUtils {
    version: String,
}

impl TimeUtils {
    /// Type name the provider registers under.
    pub const TYPE_NAME: &'static str = "timeutils";

    const DESCRIPTION: &'static str = "A provider for advanced time manipulation functions \
                                       including RFC3339 parsing and strftime formatting.";

    /// Create a provider reporting the given version.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Provider identity.
    #[must_use]
    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: Self::TYPE_NAME,
            version: self.version.clone(),
        }
    }

    /// Human-readable provider description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    /// All registered functions.
    #[must_use]
    pub fn functions(&self) -> &'static [Function] {
        functions::FUNCTIONS
    }

    /// Look up a function by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&'static Function> {
        self.functions().iter().find(|f| f.name() == name)
    }

    /// Resource types the provider declares. There are none.
    #[must_use]
    pub fn resources(&self) -> &'static [&'static str] {
        &[]
    }

    /// Data source types the provider declares. There are none.
    #[must_use]
    pub fn data_sources(&self) -> &'static [&'static str] {
        &[]
    }

    /// The full registration document for a host.
    #[must_use]
    pub fn schema(&self) -> ProviderSchema {
        ProviderSchema {
            provider: self.metadata(),
            description: self.description(),
            functions: self.functions().iter().map(|f| f.definition).collect(),
            resources: self.resources().to_vec(),
            data_sources: self.data_sources().to_vec(),
        }
    }

    /// Call a function by name with ordered string arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeutils_core::{FunctionError, TimeUtils};
    ///
    /// let provider = TimeUtils::default();
    /// assert_eq!(
    ///     provider.call("days_difference", &["2024-01-15T10:30:00Z", "2024-01-20T10:30:00Z"]).unwrap(),
    ///     "5"
    /// );
    /// assert!(matches!(
    ///     provider.call("nope", &[]),
    ///     Err(FunctionError::UnknownFunction(_))
    /// ));
    /// ```
    pub fn call(&self, name: &str, args: &[&str]) -> Result<String, FunctionError> {
        let Some(function) = self.function(name) else {
            debug!(name, "call: unknown function");
            return Err(FunctionError::UnknownFunction(name.to_string()));
        };
        debug!(name, args = args.len(), "call: dispatching");
        function.call(args)
    }
}

impl Default for TimeUtils {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}
