//! Function registration types.

use serde::Serialize;

use crate::error::FunctionError;

/// A named, described parameter of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Parameter name (e.g., "timestamp")
    pub name: &'static str,
    /// What the host should pass
    pub description: &'static str,
}

/// The declared return type of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    String,
}

/// Metadata a host needs to declare a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionDefinition {
    /// Unique name the host calls (e.g., "strftime")
    pub name: &'static str,
    /// One-line summary
    pub summary: &'static str,
    /// Longer description
    pub description: &'static str,
    /// Ordered parameters; the call arity is their count
    pub parameters: &'static [Parameter],
    /// Declared return type
    pub returns: ReturnType,
}

impl FunctionDefinition {
    /// Call signature for help output, e.g. `strftime(format, timestamp)`.
    #[must_use]
    pub fn signature(&self) -> String {
        let params: Vec<&str> = self.parameters.iter().map(|p| p.name).collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// Runner signature shared by every registered function.
pub type RunFn = fn(&[&str]) -> Result<String, FunctionError>;

/// A registered function: its metadata plus the pure transform behind it.
#[derive(Debug, Clone, Copy)]
pub struct Function {
    pub definition: FunctionDefinition,
    run: RunFn,
}

impl Function {
    pub(crate) const fn new(definition: FunctionDefinition, run: RunFn) -> Self {
        Self { definition, run }
    }

    /// The function name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.definition.name
    }

    /// Run the function on ordered string arguments.
    ///
    /// Fails with [`FunctionError::Arity`] when the argument count does not
    /// match the declared parameters.
    pub fn call(&self, args: &[&str]) -> Result<String, FunctionError> {
        (self.run)(args)
    }
}
