use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_MODULE: &str = "panik";
pub const DEFAULT_FUNCTION: &str = "Catch";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConventionError {
    #[error("{field} identifier must not be empty")]
    Empty { field: &'static str },
    #[error("{field} identifier `{value}` is not a plain Go identifier")]
    NotAnIdentifier { field: &'static str, value: String },
}

/// The recovery call every launched task must start with.
///
/// Immutable once built; pass it by reference to every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConventionSpec {
    module: String,
    function: String,
}

impl ConventionSpec {
    pub fn new(
        module: impl Into<String>,
        function: impl Into<String>,
    ) -> Result<Self, ConventionError> {
        let module = validate_identifier("module", module.into())?;
        let function = validate_identifier("function", function.into())?;
        Ok(Self { module, function })
    }

    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Source text of the required first statement, e.g. `defer panik.Catch()`.
    #[must_use]
    pub fn expected_defer(&self) -> String {
        format!("defer {}.{}()", self.module, self.function)
    }
}

impl Default for ConventionSpec {
    fn default() -> Self {
        Self {
            module: DEFAULT_MODULE.to_string(),
            function: DEFAULT_FUNCTION.to_string(),
        }
    }
}

fn validate_identifier(field: &'static str, value: String) -> Result<String, ConventionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConventionError::Empty { field });
    }
    let mut chars = trimmed.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic());
    if !starts_ok || !chars.all(|c| c == '_' || c.is_alphanumeric()) {
        return Err(ConventionError::NotAnIdentifier { field, value });
    }
    Ok(trimmed.to_string())
}
