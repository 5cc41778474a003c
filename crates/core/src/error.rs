#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a required environment variable that is unset or empty.
    pub fn missing_env(name: &str) -> Self {
        Self::Validation(format!("{name} environment variable is required"))
    }

    /// Shorthand for an environment variable that failed to parse.
    pub fn invalid_env(name: &str, expected: &str) -> Self {
        Self::Validation(format!("{name} must be a valid {expected}"))
    }
}
