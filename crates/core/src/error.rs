/// Domain-level error taxonomy shared across the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Required identity or credentials are absent from the environment.
    /// Never silently defaulted; aborts the operation that needed them.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
