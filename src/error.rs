use std::path::PathBuf;

/// Core error types for gharbot.
#[derive(Debug, thiserror::Error)]
pub enum GharbotError {
    #[error("Budget error: {0}")]
    Budget(#[from] BudgetError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Lead error: {0}")]
    Lead(#[from] LeadError),

    #[error("Handoff error: {0}")]
    Handoff(#[from] HandoffError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Rejections from the budget normalizer. Both are user-input errors: the
/// conversation should re-prompt rather than abort.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BudgetError {
    #[error("budget contains no digits")]
    NoDigits,

    #[error("no numeric token found in budget")]
    NoNumber,
}

/// The catalog could not be loaded. Distinct from an empty match set, which
/// is a valid search result.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read catalog: {0}")]
    Read(String),

    #[error("malformed catalog row at line {line}: {message}")]
    Malformed { line: usize, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to write session: {0}")]
    Write(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LeadError {
    #[error("failed to record lead: {0}")]
    Write(String),

    #[error("failed to read leads: {0}")]
    Read(String),
}

#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("no operator number configured")]
    NoOperator,

    #[error("failed to email the transcript: {0}")]
    Email(String),

    #[error("failed to place the call: {0}")]
    Call(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GharbotError>;
