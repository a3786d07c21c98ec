use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("unknown tier '{0}': must be gemini-flash, gemini-pro, claude-haiku, claude-sonnet, or claude-opus")]
    UnknownTier(String),

    #[error("invalid escalation threshold {0}: must be at least 1 iteration")]
    InvalidThreshold(u32),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RouteError>;
