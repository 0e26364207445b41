use thiserror::Error;

#[derive(Error, Debug)]
pub enum RevenueError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config: {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Unknown health tier '{name}'")]
    UnknownTier { name: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RevenueResult<T> = Result<T, RevenueError>;
