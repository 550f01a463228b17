use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid cleaning option {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },
    #[error("failed to parse cleaning options: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
