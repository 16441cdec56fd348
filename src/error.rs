use crate::components::ban_api::BanApiError;
use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Discord API error: {0}")]
    #[diagnostic(code(bancheck::discord_api))]
    DiscordApi(#[from] serenity::Error),

    #[error("Environment error: {0}")]
    #[diagnostic(code(bancheck::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(bancheck::config))]
    Config(String),

    #[error("Ban API error: {0}")]
    #[diagnostic(code(bancheck::ban_api))]
    BanApi(#[from] BanApiError),

    #[error("Liveness endpoint error: {0}")]
    #[diagnostic(code(bancheck::liveness))]
    Liveness(String),

    #[error(transparent)]
    #[diagnostic(code(bancheck::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(bancheck::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(bancheck::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type BotResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
