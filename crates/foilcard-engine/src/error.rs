//! Engine error types.

use foilcard_config::ConfigError;
use foilcard_core::ClampRuleError;
use foilcard_registry::RegistryError;
use thiserror::Error;

/// Errors raised while building or driving an effect session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The effect registry is malformed.
    #[error("invalid effect registry: {0}")]
    Registry(#[from] RegistryError),

    /// The clamp table is malformed.
    #[error("invalid clamp rules: {0}")]
    ClampRules(#[from] ClampRuleError),

    /// A preset id is not in the session's catalog.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// Loading presets or settings failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
