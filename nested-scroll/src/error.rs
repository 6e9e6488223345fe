use thiserror::Error;

/// An invalid configuration value.
///
/// This is the only error kind the engine knows about. The lenient parsing paths
/// (e.g. [`crate::ScrollMode::parse_lenient`]) resolve it locally to a documented default and
/// log a diagnostic instead of returning it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid configuration: unknown scroll mode {0:?}")]
    UnknownScrollMode(String),

    #[error("invalid configuration: unknown axis lock {0:?}")]
    UnknownAxisLock(String),

    #[error("invalid configuration: `{key}` expects a boolean, got {value:?}")]
    InvalidFlag { key: String, value: String },

    #[error("invalid configuration: unknown key {0:?}")]
    UnknownKey(String),
}
