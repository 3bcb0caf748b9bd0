/// Result alias carrying the engine's [`EngineError`] type.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Error taxonomy for the engine. It is deliberately narrow: the engine
/// performs no I/O, so the only failures are boundary validation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A configuration value was rejected. The engine keeps its previous
    /// configuration when this is returned from a reconfigure call.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A textual command name did not map to any supported command kind.
    #[error("'{0}' is not a recognized command kind")]
    UnknownCommand(String),
}
