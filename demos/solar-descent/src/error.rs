//! Error types for the descent game.

/// Everything that can go wrong in positioning, sky mapping, or transitions.
///
/// None of these are fatal: the game loop logs them and stays in its
/// current stable phase.
#[derive(Debug, thiserror::Error)]
pub enum SkyError {
    /// A body name that is not in the registry.
    #[error("unknown body: {0}")]
    NotFound(String),

    /// A transition command that the current phase does not accept.
    #[error("{command} not accepted in phase {phase}")]
    InvalidTransitionRequest {
        command: &'static str,
        phase: &'static str,
    },

    /// Sky placement requested for an observer or target without orbital data.
    #[error("no orbital data for sky observer pair {observer} -> {target}")]
    MissingObserverData { observer: String, target: String },

    /// Star catalog content that breaks its own invariants.
    #[error("invalid star catalog: {0}")]
    Catalog(String),

    /// Failed to parse catalog JSON.
    #[error("failed to parse star catalog: {0}")]
    CatalogParse(#[source] serde_json::Error),

    /// Scene configuration that failed validation.
    #[error("invalid scene config: {0}")]
    Config(String),

    /// Failed to parse scene configuration JSON.
    #[error("failed to parse scene config: {0}")]
    ConfigParse(#[source] serde_json::Error),
}
