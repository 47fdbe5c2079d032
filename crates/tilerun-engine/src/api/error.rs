use thiserror::Error;

use crate::components::tilemap::MapError;

/// Errors raised while loading a session from host-provided text.
/// The simulation itself never fails once loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("level {index}: {source}")]
    Level {
        index: usize,
        #[source]
        source: MapError,
    },
    #[error("no levels supplied")]
    NoLevels,
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}
