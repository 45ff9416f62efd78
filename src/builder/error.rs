//! Build errors for the deck builder.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a deck.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Document not specified. Call .document(doc) before .build()")]
    MissingDocument,

    #[error("Scheduler not specified. Call .scheduler(timers) before .build()")]
    MissingScheduler,

    #[error("Invalid configuration: {0:?}")]
    InvalidConfig(Vec<ConfigError>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
