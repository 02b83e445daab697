use thiserror::Error;

use super::structs::PassengerId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarError {
    #[error("lift error: overweight")]
    Overweight,

    #[error("lift error: empty")]
    Empty,

    #[error("lift error: person not found by id {0}")]
    PersonNotFound(PassengerId),

    #[error("lift error: person {0} is already inside")]
    DuplicatePassenger(PassengerId),

    #[error("lift error: event loop already started")]
    AlreadyStarted,

    #[error("invalid car configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to spawn event loop: {0}")]
    Spawn(String),

    #[error("event loop worker panicked")]
    WorkerPanicked,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}
