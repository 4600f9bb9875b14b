use thiserror::Error;

use crate::config::ConfigError;
use crate::network::TransportError;
use crate::vision::{IdentifyError, ParseError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Identification failed: {0}")]
    Identify(#[from] IdentifyError),

    #[error("Could not parse model output: {0}")]
    Parse(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
