//! Runtime error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{} not set", claudy_constant::defaults::API_KEY_ENV)]
    MissingCredential,

    #[error("Usage: {} <query>", claudy_constant::app::NAME)]
    MissingQuery,

    #[error(transparent)]
    Transport(#[from] claudy_llms::Error),

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
