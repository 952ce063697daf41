//! Error types for FleetLens

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream fetch failure from a trip source. The only error class
    /// that propagates out of the engine; every formula degrades to a
    /// null or zero result instead of raising.
    #[error("Trip source error: {0}")]
    Source(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
