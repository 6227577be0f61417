//! Error types for Stratus operations.
//!
//! [`StratusError`] separates the two ways a run can fail: the diagram could
//! not be declared ([`StratusError::Construct`]), or it could not be rendered
//! and written ([`StratusError::Render`], [`StratusError::Io`]).

use std::io;

use thiserror::Error;

use stratus_core::error::ConstructError;

/// The main error type for Stratus operations.
#[derive(Debug, Error)]
pub enum StratusError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Construction error: {0}")]
    Construct(#[from] ConstructError),

    #[error("Render error: {0}")]
    Render(crate::export::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<crate::export::Error> for StratusError {
    fn from(error: crate::export::Error) -> Self {
        Self::Render(error)
    }
}
