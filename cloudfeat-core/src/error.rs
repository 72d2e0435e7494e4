//! Error types for cloudfeat

use thiserror::Error;

/// Main error type for cloudfeat operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for cloudfeat operations
pub type Result<T> = std::result::Result<T, Error>;
