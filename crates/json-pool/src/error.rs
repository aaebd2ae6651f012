//! Error type for the file-to-pool loading pipeline.

use std::io;

use thiserror::Error;

use crate::tokenizer::TokenizeError;

/// Anything that can go wrong between a file path and a populated pool.
///
/// Every failure leaves the caller with no pool at all — a partially
/// flattened pool is never returned.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("failed to read JSON file: {0}")]
    Read(#[from] io::Error),
    #[error("JSON input is not valid UTF-8")]
    InvalidUtf8,
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
}
