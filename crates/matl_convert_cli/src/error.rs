// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command line errors.

use matl_convert::ConvertError;
use thiserror::Error;

/// Errors that stop the command line tool
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad invocation
    #[error("{0}")]
    Usage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed RON document
    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// Document could not be written as RON
    #[error("RON serialization error: {0}")]
    RonWrite(#[from] ron::Error),

    /// Malformed or unwritable JSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings could not be loaded
    #[error(transparent)]
    Convert(#[from] ConvertError),
}
