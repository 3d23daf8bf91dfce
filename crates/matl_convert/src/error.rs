// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error type for collaborator failures during conversion.
//!
//! A conversion never fails as a whole. These errors come out of the baker,
//! the asset table, the catalog and settings I/O, and the orchestrator turns
//! each of them into a report before carrying on with placeholders.

use crate::param::ShaderLabel;
use thiserror::Error;

/// Errors raised by conversion collaborators
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Texture baking failed
    #[error("Bake failed: {0}")]
    Bake(String),

    /// A placeholder image could not be created
    #[error("Failed to create placeholder '{name}': {reason}")]
    Placeholder {
        /// Requested image name
        name: String,
        /// Why creation failed
        reason: String,
    },

    /// The catalog has no variant with this label
    #[error("Unknown shader label: {0}")]
    UnknownLabel(ShaderLabel),

    /// Settings could not be parsed or serialized
    #[error("Settings error: {0}")]
    Settings(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
