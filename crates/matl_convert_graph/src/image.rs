// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared image references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Name-keyed handle to an image owned by an asset table.
///
/// Handles are shared, never owning: cloning one is cheap and two handles
/// compare equal when they name the same image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(Arc<str>);

impl ImageHandle {
    /// Create a handle for the image with the given name
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The image name (or path) this handle refers to
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageHandle {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
