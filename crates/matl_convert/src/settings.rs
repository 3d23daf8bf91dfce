// SPDX-License-Identifier: MIT OR Apache-2.0
//! Conversion settings.
//!
//! Stored as RON next to the content being converted. Missing fields take
//! their defaults, so older files keep loading.

use crate::bake::PRM_PLACEHOLDER;
use crate::error::ConvertError;
use crate::normal::NORMAL_PLACEHOLDER;
use matl_convert_graph::RenderTarget;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Default edge length of generated textures
pub const DEFAULT_BAKE_SIZE: u32 = 1024;

/// Settings for one conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertSettings {
    /// Settings format version
    pub version: u32,
    /// Edge length of baked and placeholder textures
    pub bake_size: u32,
    /// Engine whose output node is converted
    pub render_target: RenderTarget,
    /// Fill value of placeholder PRM textures
    pub prm_placeholder: [f32; 4],
    /// Fill value of placeholder normal maps
    pub normal_placeholder: [f32; 4],
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            bake_size: DEFAULT_BAKE_SIZE,
            render_target: RenderTarget::Eevee,
            prm_placeholder: PRM_PLACEHOLDER,
            normal_placeholder: NORMAL_PLACEHOLDER,
        }
    }
}

impl ConvertSettings {
    /// Parse settings from RON text
    pub fn from_ron(content: &str) -> Result<Self, ConvertError> {
        let settings: ConvertSettings =
            ron::from_str(content).map_err(|e| ConvertError::Settings(e.to_string()))?;

        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(ConvertError::Settings(format!(
                "Settings version {} is newer than supported version {}",
                settings.version, SETTINGS_FORMAT_VERSION
            )));
        }

        Ok(settings)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, ConvertError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);

        ron::ser::to_string_pretty(self, config).map_err(|e| ConvertError::Settings(e.to_string()))
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), ConvertError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ConvertSettings::default();
        assert_eq!(settings.version, SETTINGS_FORMAT_VERSION);
        assert_eq!(settings.bake_size, 1024);
        assert_eq!(settings.render_target, RenderTarget::Eevee);
        assert_eq!(settings.prm_placeholder, [0.0, 0.5, 1.0, 0.16]);
    }

    #[test]
    fn test_serialization() {
        let settings = ConvertSettings {
            bake_size: 256,
            ..Default::default()
        };
        let ron_str = settings.to_ron().unwrap();
        assert_eq!(ConvertSettings::from_ron(&ron_str).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = ConvertSettings::from_ron("(bake_size: 64)").unwrap();
        assert_eq!(settings.bake_size, 64);
        assert_eq!(settings.normal_placeholder, NORMAL_PLACEHOLDER);
    }

    #[test]
    fn test_newer_version_rejected() {
        let result = ConvertSettings::from_ron("(version: 99)");
        assert!(matches!(result, Err(ConvertError::Settings(_))));
    }

    #[test]
    fn test_malformed_settings() {
        assert!(ConvertSettings::from_ron("(bake_size: \"big\")").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("matl_convert_settings_{}.ron", std::process::id()));
        let settings = ConvertSettings {
            render_target: RenderTarget::Cycles,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = ConvertSettings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }
}
