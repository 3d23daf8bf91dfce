// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader variant catalog.
//!
//! Selecting a label (re)creates a material's parameter set with exactly the
//! slots that label defines, each holding its catalog default. Anything the
//! mapper wants to write must therefore be written after selection.

use crate::assets::{defaults, AssetResolver};
use crate::error::ConvertError;
use crate::param::{labels, ParamId, ShaderLabel};
use crate::parameters::MaterialParameterSet;

/// Source of parameter slot schemas
pub trait VariantCatalog {
    /// Create a parameter set holding the label's slots and defaults
    fn create(
        &self,
        label: &ShaderLabel,
        assets: &dyn AssetResolver,
    ) -> Result<MaterialParameterSet, ConvertError>;
}

/// Slot schema of one shader variant
#[derive(Debug, Clone, Copy)]
pub struct VariantSchema {
    /// Shader label
    pub label: &'static str,
    /// Texture slots with the name of their default image
    pub textures: &'static [(ParamId, &'static str)],
    /// Vector slots with their default value
    pub vectors: &'static [(ParamId, [f32; 4])],
}

// ============================================================================
// Shared slot groups
// ============================================================================

const PBR_TEXTURES: &[(ParamId, &str)] = &[
    (ParamId::Texture0, defaults::WHITE),
    (ParamId::Texture4, defaults::NORMAL),
    (ParamId::Texture6, defaults::PARAMS),
    (ParamId::Texture7, defaults::CUBE_MAP),
];

const PBR_TWO_LAYER_TEXTURES: &[(ParamId, &str)] = &[
    (ParamId::Texture0, defaults::WHITE),
    (ParamId::Texture1, defaults::WHITE),
    (ParamId::Texture4, defaults::NORMAL),
    (ParamId::Texture6, defaults::PARAMS),
    (ParamId::Texture7, defaults::CUBE_MAP),
];

const PBR_EMISSIVE_TEXTURES: &[(ParamId, &str)] = &[
    (ParamId::Texture0, defaults::WHITE),
    (ParamId::Texture4, defaults::NORMAL),
    (ParamId::Texture5, defaults::BLACK),
    (ParamId::Texture6, defaults::PARAMS),
    (ParamId::Texture7, defaults::CUBE_MAP),
];

const PBR_EMISSIVE_TWO_LAYER_TEXTURES: &[(ParamId, &str)] = &[
    (ParamId::Texture0, defaults::WHITE),
    (ParamId::Texture1, defaults::WHITE),
    (ParamId::Texture4, defaults::NORMAL),
    (ParamId::Texture5, defaults::BLACK),
    (ParamId::Texture6, defaults::PARAMS),
    (ParamId::Texture7, defaults::CUBE_MAP),
    (ParamId::Texture14, defaults::BLACK),
];

const EMISSIVE_TEXTURES: &[(ParamId, &str)] = &[(ParamId::Texture5, defaults::WHITE)];

const EMISSIVE_TWO_LAYER_TEXTURES: &[(ParamId, &str)] = &[
    (ParamId::Texture5, defaults::WHITE),
    (ParamId::Texture14, defaults::BLACK),
];

const PBR_VECTORS: &[(ParamId, [f32; 4])] = &[
    (ParamId::CustomVector0, [1.0, 0.0, 0.0, 0.0]),
    (ParamId::CustomVector8, [1.0, 1.0, 1.0, 1.0]),
];

const PBR_EMISSIVE_VECTORS: &[(ParamId, [f32; 4])] = &[
    (ParamId::CustomVector0, [1.0, 0.0, 0.0, 0.0]),
    (ParamId::CustomVector3, [1.0, 1.0, 1.0, 1.0]),
    (ParamId::CustomVector8, [1.0, 1.0, 1.0, 1.0]),
];

const SSS_VECTORS: &[(ParamId, [f32; 4])] = &[
    (ParamId::CustomVector0, [1.0, 0.0, 0.0, 0.0]),
    (ParamId::CustomVector8, [1.0, 1.0, 1.0, 1.0]),
    (ParamId::CustomVector11, [0.0, 0.0, 0.0, 0.0]),
    (ParamId::CustomVector30, [0.0, 0.0, 0.0, 0.0]),
];

const EMISSIVE_VECTORS: &[(ParamId, [f32; 4])] = &[
    (ParamId::CustomVector3, [1.0, 1.0, 1.0, 1.0]),
    (ParamId::CustomVector8, [1.0, 1.0, 1.0, 1.0]),
];

/// Every variant the converter can select
pub const SCHEMAS: &[VariantSchema] = &[
    VariantSchema {
        label: labels::PBR_MESH_WIDE,
        textures: &[
            (ParamId::Texture0, defaults::WHITE),
            (ParamId::Texture4, defaults::NORMAL),
            (ParamId::Texture7, defaults::CUBE_MAP),
        ],
        vectors: &[
            (ParamId::CustomVector0, [1.0, 0.0, 0.0, 0.0]),
            (ParamId::CustomVector8, [1.0, 1.0, 1.0, 1.0]),
            (ParamId::CustomVector13, [1.0, 1.0, 1.0, 1.0]),
            (ParamId::CustomVector47, [0.0, 0.5, 1.0, 0.16]),
        ],
    },
    VariantSchema { label: labels::PBR, textures: PBR_TEXTURES, vectors: PBR_VECTORS },
    VariantSchema { label: labels::PBR_COLOR_SET, textures: PBR_TEXTURES, vectors: PBR_VECTORS },
    // The two-layer variant carries the subsurface vectors as well
    VariantSchema { label: labels::PBR_TWO_LAYER, textures: PBR_TWO_LAYER_TEXTURES, vectors: SSS_VECTORS },
    VariantSchema { label: labels::PBR_EMISSIVE, textures: PBR_EMISSIVE_TEXTURES, vectors: PBR_EMISSIVE_VECTORS },
    VariantSchema { label: labels::PBR_EMISSIVE_COLOR_SET, textures: PBR_EMISSIVE_TEXTURES, vectors: PBR_EMISSIVE_VECTORS },
    VariantSchema {
        label: labels::PBR_EMISSIVE_TWO_LAYER,
        textures: PBR_EMISSIVE_TWO_LAYER_TEXTURES,
        vectors: PBR_EMISSIVE_VECTORS,
    },
    VariantSchema { label: labels::SSS, textures: PBR_TEXTURES, vectors: SSS_VECTORS },
    VariantSchema { label: labels::SSS_COLOR_SET, textures: PBR_TEXTURES, vectors: SSS_VECTORS },
    VariantSchema { label: labels::EMISSIVE, textures: EMISSIVE_TEXTURES, vectors: EMISSIVE_VECTORS },
    VariantSchema { label: labels::EMISSIVE_COLOR_SET, textures: EMISSIVE_TEXTURES, vectors: EMISSIVE_VECTORS },
    VariantSchema {
        label: labels::EMISSIVE_TWO_LAYER,
        textures: EMISSIVE_TWO_LAYER_TEXTURES,
        vectors: EMISSIVE_VECTORS,
    },
    VariantSchema {
        label: labels::EMISSIVE_TWO_LAYER_COLOR_SET,
        textures: EMISSIVE_TWO_LAYER_TEXTURES,
        vectors: EMISSIVE_VECTORS,
    },
];

/// Catalog backed by [`SCHEMAS`]
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    /// Look up a variant's schema
    pub fn schema(&self, label: &str) -> Option<&'static VariantSchema> {
        SCHEMAS.iter().find(|schema| schema.label == label)
    }

    /// All labels in the catalog
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        SCHEMAS.iter().map(|schema| schema.label)
    }
}

impl VariantCatalog for BuiltinCatalog {
    fn create(
        &self,
        label: &ShaderLabel,
        assets: &dyn AssetResolver,
    ) -> Result<MaterialParameterSet, ConvertError> {
        let schema = self
            .schema(label.as_str())
            .ok_or_else(|| ConvertError::UnknownLabel(label.clone()))?;

        let params = schema
            .textures
            .iter()
            .fold(MaterialParameterSet::new(label.clone()), |params, (param, image)| {
                params.with_texture(*param, assets.find(image))
            });
        Ok(schema
            .vectors
            .iter()
            .fold(params, |params, (param, value)| params.with_vector(*param, *value)))
    }
}
