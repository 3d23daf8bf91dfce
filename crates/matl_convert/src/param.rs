// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parameter identifiers and shader labels of the target engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shader labels referenced by the converter.
///
/// The hex body encodes the variant's feature flags in the engine; the
/// converter treats each label as an opaque key into the catalog.
pub mod labels {
    /// PBR with mesh-wide PRM constants, one color layer, normal map
    pub const PBR_MESH_WIDE: &str = "SFX_PBS_010000000800ba69_opaque";
    /// PBR, one layer
    pub const PBR: &str = "SFX_PBS_0100000008008269_opaque";
    /// PBR, one layer, vertex color set
    pub const PBR_COLOR_SET: &str = "SFX_PBS_0100000008088269_opaque";
    /// PBR, two layers (also used for two-layer subsurface)
    pub const PBR_TWO_LAYER: &str = "SFX_PBS_010000000800824f_opaque";
    /// PBR, one diffuse and one emissive layer
    pub const PBR_EMISSIVE: &str = "SFX_PBS_010000080a008269_opaque";
    /// PBR, one diffuse and one emissive layer, vertex color set
    pub const PBR_EMISSIVE_COLOR_SET: &str = "SFX_PBS_010000000a088269_opaque";
    /// PBR, two diffuse and two emissive layers
    pub const PBR_EMISSIVE_TWO_LAYER: &str = "SFX_PBS_010000001a00824f_opaque";
    /// PBR with approximated subsurface scattering, one layer
    pub const SSS: &str = "SFX_PBS_010000080800826b_opaque";
    /// PBR with approximated subsurface scattering, one layer, vertex color set
    pub const SSS_COLOR_SET: &str = "SFX_PBS_010000080808826b_opaque";
    /// Shadeless emissive, one layer
    pub const EMISSIVE: &str = "SFX_PBS_0000000000000100_opaque";
    /// Shadeless emissive, one layer, vertex color set
    pub const EMISSIVE_COLOR_SET: &str = "SFX_PBS_0000000000080100_opaque";
    /// Shadeless emissive, two layers
    pub const EMISSIVE_TWO_LAYER: &str = "SFX_PBS_0120000010008100_opaque";
    /// Shadeless emissive, two layers, vertex color set
    pub const EMISSIVE_TWO_LAYER_COLOR_SET: &str = "SFX_PBS_0120000810080100_opaque";
}

/// Opaque key selecting a shader variant and its slot schema
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShaderLabel(String);

impl ShaderLabel {
    /// Wrap a label string
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShaderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShaderLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl PartialEq<&str> for ShaderLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Material parameter identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParamId {
    /// Color layer 1
    Texture0,
    /// Color layer 2
    Texture1,
    /// Irradiance cube map
    Texture2,
    /// Baked ambient occlusion
    Texture3,
    /// Normal map (NOR)
    Texture4,
    /// Emissive layer 1
    Texture5,
    /// Packed metalness/roughness/AO/specular (PRM)
    Texture6,
    /// Specular cube map
    Texture7,
    /// Diffuse cube map
    Texture8,
    /// Baked lighting
    Texture9,
    /// Diffuse layer 2
    Texture10,
    /// Diffuse layer 3
    Texture11,
    /// Diffuse layer 4
    Texture12,
    /// Projection light map
    Texture13,
    /// Emissive layer 2
    Texture14,
    /// Alpha / tint multiplier
    CustomVector0,
    /// Emission color
    CustomVector3,
    /// Final color multiplier
    CustomVector8,
    /// Subsurface color
    CustomVector11,
    /// Mesh-wide base color
    CustomVector13,
    /// Subsurface radius and blend
    CustomVector30,
    /// Mesh-wide PRM values
    CustomVector47,
}

impl ParamId {
    /// All texture parameters, in engine order
    pub const TEXTURES: [ParamId; 15] = [
        Self::Texture0,
        Self::Texture1,
        Self::Texture2,
        Self::Texture3,
        Self::Texture4,
        Self::Texture5,
        Self::Texture6,
        Self::Texture7,
        Self::Texture8,
        Self::Texture9,
        Self::Texture10,
        Self::Texture11,
        Self::Texture12,
        Self::Texture13,
        Self::Texture14,
    ];

    /// All vector parameters known to the converter
    pub const VECTORS: [ParamId; 7] = [
        Self::CustomVector0,
        Self::CustomVector3,
        Self::CustomVector8,
        Self::CustomVector11,
        Self::CustomVector13,
        Self::CustomVector30,
        Self::CustomVector47,
    ];

    /// Engine spelling of the parameter
    pub fn name(&self) -> &'static str {
        match self {
            Self::Texture0 => "Texture0",
            Self::Texture1 => "Texture1",
            Self::Texture2 => "Texture2",
            Self::Texture3 => "Texture3",
            Self::Texture4 => "Texture4",
            Self::Texture5 => "Texture5",
            Self::Texture6 => "Texture6",
            Self::Texture7 => "Texture7",
            Self::Texture8 => "Texture8",
            Self::Texture9 => "Texture9",
            Self::Texture10 => "Texture10",
            Self::Texture11 => "Texture11",
            Self::Texture12 => "Texture12",
            Self::Texture13 => "Texture13",
            Self::Texture14 => "Texture14",
            Self::CustomVector0 => "CustomVector0",
            Self::CustomVector3 => "CustomVector3",
            Self::CustomVector8 => "CustomVector8",
            Self::CustomVector11 => "CustomVector11",
            Self::CustomVector13 => "CustomVector13",
            Self::CustomVector30 => "CustomVector30",
            Self::CustomVector47 => "CustomVector47",
        }
    }

    /// Whether this parameter holds a texture
    pub fn is_texture(&self) -> bool {
        Self::TEXTURES.contains(self)
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a [`ParamId`]
#[derive(Debug, thiserror::Error)]
#[error("Unknown parameter: {0}")]
pub struct UnknownParam(pub String);

impl FromStr for ParamId {
    type Err = UnknownParam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::TEXTURES
            .iter()
            .chain(Self::VECTORS.iter())
            .find(|p| p.name() == s)
            .copied()
            .ok_or_else(|| UnknownParam(s.to_string()))
    }
}
