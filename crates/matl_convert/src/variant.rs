// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader variant selection table.
//!
//! Selection is a pure function of the shading intent and two channel
//! buckets: fewer than two UV layers or at least two, and no vertex colors
//! or at least one. The chosen variant also fixes the mix-chain depth the
//! mapper extracts textures at and whether a second layer is read.

use crate::channels::ChannelCounts;
use crate::extract::MixDepth;
use crate::intent::ShadingIntent;
use crate::param::{labels, ShaderLabel};

/// Number of texture layers a variant blends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerCount {
    /// Single texture layer
    One,
    /// Two texture layers on separate UV maps
    Two,
}

/// A selected shader variant and how to read textures for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    /// Catalog label
    pub label: &'static str,
    /// Mix nodes expected between textures and the shader inputs
    pub depth: MixDepth,
    /// Texture layers to extract
    pub layers: LayerCount,
}

impl Variant {
    const fn new(label: &'static str, depth: MixDepth, layers: LayerCount) -> Self {
        Self { label, depth, layers }
    }

    /// Default variant for incomplete or unsupported graphs
    pub const DEFAULT: Variant = Variant::new(labels::PBR, MixDepth::Direct, LayerCount::One);

    /// Variant for materials without a node graph
    pub const MESH_WIDE: Variant = Variant::new(labels::PBR_MESH_WIDE, MixDepth::Direct, LayerCount::One);

    /// Select the variant for an intent and channel counts
    pub fn select(intent: ShadingIntent, counts: ChannelCounts) -> Self {
        use LayerCount::{One, Two};
        use MixDepth::{Direct, Double, Single};

        let two_uv = counts.has_second_uv();
        let color_set = counts.has_color_set();

        match intent {
            ShadingIntent::FlatEmission => Self::new(labels::EMISSIVE, Direct, One),
            ShadingIntent::TexturedEmission => match (two_uv, color_set) {
                (true, true) => Self::new(labels::EMISSIVE_TWO_LAYER_COLOR_SET, Double, Two),
                (true, false) => Self::new(labels::EMISSIVE_TWO_LAYER, Single, Two),
                (false, true) => Self::new(labels::EMISSIVE_COLOR_SET, Single, One),
                (false, false) => Self::new(labels::EMISSIVE, Direct, One),
            },
            // Two-layer variants always assume one mix between the layers;
            // none of them support a vertex color pre-mix.
            ShadingIntent::PbrEmission => match (two_uv, color_set) {
                (true, _) => Self::new(labels::PBR_EMISSIVE_TWO_LAYER, Single, Two),
                (false, true) => Self::new(labels::PBR_EMISSIVE_COLOR_SET, Single, One),
                (false, false) => Self::new(labels::PBR_EMISSIVE, Direct, One),
            },
            ShadingIntent::PbrSubsurface => match (two_uv, color_set) {
                (true, _) => Self::new(labels::PBR_TWO_LAYER, Single, Two),
                (false, true) => Self::new(labels::SSS_COLOR_SET, Single, One),
                (false, false) => Self::new(labels::SSS, Direct, One),
            },
            ShadingIntent::Pbr | ShadingIntent::Unsupported => match (two_uv, color_set) {
                (true, _) => Self::new(labels::PBR_TWO_LAYER, Single, Two),
                (false, true) => Self::new(labels::PBR_COLOR_SET, Single, One),
                (false, false) => Self::DEFAULT,
            },
        }
    }

    /// The variant's label as a [`ShaderLabel`]
    pub fn shader_label(&self) -> ShaderLabel {
        ShaderLabel::new(self.label)
    }

    /// Whether a second texture layer is extracted
    pub fn reads_second_layer(&self) -> bool {
        self.layers == LayerCount::Two
    }
}
