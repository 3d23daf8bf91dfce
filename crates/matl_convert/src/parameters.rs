// SPDX-License-Identifier: MIT OR Apache-2.0
//! Material parameter sets.
//!
//! A parameter set is created by the catalog for one shader label and then
//! filled by the mapper. Its slot set is fixed at creation: writes to a
//! parameter the label does not define are ignored and reported back as
//! `false`, never inserted.

use crate::param::{ParamId, ShaderLabel};
use indexmap::IndexMap;
use matl_convert_graph::ImageHandle;
use serde::{Deserialize, Serialize};

/// A texture parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSlot {
    /// Bound image, shared with the asset table
    pub image: Option<ImageHandle>,
    /// Still holding the value the catalog initialized it with
    pub is_default: bool,
}

/// The parameters of one material, keyed by [`ParamId`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialParameterSet {
    label: ShaderLabel,
    textures: IndexMap<ParamId, TextureSlot>,
    vectors: IndexMap<ParamId, [f32; 4]>,
}

impl MaterialParameterSet {
    /// Create an empty set for a label
    pub fn new(label: ShaderLabel) -> Self {
        Self {
            label,
            textures: IndexMap::new(),
            vectors: IndexMap::new(),
        }
    }

    /// Define a texture slot with its default image
    pub fn with_texture(mut self, param: ParamId, image: Option<ImageHandle>) -> Self {
        self.textures.insert(param, TextureSlot { image, is_default: true });
        self
    }

    /// Define a vector slot with its default value
    pub fn with_vector(mut self, param: ParamId, value: [f32; 4]) -> Self {
        self.vectors.insert(param, value);
        self
    }

    /// The shader label this set was created for
    pub fn label(&self) -> &ShaderLabel {
        &self.label
    }

    /// Get a texture slot
    pub fn texture(&self, param: ParamId) -> Option<&TextureSlot> {
        self.textures.get(&param)
    }

    /// Get the image bound to a texture slot
    pub fn image(&self, param: ParamId) -> Option<&ImageHandle> {
        self.textures.get(&param).and_then(|slot| slot.image.as_ref())
    }

    /// Whether the label defines this texture slot
    pub fn has_texture(&self, param: ParamId) -> bool {
        self.textures.contains_key(&param)
    }

    /// Bind an image to a texture slot; `false` if the label lacks the slot
    pub fn set_texture(&mut self, param: ParamId, image: Option<ImageHandle>) -> bool {
        match self.textures.get_mut(&param) {
            Some(slot) => {
                slot.image = image;
                slot.is_default = false;
                true
            }
            None => false,
        }
    }

    /// Get a vector slot
    pub fn vector(&self, param: ParamId) -> Option<[f32; 4]> {
        self.vectors.get(&param).copied()
    }

    /// Set a vector slot; `false` if the label lacks the slot
    pub fn set_vector(&mut self, param: ParamId, value: [f32; 4]) -> bool {
        match self.vectors.get_mut(&param) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Set one component of a vector slot, leaving the others untouched
    pub fn set_vector_component(&mut self, param: ParamId, index: usize, value: f32) -> bool {
        match self.vectors.get_mut(&param).and_then(|v| v.get_mut(index)) {
            Some(component) => {
                *component = value;
                true
            }
            None => false,
        }
    }

    /// Iterate texture slots in schema order
    pub fn textures(&self) -> impl Iterator<Item = (ParamId, &TextureSlot)> {
        self.textures.iter().map(|(p, s)| (*p, s))
    }

    /// Iterate vector slots in schema order
    pub fn vectors(&self) -> impl Iterator<Item = (ParamId, [f32; 4])> + '_ {
        self.vectors.iter().map(|(p, v)| (*p, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MaterialParameterSet {
        MaterialParameterSet::new(ShaderLabel::new("test"))
            .with_texture(ParamId::Texture0, Some(ImageHandle::new("white")))
            .with_vector(ParamId::CustomVector30, [0.0, 0.0, 0.0, 0.0])
    }

    #[test]
    fn test_writes_only_reach_defined_slots() {
        let mut params = sample();
        assert!(params.set_texture(ParamId::Texture0, Some(ImageHandle::new("col.png"))));
        assert!(!params.set_texture(ParamId::Texture1, Some(ImageHandle::new("col.png"))));
        assert!(!params.has_texture(ParamId::Texture1));
        assert!(!params.set_vector(ParamId::CustomVector3, [1.0; 4]));
        assert_eq!(params.vector(ParamId::CustomVector3), None);
    }

    #[test]
    fn test_set_texture_clears_default_flag() {
        let mut params = sample();
        assert!(params.texture(ParamId::Texture0).unwrap().is_default);
        params.set_texture(ParamId::Texture0, None);
        let slot = params.texture(ParamId::Texture0).unwrap();
        assert!(!slot.is_default);
        assert_eq!(slot.image, None);
    }

    #[test]
    fn test_set_vector_component() {
        let mut params = sample();
        assert!(params.set_vector_component(ParamId::CustomVector30, 1, 1.5));
        assert!(!params.set_vector_component(ParamId::CustomVector30, 4, 1.5));
        assert_eq!(params.vector(ParamId::CustomVector30), Some([0.0, 1.5, 0.0, 0.0]));
    }
}
