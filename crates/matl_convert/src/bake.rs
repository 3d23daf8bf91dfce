// SPDX-License-Identifier: MIT OR Apache-2.0
//! Packed PRM texture baking.
//!
//! A PRM texture packs metalness, roughness, ambient occlusion and specular
//! into the RGBA channels of one image. Baking is delegated to a
//! [`TextureBaker`]; the orchestrator substitutes a flat placeholder when
//! the baker is unavailable or fails.

use crate::assets::AssetResolver;
use crate::error::ConvertError;
use crate::material::Material;
use matl_convert_graph::{ImageHandle, NodeKind, NodeRef};
use std::path::PathBuf;

/// Neutral PRM value: non-metal, half rough, no occlusion, default specular
pub const PRM_PLACEHOLDER: [f32; 4] = [0.0, 0.5, 1.0, 0.16];

/// Result of a successful bake
#[derive(Debug, Clone, PartialEq)]
pub enum BakeOutput {
    /// An image already registered with the asset table
    Image(ImageHandle),
    /// A file written by an external renderer
    Path(PathBuf),
}

/// Produces PRM textures for materials
pub trait TextureBaker {
    /// Whether a baking engine is present at all
    fn is_available(&self) -> bool;

    /// Bake a `size × size` PRM texture for `material`
    fn bake_prm(
        &self,
        material: &Material,
        size: u32,
        assets: &dyn AssetResolver,
    ) -> Result<BakeOutput, ConvertError>;
}

/// Name of the generated PRM image of a material
pub fn prm_image_name(material: &Material) -> String {
    format!("{}_PRM", material.name)
}

/// Bakes a uniform PRM from scalar material values.
///
/// Graph materials read the unlinked defaults of their first principled
/// node; linked inputs keep the neutral value. Materials without a graph
/// use their legacy scalars.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatPrmBaker;

impl FlatPrmBaker {
    /// The RGBA value baked for `material`
    pub fn prm_value(material: &Material) -> [f32; 4] {
        let Some(graph) = material.active_graph() else {
            return [material.metallic, material.roughness, 1.0, material.specular_intensity];
        };
        let principled = graph
            .nodes_of_kind(|kind| matches!(kind, NodeKind::Principled))
            .next();
        match principled {
            Some(node) => [
                unlinked_default(node, "Metallic").unwrap_or(PRM_PLACEHOLDER[0]),
                unlinked_default(node, "Roughness").unwrap_or(PRM_PLACEHOLDER[1]),
                1.0,
                unlinked_default(node, "Specular IOR Level").unwrap_or(PRM_PLACEHOLDER[3]),
            ],
            None => PRM_PLACEHOLDER,
        }
    }
}

fn unlinked_default(node: NodeRef<'_>, input: &str) -> Option<f32> {
    let socket = node.input(input)?;
    if socket.is_linked() {
        return None;
    }
    socket.default_float()
}

impl TextureBaker for FlatPrmBaker {
    fn is_available(&self) -> bool {
        true
    }

    fn bake_prm(
        &self,
        material: &Material,
        size: u32,
        assets: &dyn AssetResolver,
    ) -> Result<BakeOutput, ConvertError> {
        let value = Self::prm_value(material);
        tracing::debug!(material = %material.name, ?value, size, "Baking flat PRM");
        let image = assets
            .create_placeholder(&prm_image_name(material), size, size, value)
            .map_err(|e| ConvertError::Bake(e.to_string()))?;
        assets.prepare_data_texture(&image);
        Ok(BakeOutput::Image(image))
    }
}

/// A host without a baking engine
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableBaker;

impl TextureBaker for UnavailableBaker {
    fn is_available(&self) -> bool {
        false
    }

    fn bake_prm(
        &self,
        _material: &Material,
        _size: u32,
        _assets: &dyn AssetResolver,
    ) -> Result<BakeOutput, ConvertError> {
        Err(ConvertError::Bake("no baking engine available".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ColorSpace, ImageTable};
    use matl_convert_graph::{Graph, PortValue};

    #[test]
    fn test_legacy_prm_value() {
        let mut material = Material::new("Legacy");
        material.metallic = 1.0;
        material.roughness = 0.25;
        material.specular_intensity = 0.3;
        assert_eq!(FlatPrmBaker::prm_value(&material), [1.0, 0.25, 1.0, 0.3]);
    }

    #[test]
    fn test_principled_prm_value() {
        let mut graph = Graph::default();
        let bsdf = graph.add(NodeKind::Principled);
        let node = graph.node_mut(bsdf).unwrap();
        node.input_mut("Metallic").unwrap().default_value = Some(PortValue::Float(0.75));
        let tex = graph.add(NodeKind::image_texture("rough.png"));
        graph.link(tex, "Color", bsdf, "Roughness").unwrap();

        let material = Material::new("Graph").with_nodes(graph);
        // Roughness is linked, so the neutral value stands
        assert_eq!(FlatPrmBaker::prm_value(&material), [0.75, 0.5, 1.0, 0.5]);
    }

    #[test]
    fn test_graph_without_principled_is_neutral() {
        let mut graph = Graph::default();
        graph.add(NodeKind::Emission);
        let material = Material::new("Glow").with_nodes(graph);
        assert_eq!(FlatPrmBaker::prm_value(&material), PRM_PLACEHOLDER);
    }

    #[test]
    fn test_flat_bake_creates_data_image() {
        let assets = ImageTable::new();
        let material = Material::new("Body");
        let output = FlatPrmBaker.bake_prm(&material, 4, &assets).unwrap();
        let BakeOutput::Image(image) = output else {
            panic!("expected an image");
        };
        assert_eq!(image.name(), "Body_PRM");
        let entry = assets.entry("Body_PRM").unwrap();
        assert_eq!((entry.width, entry.height), (4, 4));
        assert_eq!(entry.color_space, ColorSpace::NonColor);
        assert!(entry.packed);
        assert_eq!(assets.pixel("Body_PRM", 3, 3), Some([0.0, 0.4, 1.0, 0.5]));
    }

    #[test]
    fn test_flat_bake_zero_size_fails() {
        let assets = ImageTable::new();
        let result = FlatPrmBaker.bake_prm(&Material::new("Body"), 0, &assets);
        assert!(matches!(result, Err(ConvertError::Bake(_))));
        assert!(assets.is_empty());
    }

    #[test]
    fn test_unavailable_baker() {
        let assets = ImageTable::new();
        assert!(!UnavailableBaker.is_available());
        assert!(UnavailableBaker.bake_prm(&Material::new("Body"), 8, &assets).is_err());
    }
}
