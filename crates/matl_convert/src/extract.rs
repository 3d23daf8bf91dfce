// SPDX-License-Identifier: MIT OR Apache-2.0
//! Texture extraction along mix chains.
//!
//! Only three chain shapes are recognized, ending at the consuming socket:
//!
//! ```text
//! Direct:  ImageTexture ──────────────────────────────────────▶ socket
//! Single:  ImageTexture ─▶ Mix.Color{layer} ──────────────────▶ socket
//! Double:  ImageTexture ─▶ Mix.Color{layer} ─▶ Mix.Color1 ────▶ socket
//! ```
//!
//! In the double shape the outer mix blends vertex color over the texture
//! mix. Any other shape yields `None`; a partial match is never returned.

use matl_convert_graph::{ImageHandle, NodeKind, NodeRef, SocketRef};

/// Number of mix nodes between a texture and the consuming socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixDepth {
    /// Texture feeds the socket directly
    Direct,
    /// One mix between the texture layers
    Single,
    /// A vertex-color mix over the texture-layer mix
    Double,
}

impl MixDepth {
    /// Depth from a mix-node count; `None` outside `0..=2`
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            0 => Some(Self::Direct),
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            _ => None,
        }
    }

    /// Number of mix nodes in the chain
    pub fn count(&self) -> u8 {
        match self {
            Self::Direct => 0,
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

/// Which texture layer of a mix to follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// `Color1`
    First,
    /// `Color2`
    Second,
}

impl Layer {
    /// Layer from its 1-based number; `None` outside `1..=2`
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            _ => None,
        }
    }

    /// The mix input carrying this layer
    pub fn mix_input(&self) -> &'static str {
        match self {
            Self::First => "Color1",
            Self::Second => "Color2",
        }
    }
}

/// Find the image of `layer` reaching `socket` through a chain of `depth` mixes
pub fn layer_image(socket: SocketRef<'_>, depth: MixDepth, layer: Layer) -> Option<ImageHandle> {
    let source = socket.linked_node()?;
    let texture = match depth {
        MixDepth::Direct => source,
        MixDepth::Single => follow_mix(source, layer.mix_input())?,
        MixDepth::Double => {
            let texture_mix = follow_mix(source, Layer::First.mix_input())?;
            follow_mix(texture_mix, layer.mix_input())?
        }
    };
    texture_image(texture)
}

/// [`layer_image`] with raw numbers, as the chain is usually described.
///
/// The socket must be linked before the numbers are even considered;
/// out-of-range numbers yield `None`.
pub fn layer_image_at(socket: SocketRef<'_>, mix_count: u8, layer: u8) -> Option<ImageHandle> {
    if !socket.is_linked() {
        return None;
    }
    let layer = Layer::from_number(layer)?;
    let depth = MixDepth::from_count(mix_count)?;
    layer_image(socket, depth, layer)
}

/// The node feeding `input` of `mix`, provided `mix` is a mix node
fn follow_mix<'g>(mix: NodeRef<'g>, input: &str) -> Option<NodeRef<'g>> {
    if *mix.kind() != NodeKind::MixRgb {
        return None;
    }
    mix.input(input)?.linked_node()
}

fn texture_image(node: NodeRef<'_>) -> Option<ImageHandle> {
    match node.kind() {
        NodeKind::ImageTexture { image } => image.clone(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matl_convert_graph::{Graph, NodeId};

    struct Chain {
        graph: Graph,
        bsdf: NodeId,
    }

    impl Chain {
        fn base_color(&self) -> SocketRef<'_> {
            self.graph.node_ref(self.bsdf).unwrap().input("Base Color").unwrap()
        }
    }

    fn direct() -> Chain {
        let mut graph = Graph::default();
        let tex = graph.add(NodeKind::image_texture("col.png"));
        let bsdf = graph.add(NodeKind::Principled);
        graph.link(tex, "Color", bsdf, "Base Color").unwrap();
        Chain { graph, bsdf }
    }

    fn single() -> Chain {
        let mut graph = Graph::default();
        let a = graph.add(NodeKind::image_texture("layer1.png"));
        let b = graph.add(NodeKind::image_texture("layer2.png"));
        let mix = graph.add(NodeKind::MixRgb);
        let bsdf = graph.add(NodeKind::Principled);
        graph.link(a, "Color", mix, "Color1").unwrap();
        graph.link(b, "Color", mix, "Color2").unwrap();
        graph.link(mix, "Color", bsdf, "Base Color").unwrap();
        Chain { graph, bsdf }
    }

    fn double() -> Chain {
        let mut graph = Graph::default();
        let a = graph.add(NodeKind::image_texture("layer1.png"));
        let b = graph.add(NodeKind::image_texture("layer2.png"));
        let colors = graph.add(NodeKind::geometry_attribute("colorSet1"));
        let textures = graph.add(NodeKind::MixRgb);
        let outer = graph.add(NodeKind::MixRgb);
        let bsdf = graph.add(NodeKind::Principled);
        graph.link(a, "Color", textures, "Color1").unwrap();
        graph.link(b, "Color", textures, "Color2").unwrap();
        graph.link(textures, "Color", outer, "Color1").unwrap();
        graph.link(colors, "Color", outer, "Color2").unwrap();
        graph.link(outer, "Color", bsdf, "Base Color").unwrap();
        Chain { graph, bsdf }
    }

    fn name(image: Option<ImageHandle>) -> Option<String> {
        image.map(|h| h.name().to_string())
    }

    #[test]
    fn test_direct_chain() {
        let chain = direct();
        assert_eq!(name(layer_image_at(chain.base_color(), 0, 1)).as_deref(), Some("col.png"));
    }

    #[test]
    fn test_single_mix_chain_layers() {
        let chain = single();
        let socket = chain.base_color();
        assert_eq!(name(layer_image_at(socket, 1, 1)).as_deref(), Some("layer1.png"));
        assert_eq!(name(layer_image_at(socket, 1, 2)).as_deref(), Some("layer2.png"));
    }

    #[test]
    fn test_double_mix_chain_layers() {
        let chain = double();
        let socket = chain.base_color();
        assert_eq!(name(layer_image_at(socket, 2, 1)).as_deref(), Some("layer1.png"));
        assert_eq!(name(layer_image_at(socket, 2, 2)).as_deref(), Some("layer2.png"));
    }

    #[test]
    fn test_depth_mismatch_yields_none() {
        // Texture straight into the socket is not a one-mix chain
        assert_eq!(layer_image_at(direct().base_color(), 1, 1), None);
        assert_eq!(layer_image_at(direct().base_color(), 2, 1), None);
        // A mix is not a texture
        assert_eq!(layer_image_at(single().base_color(), 0, 1), None);
        // The inner node of a one-mix chain is a texture, not a mix
        assert_eq!(layer_image_at(single().base_color(), 2, 1), None);
        // The outer mix's first layer is a mix, not a texture
        assert_eq!(layer_image_at(double().base_color(), 1, 1), None);
    }

    #[test]
    fn test_out_of_range_arguments() {
        let chain = single();
        assert_eq!(layer_image_at(chain.base_color(), 3, 1), None);
        assert_eq!(layer_image_at(chain.base_color(), 1, 0), None);
        assert_eq!(layer_image_at(chain.base_color(), 1, 3), None);
    }

    #[test]
    fn test_unlinked_socket() {
        let chain = direct();
        let metallic = chain.graph.node_ref(chain.bsdf).unwrap().input("Metallic").unwrap();
        assert_eq!(layer_image_at(metallic, 0, 1), None);
        assert_eq!(layer_image(metallic, MixDepth::Direct, Layer::First), None);
    }

    #[test]
    fn test_unlinked_mix_layer() {
        let mut graph = Graph::default();
        let a = graph.add(NodeKind::image_texture("layer1.png"));
        let mix = graph.add(NodeKind::MixRgb);
        let bsdf = graph.add(NodeKind::Principled);
        graph.link(a, "Color", mix, "Color1").unwrap();
        graph.link(mix, "Color", bsdf, "Base Color").unwrap();
        let socket = graph.node_ref(bsdf).unwrap().input("Base Color").unwrap();
        assert!(layer_image_at(socket, 1, 1).is_some());
        assert_eq!(layer_image_at(socket, 1, 2), None);
    }

    #[test]
    fn test_texture_without_image() {
        let mut graph = Graph::default();
        let tex = graph.add(NodeKind::ImageTexture { image: None });
        let bsdf = graph.add(NodeKind::Principled);
        graph.link(tex, "Color", bsdf, "Base Color").unwrap();
        let socket = graph.node_ref(bsdf).unwrap().input("Base Color").unwrap();
        assert_eq!(layer_image_at(socket, 0, 1), None);
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let chain = double();
        let socket = chain.base_color();
        let first = layer_image(socket, MixDepth::Double, Layer::Second);
        let second = layer_image(socket, MixDepth::Double, Layer::Second);
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn test_depth_and_layer_conversions() {
        for count in 0..=2 {
            assert_eq!(MixDepth::from_count(count).map(|d| d.count()), Some(count));
        }
        assert_eq!(Layer::from_number(2).map(|l| l.mix_input()), Some("Color2"));
    }
}
