// SPDX-License-Identifier: MIT OR Apache-2.0
//! Normal map detection.

use matl_convert_graph::{Graph, ImageHandle, NodeKind, NodeRef};

/// Flat tangent-space normal used for generated NOR images
pub const NORMAL_PLACEHOLDER: [f32; 4] = [0.5, 0.5, 1.0, 1.0];

/// Image name fragments that mark a texture as a normal map
pub const NORMAL_NAME_HINTS: [&str; 4] = ["normal", "nor", "_n.", "_n_"];

/// Find an existing normal map in a graph.
///
/// Nodes are visited in graph order and the first hit wins: a normal map
/// node whose `Color` comes from an image texture, or an image texture whose
/// image name looks like a normal map.
pub fn find_normal_map(graph: &Graph) -> Option<ImageHandle> {
    graph.nodes().find_map(|node| match node.kind() {
        NodeKind::NormalMap => normal_map_source(node),
        NodeKind::ImageTexture { image: Some(image) } if looks_like_normal_map(image.name()) => {
            Some(image.clone())
        }
        _ => None,
    })
}

fn normal_map_source(node: NodeRef<'_>) -> Option<ImageHandle> {
    let source = node.input("Color")?.linked_node()?;
    source.kind().image().cloned()
}

/// Whether an image name contains a normal map hint, ignoring case
pub fn looks_like_normal_map(name: &str) -> bool {
    let name = name.to_lowercase();
    NORMAL_NAME_HINTS.iter().any(|hint| name.contains(hint))
}

/// Name of the generated NOR image for a material
pub fn nor_image_name(material_name: &str) -> String {
    format!("{material_name}_NOR")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_hints() {
        assert!(looks_like_normal_map("Body_Normal.png"));
        assert!(looks_like_normal_map("body_nor.png"));
        assert!(looks_like_normal_map("face_n.png"));
        assert!(looks_like_normal_map("face_n_01.png"));
        assert!(!looks_like_normal_map("face_col.png"));
        assert!(!looks_like_normal_map("nrm.png"));
    }

    #[test]
    fn test_normal_map_node_source() {
        let mut graph = Graph::default();
        let tex = graph.add(NodeKind::image_texture("bumps.png"));
        let normal = graph.add(NodeKind::NormalMap);
        graph.link(tex, "Color", normal, "Color").unwrap();
        assert_eq!(find_normal_map(&graph).map(|h| h.name().to_string()).as_deref(), Some("bumps.png"));
    }

    #[test]
    fn test_first_hit_in_graph_order() {
        let mut graph = Graph::default();
        graph.add(NodeKind::image_texture("hair_nor.png"));
        let tex = graph.add(NodeKind::image_texture("bumps.png"));
        let normal = graph.add(NodeKind::NormalMap);
        graph.link(tex, "Color", normal, "Color").unwrap();
        assert_eq!(find_normal_map(&graph).map(|h| h.name().to_string()).as_deref(), Some("hair_nor.png"));
    }

    #[test]
    fn test_unlinked_normal_map_node_is_skipped() {
        let mut graph = Graph::default();
        graph.add(NodeKind::NormalMap);
        graph.add(NodeKind::image_texture("col.png"));
        assert_eq!(find_normal_map(&graph), None);

        graph.add(NodeKind::image_texture("skin_N.png"));
        assert!(find_normal_map(&graph).is_some());
    }

    #[test]
    fn test_texture_without_image_is_skipped() {
        let mut graph = Graph::default();
        graph.add(NodeKind::ImageTexture { image: None });
        assert_eq!(find_normal_map(&graph), None);
    }

    #[test]
    fn test_nor_image_name() {
        assert_eq!(nor_image_name("Body"), "Body_NOR");
    }
}
