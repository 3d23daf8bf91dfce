// SPDX-License-Identifier: MIT OR Apache-2.0
//! UV-map and vertex-color channel counting.
//!
//! Both counts are cardinalities of name sets: several nodes referencing the
//! same layer count once, and node order does not matter.

use matl_convert_graph::{AttributeType, Graph, NodeKind, NodeRef};
use std::collections::BTreeSet;

/// Distinct channels a graph reads from the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelCounts {
    /// Distinct explicitly named UV layers
    pub uv_layers: usize,
    /// Distinct vertex color layers actually wired into the graph
    pub vertex_colors: usize,
}

impl ChannelCounts {
    /// Count the channels of a graph
    pub fn of(graph: &Graph) -> Self {
        Self {
            uv_layers: count_uv_layers(graph.nodes()),
            vertex_colors: count_vertex_color_layers(graph.nodes()),
        }
    }

    /// Whether a second UV layer is in use
    pub fn has_second_uv(&self) -> bool {
        self.uv_layers >= 2
    }

    /// Whether any vertex color layer is in use
    pub fn has_color_set(&self) -> bool {
        self.vertex_colors >= 1
    }
}

/// Count distinct UV layers named by UV map nodes.
///
/// Nodes reading the instancer's UVs or the active layer (empty name) are
/// ignored.
pub fn count_uv_layers<'g>(nodes: impl IntoIterator<Item = NodeRef<'g>>) -> usize {
    nodes
        .into_iter()
        .filter_map(|node| match node.kind() {
            NodeKind::UvMap { uv_map, from_instancer } if !*from_instancer && !uv_map.is_empty() => {
                Some(uv_map.as_str())
            }
            _ => None,
        })
        .collect::<BTreeSet<_>>()
        .len()
}

/// Count distinct vertex color layers.
///
/// Geometry attribute nodes and vertex color nodes count when their color
/// output feeds something and their layer name is set.
pub fn count_vertex_color_layers<'g>(nodes: impl IntoIterator<Item = NodeRef<'g>>) -> usize {
    nodes
        .into_iter()
        .filter_map(|node| {
            let name = match node.kind() {
                NodeKind::Attribute {
                    attribute_type: AttributeType::Geometry,
                    attribute_name,
                } => attribute_name,
                NodeKind::VertexColor { layer_name } => layer_name,
                _ => return None,
            };
            let color_used = node.output("Color").is_some_and(|socket| socket.is_linked());
            (color_used && !name.is_empty()).then_some(name.as_str())
        })
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use matl_convert_graph::{NodeId, NodeKind};

    fn wire_color(graph: &mut Graph, source: NodeId) {
        let mix = graph.add(NodeKind::MixRgb);
        graph.link(source, "Color", mix, "Color2").unwrap();
    }

    #[test]
    fn test_uv_layers_are_a_set() {
        let mut graph = Graph::default();
        graph.add(NodeKind::uv_map("map1"));
        graph.add(NodeKind::uv_map("uvSet"));
        graph.add(NodeKind::uv_map("map1"));
        assert_eq!(ChannelCounts::of(&graph).uv_layers, 2);
    }

    #[test]
    fn test_uv_layers_skip_active_and_instancer() {
        let mut graph = Graph::default();
        graph.add(NodeKind::uv_map(""));
        graph.add(NodeKind::UvMap {
            uv_map: "uvSet".to_string(),
            from_instancer: true,
        });
        graph.add(NodeKind::uv_map("map1"));
        assert_eq!(ChannelCounts::of(&graph).uv_layers, 1);
    }

    #[test]
    fn test_uv_count_ignores_order() {
        let mut a = Graph::default();
        a.add(NodeKind::uv_map("map1"));
        a.add(NodeKind::uv_map("uvSet"));
        let mut b = Graph::default();
        b.add(NodeKind::uv_map("uvSet"));
        b.add(NodeKind::uv_map("map1"));
        assert_eq!(ChannelCounts::of(&a), ChannelCounts::of(&b));
    }

    #[test]
    fn test_vertex_colors_require_linked_color_output() {
        let mut graph = Graph::default();
        let used = graph.add(NodeKind::geometry_attribute("colorSet1"));
        wire_color(&mut graph, used);
        // Present but unused
        graph.add(NodeKind::geometry_attribute("colorSet2"));
        assert_eq!(ChannelCounts::of(&graph).vertex_colors, 1);
    }

    #[test]
    fn test_vertex_color_count_ignores_order() {
        let mut a = Graph::default();
        let first = a.add(NodeKind::geometry_attribute("colorSet1"));
        wire_color(&mut a, first);
        let second = a.add(NodeKind::vertex_color("colorSet2"));
        wire_color(&mut a, second);

        let mut b = Graph::default();
        let second = b.add(NodeKind::vertex_color("colorSet2"));
        wire_color(&mut b, second);
        let first = b.add(NodeKind::geometry_attribute("colorSet1"));
        wire_color(&mut b, first);

        assert_eq!(ChannelCounts::of(&a).vertex_colors, 2);
        assert_eq!(ChannelCounts::of(&a), ChannelCounts::of(&b));
    }

    #[test]
    fn test_repeated_vertex_color_name_counts_once() {
        let mut graph = Graph::default();
        for _ in 0..2 {
            let attribute = graph.add(NodeKind::geometry_attribute("colorSet1"));
            wire_color(&mut graph, attribute);
        }
        assert_eq!(ChannelCounts::of(&graph).vertex_colors, 1);
    }

    #[test]
    fn test_vertex_colors_merge_attribute_and_color_nodes() {
        let mut graph = Graph::default();
        let attribute = graph.add(NodeKind::geometry_attribute("colorSet1"));
        wire_color(&mut graph, attribute);
        let color = graph.add(NodeKind::vertex_color("colorSet1"));
        wire_color(&mut graph, color);
        assert_eq!(ChannelCounts::of(&graph).vertex_colors, 1);
    }

    #[test]
    fn test_vertex_colors_skip_non_geometry_and_unnamed() {
        let mut graph = Graph::default();
        let object = graph.add(NodeKind::Attribute {
            attribute_type: AttributeType::Object,
            attribute_name: "tint".to_string(),
        });
        wire_color(&mut graph, object);
        let unnamed = graph.add(NodeKind::vertex_color(""));
        wire_color(&mut graph, unnamed);
        let counts = ChannelCounts::of(&graph);
        assert_eq!(counts.vertex_colors, 0);
        assert!(!counts.has_color_set());
    }

    #[test]
    fn test_alpha_only_usage_does_not_count() {
        let mut graph = Graph::default();
        let attribute = graph.add(NodeKind::geometry_attribute("colorSet1"));
        let mix = graph.add(NodeKind::MixRgb);
        graph.link(attribute, "Alpha", mix, "Fac").unwrap();
        assert_eq!(ChannelCounts::of(&graph).vertex_colors, 0);
    }
}
