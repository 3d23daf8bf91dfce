// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shading-intent classification of the node feeding the material output.

use matl_convert_graph::{NodeKind, NodeRef, SocketRef};

/// Absolute tolerance for treating an unlinked default as zero
pub const ZERO_TOLERANCE: f32 = 0.01;

/// What the terminal shading node is trying to express
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadingIntent {
    /// Emission shader with a constant color
    FlatEmission,
    /// Emission shader with a linked color
    TexturedEmission,
    /// Principled surface that also emits
    PbrEmission,
    /// Principled surface with subsurface scattering
    PbrSubsurface,
    /// Plain principled surface
    Pbr,
    /// Anything else feeds the output
    Unsupported,
}

impl ShadingIntent {
    /// Classify the node connected to the output's surface input.
    ///
    /// Emission is tested before subsurface, so a principled node doing
    /// both is an emissive surface.
    pub fn classify(terminal: NodeRef<'_>) -> Self {
        match terminal.kind() {
            NodeKind::Emission => {
                if terminal.input("Color").is_some_and(|s| s.is_linked()) {
                    Self::TexturedEmission
                } else {
                    Self::FlatEmission
                }
            }
            NodeKind::Principled if uses_emission(terminal) => Self::PbrEmission,
            NodeKind::Principled if uses_subsurface(terminal) => Self::PbrSubsurface,
            NodeKind::Principled => Self::Pbr,
            NodeKind::Output { .. }
            | NodeKind::ImageTexture { .. }
            | NodeKind::MixRgb
            | NodeKind::Attribute { .. }
            | NodeKind::UvMap { .. }
            | NodeKind::VertexColor { .. }
            | NodeKind::NormalMap
            | NodeKind::Other { .. } => Self::Unsupported,
        }
    }
}

/// Whether `value` is zero within [`ZERO_TOLERANCE`]
pub fn is_near_zero(value: f32) -> bool {
    value.abs() <= ZERO_TOLERANCE
}

/// Whether a principled node emits light.
///
/// A linked emission color or strength always counts. Otherwise the node
/// emits unless the default strength or the default color's RGB is zero.
pub fn uses_emission(principled: NodeRef<'_>) -> bool {
    let (Some(color), Some(strength)) = (
        principled.input("Emission Color"),
        principled.input("Emission Strength"),
    ) else {
        return false;
    };

    if color.is_linked() || strength.is_linked() {
        return true;
    }
    if is_near_zero(default_float(strength)) {
        return false;
    }
    let [r, g, b, _] = default_color(color);
    !(is_near_zero(r) && is_near_zero(g) && is_near_zero(b))
}

/// Whether a principled node scatters below its surface
pub fn uses_subsurface(principled: NodeRef<'_>) -> bool {
    let Some(weight) = principled.input("Subsurface Weight") else {
        return false;
    };
    weight.is_linked() || !is_near_zero(default_float(weight))
}

fn default_float(socket: SocketRef<'_>) -> f32 {
    socket.default_float().unwrap_or(0.0)
}

fn default_color(socket: SocketRef<'_>) -> [f32; 4] {
    socket.default_color().unwrap_or([0.0, 0.0, 0.0, 1.0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use matl_convert_graph::{Graph, NodeId, PortValue};

    fn set_default(graph: &mut Graph, node: NodeId, input: &str, value: PortValue) {
        graph.node_mut(node).unwrap().input_mut(input).unwrap().default_value = Some(value);
    }

    fn classify(graph: &Graph, node: NodeId) -> ShadingIntent {
        ShadingIntent::classify(graph.node_ref(node).unwrap())
    }

    #[test]
    fn test_default_principled_is_plain_pbr() {
        let mut graph = Graph::default();
        let bsdf = graph.add(NodeKind::Principled);
        assert_eq!(classify(&graph, bsdf), ShadingIntent::Pbr);
    }

    #[test]
    fn test_emission_strength_threshold() {
        let mut graph = Graph::default();
        let bsdf = graph.add(NodeKind::Principled);
        set_default(&mut graph, bsdf, "Emission Strength", PortValue::Float(0.009));
        assert_eq!(classify(&graph, bsdf), ShadingIntent::Pbr);
        set_default(&mut graph, bsdf, "Emission Strength", PortValue::Float(1.0));
        assert_eq!(classify(&graph, bsdf), ShadingIntent::PbrEmission);
    }

    #[test]
    fn test_black_emission_color_does_not_emit() {
        let mut graph = Graph::default();
        let bsdf = graph.add(NodeKind::Principled);
        set_default(&mut graph, bsdf, "Emission Strength", PortValue::Float(5.0));
        set_default(&mut graph, bsdf, "Emission Color", PortValue::Color([0.005, 0.0, 0.0, 1.0]));
        assert!(!uses_emission(graph.node_ref(bsdf).unwrap()));
        set_default(&mut graph, bsdf, "Emission Color", PortValue::Color([0.0, 0.0, 0.02, 1.0]));
        assert!(uses_emission(graph.node_ref(bsdf).unwrap()));
    }

    #[test]
    fn test_linked_emission_ignores_defaults() {
        let mut graph = Graph::default();
        let tex = graph.add(NodeKind::image_texture("emi.png"));
        let bsdf = graph.add(NodeKind::Principled);
        graph.link(tex, "Color", bsdf, "Emission Color").unwrap();
        // Strength default stays 0.0
        assert_eq!(classify(&graph, bsdf), ShadingIntent::PbrEmission);
    }

    #[test]
    fn test_subsurface_weight() {
        let mut graph = Graph::default();
        let bsdf = graph.add(NodeKind::Principled);
        set_default(&mut graph, bsdf, "Subsurface Weight", PortValue::Float(0.2));
        assert_eq!(classify(&graph, bsdf), ShadingIntent::PbrSubsurface);

        let mut graph = Graph::default();
        let value = graph.add(NodeKind::other("ShaderNodeValue"));
        let bsdf = graph.add(NodeKind::Principled);
        graph.link(value, "Color", bsdf, "Subsurface Weight").unwrap();
        assert_eq!(classify(&graph, bsdf), ShadingIntent::PbrSubsurface);
    }

    #[test]
    fn test_emission_wins_over_subsurface() {
        let mut graph = Graph::default();
        let tex = graph.add(NodeKind::image_texture("emi.png"));
        let bsdf = graph.add(NodeKind::Principled);
        graph.link(tex, "Color", bsdf, "Emission Color").unwrap();
        set_default(&mut graph, bsdf, "Subsurface Weight", PortValue::Float(1.0));
        assert_eq!(classify(&graph, bsdf), ShadingIntent::PbrEmission);
    }

    #[test]
    fn test_emission_node_split_on_color_link() {
        let mut graph = Graph::default();
        let emission = graph.add(NodeKind::Emission);
        assert_eq!(classify(&graph, emission), ShadingIntent::FlatEmission);

        let tex = graph.add(NodeKind::image_texture("emi.png"));
        graph.link(tex, "Color", emission, "Color").unwrap();
        assert_eq!(classify(&graph, emission), ShadingIntent::TexturedEmission);
    }

    #[test]
    fn test_other_shaders_are_unsupported() {
        let mut graph = Graph::default();
        let diffuse = graph.add(NodeKind::other("ShaderNodeBsdfDiffuse"));
        assert_eq!(classify(&graph, diffuse), ShadingIntent::Unsupported);
    }
}
