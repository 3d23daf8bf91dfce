// SPDX-License-Identifier: MIT OR Apache-2.0
//! Standard socket layouts for each shading node kind.
//!
//! Socket names and defaults follow the authoring tool so that graphs
//! exported from it can be described without translation.

use crate::node::NodeKind;
use crate::port::{Port, PortType, PortValue};

/// Build the `(inputs, outputs)` sockets for a node kind
pub fn sockets(kind: &NodeKind) -> (Vec<Port>, Vec<Port>) {
    match kind {
        // ====================================================================
        // Output / shader nodes
        // ====================================================================
        NodeKind::Output { .. } => (
            vec![
                Port::input("Surface", PortType::Shader),
                Port::input("Volume", PortType::Shader),
                Port::input("Displacement", PortType::Vector),
            ],
            vec![],
        ),

        NodeKind::Emission => (
            vec![
                Port::input("Color", PortType::Color).with_default(PortValue::Color([1.0, 1.0, 1.0, 1.0])),
                Port::input("Strength", PortType::Float).with_default(PortValue::Float(1.0)),
            ],
            vec![Port::output("Emission", PortType::Shader)],
        ),

        NodeKind::Principled => (
            vec![
                Port::input("Base Color", PortType::Color).with_default(PortValue::Color([0.8, 0.8, 0.8, 1.0])),
                Port::input("Metallic", PortType::Float).with_default(PortValue::Float(0.0)),
                Port::input("Roughness", PortType::Float).with_default(PortValue::Float(0.5)),
                Port::input("IOR", PortType::Float).with_default(PortValue::Float(1.5)),
                Port::input("Alpha", PortType::Float).with_default(PortValue::Float(1.0)),
                Port::input("Normal", PortType::Vector),
                Port::input("Subsurface Weight", PortType::Float).with_default(PortValue::Float(0.0)),
                Port::input("Subsurface Radius", PortType::Vector).with_default(PortValue::Vector([1.0, 0.2, 0.1])),
                Port::input("Subsurface Scale", PortType::Float).with_default(PortValue::Float(0.05)),
                Port::input("Specular IOR Level", PortType::Float).with_default(PortValue::Float(0.5)),
                Port::input("Emission Color", PortType::Color).with_default(PortValue::Color([1.0, 1.0, 1.0, 1.0])),
                Port::input("Emission Strength", PortType::Float).with_default(PortValue::Float(0.0)),
            ],
            vec![Port::output("BSDF", PortType::Shader)],
        ),

        // ====================================================================
        // Texture / color nodes
        // ====================================================================
        NodeKind::ImageTexture { .. } => (
            vec![Port::input("Vector", PortType::Vector)],
            vec![
                Port::output("Color", PortType::Color),
                Port::output("Alpha", PortType::Float),
            ],
        ),

        NodeKind::MixRgb => (
            vec![
                Port::input("Fac", PortType::Float).with_default(PortValue::Float(0.5)),
                Port::input("Color1", PortType::Color).with_default(PortValue::Color([0.5, 0.5, 0.5, 1.0])),
                Port::input("Color2", PortType::Color).with_default(PortValue::Color([0.5, 0.5, 0.5, 1.0])),
            ],
            vec![Port::output("Color", PortType::Color)],
        ),

        NodeKind::NormalMap => (
            vec![
                Port::input("Strength", PortType::Float).with_default(PortValue::Float(1.0)),
                Port::input("Color", PortType::Color).with_default(PortValue::Color([0.5, 0.5, 1.0, 1.0])),
            ],
            vec![Port::output("Normal", PortType::Vector)],
        ),

        // ====================================================================
        // Mesh data nodes
        // ====================================================================
        NodeKind::Attribute { .. } => (
            vec![],
            vec![
                Port::output("Color", PortType::Color),
                Port::output("Vector", PortType::Vector),
                Port::output("Fac", PortType::Float),
                Port::output("Alpha", PortType::Float),
            ],
        ),

        NodeKind::UvMap { .. } => (vec![], vec![Port::output("UV", PortType::Vector)]),

        NodeKind::VertexColor { .. } => (
            vec![],
            vec![
                Port::output("Color", PortType::Color),
                Port::output("Alpha", PortType::Float),
            ],
        ),

        // Uninterpreted nodes get one socket of each family so they can sit
        // anywhere in a graph.
        NodeKind::Other { .. } => (
            vec![Port::input("Color", PortType::Color).with_default(PortValue::Color([0.8, 0.8, 0.8, 1.0]))],
            vec![
                Port::output("Shader", PortType::Shader),
                Port::output("Color", PortType::Color),
            ],
        ),
    }
}
