// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the shading graph.

use crate::image::ImageHandle;
use crate::port::{Port, PortId};
use crate::shading;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Render engine an output node is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RenderTarget {
    /// Used by every engine
    #[default]
    All,
    /// Realtime engine
    Eevee,
    /// Path tracer
    Cycles,
}

impl RenderTarget {
    /// Lower-case engine name
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Eevee => "eevee",
            Self::Cycles => "cycles",
        }
    }
}

/// Source an attribute node reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AttributeType {
    /// Mesh attribute (vertex colors, custom layers)
    #[default]
    Geometry,
    /// Object custom property
    Object,
    /// Instancer attribute
    Instancer,
    /// View layer / scene attribute
    ViewLayer,
}

/// The closed set of node kinds the converter distinguishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Material output terminal
    Output {
        /// Engine this output applies to
        target: RenderTarget,
    },
    /// Emission shader
    Emission,
    /// Principled BSDF
    Principled,
    /// Image texture lookup
    ImageTexture {
        /// Bound image, if any
        image: Option<ImageHandle>,
    },
    /// Two-input color mix
    MixRgb,
    /// Generic attribute reader
    Attribute {
        /// Where the attribute comes from
        attribute_type: AttributeType,
        /// Attribute (layer) name
        attribute_name: String,
    },
    /// Explicit UV map reference
    UvMap {
        /// UV layer name; empty means the active layer
        uv_map: String,
        /// Reads the instancer's UVs instead of the mesh's
        from_instancer: bool,
    },
    /// Vertex color layer reader
    VertexColor {
        /// Color layer name; empty means the active layer
        layer_name: String,
    },
    /// Tangent-space normal map
    NormalMap,
    /// Any node the converter does not interpret
    Other {
        /// Host type name, kept for reporting
        type_name: String,
    },
}

impl NodeKind {
    /// Output node bound to every engine
    pub fn output() -> Self {
        Self::Output {
            target: RenderTarget::All,
        }
    }

    /// Image texture node bound to the named image
    pub fn image_texture(image: impl AsRef<str>) -> Self {
        Self::ImageTexture {
            image: Some(ImageHandle::new(image)),
        }
    }

    /// Geometry attribute node reading the named layer
    pub fn geometry_attribute(name: impl Into<String>) -> Self {
        Self::Attribute {
            attribute_type: AttributeType::Geometry,
            attribute_name: name.into(),
        }
    }

    /// UV map node referencing the named layer
    pub fn uv_map(name: impl Into<String>) -> Self {
        Self::UvMap {
            uv_map: name.into(),
            from_instancer: false,
        }
    }

    /// Vertex color node reading the named layer
    pub fn vertex_color(name: impl Into<String>) -> Self {
        Self::VertexColor {
            layer_name: name.into(),
        }
    }

    /// Uninterpreted node of the given host type
    pub fn other(type_name: impl Into<String>) -> Self {
        Self::Other {
            type_name: type_name.into(),
        }
    }

    /// Human-readable kind name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Output { .. } => "Material Output",
            Self::Emission => "Emission",
            Self::Principled => "Principled BSDF",
            Self::ImageTexture { .. } => "Image Texture",
            Self::MixRgb => "Mix",
            Self::Attribute { .. } => "Attribute",
            Self::UvMap { .. } => "UV Map",
            Self::VertexColor { .. } => "Color Attribute",
            Self::NormalMap => "Normal Map",
            Self::Other { type_name } => type_name,
        }
    }

    /// The image bound to an image texture node
    pub fn image(&self) -> Option<&ImageHandle> {
        match self {
            Self::ImageTexture { image } => image.as_ref(),
            _ => None,
        }
    }
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// What the node does
    pub kind: NodeKind,
    /// Display name (can be customized)
    pub name: String,
    /// Input ports
    pub inputs: Vec<Port>,
    /// Output ports
    pub outputs: Vec<Port>,
}

impl Node {
    /// Create a node with the standard sockets of its kind
    pub fn new(kind: NodeKind) -> Self {
        let (inputs, outputs) = shading::sockets(&kind);
        Self {
            id: NodeId::new(),
            name: kind.display_name().to_string(),
            kind,
            inputs,
            outputs,
        }
    }

    /// Get an input port by name
    pub fn input(&self, name: &str) -> Option<&Port> {
        self.inputs.iter().find(|p| p.name == name)
    }

    /// Get a mutable input port by name
    pub fn input_mut(&mut self, name: &str) -> Option<&mut Port> {
        self.inputs.iter_mut().find(|p| p.name == name)
    }

    /// Get an output port by name
    pub fn output(&self, name: &str) -> Option<&Port> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// Get a port by ID
    pub fn port(&self, port_id: &PortId) -> Option<&Port> {
        self.inputs.iter().find(|p| p.id == *port_id)
            .or_else(|| self.outputs.iter().find(|p| p.id == *port_id))
    }

    /// Get all ports
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter())
    }
}
