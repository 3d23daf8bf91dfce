// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host material description.

use crate::parameters::MaterialParameterSet;
use matl_convert_graph::Graph;
use serde::{Deserialize, Serialize};

/// A material as authored in the content tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Material name, used for reports and generated image names
    pub name: String,
    /// Whether the node graph drives the material
    #[serde(default)]
    pub use_nodes: bool,
    /// The shading graph, if one exists
    #[serde(default)]
    pub node_tree: Option<Graph>,
    /// Legacy viewport color
    #[serde(default = "default_diffuse")]
    pub diffuse_color: [f32; 4],
    /// Legacy metalness
    #[serde(default)]
    pub metallic: f32,
    /// Legacy specular intensity
    #[serde(default = "default_specular")]
    pub specular_intensity: f32,
    /// Legacy roughness
    #[serde(default = "default_roughness")]
    pub roughness: f32,
    /// Engine parameters produced by conversion
    #[serde(default)]
    pub parameters: Option<MaterialParameterSet>,
}

fn default_diffuse() -> [f32; 4] {
    [0.8, 0.8, 0.8, 1.0]
}

fn default_specular() -> f32 {
    0.5
}

fn default_roughness() -> f32 {
    0.4
}

impl Material {
    /// Create a material without a node graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            use_nodes: false,
            node_tree: None,
            diffuse_color: default_diffuse(),
            metallic: 0.0,
            specular_intensity: default_specular(),
            roughness: default_roughness(),
            parameters: None,
        }
    }

    /// Attach a node graph and enable it
    pub fn with_nodes(mut self, graph: Graph) -> Self {
        self.use_nodes = true;
        self.node_tree = Some(graph);
        self
    }

    /// The graph that drives shading, when nodes are enabled
    pub fn active_graph(&self) -> Option<&Graph> {
        if self.use_nodes {
            self.node_tree.as_ref()
        } else {
            None
        }
    }
}
