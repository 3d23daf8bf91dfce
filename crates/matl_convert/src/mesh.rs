// SPDX-License-Identifier: MIT OR Apache-2.0
//! Mesh attribute renaming for fighter models.
//!
//! Fighter shaders sample UVs from `map1` and `uvSet` and vertex colors from
//! `colorSet1`. Renaming is skipped with a warning when a mesh has more
//! layers than the preset can name.

use crate::report::ReportSink;
use serde::{Deserialize, Serialize};

/// Name of the first UV layer
pub const UV_MAP_1: &str = "map1";
/// Name of the second UV layer
pub const UV_MAP_2: &str = "uvSet";
/// Name of the vertex color layer
pub const COLOR_SET_1: &str = "colorSet1";

/// A named per-vertex color layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAttribute {
    /// Layer name
    pub name: String,
    /// RGBA values
    #[serde(default)]
    pub data: Vec<[f32; 4]>,
}

impl ColorAttribute {
    /// Create a color layer
    pub fn new(name: impl Into<String>, data: Vec<[f32; 4]>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// The renamable attribute layers of one mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshAttributes {
    /// Mesh name
    pub name: String,
    /// Names of the materials the mesh uses
    #[serde(default)]
    pub materials: Vec<String>,
    /// UV layer names, in layer order
    #[serde(default)]
    pub uv_layers: Vec<String>,
    /// Color layers, in layer order
    #[serde(default)]
    pub color_attributes: Vec<ColorAttribute>,
}

impl MeshAttributes {
    /// Create a mesh without layers
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            materials: Vec::new(),
            uv_layers: Vec::new(),
            color_attributes: Vec::new(),
        }
    }

    /// Whether the mesh uses the named material
    pub fn uses_material(&self, material: &str) -> bool {
        self.materials.iter().any(|m| m == material)
    }
}

/// Rename the layers of one mesh to the fighter names.
///
/// With two UV layers each missing name is assigned positionally. A color
/// layer renamed to `colorSet1` has its values halved, since the shader
/// doubles them.
pub fn rename_fighter_attributes(mesh: &mut MeshAttributes, sink: &mut dyn ReportSink) {
    match mesh.uv_layers.as_mut_slice() {
        [only] => *only = UV_MAP_1.to_string(),
        [first, second] => {
            let has_map1 = *first == UV_MAP_1 || *second == UV_MAP_1;
            let has_uv_set = *first == UV_MAP_2 || *second == UV_MAP_2;
            if !has_map1 {
                *first = UV_MAP_1.to_string();
            }
            if !has_uv_set {
                *second = UV_MAP_2.to_string();
            }
        }
        [] => {}
        _ => sink.warning(&format!(
            "Can't rename UV layers of mesh '{}', it has more than 2 UV layers! Please rename them manually, or remove the unneeded layers!",
            mesh.name
        )),
    }

    match mesh.color_attributes.as_mut_slice() {
        [] => {}
        [only] => {
            if only.name != COLOR_SET_1 {
                tracing::debug!(mesh = %mesh.name, from = %only.name, "Renaming color attribute");
                only.name = COLOR_SET_1.to_string();
                for color in &mut only.data {
                    *color = color.map(|c| c / 2.0);
                }
            }
        }
        _ => sink.warning(&format!(
            "Can't rename color attributes of mesh '{}', it has more than 1 color attribute! Please rename them manually, or remove the unneeded attributes!",
            mesh.name
        )),
    }
}

/// Rename the layers of every mesh using `material`
pub fn rename_meshes_using_material(
    meshes: &mut [MeshAttributes],
    material: &str,
    sink: &mut dyn ReportSink,
) {
    for mesh in meshes.iter_mut().filter(|mesh| mesh.uses_material(material)) {
        rename_fighter_attributes(mesh, sink);
    }
}
