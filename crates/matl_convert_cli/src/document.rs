// SPDX-License-Identifier: MIT OR Apache-2.0
//! Material documents read and written by the tool.

use crate::args::OutputFormat;
use crate::error::CliError;
use matl_convert::{ColorAttribute, ImageEntry, Material, MeshAttributes};
use matl_convert_graph::{Graph, NodeKind, PortValue};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A material with the images and meshes it refers to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialDocument {
    /// The material to convert
    pub material: Material,
    /// Images registered before conversion
    #[serde(default)]
    pub images: Vec<ImageEntry>,
    /// Meshes whose attributes may be renamed
    #[serde(default)]
    pub meshes: Vec<MeshAttributes>,
}

impl MaterialDocument {
    /// Load a document; `.json` files are JSON, everything else RON
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(ron::from_str(&content)?)
        }
    }

    /// Serialize in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String, CliError> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Ron => {
                let config = ron::ser::PrettyConfig::default()
                    .struct_names(true)
                    .enumerate_arrays(false);
                Ok(ron::ser::to_string_pretty(self, config)?)
            }
        }
    }

    /// A two-layer principled material on a mesh with unnamed layers
    pub fn sample() -> Result<Self, CliError> {
        let mut graph = Graph::default();
        let output = graph.add(NodeKind::output());
        let bsdf = graph.add(NodeKind::Principled);
        let base = graph.add(NodeKind::image_texture("body_col.png"));
        let detail = graph.add(NodeKind::image_texture("body_detail.png"));
        let uv_base = graph.add(NodeKind::uv_map("UVMap"));
        let uv_detail = graph.add(NodeKind::uv_map("UVMap.001"));
        let mix = graph.add(NodeKind::MixRgb);
        let normal_tex = graph.add(NodeKind::image_texture("body_nor.png"));
        let normal = graph.add(NodeKind::NormalMap);

        let links = [
            (uv_base, "UV", base, "Vector"),
            (uv_detail, "UV", detail, "Vector"),
            (base, "Color", mix, "Color1"),
            (detail, "Color", mix, "Color2"),
            (mix, "Color", bsdf, "Base Color"),
            (normal_tex, "Color", normal, "Color"),
            (normal, "Normal", bsdf, "Normal"),
            (bsdf, "BSDF", output, "Surface"),
        ];
        for (from, output_name, to, input_name) in links {
            graph
                .link(from, output_name, to, input_name)
                .map_err(|e| CliError::Usage(format!("sample graph: {e}")))?;
        }
        if let Some(roughness) = graph.node_mut(bsdf).and_then(|n| n.input_mut("Roughness")) {
            roughness.default_value = Some(PortValue::Float(0.7));
        }

        let mut mesh = MeshAttributes::new("body_mesh");
        mesh.materials.push("Body".to_string());
        mesh.uv_layers = vec!["UVMap".to_string(), "UVMap.001".to_string()];
        mesh.color_attributes
            .push(ColorAttribute::new("Col", vec![[1.0, 1.0, 1.0, 1.0]; 4]));

        Ok(Self {
            material: Material::new("Body").with_nodes(graph),
            images: ["body_col.png", "body_detail.png", "body_nor.png"]
                .into_iter()
                .map(|name| ImageEntry::new(name, 1024, 1024))
                .collect(),
            meshes: vec![mesh],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_round_trips_through_ron() {
        let sample = MaterialDocument::sample().unwrap();
        let text = sample.render(OutputFormat::Ron).unwrap();
        let loaded: MaterialDocument = ron::from_str(&text).unwrap();
        assert_eq!(loaded.material.name, "Body");
        assert_eq!(loaded.images.len(), 3);
        let built = sample.material.active_graph().unwrap();
        let graph = loaded.material.active_graph().unwrap();
        assert_eq!(built.node_count(), 9);
        assert_eq!(graph.node_count(), built.node_count());
        assert_eq!(graph.connection_count(), built.connection_count());
    }

    #[test]
    fn test_load_json_by_extension() {
        let sample = MaterialDocument::sample().unwrap();
        let path = std::env::temp_dir().join(format!("matl_convert_doc_{}.json", std::process::id()));
        std::fs::write(&path, sample.render(OutputFormat::Json).unwrap()).unwrap();
        let loaded = MaterialDocument::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap().meshes.len(), 1);
    }

    #[test]
    fn test_minimal_document_defaults() {
        let doc: MaterialDocument = ron::from_str("(material: (name: \"Plain\"))").unwrap();
        assert!(doc.images.is_empty());
        assert!(doc.material.active_graph().is_none());
        assert_eq!(doc.material.roughness, 0.4);
    }
}
