// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parameter mapping for graph and legacy materials.
//!
//! Every path follows the same order: pick a variant, let the catalog create
//! the parameter set for it, then fill slots. Extraction failures fall back
//! to defaults and never abort the mapping.

use crate::assets::{defaults, AssetResolver};
use crate::catalog::VariantCatalog;
use crate::channels::ChannelCounts;
use crate::error::ConvertError;
use crate::extract::{layer_image, Layer};
use crate::intent::ShadingIntent;
use crate::material::Material;
use crate::param::ParamId;
use crate::parameters::MaterialParameterSet;
use crate::report::ReportSink;
use crate::variant::Variant;
use matl_convert_graph::{Graph, ImageHandle, NodeRef, RenderTarget, SocketRef};

/// Fixed subsurface radius written to `CustomVector30.xy`
pub const SUBSURFACE_RADIUS: [f32; 2] = [0.5, 1.5];

/// Shared inputs of a mapping run
pub struct MapContext<'a> {
    /// Variant schemas
    pub catalog: &'a dyn VariantCatalog,
    /// Image lookups
    pub assets: &'a dyn AssetResolver,
}

impl MapContext<'_> {
    fn create(&self, variant: Variant) -> Result<MaterialParameterSet, ConvertError> {
        self.catalog.create(&variant.shader_label(), self.assets)
    }

    fn default_image(&self, name: &str) -> Option<ImageHandle> {
        self.assets.find(name)
    }
}

/// Map a material without a node graph from its legacy scalar properties
pub fn map_legacy(material: &Material, ctx: &MapContext<'_>) -> Result<MaterialParameterSet, ConvertError> {
    let mut params = ctx.create(Variant::MESH_WIDE)?;
    params.set_vector(
        ParamId::CustomVector47,
        [material.metallic, material.roughness, 1.0, material.specular_intensity],
    );
    params.set_vector(ParamId::CustomVector13, material.diffuse_color);
    Ok(params)
}

/// Map a node graph.
///
/// A graph without an output for `target`, or whose output has nothing
/// connected to its surface, maps to the default PBR variant with a warning.
pub fn map_graph(
    material_name: &str,
    graph: &Graph,
    target: RenderTarget,
    ctx: &MapContext<'_>,
    sink: &mut dyn ReportSink,
) -> Result<MaterialParameterSet, ConvertError> {
    let Some(output) = graph.output_node(target) else {
        sink.warning(&format!(
            "The material \"{material_name}\" has no {} output! Converting to default PBR material.",
            target.name()
        ));
        return ctx.create(Variant::DEFAULT);
    };

    let Some(terminal) = output.input("Surface").and_then(|surface| surface.linked_node()) else {
        sink.warning(&format!(
            "The material \"{material_name}\" has an {} output but nothing connected to it! Converting to default PBR material.",
            target.name()
        ));
        return ctx.create(Variant::DEFAULT);
    };

    let counts = ChannelCounts::of(graph);
    map_terminal(material_name, terminal, counts, ctx, sink)
}

/// Classify the node feeding the output and fill its variant's slots
pub fn map_terminal(
    material_name: &str,
    terminal: NodeRef<'_>,
    counts: ChannelCounts,
    ctx: &MapContext<'_>,
    sink: &mut dyn ReportSink,
) -> Result<MaterialParameterSet, ConvertError> {
    let intent = ShadingIntent::classify(terminal);
    let variant = Variant::select(intent, counts);
    tracing::debug!(
        node = terminal.name(),
        ?intent,
        uv_layers = counts.uv_layers,
        vertex_colors = counts.vertex_colors,
        label = variant.label,
        "Selected shader variant"
    );

    let mut params = ctx.create(variant)?;
    match intent {
        ShadingIntent::FlatEmission => fill_flat_emission(terminal, &mut params, ctx),
        ShadingIntent::TexturedEmission => fill_textured_emission(terminal, variant, &mut params),
        ShadingIntent::PbrEmission => fill_pbr_emission(terminal, variant, &mut params, ctx),
        ShadingIntent::PbrSubsurface => {
            fill_base_color(terminal, variant, &mut params);
            params.set_vector_component(ParamId::CustomVector30, 0, SUBSURFACE_RADIUS[0]);
            params.set_vector_component(ParamId::CustomVector30, 1, SUBSURFACE_RADIUS[1]);
            sink.info(&format!(
                "Material {material_name} converted to a PBR material with subsurface scattering. \
                 The subsurface color is uniform across the mesh (CustomVector11) and cannot be a texture."
            ));
        }
        ShadingIntent::Pbr => fill_base_color(terminal, variant, &mut params),
        // Too complex to interpret; the variant defaults stand.
        ShadingIntent::Unsupported => {}
    }
    Ok(params)
}

/// Texture layers reaching `input` at the variant's depth
fn layers(node: NodeRef<'_>, input: &str, variant: Variant) -> [Option<ImageHandle>; 2] {
    let Some(socket) = node.input(input) else {
        return [None, None];
    };
    let second = if variant.reads_second_layer() {
        layer_image(socket, variant.depth, Layer::Second)
    } else {
        None
    };
    [layer_image(socket, variant.depth, Layer::First), second]
}

fn scaled(color: [f32; 4], factor: f32) -> [f32; 4] {
    color.map(|c| c * factor)
}

fn input_default_color(node: NodeRef<'_>, input: &str) -> [f32; 4] {
    node.input(input)
        .and_then(|s| s.default_color())
        .unwrap_or([0.0, 0.0, 0.0, 1.0])
}

fn is_linked(socket: Option<SocketRef<'_>>) -> bool {
    socket.is_some_and(|s| s.is_linked())
}

/// Unlinked strength default, or 1.0 when something drives the strength
fn effective_strength(socket: Option<SocketRef<'_>>) -> f32 {
    match socket {
        Some(s) if !s.is_linked() => s.default_float().unwrap_or(1.0),
        _ => 1.0,
    }
}

/// Emission node with a constant color.
///
/// A linked strength leaves the color unscaled and binds the driving image
/// texture as the emission map. Any other driver leaves the map unbound.
/// An unlinked strength is baked into the color and the map is plain white.
fn fill_flat_emission(node: NodeRef<'_>, params: &mut MaterialParameterSet, ctx: &MapContext<'_>) {
    let color = input_default_color(node, "Color");
    let strength = node.input("Strength");

    if is_linked(strength) {
        let map = strength
            .and_then(|s| s.linked_node())
            .and_then(|source| source.kind().image().cloned());
        params.set_vector(ParamId::CustomVector3, color);
        params.set_texture(ParamId::Texture5, map);
    } else {
        params.set_vector(ParamId::CustomVector3, scaled(color, effective_strength(strength)));
        params.set_texture(ParamId::Texture5, ctx.default_image(defaults::WHITE));
    }
}

/// Emission node with a linked color: bind whatever layers were found
fn fill_textured_emission(node: NodeRef<'_>, variant: Variant, params: &mut MaterialParameterSet) {
    let [first, second] = layers(node, "Color", variant);
    if let Some(image) = first {
        params.set_texture(ParamId::Texture5, Some(image));
    }
    if let Some(image) = second {
        params.set_texture(ParamId::Texture14, Some(image));
    }
}

/// Principled surface that emits.
///
/// Base color layers default to white. A flat emission color goes to
/// `CustomVector3` with white maps; a linked one keeps its maps and fills
/// missing ones with black so a failed lookup cannot glow.
fn fill_pbr_emission(
    node: NodeRef<'_>,
    variant: Variant,
    params: &mut MaterialParameterSet,
    ctx: &MapContext<'_>,
) {
    let [col_1, col_2] = layers(node, "Base Color", variant);
    let [emi_1, emi_2] = layers(node, "Emission Color", variant);
    let emission_linked = is_linked(node.input("Emission Color"));
    let strength = effective_strength(node.input("Emission Strength"));

    let white = || ctx.default_image(defaults::WHITE);
    let black = || ctx.default_image(defaults::BLACK);

    params.set_texture(ParamId::Texture0, col_1.or_else(white));
    params.set_texture(ParamId::Texture1, col_2.or_else(white));

    if emission_linked {
        params.set_vector(ParamId::CustomVector3, [strength; 4]);
        params.set_texture(ParamId::Texture5, emi_1.or_else(black));
        params.set_texture(ParamId::Texture14, emi_2.or_else(black));
    } else {
        let color = input_default_color(node, "Emission Color");
        params.set_vector(ParamId::CustomVector3, scaled(color, strength));
        params.set_texture(ParamId::Texture5, white());
        params.set_texture(ParamId::Texture14, white());
    }
}

/// Bind found base color layers, keeping catalog defaults otherwise
fn fill_base_color(node: NodeRef<'_>, variant: Variant, params: &mut MaterialParameterSet) {
    let [first, second] = layers(node, "Base Color", variant);
    if let Some(image) = first {
        params.set_texture(ParamId::Texture0, Some(image));
    }
    if let Some(image) = second {
        params.set_texture(ParamId::Texture1, Some(image));
    }
}
