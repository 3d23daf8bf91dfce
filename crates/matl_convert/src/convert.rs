// SPDX-License-Identifier: MIT OR Apache-2.0
//! Material conversion orchestration.
//!
//! A conversion runs in three steps:
//! 1. Prepare side textures: bake a PRM and look for an existing normal map.
//! 2. Map the material to a shader variant and fill its parameters, either
//!    from the node graph or from the legacy scalars.
//! 3. Backfill the NOR and PRM slots the mapping left at their defaults.
//!
//! No step aborts the conversion. Collaborator failures are reported and
//! replaced with placeholders, so the material always ends up with a fully
//! slotted parameter set.

use crate::assets::AssetResolver;
use crate::bake::{prm_image_name, BakeOutput, TextureBaker};
use crate::catalog::VariantCatalog;
use crate::error::ConvertError;
use crate::mapper::{map_graph, map_legacy, MapContext};
use crate::material::Material;
use crate::normal::{find_normal_map, nor_image_name};
use crate::param::{ParamId, ShaderLabel};
use crate::parameters::MaterialParameterSet;
use crate::report::ReportSink;
use crate::settings::ConvertSettings;
use crate::variant::Variant;
use matl_convert_graph::ImageHandle;
use std::path::Path;

/// Slot holding the normal map
pub const NOR_SLOT: ParamId = ParamId::Texture4;
/// Slot holding the packed PRM texture
pub const PRM_SLOT: ParamId = ParamId::Texture6;

/// Collaborators of a conversion
pub struct ConvertContext<'a> {
    /// Variant schemas
    pub catalog: &'a dyn VariantCatalog,
    /// Image table
    pub assets: &'a dyn AssetResolver,
    /// PRM baker
    pub baker: &'a dyn TextureBaker,
    /// Receives user-facing reports
    pub sink: &'a mut dyn ReportSink,
    /// Run settings
    pub settings: &'a ConvertSettings,
}

/// Images prepared before mapping
#[derive(Debug, Default)]
struct SideTextures {
    normal: Option<ImageHandle>,
    prm: Option<ImageHandle>,
}

/// Convert `material` in place, storing the result in `material.parameters`.
///
/// Always returns `false`; callers read the outcome from the parameters and
/// the reports.
pub fn convert_material(material: &mut Material, ctx: &mut ConvertContext<'_>) -> bool {
    let _span = tracing::info_span!("convert_material", material = %material.name).entered();

    let side = prepare_side_textures(material, ctx);
    let mut params = map_parameters(material, ctx);
    assign_normal_map(&mut params, side.normal, &material.name, ctx);
    assign_prm(&mut params, side.prm, ctx);

    material.parameters = Some(params);
    false
}

/// Whether `slot` exists and still holds its catalog default
fn accepts_backfill(params: &MaterialParameterSet, slot: ParamId) -> bool {
    params.texture(slot).is_some_and(|s| s.is_default)
}

fn prepare_side_textures(material: &Material, ctx: &mut ConvertContext<'_>) -> SideTextures {
    let available = ctx.baker.is_available();
    if !available {
        ctx.sink
            .warning("A texture baking engine is required for baking textures but is not available");
    }

    let normal = material.active_graph().and_then(find_normal_map);

    let prm = if available {
        ctx.sink
            .info(&format!("Creating PRM texture for material '{}'", material.name));
        match ctx.baker.bake_prm(material, ctx.settings.bake_size, ctx.assets) {
            Ok(BakeOutput::Image(image)) => {
                ctx.sink.info("Successfully created PRM texture as an internal image");
                Some(image)
            }
            Ok(BakeOutput::Path(path)) => {
                ctx.sink
                    .info(&format!("Successfully created PRM texture at: {}", path.display()));
                resolve_baked_path(&path, material, ctx)
            }
            Err(e) => {
                ctx.sink.warning(&format!("Failed to create PRM texture: {e}"));
                ctx.sink.info("Creating default PRM texture");
                prm_placeholder(material, ctx)
                    .map_err(|e| ctx.sink.error(&format!("Failed to create default PRM texture: {e}")))
                    .ok()
            }
        }
    } else {
        ctx.sink.info("Creating simple PRM texture (baking engine not available)");
        prm_placeholder(material, ctx)
            .map_err(|e| ctx.sink.error(&format!("Failed to create simple PRM texture: {e}")))
            .ok()
    };

    SideTextures { normal, prm }
}

/// Look a baked file up in the image table by file name
fn resolve_baked_path(
    path: &Path,
    material: &Material,
    ctx: &mut ConvertContext<'_>,
) -> Option<ImageHandle> {
    let found = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| ctx.assets.find(name));
    if let Some(image) = found {
        ctx.assets.prepare_data_texture(&image);
        return Some(image);
    }

    ctx.sink.warning(&format!(
        "Baked PRM texture '{}' is not in the image table, using a default PRM texture",
        path.display()
    ));
    prm_placeholder(material, ctx)
        .map_err(|e| ctx.sink.error(&format!("Failed to create default PRM texture: {e}")))
        .ok()
}

fn prm_placeholder(material: &Material, ctx: &ConvertContext<'_>) -> Result<ImageHandle, ConvertError> {
    let size = ctx.settings.bake_size;
    let image = ctx.assets.create_placeholder(
        &prm_image_name(material),
        size,
        size,
        ctx.settings.prm_placeholder,
    )?;
    ctx.assets.prepare_data_texture(&image);
    Ok(image)
}

/// Map the material, falling back to an empty parameter set when the
/// catalog cannot provide the selected variant
fn map_parameters(material: &Material, ctx: &mut ConvertContext<'_>) -> MaterialParameterSet {
    let map_ctx = MapContext {
        catalog: ctx.catalog,
        assets: ctx.assets,
    };
    let result = match material.active_graph() {
        None => map_legacy(material, &map_ctx),
        Some(graph) => map_graph(
            &material.name,
            graph,
            ctx.settings.render_target,
            &map_ctx,
            &mut *ctx.sink,
        ),
    };

    result.unwrap_or_else(|e| {
        ctx.sink
            .error(&format!("Failed to create shader parameters for '{}': {e}", material.name));
        let label = match e {
            ConvertError::UnknownLabel(label) => label,
            _ => Variant::DEFAULT.shader_label(),
        };
        MaterialParameterSet::new(label)
    })
}

fn assign_normal_map(
    params: &mut MaterialParameterSet,
    found: Option<ImageHandle>,
    material_name: &str,
    ctx: &mut ConvertContext<'_>,
) {
    if !accepts_backfill(params, NOR_SLOT) {
        tracing::debug!(label = %params.label(), "Normal map slot not available for backfill");
        return;
    }

    if let Some(image) = found {
        ctx.sink.info(&format!("Assigning existing normal map: {image}"));
        ctx.assets.prepare_data_texture(&image);
        params.set_texture(NOR_SLOT, Some(image));
        return;
    }

    ctx.sink.info("Creating default normal map");
    let size = ctx.settings.bake_size;
    match ctx.assets.create_placeholder(
        &nor_image_name(material_name),
        size,
        size,
        ctx.settings.normal_placeholder,
    ) {
        Ok(image) => {
            ctx.assets.prepare_data_texture(&image);
            params.set_texture(NOR_SLOT, Some(image));
        }
        Err(e) => ctx.sink.warning(&format!("Failed to create default normal map: {e}")),
    }
}

fn assign_prm(params: &mut MaterialParameterSet, prm: Option<ImageHandle>, ctx: &mut ConvertContext<'_>) {
    let Some(image) = prm else {
        return;
    };
    if !accepts_backfill(params, PRM_SLOT) {
        tracing::debug!(label = %params.label(), image = %image, "PRM slot not available for backfill");
        return;
    }
    ctx.sink.info(&format!("Assigning PRM texture: {image}"));
    params.set_texture(PRM_SLOT, Some(image));
}

/// Label of a converted material, if it has been converted
pub fn converted_label(material: &Material) -> Option<&ShaderLabel> {
    material.parameters.as_ref().map(MaterialParameterSet::label)
}
