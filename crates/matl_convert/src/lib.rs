// SPDX-License-Identifier: MIT OR Apache-2.0
//! Material conversion for the SFX PBS shader family.
//!
//! Turns an authored material, either a shading node graph or a handful of
//! legacy scalar properties, into an engine parameter set:
//! - Classify what the node feeding the output is trying to express
//! - Count the UV and vertex color channels the graph reads
//! - Pick a shader variant from a fixed catalog and fill its slots
//! - Prepare packed PRM and normal textures, with placeholders on failure
//!
//! ## Architecture
//!
//! Classification ([`intent`]), channel counting ([`channels`]), texture
//! extraction ([`extract`]) and variant selection ([`variant`]) are pure
//! functions over a borrowed [`Graph`]. The [`mapper`] combines them with a
//! [`VariantCatalog`] and an [`AssetResolver`]; [`convert`] adds the side
//! textures and turns every collaborator failure into a report.
//!
//! [`Graph`]: matl_convert_graph::Graph

pub mod assets;
pub mod bake;
pub mod catalog;
pub mod channels;
pub mod convert;
pub mod error;
pub mod extract;
pub mod intent;
pub mod mapper;
pub mod material;
pub mod mesh;
pub mod normal;
pub mod param;
pub mod parameters;
pub mod report;
pub mod settings;
pub mod variant;

pub use assets::{AssetResolver, ColorSpace, ImageEntry, ImageTable};
pub use bake::{BakeOutput, FlatPrmBaker, TextureBaker, UnavailableBaker};
pub use catalog::{BuiltinCatalog, VariantCatalog};
pub use channels::ChannelCounts;
pub use convert::{convert_material, ConvertContext};
pub use error::ConvertError;
pub use intent::ShadingIntent;
pub use material::Material;
pub use mesh::{rename_fighter_attributes, ColorAttribute, MeshAttributes};
pub use param::{ParamId, ShaderLabel};
pub use parameters::{MaterialParameterSet, TextureSlot};
pub use report::{CollectingSink, ReportSink, Severity, TracingSink};
pub use settings::ConvertSettings;
pub use variant::Variant;
