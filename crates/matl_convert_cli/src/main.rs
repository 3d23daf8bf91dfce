// SPDX-License-Identifier: MIT OR Apache-2.0
//! `matl_convert` - convert authored materials to SFX PBS shader parameters
//!
//! Reads a material document (material, images and meshes), converts the
//! material with the built-in variant catalog and a flat PRM baker, and
//! prints the converted document.
//!
//! Logging goes through `tracing`; set `RUST_LOG` to adjust verbosity.

mod args;
mod document;
mod error;

use args::{Command, ConvertArgs, USAGE};
use document::MaterialDocument;
use error::CliError;
use matl_convert::convert::converted_label;
use matl_convert::mesh::rename_meshes_using_material;
use matl_convert::{
    convert_material, BuiltinCatalog, ConvertContext, ConvertSettings, FlatPrmBaker, ImageTable,
    TracingSink,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match args::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(command) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::WriteSample(path) => {
            let sample = MaterialDocument::sample()?;
            std::fs::write(&path, sample.render(args::OutputFormat::Ron)?)?;
            tracing::info!("Wrote sample document to {}", path.display());
            Ok(())
        }
        Command::Convert(args) => convert(&args),
    }
}

fn convert(args: &ConvertArgs) -> Result<(), CliError> {
    let settings = match &args.settings {
        Some(path) => ConvertSettings::load(path)?,
        None => ConvertSettings::default(),
    };
    let mut doc = MaterialDocument::load(&args.input)?;
    tracing::info!(
        "Converting material '{}' from {}",
        doc.material.name,
        args.input.display()
    );

    let assets = ImageTable::with_defaults();
    for image in &doc.images {
        assets.register(image.clone());
    }
    tracing::debug!(images = assets.len(), "Image table ready");

    let mut sink = TracingSink;
    if args.rename_attributes {
        rename_meshes_using_material(&mut doc.meshes, &doc.material.name, &mut sink);
    }

    let mut ctx = ConvertContext {
        catalog: &BuiltinCatalog,
        assets: &assets,
        baker: &FlatPrmBaker,
        sink: &mut sink,
        settings: &settings,
    };
    convert_material(&mut doc.material, &mut ctx);

    if let Some(label) = converted_label(&doc.material) {
        tracing::info!("Selected shader label {label}");
    }

    let rendered = doc.render(args.format)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!("Wrote converted document to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
