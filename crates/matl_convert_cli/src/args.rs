// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command line arguments.

use crate::error::CliError;
use std::path::PathBuf;

/// Usage text printed on `--help` and argument errors
pub const USAGE: &str = "\
Usage: matl_convert <material.ron|material.json> [options]
       matl_convert --write-sample <path>

Options:
  --settings <file>     Conversion settings (RON)
  --json                Print the converted document as JSON instead of RON
  --rename-attributes   Rename mesh UV and color layers to fighter names
  --output <file>       Write the converted document to a file
  --help                Show this help";

/// Output format of the converted document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty RON
    #[default]
    Ron,
    /// Pretty JSON
    Json,
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Convert a material document
    Convert(ConvertArgs),
    /// Write an example document
    WriteSample(PathBuf),
    /// Print usage
    Help,
}

/// Options of a conversion run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConvertArgs {
    /// Material document to convert
    pub input: PathBuf,
    /// Optional settings file
    pub settings: Option<PathBuf>,
    /// Output format
    pub format: OutputFormat,
    /// Whether to rename mesh attributes
    pub rename_attributes: bool,
    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
}

/// Parse arguments, excluding the program name
pub fn parse<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut input = None;
    let mut parsed = ConvertArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--write-sample" => {
                let path = value(&mut args, "--write-sample")?;
                return Ok(Command::WriteSample(path));
            }
            "--settings" => parsed.settings = Some(value(&mut args, "--settings")?),
            "--output" | "-o" => parsed.output = Some(value(&mut args, "--output")?),
            "--json" => parsed.format = OutputFormat::Json,
            "--rename-attributes" => parsed.rename_attributes = true,
            flag if flag.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option '{flag}'")));
            }
            _ if input.is_some() => {
                return Err(CliError::Usage(format!("unexpected argument '{arg}'")));
            }
            _ => input = Some(PathBuf::from(&arg)),
        }
    }

    parsed.input = input.ok_or_else(|| CliError::Usage("missing material document".to_string()))?;
    Ok(Command::Convert(parsed))
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<PathBuf, CliError> {
    args.next()
        .map(PathBuf::from)
        .ok_or_else(|| CliError::Usage(format!("{flag} needs a value")))
}
