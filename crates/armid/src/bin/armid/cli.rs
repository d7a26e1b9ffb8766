//! armid cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load additional identifier kinds from a schema file
    ///
    /// Can be specified multiple times. Kinds and attribute
    /// bindings must not clash with the built-in ones.
    #[clap(short = 's', long = "schemas", global(true))]
    pub schemas: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse an ID and print its values
    Parse(ParseCommand),

    /// Build the canonical ID from values
    #[command(alias = "fmt")]
    Format(FormatCommand),

    /// Check a single ID, exit code 1 when it is invalid
    Validate(ValidateCommand),

    /// Validate every ID attribute in terraform files
    ///
    /// Reads HCL from stdin unless any other source is provided (via --input-*)
    Check(CheckCommand),

    /// List the known identifier kinds
    Kinds(KindsCommand),
}

#[derive(Parser, Debug)]
pub struct ParseCommand {
    /// Name of the identifier kind (see `kinds`)
    #[clap(short = 'k', long = "kind")]
    pub kind: String,

    /// Accept literal segments in any casing, as returned by the remote API
    #[clap(short = 'i', long = "case-insensitive")]
    pub case_insensitive: bool,

    #[clap(flatten)]
    pub output: OutputArgs,

    pub id: String,
}

#[derive(Parser, Debug)]
pub struct FormatCommand {
    #[clap(short = 'k', long = "kind")]
    pub kind: String,

    /// Values as `label=value`, e.g. `name=workspace1`
    #[arg(value_parser = parse_key_value)]
    pub values: Vec<(String, String)>,
}

#[derive(Parser, Debug)]
pub struct ValidateCommand {
    /// Name of the identifier kind, any well-formed ID is accepted when omitted
    #[clap(short = 'k', long = "kind")]
    pub kind: Option<String>,

    pub id: String,
}

#[derive(Parser, Debug)]
pub struct CheckCommand {
    #[clap(flatten)]
    pub input: InputArgs,
}

#[derive(Parser, Debug)]
pub struct KindsCommand {
    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Load files from work directory
    #[clap(short = 'w', long = "input-workdir")]
    pub workdir: bool,

    /// Load a file
    #[clap(short = 'f', long = "input-file")]
    pub files: Vec<PathBuf>,

    /// Load files from given directory
    #[clap(short = 'd', long = "input-dir")]
    pub directories: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected `label=value`, got `{arg}`"))
}
