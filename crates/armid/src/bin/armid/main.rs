mod cli;

use armid::hcl_documents::HclDocuments;
use armid::parser::{Casing, ParseResult};
use armid::registry::Registry;
use indexmap::IndexMap;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("ARMID_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let command_result = load_registry(&cli.schemas).and_then(|registry| match cli.command {
        cli::Command::Parse(parse_cli) => parse(parse_cli, &registry),
        cli::Command::Format(format_cli) => format(format_cli, &registry),
        cli::Command::Validate(validate_cli) => validate(validate_cli, &registry),
        cli::Command::Check(check_cli) => check(check_cli, &registry),
        cli::Command::Kinds(kinds_cli) => kinds(kinds_cli, &registry),
    });

    match command_result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            for error in e.chain() {
                eprintln!("{error}")
            }
            std::process::exit(1);
        }
    }
}

fn load_registry(schemas: &[std::path::PathBuf]) -> anyhow::Result<Registry> {
    let mut registry = Registry::builtin();
    for path in schemas {
        registry.load_file(path)?;
    }
    Ok(registry)
}

fn kind<'r>(registry: &'r Registry, name: &str) -> anyhow::Result<&'r armid::kind::IdKind> {
    registry
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown identifier kind `{name}`, see `armid kinds`"))
}

#[derive(serde::Serialize)]
struct Parsed<'a> {
    kind: &'a str,
    id: String,
    values: ParseResult,
}

pub fn parse(cli: cli::ParseCommand, registry: &Registry) -> anyhow::Result<bool> {
    let id_kind = kind(registry, &cli.kind)?;
    let casing = match cli.case_insensitive {
        true => Casing::Insensitive,
        false => Casing::Sensitive,
    };

    let values = id_kind
        .parse(&cli.id, casing)
        .map_err(|err| anyhow::Error::new(err).context(format!("Parsing {:?}", cli.id)))?;

    let parsed = Parsed {
        kind: &cli.kind,
        id: values.to_id(id_kind.canonical()),
        values,
    };

    output(&cli.output, &parsed)?;
    Ok(true)
}

pub fn format(cli: cli::FormatCommand, registry: &Registry) -> anyhow::Result<bool> {
    let id_kind = kind(registry, &cli.kind)?;
    let values: IndexMap<String, String> = cli.values.into_iter().collect();

    let id = armid::format::format_labeled(id_kind, &values)?;
    println!("{id}");
    Ok(true)
}

pub fn validate(cli: cli::ValidateCommand, registry: &Registry) -> anyhow::Result<bool> {
    let validator = armid::validate::Validator::new(registry);
    let result = match &cli.kind {
        Some(kind) => validator.validate_kind(kind, "id", &cli.id),
        None => armid::validate::validate_resource_id("id", &cli.id),
    };

    match result {
        Ok(()) => Ok(true),
        Err(diagnostic) => {
            eprintln!("{diagnostic}");
            Ok(false)
        }
    }
}

pub fn check(cli: cli::CheckCommand, registry: &Registry) -> anyhow::Result<bool> {
    let documents = load(&cli.input)?;
    let findings = armid::check::check(&documents, registry);

    for finding in &findings {
        println!("{finding}");
    }

    Ok(findings.is_empty())
}

#[derive(serde::Serialize)]
struct KindSummary<'a> {
    name: &'a str,
    strategy: &'static str,
    shape: String,
    attributes: Vec<&'a str>,
}

pub fn kinds(cli: cli::KindsCommand, registry: &Registry) -> anyhow::Result<bool> {
    let summaries: Vec<_> = registry
        .kinds()
        .map(|(name, kind)| KindSummary {
            name,
            strategy: kind.strategy(),
            shape: kind.shape(),
            attributes: registry.attributes_of(name).collect(),
        })
        .collect();

    output(&cli.output, &summaries)?;
    Ok(true)
}

fn load(input: &cli::InputArgs) -> anyhow::Result<HclDocuments> {
    if !input.workdir && input.files.is_empty() && input.directories.is_empty() {
        let stdin = std::io::read_to_string(std::io::stdin())?;
        let body = hcl_edit::parser::parse_body(&stdin)?;
        return Ok(body.into());
    }

    let mut documents = HclDocuments::default();

    if input.workdir {
        documents.load_directory(&std::env::current_dir()?)?;
    }

    for file_path in &input.files {
        documents.load_file(file_path)?;
    }

    for dir_path in &input.directories {
        documents.load_directory(dir_path)?;
    }

    anyhow::ensure!(documents.source_count() > 0, "No files loaded");

    Ok(documents)
}

fn output(output: &cli::OutputArgs, value: &impl serde::Serialize) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), value)?,
        cli::OutputFormat::Json => serde_json::to_writer_pretty(std::io::stdout(), value)?,
    };

    Ok(())
}
