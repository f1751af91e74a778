use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::warn;
use sla_langinfo::langinfo::generator::{DEFAULT_LANGUAGE_NAMES_TABLE, DEFAULT_LANGUAGES_TABLE, DEFAULT_RESOURCES_FILE};
use sla_langinfo::{GeneratorConfig, MissingFilePolicy, ResourceContainer, generate, write_document};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sla-langinfo", version)]
#[command(about = "Generate the SLA language-info database", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Build the language-info JSON document (the default)
    Generate(GenerateArgs),
    /// List every resource in a resource file
    List {
        /// Resource file to inspect
        path: PathBuf,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Resource file holding the localized license labels
    #[arg(long, env = "SLAResources", default_value = DEFAULT_RESOURCES_FILE)]
    resources: PathBuf,

    /// Locale table
    #[arg(long, default_value = DEFAULT_LANGUAGES_TABLE)]
    languages: PathBuf,

    /// Display-name table
    #[arg(long, default_value = DEFAULT_LANGUAGE_NAMES_TABLE)]
    language_names: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail instead of warning when the resource file is missing
    #[arg(long)]
    strict_resources: bool,
}

impl GenerateArgs {
    fn execute(self) -> anyhow::Result<()> {
        let config = GeneratorConfig {
            resources_file: Some(self.resources),
            languages_table: self.languages,
            language_names_table: self.language_names,
            missing_resources: if self.strict_resources {
                MissingFilePolicy::Fail
            } else {
                MissingFilePolicy::Tolerate
            },
        };

        let document = generate(&config, &mut |warning| warn!("{}", warning))?;

        match self.output {
            Some(path) => {
                let file = File::create(&path).with_context(|| format!("Cannot create {}", path.display()))?;
                write_document(&document, BufWriter::new(file))?;
            }
            None => write_document(&document, io::stdout().lock())?,
        }
        Ok(())
    }
}

fn list(path: PathBuf) -> anyhow::Result<()> {
    let container = ResourceContainer::open(&path)?;
    let header = container.header();
    let map_header = container.map_header();
    println!("{}: {} resources", path.display(), container.len());
    println!(
        "  data {:?}, map {:?}, map attributes 0x{:04X}",
        header.data_range(),
        header.map_range(),
        map_header.attributes
    );
    for summary in container.types() {
        println!("  {}: {} declared", summary.resource_type, summary.declared_count);
    }
    for entry in &container {
        println!(
            "{}\t{}\t{}\t0x{:02X}\t{}",
            entry.resource_type,
            entry.id,
            entry.name_lossy().unwrap_or_default(),
            entry.attributes,
            entry.data.len()
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Generate(args)) => args.execute(),
        Some(Command::List { path }) => list(path),
        None => cli.generate.execute(),
    }
}
