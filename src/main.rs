use std::path::PathBuf;

use clap::{Parser, Subcommand};
use competence_map_tools::generate::{self, MapFiles, MetadataOverrides};
use competence_map_tools::model::ItemKind;
use competence_map_tools::model::columns::OUTPUT_FILE_NAME;
use competence_map_tools::{MapError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| MapError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate(args) => execute_generate(args),
    }
}

fn execute_generate(args: GenerateArgs) -> Result<()> {
    let overrides = MetadataOverrides {
        principal_project: args.project,
        map_code: args.map_code,
        map_name: args.map_name,
        folder_name: args.folder,
    };
    let metadata = generate::resolve_metadata(args.config.as_deref(), &overrides)?;
    let files = MapFiles::resolve(
        args.category,
        [
            (ItemKind::Skill, args.skill),
            (ItemKind::Education, args.education),
            (ItemKind::License, args.license),
        ],
    )?;

    let summary = generate::generate_map_file(&files, &metadata, &args.output)?;
    if args.summary {
        println!("{}", summary.to_json_pretty()?);
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Build a competence map import CSV from category and competence sheets."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the flattened competence map file.
    Generate(GenerateArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Competence category taxonomy (CSV or XLSX).
    #[arg(long)]
    category: PathBuf,

    /// Skill competence file.
    #[arg(long)]
    skill: Option<PathBuf>,

    /// Education competence file.
    #[arg(long)]
    education: Option<PathBuf>,

    /// License competence file.
    #[arg(long)]
    license: Option<PathBuf>,

    /// Output path; an `.xlsx` extension writes a workbook instead of CSV.
    #[arg(long, default_value = OUTPUT_FILE_NAME)]
    output: PathBuf,

    /// JSON file providing map metadata; explicit flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Principal project stamped on every row.
    #[arg(long)]
    project: Option<String>,

    /// Competence map code.
    #[arg(long)]
    map_code: Option<String>,

    /// Competence map name.
    #[arg(long)]
    map_name: Option<String>,

    /// Folder name (may be empty).
    #[arg(long)]
    folder: Option<String>,

    /// Print the run summary as JSON on stdout.
    #[arg(long)]
    summary: bool,
}
