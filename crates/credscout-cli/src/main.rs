use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use polars::prelude::DataFrame;
use tracing::info;
use tracing_subscriber::EnvFilter;

use credscout_core::{detail, export, metrics};
use credscout_parser::{parse_catalog, ProgramCatalog};

mod filter_args;
mod render;

use filter_args::FilterArgs;

/// Market-intelligence CLI for continuing-education program catalogs.
#[derive(Parser, Debug)]
#[command(author, version, about = "CredScout catalog intelligence", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize the filtered catalog view
    Summary(SummaryArgs),
    /// Rank skills by frequency across the filtered view
    Skills(SkillsArgs),
    /// Roll the filtered view up by institution
    Institutions(InstitutionsArgs),
    /// Show one row of the filtered view in full
    Show(ShowArgs),
    /// Export the filtered view as CSV
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct SummaryArgs {
    /// Catalog CSV, either pre-processed or a raw scrape
    #[arg(long)]
    file: PathBuf,
    #[command(flatten)]
    filter: FilterArgs,
    /// Emit the summary as JSON instead of a table
    #[arg(long)]
    json: bool,
    /// Assumed component courses per certificate for unique-program estimation
    #[arg(long, default_value_t = metrics::COURSES_PER_CERTIFICATE)]
    courses_per_certificate: f64,
}

#[derive(Args, Debug)]
struct SkillsArgs {
    #[arg(long)]
    file: PathBuf,
    #[command(flatten)]
    filter: FilterArgs,
    /// How many skills to list
    #[arg(long, default_value_t = 15)]
    top: usize,
}

#[derive(Args, Debug)]
struct InstitutionsArgs {
    #[arg(long)]
    file: PathBuf,
    #[command(flatten)]
    filter: FilterArgs,
    /// How many institutions to list
    #[arg(long, default_value_t = 10)]
    top: usize,
}

#[derive(Args, Debug)]
struct ShowArgs {
    #[arg(long)]
    file: PathBuf,
    #[command(flatten)]
    filter: FilterArgs,
    /// Zero-based row index into the filtered view
    #[arg(long, default_value_t = 0)]
    row: usize,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(long)]
    file: PathBuf,
    #[command(flatten)]
    filter: FilterArgs,
    /// Output path; defaults to a date-stamped name in the working directory
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Summary(args) => handle_summary(args),
        Command::Skills(args) => handle_skills(args),
        Command::Institutions(args) => handle_institutions(args),
        Command::Show(args) => handle_show(args),
        Command::Export(args) => handle_export(args),
    }
}

fn load_catalog(path: &PathBuf) -> Result<ProgramCatalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file {}", path.display()))?;
    let catalog = parse_catalog(&content)
        .with_context(|| format!("failed to parse catalog file {}", path.display()))?;
    info!(
        rows = catalog.height(),
        source = catalog.source.as_str(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn filtered_view(catalog: &ProgramCatalog, filter: &FilterArgs) -> Result<DataFrame> {
    Ok(filter.to_filter()?.apply(&catalog.df)?)
}

fn handle_summary(args: SummaryArgs) -> Result<()> {
    let catalog = load_catalog(&args.file)?;
    let view = filtered_view(&catalog, &args.filter)?;
    let summary = metrics::summarize(
        &view,
        catalog.height(),
        Utc::now(),
        args.courses_per_certificate,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render::summary_table(&summary));
    }
    Ok(())
}

fn handle_skills(args: SkillsArgs) -> Result<()> {
    let catalog = load_catalog(&args.file)?;
    let view = filtered_view(&catalog, &args.filter)?;
    let skills = metrics::top_skills(&view, args.top)?;

    if skills.is_empty() {
        println!("No skills data available for the current filters.");
    } else {
        println!("{}", render::skills_table(&skills));
    }
    Ok(())
}

fn handle_institutions(args: InstitutionsArgs) -> Result<()> {
    let catalog = load_catalog(&args.file)?;
    let view = filtered_view(&catalog, &args.filter)?;
    let rollup = metrics::institution_rollup(&view, args.top)?;

    if rollup.is_empty() {
        println!("No institutions in the current filters.");
    } else {
        println!("{}", render::institutions_table(&rollup));
    }
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<()> {
    let catalog = load_catalog(&args.file)?;
    let view = filtered_view(&catalog, &args.filter)?;

    match detail::program_at(&view, args.row)? {
        Some(program) => render::print_detail(&program),
        None => println!(
            "Nothing to show: the filtered view has {} rows.",
            view.height()
        ),
    }
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<()> {
    let catalog = load_catalog(&args.file)?;
    let view = filtered_view(&catalog, &args.filter)?;

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(export::filename(Utc::now().date_naive())));
    let bytes = export::to_csv(&view)?;
    fs::write(&out, bytes)
        .with_context(|| format!("failed to write export to {}", out.display()))?;

    println!("Exported {} of {} rows to {}", view.height(), catalog.height(), out.display());
    Ok(())
}
