use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use configuration::{Config, OutputFormat, init_logging, load_config};
use core_types::DateRange;
use dashboard::{CurrencyFormat, Renderer, Session};
use dataset::{LoadOptions, LoadedDataset, load_orders};
use indicatif::ProgressStyle;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{info, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// How many rejected rows `inspect` lists individually.
const REJECTED_PREVIEW: usize = 10;

/// The main entry point for the ShopScope dashboard.
fn main() -> anyhow::Result<()> {
    // Optional: RUST_LOG and SHOPSCOPE__* overrides may come from a .env file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = init_logging(&config.logging).context("Failed to initialise logging")?;

    match cli.command {
        Commands::Report(args) => handle_report(args, &config),
        Commands::Interactive(args) => handle_interactive(args, &config),
        Commands::Inspect(args) => handle_inspect(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Explore an e-commerce order dataset: daily orders, category sales and review scores.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file to read instead of ./dashboard.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard for one date range and exit.
    Report(ReportArgs),
    /// Pick date ranges at a prompt and see the dashboard refresh after each one.
    Interactive(DataArgs),
    /// Summarise how the dataset loaded: rows kept, rows rejected, approval bounds.
    Inspect(DataArgs),
}

#[derive(Args)]
struct DataArgs {
    /// The order CSV to load (overrides `dataset.path`).
    #[arg(long, short)]
    data: Option<PathBuf>,
}

#[derive(Parser)]
struct ReportArgs {
    #[command(flatten)]
    data: DataArgs,

    /// First approval day to include (format: YYYY-MM-DD). Defaults to the earliest.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last approval day to include (format: YYYY-MM-DD). Defaults to the latest.
    #[arg(long)]
    to: Option<NaiveDate>,

    /// How many categories to list at the top and at the bottom.
    #[arg(long)]
    top_n: Option<usize>,

    /// Output format (overrides `report.format`).
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Handles a one-shot report over a single date range.
fn handle_report(args: ReportArgs, config: &Config) -> anyhow::Result<()> {
    let loaded = load_dataset(&args.data, config)?;
    let top_n = args.top_n.unwrap_or(config.report.top_n);
    let format = args.format.unwrap_or(config.report.format);

    let renderer = renderer(config);
    let mut session = Session::new(&loaded.table, &renderer, top_n);

    if let Some(bounds) = session.filter().bounds() {
        let requested = DateRange::new(
            args.from.unwrap_or(bounds.start),
            args.to.unwrap_or(bounds.end),
        );
        let effective = session.select(requested);
        if effective != Some(requested) {
            info!(%requested, effective = ?effective, "Requested range clamped to the dataset");
        }
    }

    let report = session.refresh().context("Failed to aggregate the selection")?;
    let rendered = match format {
        OutputFormat::Table => renderer.render(&report),
        OutputFormat::Json => renderer.render_json(&report)? + "\n",
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Handles the prompt-driven session on stdin/stdout.
fn handle_interactive(args: DataArgs, config: &Config) -> anyhow::Result<()> {
    let loaded = load_dataset(&args, config)?;
    let renderer = renderer(config);
    let mut session = Session::new(&loaded.table, &renderer, config.report.top_n);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    session
        .run(stdin.lock(), &mut stdout)
        .context("Interactive session failed")?;
    Ok(())
}

/// Prints load statistics and the first few rejected rows.
fn handle_inspect(args: DataArgs, config: &Config) -> anyhow::Result<()> {
    let loaded = load_dataset(&args, config)?;
    let table = &loaded.table;
    let bounds = table
        .approval_bounds()
        .map_or_else(|| "none".to_string(), |b| b.to_string());

    let mut summary = Table::new();
    summary.load_preset(UTF8_FULL).set_header(vec!["Dataset", "Value"]);
    summary.add_row(vec!["Rows read".to_string(), loaded.rows_read.to_string()]);
    summary.add_row(vec!["Rows loaded".to_string(), table.len().to_string()]);
    summary.add_row(vec!["Rows rejected".to_string(), loaded.rejected.len().to_string()]);
    summary.add_row(vec![
        "Rows without approval".to_string(),
        (table.len() - table.approved_len()).to_string(),
    ]);
    summary.add_row(vec!["Approval days".to_string(), bounds]);
    println!("{}", summary);

    if !loaded.rejected.is_empty() {
        let mut rejected = Table::new();
        rejected
            .load_preset(UTF8_FULL)
            .set_header(vec!["Line", "Order", "Problem"]);
        for row in loaded.rejected.iter().take(REJECTED_PREVIEW) {
            rejected.add_row(vec![
                row.line.to_string(),
                row.order_id.clone().unwrap_or_default(),
                row.message.clone(),
            ]);
        }
        println!("{}", rejected);
        if loaded.rejected.len() > REJECTED_PREVIEW {
            println!("... and {} more", loaded.rejected.len() - REJECTED_PREVIEW);
        }
    }
    Ok(())
}

// ==============================================================================
// Helper Functions
// ==============================================================================

/// Loads the dataset named on the command line, or the configured one, behind a spinner.
fn load_dataset(args: &DataArgs, config: &Config) -> anyhow::Result<LoadedDataset> {
    let path = args.data.clone().unwrap_or_else(|| config.dataset.path.clone());
    let options = LoadOptions {
        delimiter: config.dataset.delimiter_byte()?,
        strict: config.dataset.strict,
    };

    let loaded = load_with_progress(&path, &options)
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;
    if !loaded.rejected.is_empty() {
        eprintln!("Skipped {} invalid rows.", loaded.rejected.len());
    }
    Ok(loaded)
}

/// Runs the load inside a span that the logging layer draws as a spinner.
///
/// Log events emitted while loading are printed above the spinner.
fn load_with_progress(path: &Path, options: &LoadOptions) -> anyhow::Result<LoadedDataset> {
    let span = info_span!("load_dataset", path = %path.display());
    span.pb_set_style(
        &ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    span.pb_set_message(&format!("Loading {}...", path.display()));

    Ok(span.in_scope(|| load_orders(path, options))?)
}

fn renderer(config: &Config) -> Renderer {
    Renderer::new(CurrencyFormat::from(&config.currency)).with_color(io::stdout().is_terminal())
}
