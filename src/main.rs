use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use configuration::Settings;
use core_types::{Metric, MetricGroup, Period};
use dataset::Dataset;
use exporter::ReportKind;
use reporting::{ReportEngine, ReportError, ReportTable};
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Meridian reporting tool.
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Configuration and data are loaded once; every view reads from the same
    // immutable dataset.
    let settings = configuration::load_settings()?;
    let data = Dataset::load(&settings.data.file_path).with_context(|| {
        format!(
            "could not load the dataset from '{}'",
            settings.data.file_path.display()
        )
    })?;
    let engine = ReportEngine::new();

    // Execute the appropriate command
    match cli.command {
        Commands::Overview(args) => handle_overview(args, &engine, &data, &settings),
        Commands::CompareBanks(args) => handle_compare_banks(args, &engine, &data, &settings),
        Commands::Breakdown(args) => handle_breakdown(args, &engine, &data, &settings),
        Commands::List => handle_list(&data),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Aggregated, comparative and per-metric reports over periodic banking
/// financial data.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Industry-wide aggregates for a metric group across selected periods.
    Overview(OverviewArgs),
    /// Side-by-side comparison of selected banks in a single period.
    CompareBanks(CompareBanksArgs),
    /// Per-bank breakdown of a single metric across selected periods.
    Breakdown(BreakdownArgs),
    /// List the banks, periods and metrics available in the dataset.
    List,
}

#[derive(Parser)]
struct OverviewArgs {
    /// The metric group to report on.
    #[arg(long, value_enum, default_value = "all")]
    group: GroupFilter,

    /// The periods to aggregate. Selecting exactly two appends Change and
    /// Percentage Change columns.
    #[arg(long, required = true, num_args = 1..)]
    periods: Vec<Period>,

    /// Also write the report as an .xlsx file.
    #[arg(long)]
    export: bool,
}

#[derive(Parser)]
struct CompareBanksArgs {
    /// The period to compare in.
    #[arg(long)]
    period: Period,

    /// The banks to put side by side.
    #[arg(long, required = true, num_args = 1..)]
    banks: Vec<String>,

    /// Also write the report as an .xlsx file.
    #[arg(long)]
    export: bool,
}

#[derive(Parser)]
struct BreakdownArgs {
    /// The metric to break down, by its exact reported name (e.g. "TOTAL ASSETS").
    #[arg(long)]
    metric: Metric,

    /// The periods to include. Selecting exactly two appends Change and
    /// Percentage Change columns.
    #[arg(long, required = true, num_args = 1..)]
    periods: Vec<Period>,

    /// Also write the report as an .xlsx file.
    #[arg(long)]
    export: bool,
}

/// The metric-group choice of the overview view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GroupFilter {
    All,
    BalanceSheet,
    ProfitAndLoss,
    Ratios,
}

impl GroupFilter {
    fn metrics(self) -> Vec<Metric> {
        match self {
            GroupFilter::All => Metric::ALL.to_vec(),
            GroupFilter::BalanceSheet => MetricGroup::BalanceSheet.metrics().collect(),
            GroupFilter::ProfitAndLoss => MetricGroup::ProfitAndLoss.metrics().collect(),
            GroupFilter::Ratios => MetricGroup::Ratios.metrics().collect(),
        }
    }
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_overview(
    args: OverviewArgs,
    engine: &ReportEngine,
    data: &Dataset,
    settings: &Settings,
) -> anyhow::Result<()> {
    let aggregated = match engine.aggregate(data.records(), &args.periods) {
        Ok(table) => table,
        Err(ReportError::EmptyInput) => return no_data(),
        Err(e) => return Err(e.into()),
    };
    let mut report = engine.select_metrics(&aggregated, &args.group.metrics());

    let mut kind = ReportKind::Filtered;
    if let [first, second] = args.periods.as_slice() {
        report = engine.compare_columns(&report, first.as_str(), second.as_str());
        if report.has_deltas {
            kind = ReportKind::Comparison;
        }
    }

    render(&report);
    if args.export {
        write_export(&report, kind, &settings.export.output_dir)?;
    }
    Ok(())
}

fn handle_compare_banks(
    args: CompareBanksArgs,
    engine: &ReportEngine,
    data: &Dataset,
    settings: &Settings,
) -> anyhow::Result<()> {
    let report = engine.compare_banks(data.records(), &args.period, &args.banks)?;

    render(&report);
    if args.export {
        write_export(&report, ReportKind::BankComparison, &settings.export.output_dir)?;
    }
    Ok(())
}

fn handle_breakdown(
    args: BreakdownArgs,
    engine: &ReportEngine,
    data: &Dataset,
    settings: &Settings,
) -> anyhow::Result<()> {
    let mut report = match engine.metric_breakdown(data.records(), args.metric, &args.periods) {
        Ok(table) => table,
        Err(ReportError::EmptyInput) => return no_data(),
        Err(e) => return Err(e.into()),
    };
    if let [first, second] = args.periods.as_slice() {
        report = engine.compare_columns(&report, first.as_str(), second.as_str());
    }

    println!("{}", args.metric);
    render(&report);
    if args.export {
        write_export(&report, ReportKind::MetricBreakdown, &settings.export.output_dir)?;
    }
    Ok(())
}

fn handle_list(data: &Dataset) -> anyhow::Result<()> {
    println!("Banks:");
    for bank in data.banks() {
        println!("  {bank}");
    }
    println!();
    println!("Periods:");
    for period in data.periods() {
        println!("  {period}");
    }
    for group in [
        MetricGroup::BalanceSheet,
        MetricGroup::ProfitAndLoss,
        MetricGroup::Ratios,
    ] {
        println!();
        println!("{group} metrics:");
        for metric in group.metrics() {
            println!("  {metric}");
        }
    }
    Ok(())
}

// ==============================================================================
// Rendering and Export
// ==============================================================================

fn no_data() -> anyhow::Result<()> {
    println!("No data for the current selection.");
    Ok(())
}

fn render(report: &ReportTable) {
    let mut table = comfy_table::Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);

    let mut header: Vec<String> = vec![report.label_header().to_string()];
    header.extend(report.columns.iter().cloned());
    if report.has_deltas {
        header.push("Change".to_string());
        header.push("Percentage Change".to_string());
    }
    table.set_header(header);

    for row in &report.rows {
        let mut cells: Vec<String> = vec![row.label.to_string()];
        cells.extend(row.values.iter().map(|v| format_cell(*v)));
        if report.has_deltas {
            cells.push(format_cell(row.change));
            cells.push(format_cell(row.pct_change.map(|p| p.round_dp(2))));
        }
        table.add_row(cells);
    }

    println!("{table}");
}

/// Missing values and undefined percentages render as blank cells.
fn format_cell(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_export(report: &ReportTable, kind: ReportKind, output_dir: &Path) -> anyhow::Result<()> {
    let payload = exporter::export_table(report, kind)?;
    fs::create_dir_all(output_dir).with_context(|| {
        format!("could not create export directory '{}'", output_dir.display())
    })?;
    let path = output_dir.join(payload.file_name);
    fs::write(&path, &payload.bytes)
        .with_context(|| format!("could not write '{}'", path.display()))?;
    println!("Report written to {}", path.display());
    Ok(())
}
