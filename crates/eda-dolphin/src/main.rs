//! CLI entry point for missing-value analysis.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use eda_dolphin::reporting::quick_report;
use eda_dolphin::{
    AnalysisMode, ColumnFilter, DeclaredType, MissingAnalysis, MissingReportConfig,
    MissingValueAnalyzer, init_logging, read_csv,
};
use std::path::PathBuf;
use tracing::{debug, info};

/// CLI-compatible analysis mode enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMode {
    /// Short report of the worst columns
    Quick,
    /// Report table with the given options plus a summary
    Detailed,
    /// Every column and every field plus a summary
    Comprehensive,
}

impl From<CliMode> for AnalysisMode {
    fn from(cli: CliMode) -> Self {
        match cli {
            CliMode::Quick => AnalysisMode::Quick,
            CliMode::Detailed => AnalysisMode::Detailed,
            CliMode::Comprehensive => AnalysisMode::Comprehensive,
        }
    }
}

/// CLI-compatible column filter enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliColumnFilter {
    /// Report every column
    All,
    /// Report only columns with missing values
    #[value(alias = "null")]
    OnlyMissing,
}

impl From<CliColumnFilter> for ColumnFilter {
    fn from(cli: CliColumnFilter) -> Self {
        match cli {
            CliColumnFilter::All => ColumnFilter::All,
            CliColumnFilter::OnlyMissing => ColumnFilter::OnlyMissing,
        }
    }
}

/// CLI-compatible declared type enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDeclaredType {
    Integer,
    Float,
    Text,
    Boolean,
    Other,
}

impl From<CliDeclaredType> for DeclaredType {
    fn from(cli: CliDeclaredType) -> Self {
        match cli {
            CliDeclaredType::Integer => DeclaredType::Integer,
            CliDeclaredType::Float => DeclaredType::Float,
            CliDeclaredType::Text => DeclaredType::Text,
            CliDeclaredType::Boolean => DeclaredType::Boolean,
            CliDeclaredType::Other => DeclaredType::Other,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Missing-value statistics for exploratory data analysis",
    long_about = "Reports how many values are missing in each column of a CSV file.\n\n\
                  EXAMPLES:\n  \
                  # Summary plus the columns that have missing values\n  \
                  eda-dolphin -i data.csv\n\n  \
                  # Five worst columns only\n  \
                  eda-dolphin -i data.csv --mode quick --top-n 5\n\n  \
                  # Every column, sorted by name, as JSON\n  \
                  eda-dolphin -i data.csv --columns all --sort-by column --ascending --json"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: PathBuf,

    /// Analysis mode
    #[arg(short, long, value_enum, default_value = "detailed")]
    mode: CliMode,

    /// Which columns to report
    #[arg(long, value_enum, default_value = "only-missing")]
    columns: CliColumnFilter,

    /// Sort key: column, count, percentage or dtype
    ///
    /// Unknown keys fall back to percentage
    #[arg(long, default_value = "percentage")]
    sort_by: String,

    /// Sort ascending instead of descending
    #[arg(long)]
    ascending: bool,

    /// Keep only columns of this declared type (repeatable)
    #[arg(long, value_enum)]
    include_dtype: Vec<CliDeclaredType>,

    /// Drop columns of this declared type (repeatable)
    #[arg(long, value_enum)]
    exclude_dtype: Vec<CliDeclaredType>,

    /// Minimum missing percentage (0 - 100) for a column to be reported
    #[arg(long)]
    threshold: Option<f64>,

    /// Hide the Total_Values and Non_Missing_Count columns
    #[arg(long)]
    no_total: bool,

    /// Hide the Data_Type column
    #[arg(long)]
    no_dtype: bool,

    /// Number of columns listed by the quick report
    #[arg(long, default_value = "10")]
    top_n: usize,

    /// Output JSON to stdout instead of text
    ///
    /// Disables all logs; only the JSON result is written.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize logging unless JSON output was requested.
fn setup_logging(args: &Args) {
    if args.json {
        return;
    }
    let level = if args.quiet { "warn" } else { args.log_level.as_str() };
    init_logging(level);
}

fn main() -> Result<()> {
    let args = Args::parse();
    show_all_table_rows();
    setup_logging(&args);

    if !args.input.exists() {
        return Err(anyhow!("Input file not found: {}", args.input.display()));
    }

    info!("Loading dataset from: {}", args.input.display());
    let df = read_csv(&args.input)?;
    info!("Dataset loaded successfully: {:?}", df.shape());

    let config = build_config(&args)?;
    let mode = AnalysisMode::from(args.mode);

    let analysis = match mode {
        AnalysisMode::Quick => MissingAnalysis {
            mode,
            table: None,
            text: quick_report(&df, args.top_n),
        },
        _ => MissingValueAnalyzer::analyze(&df, mode, config)?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    print_analysis(&analysis);
    Ok(())
}

fn build_config(args: &Args) -> Result<MissingReportConfig> {
    let mut builder = MissingReportConfig::builder()
        .column_filter(args.columns.into())
        .sort_by(&args.sort_by)
        .ascending(args.ascending)
        .include_dtypes(args.include_dtype.iter().map(|&t| DeclaredType::from(t)))
        .exclude_dtypes(args.exclude_dtype.iter().map(|&t| DeclaredType::from(t)))
        .show_total_column(!args.no_total)
        .show_dtype_column(!args.no_dtype);

    if let Some(threshold) = args.threshold {
        builder = builder.threshold(threshold);
    }

    let config = builder.build()?;
    debug!("Report configuration: {:?}", config);
    Ok(config)
}

/// Print the digest followed by the report table.
///
/// Uses `println!` on purpose: this is the command's output, not a log.
fn print_analysis(analysis: &MissingAnalysis) {
    println!("{}", analysis.text);

    if let Some(ref table) = analysis.table {
        println!();
        if table.is_empty() {
            println!("No columns match the report filters.");
        } else {
            println!("{}", table);
        }
    }
}

/// Print every report row unless `POLARS_FMT_MAX_ROWS` is already set.
fn show_all_table_rows() {
    if std::env::var_os("POLARS_FMT_MAX_ROWS").is_none() {
        // SAFETY: called from `main` before any other thread is spawned.
        unsafe { std::env::set_var("POLARS_FMT_MAX_ROWS", "-1") };
    }
}
