//! StudyPulse CLI
//!
//! Command-line interface for the StudyPulse analytics backend.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use studypulse::analytics::{
    build_comparisons, build_trends, filter_metrics, summarize_with, validate_query,
};
use studypulse::api::HttpServer;
use studypulse::categories::TimeRange;
use studypulse::config::LoggingConfig;
use studypulse::data::{write_mock_data, JsonFileSource, MetricsSource, MockDataOptions};
use studypulse::models::{
    ComparisonDimension, ComparisonsData, FilterCriteria, QueryParams, SummaryMetrics,
    TimeRangeConfig,
};
use studypulse::{Config, Error};

/// StudyPulse - Research study analytics
#[derive(Parser)]
#[command(name = "studypulse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "STUDYPULSE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (for commands that support it)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// HTTP port
        #[arg(long)]
        port: Option<u16>,

        /// Directory containing the built frontend
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Generate mock daily metrics
    Generate {
        /// Number of days to generate, ending today
        #[arg(long, default_value = "30")]
        days: u32,

        /// Chance that a day/category combination has activity
        #[arg(long, default_value = "0.3")]
        probability: f64,

        /// Output directory
        #[arg(short, long, default_value = "data")]
        output: PathBuf,
    },

    /// Print summary metrics
    Summary(FilterArgs),

    /// Print daily trends for one window
    Trends(FilterArgs),

    /// Print per-category comparisons
    Comparisons(FilterArgs),
}

#[derive(Args)]
struct FilterArgs {
    /// Time range (7d, 14d, 30d)
    #[arg(long)]
    time_range: Option<String>,

    /// Study type, or "all"
    #[arg(long)]
    study_type: Option<String>,

    /// Age group, or "all"
    #[arg(long)]
    age_group: Option<String>,

    /// Region, or "all"
    #[arg(long)]
    region: Option<String>,
}

impl From<FilterArgs> for QueryParams {
    fn from(args: FilterArgs) -> Self {
        Self {
            time_range: args.time_range,
            study_type: args.study_type,
            age_group: args.age_group,
            region: args.region,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging, cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => run_serve(config, host, port, static_dir).await,
        Commands::Generate {
            days,
            probability,
            output,
        } => run_generate(days, probability, &output),
        Commands::Summary(filters) => run_summary(&config, filters, cli.format).await,
        Commands::Trends(filters) => run_trends(&config, filters, cli.format).await,
        Commands::Comparisons(filters) => run_comparisons(&config, filters, cli.format).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if logging.format == "json" {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run_serve(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if static_dir.is_some() {
        config.server.static_dir = static_dir;
    }

    let source = JsonFileSource::from_config(&config.data);
    info!(
        metrics = %source.metrics_path().display(),
        "Starting StudyPulse API on {}",
        config.bind_addr()
    );

    let server = HttpServer::new(&config, Arc::new(source));
    server.serve(&config.bind_addr()).await?;

    info!("Server stopped");
    Ok(())
}

fn run_generate(days: u32, probability: f64, output: &std::path::Path) -> anyhow::Result<()> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&probability),
        "probability must be within 0..=1, got {probability}"
    );

    let (metrics_path, options_path) =
        write_mock_data(output, MockDataOptions { days, probability })
            .with_context(|| format!("failed to write mock data to {}", output.display()))?;

    println!("Mock data generated successfully!");
    println!("  {}", metrics_path.display());
    println!("  {}", options_path.display());
    Ok(())
}

/// Validate, load and filter, exactly as the API does
async fn load_filtered(
    config: &Config,
    filters: FilterArgs,
) -> anyhow::Result<(FilterCriteria, Vec<studypulse::models::DailyMetric>)> {
    let query = QueryParams::from(filters);
    let errors = validate_query(&query);
    if !errors.is_empty() {
        return Err(Error::Validation(errors).into());
    }

    let criteria = FilterCriteria::from(query);
    let source = JsonFileSource::from_config(&config.data);
    let records = source.daily_metrics().await?;
    let filtered = filter_metrics(&records, Some(&criteria));
    Ok((criteria, filtered))
}

async fn run_summary(config: &Config, filters: FilterArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (_, records) = load_filtered(config, filters).await?;
    let summary = summarize_with(&records, config.analytics.into());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print_summary(&summary),
    }
    Ok(())
}

async fn run_trends(config: &Config, filters: FilterArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (criteria, records) = load_filtered(config, filters).await?;
    let range = match criteria.time_range.as_deref() {
        Some(raw) => raw.parse::<TimeRange>().map_err(anyhow::Error::msg)?,
        None => TimeRange::default(),
    };
    let trends = build_trends(&records).into_response(range);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&trends)?),
        OutputFormat::Text => {
            for (name, window) in &trends.time_ranges {
                print_window(name, window);
            }
        }
    }
    Ok(())
}

async fn run_comparisons(
    config: &Config,
    filters: FilterArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let (criteria, records) = load_filtered(config, filters).await?;
    let comparisons = build_comparisons(&records, criteria.selected_study_type());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparisons)?),
        OutputFormat::Text => print_comparisons(&comparisons),
    }
    Ok(())
}

fn print_summary(summary: &SummaryMetrics) {
    println!("Summary");
    println!("───────────────────────────────");
    println!("Total participants:   {}", summary.total_participants);
    println!("Active participants:  {}", summary.active_participants);
    println!("Total studies:        {}", summary.total_studies);
    println!("Active studies:       {}", summary.active_studies);
    println!("Eligibility rate:     {:.1}%", summary.average_eligibility_rate);
    println!("Completion rate:      {:.1}%", summary.completion_rate);
}

fn print_window(name: &str, window: &TimeRangeConfig) {
    println!("Trends ({name}, per {})", window.interval);
    for metric in &window.metrics {
        println!();
        println!("{}", metric.name);
        for point in &metric.data {
            println!("  {}  {:>6}", point.date, point.value);
        }
    }
}

fn print_comparisons(comparisons: &ComparisonsData) {
    for dimension in [&comparisons.study_type, &comparisons.age_group, &comparisons.region] {
        print_dimension(dimension);
        println!();
    }
}

fn print_dimension(dimension: &ComparisonDimension) {
    println!("{}", dimension.dimension);
    println!("  {:<24} {:>12} {:>12}", "", "applications", "completions");
    for metric in &dimension.metrics {
        println!(
            "  {:<24} {:>12} {:>12}",
            metric.name, metric.applications, metric.completions
        );
    }
}
