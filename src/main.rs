use anyhow::{Context, Result};
use clap::Parser;
use std::{path::PathBuf, time::Duration};
use xbrlrss_loader::{
    AcquisitionPipeline, DEFAULT_MAX_ATTEMPTS, HttpFetcher, JsonLinesSink, LoaderConfig, RunPlan,
};

/// Downloads the XBRL packages listed in SEC EDGAR monthly RSS indexes.
///
/// Without `--from`/`--to` a single month (`--year`/`--month`) is loaded. With either
/// bound every month of the year range is loaded; a missing bound defaults to the
/// other one.
#[derive(Debug, Parser)]
#[command(name = "xbrlrss-loader", version)]
struct Args {
    /// Year of the single month to load.
    #[arg(short, long, default_value_t = 2013)]
    year: i32,

    /// Month (1-12) of the single month to load.
    #[arg(short, long, default_value_t = 1)]
    month: u32,

    /// First year of a range to load.
    #[arg(short, long)]
    from: Option<i32>,

    /// Last year of a range to load.
    #[arg(short, long)]
    to: Option<i32>,

    /// Root directory for downloaded archives.
    #[arg(long, default_value = "sec")]
    output_dir: PathBuf,

    /// JSON Lines file receiving one record per index entry.
    #[arg(long, default_value = "sec/filings.jsonl")]
    records: PathBuf,

    /// SEC.gov-required user agent (e.g. "MyApp you@example.com").
    #[arg(long, default_value = "xbrlrss-loader/0.1.0")]
    user_agent: String,

    /// Timeout in seconds for connecting and for each request.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Attempts per download before giving up on it.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Base URL of the EDGAR archives.
    #[arg(long, default_value = "https://www.sec.gov/Archives/edgar")]
    archives_url: String,
}

impl Args {
    fn plan(&self) -> RunPlan {
        RunPlan::years(self.from, self.to).unwrap_or(RunPlan::Month {
            year: self.year,
            month: self.month,
        })
    }

    fn config(&self) -> LoaderConfig {
        LoaderConfig::new(&self.user_agent, Duration::from_secs(self.timeout_secs))
            .with_max_attempts(self.max_attempts)
            .with_archives_url(&self.archives_url)
            .with_output_dir(&self.output_dir)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.config();
    let fetcher = HttpFetcher::new(&config).context("failed to build HTTP client")?;
    let sink = JsonLinesSink::open(&args.records)
        .await
        .with_context(|| format!("failed to open {}", args.records.display()))?;
    let pipeline = AcquisitionPipeline::new(fetcher, sink, &config);

    let report = xbrlrss_loader::run(&pipeline, &args.plan()).await;

    pipeline
        .into_sink()
        .close()
        .await
        .context("failed to close record sink")?;

    println!(
        "{} records persisted, {} entries skipped, {} months failed in {:.1}s",
        report.persisted(),
        report.skipped(),
        report.failed.len(),
        report.elapsed.as_secs_f64()
    );
    Ok(())
}
