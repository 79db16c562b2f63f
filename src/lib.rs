//! # xbrlrss-loader - bulk acquisition of SEC EDGAR XBRL packages
//!
//! EDGAR publishes a monthly RSS index (`xbrlrss-YYYY-MM.xml`) listing every XBRL
//! financial-disclosure package submitted that month. This crate walks such an index
//! and acquires each package:
//!
//! - **Single archives** offered as an `<enclosure>` are downloaded to
//!   `{output_dir}/{YYYY}/{MM}/{CIK}-{name}`, skipping files already on disk
//! - **Individual files** listed under `edgar:xbrlFiles` are fetched as text and
//!   sorted into the instance document and the calculation, label, presentation and
//!   definition linkbases
//! - **Records** (one per index entry) are handed to a [`FilingSink`]
//!
//! Every download is retried a fixed number of times. A failing file, entry or
//! month is logged and skipped without stopping the run.
//!
//! ## Requirements
//!
//! The loader is async and requires a [tokio](https://tokio.rs) runtime. SEC.gov
//! expects automated clients to identify themselves, so set a user agent with
//! contact details.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use xbrlrss_loader::{AcquisitionPipeline, HttpFetcher, JsonLinesSink, LoaderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LoaderConfig::new("YourAppName contact@example.com", Duration::from_secs(10));
//!     let sink = JsonLinesSink::open("sec/filings.jsonl").await?;
//!     let pipeline = AcquisitionPipeline::new(HttpFetcher::new(&config)?, sink, &config);
//!
//!     let summary = pipeline.acquire_month(2013, 3).await?;
//!     println!("{} records from {} entries", summary.persisted, summary.entries);
//!
//!     pipeline.into_sink().close().await?;
//!     Ok(())
//! }
//! ```

mod classify;
mod config;
mod core;
mod driver;
mod error;
pub mod parsing;
mod period;
mod pipeline;
mod record;
mod retry;
mod sink;
mod traits;

pub use classify::FileRole;
pub use config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT, LoaderConfig};
pub use core::HttpFetcher;
pub use driver::{RunPlan, RunReport, run};
pub use error::{LoaderError, Result};
pub use period::{FIRST_XBRL_YEAR, FilingMonth};
pub use pipeline::{AcquisitionPipeline, MonthSummary};
pub use record::FilingRecord;
pub use retry::RetryingFetcher;
pub use sink::{JsonLinesSink, MemorySink};
pub use traits::{Fetcher, FilingSink};

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
