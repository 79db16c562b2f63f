//! Month-by-month acquisition of XBRL packages.
//!
//! [`AcquisitionPipeline`] downloads the monthly index, parses it into its feed and
//! tree views and then resolves every entry, in document order, along one of two
//! paths:
//!
//! - **Single archive**: the feed offers an `<enclosure>`. The archive is stored as
//!   `{output_dir}/{YYYY}/{MM}/{CIK}-{archive name}` and recorded by path.
//! - **Manual assembly**: no enclosure. The tree item at the entry's position lists
//!   the package's files; each `.xml` file is fetched as text and stored under the
//!   role its name implies.
//!
//! Either way one [`FilingRecord`] per entry reaches the sink. Failures below the
//! month level are logged and skip the entry (or leave a role empty) instead of
//! aborting the month.

use std::path::{Path, PathBuf};
use tokio::fs;

use super::classify::{FileRole, basename};
use super::config::LoaderConfig;
use super::error::{LoaderError, Result};
use super::parsing::index::{IndexDocument, MatchedEntry};
use super::parsing::tree::XbrlFileRef;
use super::period::FilingMonth;
use super::record::FilingRecord;
use super::retry::RetryingFetcher;
use super::traits::{Fetcher, FilingSink};

/// Outcome counts for one processed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSummary {
    pub month: FilingMonth,
    /// Entries listed by the feed view.
    pub entries: usize,
    /// Entries whose record reached the sink.
    pub persisted: usize,
    pub skipped: usize,
}

impl MonthSummary {
    fn new(month: FilingMonth) -> Self {
        Self {
            month,
            entries: 0,
            persisted: 0,
            skipped: 0,
        }
    }
}

/// Drives the acquisition of monthly indexes into a [`FilingSink`].
///
/// # Example
///
/// ```rust,no_run
/// use xbrlrss_loader::{AcquisitionPipeline, HttpFetcher, LoaderConfig, MemorySink};
///
/// # async fn run() -> xbrlrss_loader::Result<()> {
/// let config = LoaderConfig::new("YourAppName contact@example.com", std::time::Duration::from_secs(10));
/// let pipeline = AcquisitionPipeline::new(HttpFetcher::new(&config)?, MemorySink::new(), &config);
///
/// let summary = pipeline.acquire_month(2013, 3).await?;
/// println!("{} of {} entries persisted", summary.persisted, summary.entries);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AcquisitionPipeline<F, S> {
    fetcher: RetryingFetcher<F>,
    sink: S,
    archives_url: String,
    output_dir: PathBuf,
}

impl<F: Fetcher, S: FilingSink> AcquisitionPipeline<F, S> {
    pub fn new(fetcher: F, sink: S, config: &LoaderConfig) -> Self {
        Self {
            fetcher: RetryingFetcher::new(fetcher).with_max_attempts(config.max_attempts),
            sink,
            archives_url: config.archives_url.trim_end_matches('/').to_string(),
            output_dir: config.output_dir.clone(),
        }
    }

    /// URL of the monthly XBRL RSS index for `month`.
    pub fn index_url(&self, month: FilingMonth) -> String {
        format!("{}/monthly/{}", self.archives_url, month.index_file_name())
    }

    /// Directory that receives the archives downloaded for `month`.
    pub fn target_dir(&self, month: FilingMonth) -> PathBuf {
        self.output_dir.join(month.relative_dir())
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Gives the sink back, e.g. to close it at shutdown.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Acquires every entry of the monthly index for `year`/`month`.
    ///
    /// # Errors
    ///
    /// - `InvalidXBRLYear`/`InvalidMonth` for a month EDGAR has no index for
    /// - `FileError` if the month directory cannot be created
    /// - `IndexUnavailable` if the index could not be downloaded
    ///
    /// Failures of single entries or files are not errors; they show up in the
    /// returned summary as skipped entries.
    pub async fn acquire_month(&self, year: i32, month: u32) -> Result<MonthSummary> {
        let month = FilingMonth::new(year, month)?;
        self.acquire(month).await
    }

    /// Same as [`acquire_month`](Self::acquire_month) for an already validated month.
    pub async fn acquire(&self, month: FilingMonth) -> Result<MonthSummary> {
        let target_dir = self.target_dir(month);
        fs::create_dir_all(&target_dir).await?;

        let index_url = self.index_url(month);
        tracing::info!(%month, url = %index_url, "Fetching monthly index");
        let payload = self
            .fetcher
            .fetch_bytes_with_retry(&index_url)
            .await
            .ok_or_else(|| LoaderError::IndexUnavailable(index_url.clone()))?;

        let document = IndexDocument::parse(&payload);
        let summary = self.process_document(month, &document).await;

        if let Err(e) = self.sink.flush().await {
            tracing::error!(%month, error = %e, "Flushing the record sink failed");
        }
        tracing::info!(
            %month,
            entries = summary.entries,
            persisted = summary.persisted,
            skipped = summary.skipped,
            "Finished month"
        );
        Ok(summary)
    }

    /// Resolves every entry of a parsed index and hands the records to the sink.
    pub async fn process_document(&self, month: FilingMonth, document: &IndexDocument) -> MonthSummary {
        let target_dir = self.target_dir(month);
        let mut summary = MonthSummary::new(month);

        for matched in document.matched() {
            summary.entries += 1;
            let position = matched.entry.position;

            let record = match self.acquire_entry(month, &target_dir, matched).await {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(
                        position,
                        title = matched.entry.title.as_deref().unwrap_or_default(),
                        error = %e,
                        "Skipping entry"
                    );
                    summary.skipped += 1;
                    continue;
                }
            };

            let cik = record.cik.clone();
            match self.sink.insert(record).await {
                Ok(()) => summary.persisted += 1,
                Err(e) => {
                    tracing::error!(position, %cik, error = %e, "Sink rejected record");
                    summary.skipped += 1;
                }
            }
        }

        summary
    }

    async fn acquire_entry(
        &self,
        month: FilingMonth,
        target_dir: &Path,
        matched: MatchedEntry<'_>,
    ) -> Result<FilingRecord> {
        let entry = matched.entry;
        let cik = entry.cik()?;

        if let Some(enclosure_url) = entry.enclosure_url.as_deref() {
            let target = target_dir.join(format!("{}-{}", cik, basename(enclosure_url)));
            if !self.fetcher.fetch_with_retry(enclosure_url, &target).await {
                return Err(LoaderError::AttemptsExhausted {
                    url: enclosure_url.to_string(),
                    attempts: self.fetcher.max_attempts(),
                });
            }
            return Ok(FilingRecord::archived(cik, month, &target));
        }

        let item = matched.item.ok_or_else(|| {
            LoaderError::StructuralMismatch(format!("no tree item at position {}", entry.position))
        })?;
        let files = item.files()?;
        tracing::debug!(cik, files = files.len(), "Assembling package from individual files");

        let mut record = FilingRecord::new(cik, month);
        for file in files {
            self.acquire_file(&mut record, file).await;
        }
        Ok(record)
    }

    /// Fetches one listed file into the role its name implies. Failures leave the
    /// record untouched.
    async fn acquire_file(&self, record: &mut FilingRecord, file: &XbrlFileRef) {
        let Some(url) = file.url.as_deref() else {
            tracing::warn!(
                cik = %record.cik,
                file = file.file_name.as_deref().unwrap_or_default(),
                "XBRL file reference has no url"
            );
            return;
        };
        let Some(role) = FileRole::classify(url) else {
            tracing::debug!(url, "Not an XML file, skipping");
            return;
        };

        match self.fetcher.fetch_text_with_retry(url).await {
            Some(content) => {
                if record.assign(role, content).is_some() {
                    tracing::warn!(cik = %record.cik, %role, url, "Role already filled, overwriting");
                }
            }
            None => tracing::warn!(cik = %record.cik, %role, url, "Leaving role empty"),
        }
    }
}
