//! Fixed-attempt retry around a [`Fetcher`].
//!
//! Every download in the loader goes through [`RetryingFetcher`]. A failed attempt
//! is logged and retried immediately, with no backoff, until the attempt budget is
//! spent. The budget is per call; nothing is shared between files.
//!
//! Three shapes of download are offered:
//! - [`fetch_with_retry`](RetryingFetcher::fetch_with_retry) writes the payload to a
//!   file and is idempotent: an existing target short-circuits the network entirely.
//! - [`fetch_text_with_retry`](RetryingFetcher::fetch_text_with_retry) returns the
//!   payload as UTF-8 text.
//! - [`fetch_bytes_with_retry`](RetryingFetcher::fetch_bytes_with_retry) returns the
//!   raw payload, used for the monthly index.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::config::DEFAULT_MAX_ATTEMPTS;
use super::error::Result;
use super::traits::Fetcher;

#[derive(Debug, Clone)]
pub struct RetryingFetcher<F> {
    fetcher: F,
    max_attempts: u32,
}

impl<F: Fetcher> RetryingFetcher<F> {
    /// Wraps `fetcher` with the default budget of 3 attempts.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Downloads `url` into `target` unless `target` already exists.
    ///
    /// Returns `true` when the file is present afterwards, either because it was
    /// already on disk (no request is made) or because one of the attempts succeeded.
    /// The payload is written to a sibling `.part` file and renamed into place only
    /// after the whole body was read, so a failed attempt never leaves a file at
    /// `target` that a later run would mistake for a complete download.
    pub async fn fetch_with_retry(&self, url: &str, target: &Path) -> bool {
        if fs::try_exists(target).await.unwrap_or(false) {
            tracing::info!(path = %target.display(), "Local copy already exists");
            return true;
        }

        let mut remaining = self.max_attempts;
        while remaining > 0 {
            tracing::info!(url, path = %target.display(), "Downloading");
            match self.download_to(url, target).await {
                Ok(()) => return true,
                Err(e) => {
                    remaining -= 1;
                    tracing::warn!(url, error = %e, remaining, "Download failed");
                }
            }
        }

        tracing::error!(url, attempts = self.max_attempts, "Giving up on download");
        false
    }

    /// Downloads `url` as UTF-8 text. `None` means every attempt failed.
    pub async fn fetch_text_with_retry(&self, url: &str) -> Option<String> {
        let mut remaining = self.max_attempts;
        while remaining > 0 {
            tracing::info!(url, "Downloading");
            let outcome = match self.fetcher.fetch(url).await {
                Ok(bytes) => String::from_utf8(bytes).map_err(Into::into),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(text) => return Some(text),
                Err(e) => {
                    remaining -= 1;
                    tracing::warn!(url, error = %e, remaining, "Download failed");
                }
            }
        }

        tracing::error!(url, attempts = self.max_attempts, "Giving up on download");
        None
    }

    /// Downloads `url` into memory. `None` means every attempt failed.
    pub async fn fetch_bytes_with_retry(&self, url: &str) -> Option<Vec<u8>> {
        let mut remaining = self.max_attempts;
        while remaining > 0 {
            tracing::info!(url, "Downloading");
            match self.fetcher.fetch(url).await {
                Ok(bytes) => return Some(bytes),
                Err(e) => {
                    remaining -= 1;
                    tracing::warn!(url, error = %e, remaining, "Download failed");
                }
            }
        }

        tracing::error!(url, attempts = self.max_attempts, "Giving up on download");
        None
    }

    async fn download_to(&self, url: &str, target: &Path) -> Result<()> {
        let payload = self.fetcher.fetch(url).await?;
        let partial = partial_path(target);
        let stored = match fs::write(&partial, &payload).await {
            Ok(()) => fs::rename(&partial, target).await,
            Err(e) => Err(e),
        };

        if let Err(e) = stored {
            if let Err(cleanup) = fs::remove_file(&partial).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!(
                        path = %partial.display(),
                        error = %cleanup,
                        "Could not remove partial download"
                    );
                }
            }
            return Err(e.into());
        }
        Ok(())
    }
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".part");
    target.with_file_name(name)
}
