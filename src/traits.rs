//! Trait definitions for the two seams of the loader.
//!
//! The acquisition pipeline talks to the outside world through exactly two
//! interfaces: a [`Fetcher`] that performs a single network GET, and a
//! [`FilingSink`] that durably stores the records the pipeline produces.
//! `HttpFetcher` and the sinks in `sink.rs` are the production implementations;
//! tests substitute stubs or mocks for either side.

use super::error::Result;
use super::record::FilingRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// A single bounded network fetch.
///
/// Implementations perform exactly one attempt; retrying is the caller's concern
/// (see `RetryingFetcher`). Failures are reported as `HttpStatus`, `Network` or
/// `Timeout` and never panic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the full body of `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.as_ref().fetch(url).await
    }
}

/// Append-only storage for acquired filing records.
#[async_trait]
pub trait FilingSink: Send + Sync {
    /// Stores one record. The sink owns the record from here on.
    async fn insert(&self, record: FilingRecord) -> Result<()>;
    /// Makes every inserted record durable. Called once per processed month.
    async fn flush(&self) -> Result<()>;
}
