//! Runs the pipeline over one month or a range of years.

use std::time::{Duration, Instant};

use super::pipeline::{AcquisitionPipeline, MonthSummary};
use super::traits::{Fetcher, FilingSink};

/// Which monthly indexes a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPlan {
    /// A single monthly index.
    Month { year: i32, month: u32 },
    /// Every month of every year in `from..=to`.
    Years { from: i32, to: i32 },
}

impl RunPlan {
    /// Builds a year range where a missing bound defaults to the other one.
    ///
    /// Returns `None` when neither bound is given.
    pub fn years(from: Option<i32>, to: Option<i32>) -> Option<Self> {
        match (from, to) {
            (None, None) => None,
            (from, to) => {
                let from = from.or(to)?;
                let to = to.unwrap_or(from);
                Some(RunPlan::Years { from, to })
            }
        }
    }

    /// The (year, month) pairs of the plan, in chronological order.
    ///
    /// Pairs are not validated here; a month EDGAR has no index for fails on its own
    /// when the plan runs. An inverted range yields nothing.
    pub fn periods(&self) -> Vec<(i32, u32)> {
        match *self {
            RunPlan::Month { year, month } => vec![(year, month)],
            RunPlan::Years { from, to } => (from..=to)
                .flat_map(|year| (1..=12).map(move |month| (year, month)))
                .collect(),
        }
    }
}

/// Result of a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Summaries of the months that completed.
    pub completed: Vec<MonthSummary>,
    /// Months that failed as a whole, as (year, month): rejected before any request
    /// or with an unavailable index.
    pub failed: Vec<(i32, u32)>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn persisted(&self) -> usize {
        self.completed.iter().map(|s| s.persisted).sum()
    }

    pub fn skipped(&self) -> usize {
        self.completed.iter().map(|s| s.skipped).sum()
    }
}

/// Acquires every month of `plan` in order.
///
/// A month that fails, including one outside the XBRL archive, is logged and
/// recorded in the report; the run moves on to the next month.
pub async fn run<F, S>(pipeline: &AcquisitionPipeline<F, S>, plan: &RunPlan) -> RunReport
where
    F: Fetcher,
    S: FilingSink,
{
    let started = Instant::now();
    let mut report = RunReport::default();

    for (year, month) in plan.periods() {
        match pipeline.acquire_month(year, month).await {
            Ok(summary) => report.completed.push(summary),
            Err(e) => {
                tracing::error!(year, month, error = %e, "Month failed");
                report.failed.push((year, month));
            }
        }
    }

    report.elapsed = started.elapsed();
    tracing::info!(
        months = report.completed.len(),
        failed = report.failed.len(),
        persisted = report.persisted(),
        skipped = report.skipped(),
        elapsed_secs = report.elapsed.as_secs_f64(),
        "Run finished"
    );
    report
}
