//! Monthly periods of the XBRL RSS archive.
//!
//! EDGAR publishes one XBRL RSS index per calendar month under
//! `.../Archives/edgar/monthly/xbrlrss-YYYY-MM.xml`, starting in 2005. Everything the
//! loader derives from a month (the index URL, the download directory and the period
//! label stored with each record) goes through [`FilingMonth`] so the formatting
//! lives in one place.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use super::error::{LoaderError, Result};

/// First year with XBRL RSS archives on EDGAR.
pub const FIRST_XBRL_YEAR: i32 = 2005;

/// A validated (year, month) pair.
///
/// # Example
/// ```rust
/// use xbrlrss_loader::{FilingMonth, Result};
///
/// fn main() -> Result<()> {
///     let month = FilingMonth::new(2013, 3)?;
///     assert_eq!(month.index_file_name(), "xbrlrss-2013-03.xml");
///     assert_eq!(month.period_label(), "3/2013");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilingMonth {
    /// Calendar year (>= 2005).
    year: i32,

    /// Calendar month (1-12).
    month: u32,
}

impl FilingMonth {
    /// Creates a new FilingMonth with validation.
    ///
    /// # Errors
    ///
    /// - `InvalidXBRLYear` if year < 2005
    /// - `InvalidMonth` if month not 1-12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if year < FIRST_XBRL_YEAR {
            return Err(LoaderError::InvalidXBRLYear);
        }
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or(LoaderError::InvalidMonth)?;
        Ok(Self {
            year: first_day.year(),
            month: first_day.month(),
        })
    }

    /// Gets the year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Gets the month (1-12)
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Label stored with every record of this month, `"{month}/{year}"` without padding.
    pub fn period_label(&self) -> String {
        format!("{}/{}", self.month, self.year)
    }

    /// Name of the monthly index document, e.g. `xbrlrss-2013-03.xml`.
    pub fn index_file_name(&self) -> String {
        format!("xbrlrss-{:04}-{:02}.xml", self.year, self.month)
    }

    /// Download directory relative to the output root, e.g. `2013/03`.
    pub fn relative_dir(&self) -> String {
        format!("{:04}/{:02}", self.year, self.month)
    }
}

impl fmt::Display for FilingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
