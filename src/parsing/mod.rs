//! Parsers for the EDGAR monthly XBRL RSS index.
//!
//! - [`feed`] deserializes entries and enclosures.
//! - [`tree`] walks the raw markup for per-item XBRL file lists.
//! - [`index`] combines both into an [`IndexDocument`](index::IndexDocument).

pub mod feed;
pub mod index;
pub mod tree;
