//! Role classification of XBRL package files.
//!
//! EDGAR names the files of an XBRL submission after the instance document, with a
//! suffix marking each linkbase: `abc-20130331_cal.xml`, `abc-20130331_lab.xml` and
//! so on. The instance itself carries no suffix. [`FileRole::classify`] relies on that
//! convention alone; the `edgar:type` attribute of the index is not consulted.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileRole {
    /// The instance document carrying the facts.
    PrimaryDocument,
    Calculation,
    Labels,
    Presentation,
    ReferenceOrDefinition,
}

impl FileRole {
    pub const SUFFIXES: &'static [(&'static str, FileRole)] = &[
        ("_cal", FileRole::Calculation),
        ("_def", FileRole::ReferenceOrDefinition),
        ("_lab", FileRole::Labels),
        ("_pre", FileRole::Presentation),
    ];

    /// Classifies a file name or URL.
    ///
    /// Only the last path segment is inspected. Anything not ending in `.xml` yields
    /// `None` and must not be fetched. Otherwise the stem (everything before the first
    /// `.`) is matched against the linkbase suffixes, falling back to
    /// `PrimaryDocument`.
    ///
    /// ```rust
    /// use xbrlrss_loader::FileRole;
    ///
    /// assert_eq!(FileRole::classify("abc-20130331_pre.xml"), Some(FileRole::Presentation));
    /// assert_eq!(FileRole::classify("abc-20130331.xml"), Some(FileRole::PrimaryDocument));
    /// assert_eq!(FileRole::classify("abc-20130331.xsd"), None);
    /// ```
    pub fn classify(name: &str) -> Option<FileRole> {
        let file_name = basename(name);
        if !file_name.ends_with(".xml") {
            return None;
        }

        let stem = file_name.split('.').next().unwrap_or(file_name);
        let role = Self::SUFFIXES
            .iter()
            .find(|(suffix, _)| stem.ends_with(suffix))
            .map(|(_, role)| *role)
            .unwrap_or(FileRole::PrimaryDocument);
        Some(role)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileRole::PrimaryDocument => "primary document",
            FileRole::Calculation => "calculation",
            FileRole::Labels => "labels",
            FileRole::Presentation => "presentation",
            FileRole::ReferenceOrDefinition => "reference/definition",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last `/`-separated segment of a URL or path.
pub(crate) fn basename(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
