use serde::{Deserialize, Serialize};
use std::path::Path;

use super::classify::FileRole;
use super::period::FilingMonth;

/// The persisted unit: one filer's XBRL package for one monthly index.
///
/// Content fields hold the raw text of the file classified into that role, or `None`
/// when the package had no such file, its download was exhausted, or the entry was
/// acquired as a single archive (archives are stored on disk unopened and recorded in
/// `archive`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRecord {
    pub cik: String,
    #[serde(default)]
    pub primary_document: Option<String>,
    #[serde(default)]
    pub calculation: Option<String>,
    #[serde(default)]
    pub labels: Option<String>,
    #[serde(default)]
    pub presentation: Option<String>,
    #[serde(default)]
    pub reference_or_definition: Option<String>,
    /// `"{month}/{year}"`, e.g. `"3/2013"`.
    pub period_label: String,
    /// Local path of the downloaded archive, single-archive entries only.
    #[serde(default)]
    pub archive: Option<String>,
}

impl FilingRecord {
    pub fn new(cik: impl Into<String>, month: FilingMonth) -> Self {
        Self {
            cik: cik.into(),
            primary_document: None,
            calculation: None,
            labels: None,
            presentation: None,
            reference_or_definition: None,
            period_label: month.period_label(),
            archive: None,
        }
    }

    /// Record for an entry whose package was downloaded as one archive.
    pub fn archived(cik: impl Into<String>, month: FilingMonth, archive: &Path) -> Self {
        Self {
            archive: Some(archive.display().to_string()),
            ..Self::new(cik, month)
        }
    }

    pub fn role(&self, role: FileRole) -> Option<&str> {
        match role {
            FileRole::PrimaryDocument => self.primary_document.as_deref(),
            FileRole::Calculation => self.calculation.as_deref(),
            FileRole::Labels => self.labels.as_deref(),
            FileRole::Presentation => self.presentation.as_deref(),
            FileRole::ReferenceOrDefinition => self.reference_or_definition.as_deref(),
        }
    }

    /// Stores `content` under `role`, returning the value it replaced.
    pub fn assign(&mut self, role: FileRole, content: String) -> Option<String> {
        let slot = match role {
            FileRole::PrimaryDocument => &mut self.primary_document,
            FileRole::Calculation => &mut self.calculation,
            FileRole::Labels => &mut self.labels,
            FileRole::Presentation => &mut self.presentation,
            FileRole::ReferenceOrDefinition => &mut self.reference_or_definition,
        };
        slot.replace(content)
    }

    /// Number of roles that received content.
    pub fn populated_roles(&self) -> usize {
        [
            &self.primary_document,
            &self.calculation,
            &self.labels,
            &self.presentation,
            &self.reference_or_definition,
        ]
        .iter()
        .filter(|field| field.is_some())
        .count()
    }
}
