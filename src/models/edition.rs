//! Dataset generations and the kinds of datasets the archive publishes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Generation of the published data files.
///
/// Each generation has its own record shapes, company identification
/// scheme and eligibility alphabet. The tag is declared per dataset in the
/// configuration, never inferred from field presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Edition {
    #[serde(rename = "legacy")]
    Legacy,
    #[serde(rename = "2025")]
    Y2025,
}

impl Edition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Edition::Legacy => "legacy",
            Edition::Y2025 => "2025",
        }
    }

    /// How detail views identify a company in this generation.
    pub fn id_scheme(&self) -> IdScheme {
        match self {
            Edition::Legacy => IdScheme::ById,
            Edition::Y2025 => IdScheme::ByPosition,
        }
    }

    /// Characters used by this generation's eligibility strings.
    pub fn eligibility_alphabet(&self) -> EligibilityAlphabet {
        match self {
            Edition::Legacy => EligibilityAlphabet::Binary,
            Edition::Y2025 => EligibilityAlphabet::YesNo,
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Edition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" | "2024" => Ok(Edition::Legacy),
            "2025" => Ok(Edition::Y2025),
            other => Err(AppError::validation(format!("unknown edition '{other}'"))),
        }
    }
}

/// Company identification scheme used by detail lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScheme {
    /// Exact match on the record's numeric primary key
    ById,
    /// Index into the loaded collection
    ByPosition,
}

/// Alphabet of a positional eligibility string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityAlphabet {
    /// `'1'` eligible, `'0'` ineligible
    Binary,
    /// `'Y'` eligible, `'N'` ineligible
    YesNo,
}

impl EligibilityAlphabet {
    /// Decode one character; anything outside the alphabet is unknown.
    pub fn decode(&self, c: char) -> Option<bool> {
        match (self, c) {
            (EligibilityAlphabet::Binary, '1') | (EligibilityAlphabet::YesNo, 'Y') => Some(true),
            (EligibilityAlphabet::Binary, '0') | (EligibilityAlphabet::YesNo, 'N') => Some(false),
            _ => None,
        }
    }
}

/// Kinds of datasets a store can load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Student placements (plus branch statistics in the legacy edition)
    Students,
    /// Company proformas
    Companies,
    /// Timeline notices
    Notices,
    /// Student resumes
    Resumes,
    /// Per-slot placement timeline
    Slots,
    /// Aggregated placement analytics
    Analytics,
}

impl DatasetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Students => "students",
            DatasetKind::Companies => "companies",
            DatasetKind::Notices => "notices",
            DatasetKind::Resumes => "resumes",
            DatasetKind::Slots => "slots",
            DatasetKind::Analytics => "analytics",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "students" | "stats" => Ok(DatasetKind::Students),
            "companies" | "proforma" => Ok(DatasetKind::Companies),
            "notices" => Ok(DatasetKind::Notices),
            "resumes" => Ok(DatasetKind::Resumes),
            "slots" | "timeline" => Ok(DatasetKind::Slots),
            "analytics" => Ok(DatasetKind::Analytics),
            other => Err(AppError::validation(format!("unknown dataset kind '{other}'"))),
        }
    }
}
