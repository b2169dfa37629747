//! Student placement records.

use serde::{Deserialize, Serialize};

use crate::models::{BranchStats, DepartmentCatalog, Edition};
use crate::utils::de::{lenient_string, opt_lenient_string};

/// How a student's branch is recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DepartmentRef {
    /// Numeric program-department id (legacy)
    Id(u32),
    /// Free-text branch label (2025)
    Label(String),
}

impl DepartmentRef {
    /// Resolve to a display name through the catalog.
    pub fn display_name<'a>(&'a self, catalog: &'a DepartmentCatalog) -> &'a str {
        match self {
            DepartmentRef::Id(id) => catalog.label(*id).unwrap_or("Unknown"),
            DepartmentRef::Label(label) => label,
        }
    }
}

/// A placed student, normalized across editions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentPlacement {
    /// Roll number; stable identifier
    pub roll_no: String,

    pub name: String,

    pub company_name: String,

    pub profile: String,

    pub department: DepartmentRef,

    pub email: Option<String>,

    /// Offer type (legacy only, e.g. "PPO")
    pub placement_type: Option<String>,

    /// Second branch for dual-degree students (legacy only)
    pub secondary_department_id: Option<u32>,

    /// Gross compensation as published (2025 only)
    pub gross: Option<String>,

    /// Index of the matching proforma (2025 only)
    pub proforma_index: Option<usize>,
}

/// Students of one edition, plus the legacy per-branch totals.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct StudentRoster {
    pub students: Vec<StudentPlacement>,
    pub branches: Vec<BranchStats>,
}

impl StudentRoster {
    /// Decode a students dataset according to its edition.
    pub fn decode(edition: Edition, bytes: &[u8]) -> serde_json::Result<Self> {
        match edition {
            Edition::Legacy => {
                let file: LegacyStatsFile = serde_json::from_slice(bytes)?;
                Ok(Self {
                    students: file.student.into_iter().map(Into::into).collect(),
                    branches: file.branch,
                })
            }
            Edition::Y2025 => {
                let rows: Vec<Student2025> = serde_json::from_slice(bytes)?;
                Ok(Self {
                    students: rows.into_iter().map(Into::into).collect(),
                    branches: Vec::new(),
                })
            }
        }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct LegacyStatsFile {
    #[serde(default)]
    branch: Vec<BranchStats>,
    #[serde(default)]
    student: Vec<LegacyStudent>,
}

#[derive(Debug, Deserialize)]
struct LegacyStudent {
    #[serde(default, deserialize_with = "lenient_string")]
    name: String,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    roll_no: String,
    #[serde(default)]
    program_department_id: u32,
    #[serde(default)]
    secondary_program_department_id: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    company_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    profile: String,
    #[serde(rename = "type", default, deserialize_with = "opt_lenient_string")]
    placement_type: Option<String>,
}

impl From<LegacyStudent> for StudentPlacement {
    fn from(raw: LegacyStudent) -> Self {
        Self {
            roll_no: raw.roll_no,
            name: raw.name,
            company_name: raw.company_name,
            profile: raw.profile,
            department: DepartmentRef::Id(raw.program_department_id),
            email: raw.email.filter(|e| !e.trim().is_empty()),
            placement_type: raw.placement_type,
            secondary_department_id: raw.secondary_program_department_id.filter(|id| *id != 0),
            gross: None,
            proforma_index: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Student2025 {
    #[serde(default, deserialize_with = "lenient_string")]
    name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    roll_no: String,
    #[serde(default, deserialize_with = "lenient_string")]
    company_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    profile: String,
    #[serde(default, deserialize_with = "lenient_string")]
    program_department: String,
    #[serde(default)]
    proforma_idx: Option<i64>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    gross: Option<String>,
}

impl From<Student2025> for StudentPlacement {
    fn from(raw: Student2025) -> Self {
        Self {
            roll_no: raw.roll_no,
            name: raw.name,
            company_name: raw.company_name,
            profile: raw.profile,
            department: DepartmentRef::Label(raw.program_department),
            email: None,
            placement_type: None,
            secondary_department_id: None,
            gross: raw.gross,
            proforma_index: raw.proforma_idx.and_then(|i| usize::try_from(i).ok()),
        }
    }
}
