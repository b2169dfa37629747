// src/models/catalog.rs

//! Program/department catalog.
//!
//! Maps the numeric program-department ids used by the legacy data files to
//! branch labels of the form `"{program}-{department}"`. The ascending id
//! order (without the sentinel) is also the character order of eligibility
//! strings.

use serde::{Deserialize, Serialize};

/// A single catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepartmentEntry {
    /// Numeric program-department id
    pub id: u32,

    /// Branch label, e.g. `"BT-CSE"`
    pub label: String,
}

/// Catalog of branches plus the axes of the eligibility grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCatalog {
    /// Id standing for "all branches"; excluded from eligibility ordering
    #[serde(default = "defaults::sentinel_id")]
    pub sentinel_id: u32,

    /// Known branches
    #[serde(default = "defaults::departments")]
    pub departments: Vec<DepartmentEntry>,

    /// Program labels (grid rows)
    #[serde(default = "defaults::programs")]
    pub programs: Vec<String>,

    /// Department labels (grid columns)
    #[serde(default = "defaults::columns")]
    pub columns: Vec<String>,
}

impl Default for DepartmentCatalog {
    fn default() -> Self {
        Self {
            sentinel_id: defaults::sentinel_id(),
            departments: defaults::departments(),
            programs: defaults::programs(),
            columns: defaults::columns(),
        }
    }
}

impl DepartmentCatalog {
    /// Branch label for an id, if known.
    pub fn label(&self, id: u32) -> Option<&str> {
        self.departments
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.label.as_str())
    }

    /// Branch labels in canonical eligibility order: ascending id, sentinel
    /// excluded, first label wins for duplicated ids.
    pub fn ordered_labels(&self) -> Vec<&str> {
        let mut entries: Vec<&DepartmentEntry> = self
            .departments
            .iter()
            .filter(|d| d.id != self.sentinel_id)
            .collect();
        entries.sort_by_key(|d| d.id);
        entries.dedup_by_key(|d| d.id);
        entries.into_iter().map(|d| d.label.as_str()).collect()
    }

    /// Number of positions an eligibility string is expected to carry.
    pub fn width(&self) -> usize {
        self.ordered_labels().len()
    }
}

mod defaults {
    use super::DepartmentEntry;

    const PROGRAMS: &[&str] = &[
        "BT",
        "BS",
        "DoubleMajor",
        "DualA",
        "DualB",
        "DualC",
        "MT",
        "MS",
        "MSR",
        "MSc",
        "MDes",
        "MBA",
        "PhD",
    ];

    const DEPARTMENTS: &[&str] = &[
        "AE",
        "BSBE",
        "CE",
        "CHE",
        "CSE",
        "EE",
        "MSE",
        "ME",
        "CHM",
        "ECO",
        "ES",
        "MTH",
        "SDS",
        "PHY",
        "CGS",
        "DES",
        "MS",
        "MSP",
        "NET",
        "PSE",
        "Stats",
        "HSS",
        "Mathematics",
        "SEE",
        "SSA",
    ];

    pub fn sentinel_id() -> u32 {
        200
    }

    // Placeholder catalog: one BT branch per department. Real deployments
    // ship the full id table in config.toml.
    pub fn departments() -> Vec<DepartmentEntry> {
        let mut entries: Vec<DepartmentEntry> = DEPARTMENTS
            .iter()
            .enumerate()
            .map(|(i, dept)| DepartmentEntry {
                id: i as u32 + 1,
                label: format!("BT-{dept}"),
            })
            .collect();
        entries.push(DepartmentEntry {
            id: sentinel_id(),
            label: "ALL".to_string(),
        });
        entries
    }

    pub fn programs() -> Vec<String> {
        PROGRAMS.iter().map(|p| p.to_string()).collect()
    }

    pub fn columns() -> Vec<String> {
        DEPARTMENTS.iter().map(|d| d.to_string()).collect()
    }
}
