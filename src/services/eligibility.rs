//! Positional eligibility strings.
//!
//! Character *i* of an encoded string belongs to the *i*-th branch of the
//! catalog in ascending id order. Decoding never fails: characters outside
//! the alphabet, missing positions and unknown branches all read as
//! [`Eligibility::Unknown`].

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::models::{CompanyProforma, DepartmentCatalog, EligibilityAlphabet};

/// Eligibility of one branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Eligibility {
    Eligible,
    Ineligible,
    Unknown,
}

impl Eligibility {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Eligibility::Eligible => Some(true),
            Eligibility::Ineligible => Some(false),
            Eligibility::Unknown => None,
        }
    }

    /// Single-character marker for text grids.
    pub fn symbol(self) -> char {
        match self {
            Eligibility::Eligible => '✓',
            Eligibility::Ineligible => '✗',
            Eligibility::Unknown => '-',
        }
    }
}

impl From<Option<bool>> for Eligibility {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Eligibility::Eligible,
            Some(false) => Eligibility::Ineligible,
            None => Eligibility::Unknown,
        }
    }
}

impl fmt::Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Eligibility::Eligible => "eligible",
            Eligibility::Ineligible => "ineligible",
            Eligibility::Unknown => "unknown",
        };
        f.write_str(text)
    }
}

/// Decoded eligibility, keyed by `"{program}-{department}"` labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibilityMap {
    entries: HashMap<String, Eligibility>,
}

impl EligibilityMap {
    /// Decode `encoded` against the catalog's branch order.
    ///
    /// Positions past the end of `encoded` get no entry; surplus characters
    /// are ignored. When two ids share a label the later id wins.
    pub fn decode(encoded: &str, alphabet: EligibilityAlphabet, catalog: &DepartmentCatalog) -> Self {
        let entries = catalog
            .ordered_labels()
            .into_iter()
            .zip(encoded.chars())
            .map(|(label, c)| (label.to_string(), Eligibility::from(alphabet.decode(c))))
            .collect();
        Self { entries }
    }

    /// Decode a company's eligibility string using its edition's alphabet.
    pub fn for_company(company: &CompanyProforma, catalog: &DepartmentCatalog) -> Self {
        Self::decode(
            &company.eligibility,
            company.edition.eligibility_alphabet(),
            catalog,
        )
    }

    /// Eligibility of a program/department pair.
    pub fn get(&self, program: &str, department: &str) -> Eligibility {
        self.label(&format!("{program}-{department}"))
    }

    /// Eligibility of a full branch label.
    pub fn label(&self, label: &str) -> Eligibility {
        self.entries
            .get(label)
            .copied()
            .unwrap_or(Eligibility::Unknown)
    }

    /// Program × department matrix, one row per program.
    pub fn grid<P, D>(&self, programs: &[P], departments: &[D]) -> Vec<Vec<Eligibility>>
    where
        P: AsRef<str>,
        D: AsRef<str>,
    {
        programs
            .iter()
            .map(|program| {
                departments
                    .iter()
                    .map(|dept| self.get(program.as_ref(), dept.as_ref()))
                    .collect()
            })
            .collect()
    }

    /// Number of decoded positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of branches marked eligible.
    pub fn eligible_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| **e == Eligibility::Eligible)
            .count()
    }
}
