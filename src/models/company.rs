//! Company proforma records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Edition, TimelineNotice};
use crate::utils::de::{lenient_string, opt_lenient_string};

/// Identifier of a company record within its dataset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CompanyKey {
    /// Primary key carried by the record (legacy)
    Id(u64),
    /// Position in the published array (2025)
    Position(usize),
}

impl fmt::Display for CompanyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanyKey::Id(id) => write!(f, "{id}"),
            CompanyKey::Position(idx) => write!(f, "{idx}"),
        }
    }
}

/// Compensation fields. Values are free-form and may contain HTML.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Compensation {
    pub ctc_inr: Option<String>,
    pub ctc_foreign: Option<String>,
    pub cost_to_company: Option<String>,
    pub package_details: Option<String>,
    pub gross: Option<String>,
    pub take_home: Option<String>,
    pub base: Option<String>,
    pub joining_bonus: Option<String>,
    pub relocation_bonus: Option<String>,
    pub retention_bonus: Option<String>,
    pub first_year_ctc: Option<String>,
    pub total_ctc: Option<String>,
    pub deductions: Option<String>,
    pub perks: Option<String>,
}

impl Compensation {
    /// Labelled, non-empty fields in display order.
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        [
            ("CTC (INR)", &self.ctc_inr),
            ("CTC (foreign currency)", &self.ctc_foreign),
            ("Gross", &self.gross),
            ("First Year CTC", &self.first_year_ctc),
            ("Base", &self.base),
            ("Take Home", &self.take_home),
            ("Joining Bonus", &self.joining_bonus),
            ("Relocation Bonus", &self.relocation_bonus),
            ("Retention Bonus", &self.retention_bonus),
            ("Deductions", &self.deductions),
            ("Perks", &self.perks),
            ("Cost To Company", &self.cost_to_company),
            ("Package Details", &self.package_details),
            ("Total CTC", &self.total_ctc),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| (label, v))
        })
        .collect()
    }
}

/// A company proforma, normalized across editions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyProforma {
    pub key: CompanyKey,
    pub edition: Edition,
    pub company_name: String,
    pub role: String,
    pub profile: String,
    pub location: Option<String>,
    pub nature_of_business: Option<String>,
    pub job_description: Option<String>,
    pub skill_set: Option<String>,
    pub bond_details: Option<String>,
    pub medical_requirements: Option<String>,
    pub compensation: Compensation,

    /// Positional eligibility string; alphabet depends on `edition`
    pub eligibility: String,

    /// Notices already linked by the export (legacy only)
    pub timeline_events: Vec<TimelineNotice>,
}

impl CompanyProforma {
    /// Decode a companies dataset according to its edition.
    pub fn decode_all(edition: Edition, bytes: &[u8]) -> serde_json::Result<Vec<Self>> {
        match edition {
            Edition::Legacy => {
                let rows: Vec<LegacyProforma> = serde_json::from_slice(bytes)?;
                Ok(rows.into_iter().map(Into::into).collect())
            }
            Edition::Y2025 => {
                let rows: Vec<Proforma2025> = serde_json::from_slice(bytes)?;
                Ok(rows
                    .into_iter()
                    .enumerate()
                    .map(|(idx, raw)| raw.into_proforma(idx))
                    .collect())
            }
        }
    }

    /// Trimmed display name, or a placeholder for blank names.
    pub fn display_name(&self) -> &str {
        let name = self.company_name.trim();
        if name.is_empty() { "Unknown Company" } else { name }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Deserialize)]
struct LegacyProforma {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    company_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    eligibility: String,
    #[serde(default, deserialize_with = "lenient_string")]
    role: String,
    #[serde(default, deserialize_with = "lenient_string")]
    profile: String,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    tentative_job_location: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    job_description: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    cost_to_company: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    package_details: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    bond_details: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    skill_set: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    ctc_inr: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    gross: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    take_home: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    base: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    joining_bonus: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    relocation_bonus: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    first_ctc: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    retention_bonus: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    deductions: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_string")]
    perks: Option<String>,
    #[serde(default)]
    timeline_events: Vec<TimelineNotice>,
}

impl From<LegacyProforma> for CompanyProforma {
    fn from(raw: LegacyProforma) -> Self {
        Self {
            key: CompanyKey::Id(raw.id),
            edition: Edition::Legacy,
            company_name: raw.company_name,
            role: raw.role,
            profile: raw.profile,
            location: non_empty(raw.tentative_job_location),
            nature_of_business: None,
            job_description: non_empty(raw.job_description),
            skill_set: non_empty(raw.skill_set),
            bond_details: non_empty(raw.bond_details),
            medical_requirements: None,
            compensation: Compensation {
                ctc_inr: non_empty(raw.ctc_inr),
                cost_to_company: non_empty(raw.cost_to_company),
                package_details: non_empty(raw.package_details),
                gross: non_empty(raw.gross),
                take_home: non_empty(raw.take_home),
                base: non_empty(raw.base),
                joining_bonus: non_empty(raw.joining_bonus),
                relocation_bonus: non_empty(raw.relocation_bonus),
                retention_bonus: non_empty(raw.retention_bonus),
                first_year_ctc: non_empty(raw.first_ctc),
                deductions: non_empty(raw.deductions),
                perks: non_empty(raw.perks),
                ..Compensation::default()
            },
            eligibility: raw.eligibility,
            timeline_events: raw.timeline_events,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Proforma2025 {
    #[serde(rename = "Company Name", default, deserialize_with = "lenient_string")]
    company_name: String,
    #[serde(rename = "Nature of Business", default, deserialize_with = "opt_lenient_string")]
    nature_of_business: Option<String>,
    #[serde(rename = "Profile", default, deserialize_with = "lenient_string")]
    profile: String,
    #[serde(rename = "Job Location", default, deserialize_with = "opt_lenient_string")]
    job_location: Option<String>,
    #[serde(rename = "Required Skill Set", default, deserialize_with = "opt_lenient_string")]
    skill_set: Option<String>,
    #[serde(rename = "Job Description", default, deserialize_with = "opt_lenient_string")]
    job_description: Option<String>,
    #[serde(rename = "CTC (in INR)", default, deserialize_with = "opt_lenient_string")]
    ctc_inr: Option<String>,
    #[serde(rename = "CTC (in foreign currency)", default, deserialize_with = "opt_lenient_string")]
    ctc_foreign: Option<String>,
    #[serde(rename = "Cost To Company", default, deserialize_with = "opt_lenient_string")]
    cost_to_company: Option<String>,
    #[serde(rename = "Gross (per annum)", default, deserialize_with = "opt_lenient_string")]
    gross: Option<String>,
    #[serde(
        rename = "Fixed take home salary (per annum)",
        default,
        deserialize_with = "opt_lenient_string"
    )]
    take_home: Option<String>,
    #[serde(rename = "Base Salary", default, deserialize_with = "opt_lenient_string")]
    base: Option<String>,
    #[serde(rename = "Joining Bonus", default, deserialize_with = "opt_lenient_string")]
    joining_bonus: Option<String>,
    #[serde(rename = "Relocation Bonus", default, deserialize_with = "opt_lenient_string")]
    relocation_bonus: Option<String>,
    #[serde(rename = "Retention Bonus", default, deserialize_with = "opt_lenient_string")]
    retention_bonus: Option<String>,
    #[serde(rename = "Deductions", default, deserialize_with = "opt_lenient_string")]
    deductions: Option<String>,
    #[serde(rename = "1st Year CTC", default, deserialize_with = "opt_lenient_string")]
    first_year_ctc: Option<String>,
    #[serde(rename = "Total CTC", default, deserialize_with = "opt_lenient_string")]
    total_ctc: Option<String>,
    #[serde(rename = "Perks", default, deserialize_with = "opt_lenient_string")]
    perks: Option<String>,
    #[serde(rename = "Bond Details", default, deserialize_with = "opt_lenient_string")]
    bond_details: Option<String>,
    #[serde(rename = "Medical Requirements", default, deserialize_with = "opt_lenient_string")]
    medical_requirements: Option<String>,
    #[serde(rename = "Eligibility", default, deserialize_with = "lenient_string")]
    eligibility: String,
}

impl Proforma2025 {
    fn into_proforma(self, position: usize) -> CompanyProforma {
        CompanyProforma {
            key: CompanyKey::Position(position),
            edition: Edition::Y2025,
            company_name: self.company_name,
            // 2025 exports carry no separate role column
            role: String::new(),
            profile: self.profile,
            location: non_empty(self.job_location),
            nature_of_business: non_empty(self.nature_of_business),
            job_description: non_empty(self.job_description),
            skill_set: non_empty(self.skill_set),
            bond_details: non_empty(self.bond_details),
            medical_requirements: non_empty(self.medical_requirements),
            compensation: Compensation {
                ctc_inr: non_empty(self.ctc_inr),
                ctc_foreign: non_empty(self.ctc_foreign),
                cost_to_company: non_empty(self.cost_to_company),
                package_details: None,
                gross: non_empty(self.gross),
                take_home: non_empty(self.take_home),
                base: non_empty(self.base),
                joining_bonus: non_empty(self.joining_bonus),
                relocation_bonus: non_empty(self.relocation_bonus),
                retention_bonus: non_empty(self.retention_bonus),
                first_year_ctc: non_empty(self.first_year_ctc),
                total_ctc: non_empty(self.total_ctc),
                deductions: non_empty(self.deductions),
                perks: non_empty(self.perks),
            },
            eligibility: self.eligibility,
            timeline_events: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_legacy_proforma() {
        let json = br#"[{
            "ID": 1042, "company_name": "Acme Robotics", "eligibility": "1101",
            "role": "Engineer", "profile": "Core", "tentative_job_location": "",
            "ctc_inr": "24 LPA", "gross": "<p><br></p>",
            "timeline_events": [{"id": 9, "title": "Acme test", "description": "",
                                 "created_at": "2025-01-09T10:00:00Z"}]
        }]"#;
        let companies = CompanyProforma::decode_all(Edition::Legacy, json).unwrap();
        assert_eq!(companies.len(), 1);

        let acme = &companies[0];
        assert_eq!(acme.key, CompanyKey::Id(1042));
        assert_eq!(acme.location, None);
        assert_eq!(acme.compensation.ctc_inr.as_deref(), Some("24 LPA"));
        assert_eq!(acme.timeline_events.len(), 1);
    }

    #[test]
    fn test_decode_2025_assigns_positions() {
        let json = br#"[
            {"Company Name": " Globex ", "Profile": "Analyst", "Eligibility": "YN-"},
            {"Company Name": "", "Profile": "SDE", "Gross (per annum)": 1800000}
        ]"#;
        let companies = CompanyProforma::decode_all(Edition::Y2025, json).unwrap();
        assert_eq!(companies[0].key, CompanyKey::Position(0));
        assert_eq!(companies[1].key, CompanyKey::Position(1));
        assert_eq!(companies[0].display_name(), "Globex");
        assert_eq!(companies[1].display_name(), "Unknown Company");
        assert_eq!(companies[1].compensation.gross.as_deref(), Some("1800000"));
    }

    #[test]
    fn test_compensation_rows_skip_blank() {
        let comp = Compensation {
            ctc_inr: Some("30 LPA".into()),
            base: Some("  ".into()),
            perks: Some("Meals".into()),
            ..Compensation::default()
        };
        assert_eq!(comp.rows(), vec![("CTC (INR)", "30 LPA"), ("Perks", "Meals")]);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(CompanyKey::Id(17).to_string(), "17");
        assert_eq!(CompanyKey::Position(3).to_string(), "3");
    }
}
