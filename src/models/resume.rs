//! Student resume records (2025 `resumes.json`).

use serde::{Deserialize, Serialize};

use crate::utils::de::{lenient_string, opt_lenient_string};

/// Verification status marking a resume as visible.
pub const ACCEPTED_STATUS: &str = "Accepted";

/// A resume submitted by a student.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resume {
    #[serde(rename = "Resume ID", default)]
    pub resume_id: Option<u64>,

    #[serde(rename = "Student Name", default, deserialize_with = "lenient_string")]
    pub student_name: String,

    #[serde(rename = "Student Email", default, deserialize_with = "opt_lenient_string")]
    pub student_email: Option<String>,

    /// Published as a number; kept as text to match roll numbers elsewhere
    #[serde(rename = "Student Roll No", default, deserialize_with = "lenient_string")]
    pub student_roll_no: String,

    #[serde(rename = "Resume Type", default, deserialize_with = "opt_lenient_string")]
    pub resume_type: Option<String>,

    #[serde(rename = "Resume Link", default, deserialize_with = "opt_lenient_string")]
    pub resume_link: Option<String>,

    #[serde(rename = "Verification Status", default, deserialize_with = "lenient_string")]
    pub verification_status: String,
}

impl Resume {
    pub fn is_accepted(&self) -> bool {
        self.verification_status == ACCEPTED_STATUS
    }
}
