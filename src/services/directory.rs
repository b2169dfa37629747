//! Student directory: contact details and resumes by roll number.

use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

use crate::models::{DirectoryConfig, Resume};

/// Accepted resumes indexed by roll number.
#[derive(Debug, Clone)]
pub struct StudentDirectory {
    resumes: HashMap<String, Vec<Resume>>,
    config: DirectoryConfig,
}

impl StudentDirectory {
    /// Index the accepted resumes; anything else is left out.
    pub fn new(resumes: &[Resume], config: &DirectoryConfig) -> Self {
        let mut by_roll: HashMap<String, Vec<Resume>> = HashMap::new();
        for resume in resumes.iter().filter(|r| r.is_accepted()) {
            by_roll
                .entry(resume.student_roll_no.trim().to_string())
                .or_default()
                .push(resume.clone());
        }
        Self {
            resumes: by_roll,
            config: config.clone(),
        }
    }

    /// Accepted resumes for a roll number, in published order.
    pub fn resumes_for(&self, roll_no: &str) -> &[Resume] {
        self.resumes
            .get(roll_no.trim())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resume links to show for a student; empty when links are hidden.
    pub fn resume_links(&self, roll_no: &str) -> Vec<&str> {
        if !self.config.show_resume_links {
            return Vec::new();
        }
        self.resumes_for(roll_no)
            .iter()
            .filter_map(|r| r.resume_link.as_deref())
            .filter(|link| !link.trim().is_empty())
            .collect()
    }

    /// Email from the first accepted resume, else derived from the roll
    /// number and the configured domain.
    pub fn email_for(&self, roll_no: &str) -> String {
        self.resumes_for(roll_no)
            .first()
            .and_then(|r| r.student_email.as_deref())
            .filter(|email| !email.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!(
                    "{}@{}",
                    roll_no.trim().to_lowercase(),
                    self.config.email_domain
                )
            })
    }

    pub fn photo_url(&self, roll_no: &str) -> String {
        photo_url(&self.config.photo_url_template, roll_no)
    }

    /// Number of students with at least one accepted resume.
    pub fn len(&self) -> usize {
        self.resumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resumes.is_empty()
    }
}

/// Fill the `{roll}` placeholder of a photo URL template.
pub fn photo_url(template: &str, roll_no: &str) -> String {
    template.replace("{roll}", roll_no.trim())
}

/// Up to two initials from the first letters of the name's words.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.graphemes(true).next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(roll: &str, email: Option<&str>, status: &str, link: &str) -> Resume {
        Resume {
            resume_id: None,
            student_name: "Asha Rao".into(),
            student_email: email.map(str::to_string),
            student_roll_no: roll.into(),
            resume_type: None,
            resume_link: Some(link.into()),
            verification_status: status.into(),
        }
    }

    #[test]
    fn test_only_accepted_resumes_indexed() {
        let resumes = vec![
            resume("210001", Some("asha@example.edu"), "Accepted", "https://r/1"),
            resume("210001", None, "Accepted", "https://r/2"),
            resume("210002", None, "Rejected", "https://r/3"),
        ];
        let directory = StudentDirectory::new(&resumes, &DirectoryConfig::default());
        assert_eq!(directory.resumes_for("210001").len(), 2);
        assert!(directory.resumes_for("210002").is_empty());
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_email_fallback() {
        let resumes = vec![resume("210001", Some("asha@example.edu"), "Accepted", "x")];
        let directory = StudentDirectory::new(&resumes, &DirectoryConfig::default());
        assert_eq!(directory.email_for("210001"), "asha@example.edu");
        assert_eq!(directory.email_for("22MT0045"), "22mt0045@iitk.ac.in");
    }

    #[test]
    fn test_resume_links_respect_toggle() {
        let resumes = vec![resume("210001", None, "Accepted", "https://r/1")];
        let hidden = StudentDirectory::new(&resumes, &DirectoryConfig::default());
        assert!(hidden.resume_links("210001").is_empty());

        let config = DirectoryConfig {
            show_resume_links: true,
            ..DirectoryConfig::default()
        };
        let shown = StudentDirectory::new(&resumes, &config);
        assert_eq!(shown.resume_links("210001"), vec!["https://r/1"]);
    }

    #[test]
    fn test_photo_url() {
        let directory = StudentDirectory::new(&[], &DirectoryConfig::default());
        assert_eq!(
            directory.photo_url("210001"),
            "https://oa.cc.iitk.ac.in/Oa/Jsp/Photo/210001_0.jpg"
        );
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("asha rao"), "AR");
        assert_eq!(initials("Ravi  Kumar Sharma"), "RK");
        assert_eq!(initials("Meera"), "M");
        assert_eq!(initials("  "), "");
        assert_eq!(initials("élodie ñuñez"), "ÉÑ");
    }
}
