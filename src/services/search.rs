//! Free-text filtering for listings.
//!
//! A record matches when the lowercased query is a substring of any of its
//! searchable fields, compared in lowercase. An empty query keeps
//! everything.

use std::borrow::Cow;

use crate::models::{CompanyKey, CompanyProforma, DepartmentCatalog, DepartmentRef, StudentPlacement};

/// Records that expose fields for free-text search.
pub trait Searchable {
    /// Field values a query is matched against. The catalog resolves numeric
    /// department ids to names.
    fn search_fields<'a>(&'a self, catalog: &'a DepartmentCatalog) -> Vec<Cow<'a, str>>;
}

impl Searchable for StudentPlacement {
    fn search_fields<'a>(&'a self, catalog: &'a DepartmentCatalog) -> Vec<Cow<'a, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.roll_no.as_str()),
            Cow::Borrowed(self.company_name.as_str()),
            Cow::Borrowed(self.profile.as_str()),
            Cow::Borrowed(self.department.display_name(catalog)),
        ]
    }
}

impl Searchable for CompanyProforma {
    fn search_fields<'a>(&'a self, _catalog: &'a DepartmentCatalog) -> Vec<Cow<'a, str>> {
        match self.key {
            CompanyKey::Id(id) => vec![
                Cow::Owned(id.to_string()),
                Cow::Borrowed(self.company_name.as_str()),
                Cow::Borrowed(self.role.as_str()),
                Cow::Borrowed(self.profile.as_str()),
            ],
            CompanyKey::Position(_) => vec![
                Cow::Borrowed(self.company_name.as_str()),
                Cow::Borrowed(self.profile.as_str()),
                Cow::Borrowed(self.location.as_deref().unwrap_or_default()),
                Cow::Borrowed(self.nature_of_business.as_deref().unwrap_or_default()),
            ],
        }
    }
}

/// Normalized query; `None` means "match everything".
fn normalize(query: &str) -> Option<String> {
    if query.is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// Whether `record` matches an already-lowercased needle.
fn matches<T: Searchable>(record: &T, needle: &str, catalog: &DepartmentCatalog) -> bool {
    record
        .search_fields(catalog)
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Records matching `query`, in input order.
pub fn filter<'a, T: Searchable>(
    records: &'a [T],
    query: &str,
    catalog: &DepartmentCatalog,
) -> Vec<&'a T> {
    match normalize(query) {
        None => records.iter().collect(),
        Some(needle) => records
            .iter()
            .filter(|record| matches(*record, &needle, catalog))
            .collect(),
    }
}

/// Whether a single record matches `query`.
pub fn is_match<T: Searchable>(record: &T, query: &str, catalog: &DepartmentCatalog) -> bool {
    normalize(query).is_none_or(|needle| matches(record, &needle, catalog))
}

/// Students whose department is the given catalog id.
pub fn students_in_department(students: &[StudentPlacement], id: u32) -> Vec<&StudentPlacement> {
    students
        .iter()
        .filter(|s| s.department == DepartmentRef::Id(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Compensation, Edition};

    fn student(name: &str, roll: &str, company: &str, department: DepartmentRef) -> StudentPlacement {
        StudentPlacement {
            roll_no: roll.to_string(),
            name: name.to_string(),
            company_name: company.to_string(),
            profile: "SDE".to_string(),
            department,
            email: None,
            placement_type: None,
            secondary_department_id: None,
            gross: None,
            proforma_index: None,
        }
    }

    fn company(key: CompanyKey, name: &str, location: Option<&str>) -> CompanyProforma {
        CompanyProforma {
            key,
            edition: match key {
                CompanyKey::Id(_) => Edition::Legacy,
                CompanyKey::Position(_) => Edition::Y2025,
            },
            company_name: name.to_string(),
            role: "Engineer".to_string(),
            profile: "Core".to_string(),
            location: location.map(str::to_string),
            nature_of_business: None,
            job_description: None,
            skill_set: None,
            bond_details: None,
            medical_requirements: None,
            compensation: Compensation::default(),
            eligibility: String::new(),
            timeline_events: Vec::new(),
        }
    }

    fn roster() -> Vec<StudentPlacement> {
        vec![
            student("Asha Rao", "210001", "Acme", DepartmentRef::Id(5)),
            student("Ravi Kumar", "210002", "Globex", DepartmentRef::Id(6)),
            student("Meera Iyer", "220045", "Initech", DepartmentRef::Label("MT-EE".into())),
        ]
    }

    #[test]
    fn test_empty_query_is_identity() {
        let catalog = DepartmentCatalog::default();
        let students = roster();
        let result = filter(&students, "", &catalog);
        assert_eq!(result.len(), students.len());
        assert!(result.iter().zip(&students).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_whitespace_query_is_a_substring_match() {
        let catalog = DepartmentCatalog::default();
        let single = [student("Asha", "210001", "Acme", DepartmentRef::Id(5))];
        assert!(filter(&single, " ", &catalog).is_empty());
        assert!(!is_match(&single[0], "\t", &catalog));

        let students = roster();
        let spaced = filter(&students, " ", &catalog);
        assert_eq!(spaced.len(), students.len());
        assert_eq!(filter(&students, "asha ", &catalog).len(), 1);
        assert!(filter(&students, " asha", &catalog).is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let catalog = DepartmentCatalog::default();
        let students = roster();
        let upper: Vec<_> = filter(&students, "ACME", &catalog);
        let lower: Vec<_> = filter(&students, "acme", &catalog);
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].name, "Asha Rao");
    }

    #[test]
    fn test_matches_resolved_department_name() {
        let catalog = DepartmentCatalog::default();
        let students = roster();
        let result = filter(&students, "bt-cse", &catalog);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].roll_no, "210001");

        let labelled = filter(&students, "mt-ee", &catalog);
        assert_eq!(labelled.len(), 1);
        assert_eq!(labelled[0].roll_no, "220045");
    }

    #[test]
    fn test_roll_number_substring() {
        let catalog = DepartmentCatalog::default();
        let students = roster();
        let result = filter(&students, "2100", &catalog);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].roll_no, "210001");
        assert_eq!(result[1].roll_no, "210002");
    }

    #[test]
    fn test_company_fields_per_edition() {
        let catalog = DepartmentCatalog::default();
        let legacy = vec![company(CompanyKey::Id(1042), "Acme", Some("Pune"))];
        assert_eq!(filter(&legacy, "1042", &catalog).len(), 1);
        assert_eq!(filter(&legacy, "engineer", &catalog).len(), 1);
        // Legacy records are not searchable by location
        assert!(filter(&legacy, "pune", &catalog).is_empty());

        let current = vec![company(CompanyKey::Position(0), "Globex", Some("Bengaluru"))];
        assert_eq!(filter(&current, "bengaluru", &catalog).len(), 1);
        assert!(filter(&current, "engineer", &catalog).is_empty());
        assert!(filter(&current, "0", &catalog).is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = DepartmentCatalog::default();
        assert!(filter(&roster(), "zzz", &catalog).is_empty());
        assert!(is_match(&roster()[0], "", &catalog));
        assert!(!is_match(&roster()[0], "zzz", &catalog));
    }

    #[test]
    fn test_students_in_department() {
        let students = roster();
        let cse = students_in_department(&students, 5);
        assert_eq!(cse.len(), 1);
        assert_eq!(cse[0].name, "Asha Rao");
    }
}
