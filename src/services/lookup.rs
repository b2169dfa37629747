//! Detail-view record lookup.

use crate::error::{AppError, Result};
use crate::models::{CompanyKey, CompanyProforma, IdScheme};

/// Find the company a detail route points at.
///
/// `ById` compares against the record's numeric primary key; `ByPosition`
/// indexes into the collection. A non-numeric id or a miss is
/// [`AppError::NotFound`].
pub fn find_company<'a>(
    records: &'a [CompanyProforma],
    scheme: IdScheme,
    raw_id: &str,
) -> Result<&'a CompanyProforma> {
    let not_found = || AppError::not_found("company", raw_id.trim());
    let raw = raw_id.trim();

    match scheme {
        IdScheme::ById => {
            let id: u64 = raw.parse().map_err(|_| not_found())?;
            records
                .iter()
                .find(|c| c.key == CompanyKey::Id(id))
                .ok_or_else(not_found)
        }
        IdScheme::ByPosition => {
            let idx: usize = raw.parse().map_err(|_| not_found())?;
            records.get(idx).ok_or_else(not_found)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Edition;

    fn companies(edition: Edition, json: &str) -> Vec<CompanyProforma> {
        CompanyProforma::decode_all(edition, json.as_bytes()).unwrap()
    }

    #[test]
    fn test_by_id_matches_primary_key() {
        let records = companies(
            Edition::Legacy,
            r#"[{"ID": 17, "company_name": "Acme"}, {"ID": 42, "company_name": "Globex"}]"#,
        );
        let found = find_company(&records, IdScheme::ById, "42").unwrap();
        assert_eq!(found.company_name, "Globex");

        // Position 1 is not id 1
        let err = find_company(&records, IdScheme::ById, "1").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_by_position_indexes() {
        let records = companies(
            Edition::Y2025,
            r#"[{"Company Name": "Acme"}, {"Company Name": "Globex"}]"#,
        );
        assert_eq!(
            find_company(&records, IdScheme::ByPosition, "1").unwrap().company_name,
            "Globex"
        );
        assert!(find_company(&records, IdScheme::ByPosition, "2").unwrap_err().is_not_found());
        assert!(find_company(&records, IdScheme::ByPosition, "-1").unwrap_err().is_not_found());
    }

    #[test]
    fn test_garbage_id_is_not_found() {
        let records = Vec::new();
        let err = find_company(&records, IdScheme::ById, "abc").unwrap_err();
        assert_eq!(err.to_string(), "company not found: abc");
    }
}
