//! Association of timeline notices with companies.
//!
//! Notices carry no company reference. A notice belongs to every company
//! whose lowercased name occurs somewhere in its title, description or
//! tags, so one notice can land under several companies.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::models::{CompanyProforma, TimelineNotice, sort_newest_first};

/// Notices grouped by company, newest first within each group.
#[derive(Debug, Clone, Default)]
pub struct TimelineIndex {
    by_company: HashMap<String, Vec<Arc<TimelineNotice>>>,
    notice_count: usize,
}

fn company_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl TimelineIndex {
    /// Build the index from notices and the companies to attribute them to.
    pub fn build(notices: &[TimelineNotice], companies: &[CompanyProforma]) -> Self {
        Self::build_for_names(notices, companies.iter().map(|c| c.company_name.as_str()))
    }

    /// Build the index against an arbitrary list of company names.
    ///
    /// Blank names are skipped; names equal after trimming and lowercasing
    /// share one entry.
    pub fn build_for_names<'a>(
        notices: &[TimelineNotice],
        names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut sorted = notices.to_vec();
        sort_newest_first(&mut sorted);
        let sorted: Vec<Arc<TimelineNotice>> = sorted.into_iter().map(Arc::new).collect();
        let blobs: Vec<String> = sorted.iter().map(|n| n.search_blob()).collect();

        let mut by_company: HashMap<String, Vec<Arc<TimelineNotice>>> = HashMap::new();
        for name in names {
            let key = company_key(name);
            if key.is_empty() || by_company.contains_key(&key) {
                continue;
            }
            let events: Vec<Arc<TimelineNotice>> = sorted
                .iter()
                .zip(&blobs)
                .filter(|(_, blob)| blob.contains(&key))
                .map(|(notice, _)| Arc::clone(notice))
                .collect();
            if !events.is_empty() {
                by_company.insert(key, events);
            }
        }

        log::debug!(
            "Indexed {} notices across {} companies",
            sorted.len(),
            by_company.len()
        );
        Self {
            by_company,
            notice_count: sorted.len(),
        }
    }

    /// Notices attributed to `company_name`; empty when none match.
    pub fn events_for(&self, company_name: &str) -> &[Arc<TimelineNotice>] {
        self.by_company
            .get(&company_key(company_name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of companies with at least one notice.
    pub fn company_count(&self) -> usize {
        self.by_company.len()
    }

    /// Number of notices the index was built from.
    pub fn notice_count(&self) -> usize {
        self.notice_count
    }
}

struct CachedIndex {
    notices: Arc<Vec<TimelineNotice>>,
    companies: Arc<Vec<CompanyProforma>>,
    index: Arc<TimelineIndex>,
}

/// Memoized [`TimelineIndex`] keyed by the identity of its inputs.
///
/// The index is rebuilt whenever either dataset is a different instance
/// from the one it was built from. Holding the inputs keeps their
/// addresses from being reused.
#[derive(Default)]
pub struct TimelineCache {
    slot: Mutex<Option<CachedIndex>>,
}

impl TimelineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached index for these dataset instances, building it on a miss.
    pub fn get_or_build(
        &self,
        notices: &Arc<Vec<TimelineNotice>>,
        companies: &Arc<Vec<CompanyProforma>>,
    ) -> Arc<TimelineIndex> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = slot.as_ref() {
            if Arc::ptr_eq(&cached.notices, notices) && Arc::ptr_eq(&cached.companies, companies) {
                return Arc::clone(&cached.index);
            }
        }

        let index = Arc::new(TimelineIndex::build(notices, companies));
        *slot = Some(CachedIndex {
            notices: Arc::clone(notices),
            companies: Arc::clone(companies),
            index: Arc::clone(&index),
        });
        index
    }

    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(id: u64, title: &str, created_at: &str) -> TimelineNotice {
        TimelineNotice {
            id: Some(id),
            title: title.to_string(),
            description: String::new(),
            created_at: created_at.to_string(),
            tags: None,
        }
    }

    fn titles(events: &[Arc<TimelineNotice>]) -> Vec<&str> {
        events.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn test_notice_attaches_to_every_matching_company() {
        let notices = vec![
            notice(1, "Acme Robotics shortlist", "2025-01-02T10:00:00Z"),
            notice(2, "Acme test venue", "2025-01-09T10:00:00Z"),
        ];
        let index = TimelineIndex::build_for_names(&notices, ["Acme", "Acme Robotics"]);

        assert_eq!(
            titles(index.events_for("Acme")),
            vec!["Acme test venue", "Acme Robotics shortlist"]
        );
        assert_eq!(
            titles(index.events_for("Acme Robotics")),
            vec!["Acme Robotics shortlist"]
        );
        assert_eq!(index.notice_count(), 2);
    }

    #[test]
    fn test_matches_description_and_tags() {
        let mut in_body = notice(1, "Interview schedule", "2025-01-03");
        in_body.description = "<p>GLOBEX candidates report at 9</p>".into();
        let mut in_tags = notice(2, "Results", "2025-01-04");
        in_tags.tags = Some("Initech,Final".into());

        let index = TimelineIndex::build_for_names(&[in_body, in_tags], ["Globex", " initech "]);
        assert_eq!(titles(index.events_for("globex")), vec!["Interview schedule"]);
        assert_eq!(titles(index.events_for("Initech")), vec!["Results"]);
    }

    #[test]
    fn test_unknown_company_and_blank_names() {
        let notices = vec![notice(1, "General notice", "2025-01-01")];
        let index = TimelineIndex::build_for_names(&notices, ["", "   ", "Umbrella"]);
        assert!(index.events_for("Umbrella").is_empty());
        assert!(index.events_for("").is_empty());
        assert_eq!(index.company_count(), 0);
    }

    #[test]
    fn test_cache_reuses_index_for_same_instances() {
        let notices = Arc::new(vec![notice(1, "Acme", "2025-01-01")]);
        let companies = Arc::new(Vec::new());
        let cache = TimelineCache::new();

        let first = cache.get_or_build(&notices, &companies);
        let second = cache.get_or_build(&notices, &companies);
        assert!(Arc::ptr_eq(&first, &second));

        let replaced = Arc::new(Vec::clone(&notices));
        let third = cache.get_or_build(&replaced, &companies);
        assert!(!Arc::ptr_eq(&first, &third));

        cache.clear();
        let fourth = cache.get_or_build(&replaced, &companies);
        assert!(!Arc::ptr_eq(&third, &fourth));
    }
}
