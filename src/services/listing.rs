//! Listing view state.
//!
//! A listing is a tab, a search query and a page position. The state is
//! parked in the session store when a detail view opens and restored once
//! on return.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::PaginationConfig;
use crate::services::pagination::{PageItem, PageSize, PaginationMeta, page_window_with};
use crate::storage::SessionStore;

/// Listing tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Placed students
    #[default]
    Stats,
    /// Company proformas
    Proforma,
    /// Slot timeline (2025)
    Timeline,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Stats => "stats",
            Tab::Proforma => "proforma",
            Tab::Timeline => "timeline",
        }
    }

    /// Whether the tab shows a paginated table.
    pub fn is_paginated(&self) -> bool {
        !matches!(self, Tab::Timeline)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = AppError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stats" | "students" => Ok(Tab::Stats),
            "proforma" | "companies" => Ok(Tab::Proforma),
            "timeline" | "slots" => Ok(Tab::Timeline),
            other => Err(AppError::validation(format!("unknown tab '{other}'"))),
        }
    }
}

/// Position within a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    #[serde(default)]
    pub active_tab: Tab,

    #[serde(default)]
    pub search_query: String,

    #[serde(default = "first_page")]
    pub current_page: usize,

    #[serde(default = "default_page_size")]
    pub page_size: PageSize,

    #[serde(default)]
    pub scroll_y: f64,
}

fn first_page() -> usize {
    1
}

fn default_page_size() -> PageSize {
    PageSize::Count(15)
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            active_tab: Tab::default(),
            search_query: String::new(),
            current_page: first_page(),
            page_size: default_page_size(),
            scroll_y: 0.0,
        }
    }
}

impl NavigationState {
    /// Initial state for the configured default page size.
    pub fn initial(config: &PaginationConfig) -> Self {
        let page_size = config.default_page_size.parse().unwrap_or_else(|e| {
            log::warn!("Ignoring default page size: {e}");
            default_page_size()
        });
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Switch tabs; back to page 1.
    pub fn with_tab(self, tab: Tab) -> Self {
        Self {
            active_tab: tab,
            current_page: 1,
            ..self
        }
    }

    /// Change the query; back to page 1.
    pub fn with_search(self, query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            current_page: 1,
            ..self
        }
    }

    /// Change the page size; back to page 1.
    pub fn with_page_size(self, page_size: PageSize) -> Self {
        Self {
            page_size,
            current_page: 1,
            ..self
        }
    }

    /// Move to another page, keeping everything else.
    pub fn with_page(self, page: usize) -> Self {
        Self {
            current_page: page.max(1),
            ..self
        }
    }

    pub fn with_scroll(self, scroll_y: f64) -> Self {
        Self { scroll_y, ..self }
    }
}

/// Park `state` under `key`.
pub fn save_navigation(
    store: &dyn SessionStore,
    key: &str,
    state: &NavigationState,
) -> Result<()> {
    store.set(key, serde_json::to_string(state)?);
    Ok(())
}

/// Take the state parked under `key`, removing it.
///
/// A malformed entry is dropped and reads as nothing saved.
pub fn restore_navigation(store: &dyn SessionStore, key: &str) -> Option<NavigationState> {
    let raw = store.remove(key)?;
    match serde_json::from_str(&raw) {
        Ok(state) => Some(state),
        Err(e) => {
            log::debug!("Discarding saved navigation under {key}: {e}");
            None
        }
    }
}

/// One rendered page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a, T> {
    pub items: &'a [T],
    pub meta: PaginationMeta,
    pub window: Vec<PageItem>,
}

impl<'a, T> PageView<'a, T> {
    pub fn build(filtered: &'a [T], page: usize, page_size: PageSize, max_buttons: usize) -> Self {
        let meta = PaginationMeta::new(page, page_size, filtered.len());
        Self {
            items: meta.slice(filtered),
            window: page_window_with(meta.valid_page, meta.total_pages, max_buttons),
            meta,
        }
    }

    /// Page view for a navigation state.
    pub fn for_state(filtered: &'a [T], state: &NavigationState, config: &PaginationConfig) -> Self {
        Self::build(filtered, state.current_page, state.page_size, config.max_buttons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pagination::PageItem::{Ellipsis, Page};
    use crate::storage::MemorySessionStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transitions_reset_page() {
        let state = NavigationState::default().with_page(4);
        assert_eq!(state.current_page, 4);

        assert_eq!(state.clone().with_tab(Tab::Proforma).current_page, 1);
        assert_eq!(state.clone().with_search("acme").current_page, 1);
        assert_eq!(state.clone().with_page_size(PageSize::All).current_page, 1);

        let moved = state.with_search("acme").with_page(3);
        assert_eq!(moved.search_query, "acme");
        assert_eq!(moved.current_page, 3);
    }

    #[test]
    fn test_serialized_shape() {
        let state = NavigationState {
            active_tab: Tab::Proforma,
            search_query: "acme".into(),
            current_page: 2,
            page_size: PageSize::All,
            scroll_y: 120.5,
        };
        let json: serde_json::Value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "activeTab": "proforma",
                "searchQuery": "acme",
                "currentPage": 2,
                "pageSize": "all",
                "scrollY": 120.5
            })
        );
    }

    #[test]
    fn test_restore_consumes_entry() {
        let store = MemorySessionStore::new();
        let state = NavigationState::default().with_search("globex").with_page(2);
        save_navigation(&store, "listing:2025", &state).unwrap();

        assert_eq!(restore_navigation(&store, "listing:2025"), Some(state));
        assert_eq!(restore_navigation(&store, "listing:2025"), None);
    }

    #[test]
    fn test_restore_discards_garbage() {
        let store = MemorySessionStore::new();
        store.set("listing", "{not json".into());
        assert_eq!(restore_navigation(&store, "listing"), None);
        assert_eq!(store.get("listing"), None);
    }

    #[test]
    fn test_partial_state_uses_defaults() {
        let state: NavigationState = serde_json::from_str(r#"{"searchQuery": "sde"}"#).unwrap();
        assert_eq!(state.active_tab, Tab::Stats);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.page_size, PageSize::Count(15));
    }

    #[test]
    fn test_initial_uses_config() {
        let config = PaginationConfig {
            default_page_size: "all".into(),
            ..PaginationConfig::default()
        };
        assert_eq!(NavigationState::initial(&config).page_size, PageSize::All);

        let broken = PaginationConfig {
            default_page_size: "lots".into(),
            ..PaginationConfig::default()
        };
        assert_eq!(NavigationState::initial(&broken).page_size, PageSize::Count(15));
    }

    #[test]
    fn test_page_view_clamps_and_slices() {
        let rows: Vec<u32> = (1..=200).collect();
        let view = PageView::build(&rows, 50, PageSize::Count(10), 5);
        assert_eq!(view.meta.valid_page, 20);
        assert_eq!(view.items, &rows[190..200]);
        assert_eq!(view.window, vec![Page(1), Ellipsis, Page(19), Page(20)]);
    }

    #[test]
    fn test_page_view_for_state() {
        let items: Vec<u32> = (1..=100).collect();
        let config = PaginationConfig {
            max_buttons: 3,
            ..PaginationConfig::default()
        };
        let state = NavigationState::initial(&config)
            .with_page_size(PageSize::Count(10))
            .with_page(6);

        let view = PageView::for_state(&items, &state, &config);
        assert_eq!(view.items, &items[50..60]);
        assert_eq!(view.meta.valid_page, 6);
        assert_eq!(
            view.window,
            vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Ellipsis, Page(10)]
        );

        let all = PageView::for_state(&items, &state.with_page_size(PageSize::All), &config);
        assert_eq!(all.items.len(), 100);
        assert_eq!(all.window, vec![Page(1)]);
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!("companies".parse::<Tab>().unwrap(), Tab::Proforma);
        assert!(!Tab::Timeline.is_paginated());
        assert!("jobs".parse::<Tab>().is_err());
    }
}
