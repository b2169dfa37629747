//! Page bounds and the compressed page-button sequence.
//!
//! Everything here is pure; listings recompute it on every search, page or
//! page-size change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::PaginationConfig;

/// Default number of page buttons shown around the current page.
pub const DEFAULT_MAX_BUTTONS: usize = 5;

/// Requested page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PageSize {
    Count(usize),
    All,
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Count(n) => write!(f, "{n}"),
            PageSize::All => f.write_str("all"),
        }
    }
}

impl FromStr for PageSize {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(PageSize::All);
        }
        match s.parse::<usize>() {
            Ok(0) | Err(_) => Err(AppError::validation(format!("invalid page size '{s}'"))),
            Ok(n) => Ok(PageSize::Count(n)),
        }
    }
}

impl PageSize {
    /// Whether this size is one of the selectable `sizes`. "all" always is.
    pub fn is_offered(&self, sizes: &[usize]) -> bool {
        match self {
            PageSize::All => true,
            PageSize::Count(n) => sizes.contains(n),
        }
    }
}

/// Page size for a listing: the requested one, or the configured default.
///
/// Counts outside `page_sizes` are rejected.
pub fn resolve_page_size(
    config: &PaginationConfig,
    requested: Option<PageSize>,
) -> Result<PageSize, AppError> {
    let size = match requested {
        Some(size) => size,
        None => config.default_page_size.parse()?,
    };
    if !size.is_offered(&config.page_sizes) {
        let offered: Vec<String> = config.page_sizes.iter().map(usize::to_string).collect();
        return Err(AppError::validation(format!(
            "page size {size} is not one of {}, all",
            offered.join(", ")
        )));
    }
    Ok(size)
}

impl TryFrom<String> for PageSize {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PageSize> for String {
    fn from(size: PageSize) -> Self {
        size.to_string()
    }
}

/// Derived page boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub total_pages: usize,
    pub valid_page: usize,
    pub start_index: usize,
    /// Exclusive; may exceed the item count on the last page
    pub end_index: usize,
    pub page_size: usize,
}

impl PaginationMeta {
    /// Compute bounds for `requested_page` (1-based). Out-of-range pages are
    /// clamped, never rejected.
    pub fn new(requested_page: usize, page_size: PageSize, total_items: usize) -> Self {
        let size = match page_size {
            PageSize::All => total_items.max(1),
            PageSize::Count(n) => n.max(1),
        };
        let total_pages = total_items.div_ceil(size).max(1);
        let valid_page = requested_page.clamp(1, total_pages);
        let start_index = (valid_page - 1) * size;
        let end_index = match page_size {
            PageSize::All => total_items,
            PageSize::Count(_) => start_index + size,
        };

        Self {
            total_pages,
            valid_page,
            start_index,
            end_index,
            page_size: size,
        }
    }

    /// The current page's items, bounds clamped to the slice.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end_index.min(items.len());
        let start = self.start_index.min(end);
        &items[start..end]
    }

    pub fn has_previous(&self) -> bool {
        self.valid_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.valid_page < self.total_pages
    }
}

/// One entry of the page-button sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{n}"),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

/// Page buttons for `valid_page` of `total_pages`, using the default width.
pub fn page_window(valid_page: usize, total_pages: usize) -> Vec<PageItem> {
    page_window_with(valid_page, total_pages, DEFAULT_MAX_BUTTONS)
}

/// Page buttons for `valid_page` of `total_pages`.
///
/// Up to `max_buttons + 2` pages are listed in full. Beyond that: the first
/// page, the current page with its neighbours, the last page, and a gap
/// marker wherever pages are hidden. A gap of a single page shows that page
/// instead of a marker.
pub fn page_window_with(valid_page: usize, total_pages: usize, max_buttons: usize) -> Vec<PageItem> {
    let total_pages = total_pages.max(1);
    if total_pages <= max_buttons + 2 {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let current = valid_page.clamp(1, total_pages);
    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total_pages - 1);

    let mut items = vec![PageItem::Page(1)];
    match start - 2 {
        0 => {}
        1 => items.push(PageItem::Page(2)),
        _ => items.push(PageItem::Ellipsis),
    }
    items.extend((start..=end).map(PageItem::Page));
    match (total_pages - 1).saturating_sub(end) {
        0 => {}
        1 => items.push(PageItem::Page(total_pages - 1)),
        _ => items.push(PageItem::Ellipsis),
    }
    items.push(PageItem::Page(total_pages));
    items
}
