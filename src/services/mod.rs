//! Services over the loaded datasets.

pub mod cache;
pub mod directory;
pub mod eligibility;
pub mod listing;
pub mod lookup;
pub mod pagination;
pub mod search;
pub mod slots;
pub mod store;
pub mod timeline;

// Re-export for convenience
pub use cache::SingleFlight;
pub use directory::StudentDirectory;
pub use eligibility::{Eligibility, EligibilityMap};
pub use listing::{NavigationState, PageView, Tab, restore_navigation, save_navigation};
pub use lookup::find_company;
pub use pagination::{
    PageItem, PageSize, PaginationMeta, page_window, page_window_with, resolve_page_size,
};
pub use search::{Searchable, filter};
pub use slots::{SlotGroup, group_by_slot};
pub use store::{CompanyDetail, PlacementStore};
pub use timeline::{TimelineCache, TimelineIndex};
