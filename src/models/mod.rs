// src/models/mod.rs

//! Domain models for the placement archive.
//!
//! Raw record shapes differ per edition; everything re-exported here is the
//! normalized form the services work with.

mod catalog;
mod company;
mod config;
mod edition;
mod resume;
mod slot;
mod stats;
mod student;
mod timeline;

// Re-export all public types
pub use catalog::{DepartmentCatalog, DepartmentEntry};
pub use company::{CompanyKey, CompanyProforma, Compensation};
pub use config::{
    Config, DatasetSpec, DirectoryConfig, HttpConfig, LoggingConfig, PaginationConfig,
    SourceConfig,
};
pub use edition::{DatasetKind, Edition, EligibilityAlphabet, IdScheme};
pub use resume::{ACCEPTED_STATUS, Resume};
pub use slot::{SlotPlacement, SlotStudent};
pub use stats::{
    AnalyticsData, BranchStats, DepartmentPerformance, PlacementOverview, SalaryInsights,
};
pub use student::{DepartmentRef, StudentPlacement, StudentRoster};
pub use timeline::{TimelineNotice, sort_newest_first};
