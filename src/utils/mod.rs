//! Utility functions and helpers.

pub mod de;
pub mod html;
pub mod http;
pub mod url;

pub use self::url::asset_path;
