//! Slot timeline records (2025 `timeline.json`).

use serde::{Deserialize, Serialize};

use crate::utils::de::{lenient_string, opt_lenient_string};

/// One placement a student received in a recruitment slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotPlacement {
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: String,

    /// Slot label, e.g. `"1.1"` or `"Pre-placement"`
    #[serde(default, deserialize_with = "lenient_string")]
    pub slot: String,

    /// Display colour assigned by the export
    #[serde(default, deserialize_with = "lenient_string")]
    pub color: String,
}

/// A student and the slots they were placed in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotStudent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub roll_number: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "opt_lenient_string")]
    pub department: Option<String>,

    #[serde(default)]
    pub cpi: Option<f64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,

    #[serde(default)]
    pub placements: Vec<SlotPlacement>,
}
