//! Branch statistics and the aggregated analytics snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-branch placement totals (legacy `stats.json`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BranchStats {
    pub program_department_id: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub pre_offer: u32,
    #[serde(default)]
    pub recruited: u32,
}

impl BranchStats {
    /// Share of registered students placed, in percent.
    pub fn placement_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.recruited) / f64::from(self.total) * 100.0
    }
}

/// Aggregated analytics snapshot (`analytics.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsData {
    #[serde(default)]
    pub placement_overview: PlacementOverview,
    #[serde(default)]
    pub salary_insights_lpa: SalaryInsights,
    #[serde(default)]
    pub top_recruiters: BTreeMap<String, u32>,
    #[serde(default)]
    pub top_roles: BTreeMap<String, u32>,
    #[serde(default)]
    pub department_performance: Vec<DepartmentPerformance>,
}

impl AnalyticsData {
    /// Recruiters ordered by offer count, highest first.
    pub fn ranked_recruiters(&self) -> Vec<(&str, u32)> {
        rank(&self.top_recruiters)
    }

    /// Roles ordered by offer count, highest first.
    pub fn ranked_roles(&self) -> Vec<(&str, u32)> {
        rank(&self.top_roles)
    }
}

fn rank(counts: &BTreeMap<String, u32>) -> Vec<(&str, u32)> {
    let mut ranked: Vec<(&str, u32)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlacementOverview {
    #[serde(default)]
    pub registered_students: u32,
    #[serde(default)]
    pub students_placed: u32,
    #[serde(default)]
    pub ppo_received: u32,
    #[serde(default)]
    pub placement_percentage: f64,
    #[serde(default)]
    pub total_offers_generated: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SalaryInsights {
    #[serde(default)]
    pub average_ctc: f64,
    #[serde(default)]
    pub median_ctc: f64,
    #[serde(default)]
    pub highest_ctc: f64,
    #[serde(default)]
    pub ctc_distribution: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentPerformance {
    pub program_department_id: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub recruited: u32,
    #[serde(default)]
    pub pre_offer: u32,
    #[serde(default)]
    pub placement_rate: f64,
}
