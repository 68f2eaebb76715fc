//! JSON output format for joins-test results

use serde::{Deserialize, Serialize};

use crate::joins::JoinStatistics;
use crate::significance::round_dp;

/// JSON record for a single joins-test run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonJoins {
    /// Observed join count
    pub observed: u64,
    /// Trial count the moments were computed from
    pub trials: u64,
    /// Event probability used for the moments
    pub probability: f64,
    /// Expected join count under the null model
    pub expected: f64,
    /// Variance of the join count under the null model
    pub variance: f64,
    /// Standardized deviation (absent for the degenerate zero-variance case)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
    /// Tail probability
    pub p_value: f64,
}

impl JsonJoins {
    /// Build a JSON record, rounding reported reals to `precision` decimals.
    pub fn from_stats(stats: &JoinStatistics, precision: u32) -> Self {
        Self {
            observed: stats.observed,
            trials: stats.trials,
            probability: round_dp(stats.probability, precision),
            expected: round_dp(stats.expected, precision),
            variance: round_dp(stats.variance, precision),
            z_score: stats.z_score.map(|z| round_dp(z, precision)),
            p_value: round_dp(stats.p_value, precision),
        }
    }

    /// Serialize to a compact JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
