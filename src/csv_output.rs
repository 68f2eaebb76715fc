//! CSV output format for joins-test results

use crate::joins::JoinStatistics;
use crate::significance::round_dp;

/// CSV formatter for joins-test records
#[derive(Debug)]
pub struct CsvJoins {
    precision: u32,
}

impl CsvJoins {
    /// Create a formatter rounding reals to `precision` decimals
    pub fn new(precision: u32) -> Self {
        Self { precision }
    }

    /// Header row matching the column order of [`CsvJoins::record`]
    pub fn header(&self) -> String {
        "observed,trials,probability,expected,variance,z_score,p_value".to_string()
    }

    /// One record row; the degenerate z-score renders as an empty field
    pub fn record(&self, stats: &JoinStatistics) -> String {
        let z = stats
            .z_score
            .map(|z| round_dp(z, self.precision).to_string())
            .unwrap_or_default();
        format!(
            "{},{},{},{},{},{},{}",
            stats.observed,
            stats.trials,
            round_dp(stats.probability, self.precision),
            round_dp(stats.expected, self.precision),
            round_dp(stats.variance, self.precision),
            z,
            round_dp(stats.p_value, self.precision)
        )
    }

    /// Full dump: header plus one record row
    pub fn render(&self, stats: &JoinStatistics) -> String {
        format!("{}\n{}\n", self.header(), self.record(stats))
    }
}
