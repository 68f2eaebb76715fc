//! Wishart-Hirshfeld joins statistic for dichotomous sequences
//!
//! A "join" is an adjacent pair of unequal symbols. Under a binomial null
//! model the join count of a random dichotomous sequence has closed-form
//! expectation and variance; standardizing the observed count gives a test
//! of sequential structure (too few joins: clustering, too many: zigzag).
//!
//! The pipeline is Counter -> Moments -> Z-transform -> Significance. Every
//! stage is a pure function; [`JoinsTest`] glues them together for one run
//! and never caches sequence data between calls.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::significance::{self, Tails};

/// Errors surfaced by the joins engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JoinsError {
    #[error("sequence is not dichotomous: third distinct symbol at index {index}")]
    MalformedSequence { index: usize },

    #[error("event probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("tails must be 1 or 2, got {0}")]
    InvalidTails(u8),

    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Result type for joins-engine operations
pub type Result<T> = std::result::Result<T, JoinsError>;

/// Immutable snapshot of one joins-test computation.
///
/// `z_score` is `None` for the degenerate zero-variance case (probability 0
/// or 1, or fewer than two trials); `p_value` is then 1.0 by convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinStatistics {
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
    /// Continuity-corrected standardized deviation, if computable
    pub z_score: Option<f64>,
    /// Tail probability of a deviation at least this large
    pub p_value: f64,
}

/// Count joins (adjacent unequal pairs) in a single O(N) scan.
///
/// Sequences shorter than two elements and constant sequences count zero
/// joins. A third distinct symbol aborts the scan with
/// [`JoinsError::MalformedSequence`]; no partial count is returned.
pub fn count_observed<T: PartialEq>(seq: &[T]) -> Result<u64> {
    let mut joins = 0u64;
    let mut first: Option<&T> = None;
    let mut second: Option<&T> = None;

    for (i, sym) in seq.iter().enumerate() {
        match (first, second) {
            (None, _) => first = Some(sym),
            (Some(a), None) => {
                if a != sym {
                    second = Some(sym);
                }
            }
            (Some(a), Some(b)) => {
                if a != sym && b != sym {
                    return Err(JoinsError::MalformedSequence { index: i });
                }
            }
        }
        if i > 0 && seq[i] != seq[i - 1] {
            joins += 1;
        }
    }

    Ok(joins)
}

/// Relative frequency of `state` within `seq`; 0.5 for an empty sequence.
pub fn state_frequency<T: PartialEq>(seq: &[T], state: &T) -> f64 {
    if seq.is_empty() {
        return 0.5;
    }
    let hits = seq.iter().filter(|sym| *sym == state).count();
    hits as f64 / seq.len() as f64
}

fn check_prob(prob: f64) -> Result<f64> {
    if !prob.is_finite() || !(0.0..=1.0).contains(&prob) {
        return Err(JoinsError::InvalidProbability(prob));
    }
    Ok(prob)
}

/// Expected join count under the null model: `2 * (N - 1) * p * q`.
///
/// Zero trials yield zero expected joins.
pub fn expected_joins(trials: u64, prob: f64) -> Result<f64> {
    let p = check_prob(prob)?;
    if trials == 0 {
        return Ok(0.0);
    }
    let q = 1.0 - p;
    Ok(2.0 * (trials - 1) as f64 * p * q)
}

/// Variance of the join count: `4*N*p*q*(1 - 3*p*q) - 2*p*q*(3 - 10*p*q)`.
///
/// The closed form dips below zero for a single trial, so the result is
/// clamped at zero; the z-transform treats zero variance as degenerate.
pub fn variance_joins(trials: u64, prob: f64) -> Result<f64> {
    let p = check_prob(prob)?;
    if trials <= 1 {
        return Ok(0.0);
    }
    let pq = p * (1.0 - p);
    let var = 4.0 * trials as f64 * pq * (1.0 - 3.0 * pq) - 2.0 * pq * (3.0 - 10.0 * pq);
    Ok(var.max(0.0))
}

/// Continuity-corrected standardized deviation of the observed join count.
///
/// With the correction enabled the raw deviation `O - E` is shifted 0.5
/// toward zero before dividing by the standard deviation; a deviation of
/// exactly zero receives no correction. Returns `None` when the variance is
/// zero rather than dividing by it.
pub fn z_score(observed: u64, expected: f64, variance: f64, continuity: bool) -> Option<f64> {
    if variance <= 0.0 {
        return None;
    }
    let dev = observed as f64 - expected;
    let correction = if continuity && dev != 0.0 {
        0.5 * dev.signum()
    } else {
        0.0
    };
    Some((dev - correction) / variance.sqrt())
}

/// Explicit per-run configuration for the joins test.
///
/// Explicit `observed`/`trials`/`prob` values always win; unset fields are
/// derived from the supplied sequence (trials from its length, probability
/// from the `state` frequency when given, 0.5 otherwise).
#[derive(Debug, Clone, PartialEq)]
pub struct JoinsTest {
    /// Precomputed observed join count; skips the counter when set
    pub observed: Option<u64>,
    /// Explicit trial count; overrides the sequence length
    pub trials: Option<u64>,
    /// Explicit event probability; overrides state-frequency estimation
    pub prob: Option<f64>,
    /// Apply the 0.5 continuity correction
    pub continuity: bool,
    /// One- or two-tailed significance
    pub tails: Tails,
}

impl Default for JoinsTest {
    fn default() -> Self {
        Self {
            observed: None,
            trials: None,
            prob: None,
            continuity: true,
            tails: Tails::Two,
        }
    }
}

impl JoinsTest {
    /// Default configuration: continuity correction on, two-tailed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the full pipeline over a sequence.
    pub fn run<T: PartialEq>(&self, seq: &[T]) -> Result<JoinStatistics> {
        self.run_inner(seq, None)
    }

    /// Run the full pipeline, estimating the event probability as the
    /// relative frequency of `state` unless an explicit probability is set.
    pub fn run_with_state<T: PartialEq>(&self, seq: &[T], state: &T) -> Result<JoinStatistics> {
        self.run_inner(seq, Some(state))
    }

    /// Parameter-only mode: explicit `observed` and `trials`, no sequence.
    ///
    /// Moments-only queries (no observed count at all) go through
    /// [`expected_joins`] and [`variance_joins`] directly.
    pub fn run_counts(&self) -> Result<JoinStatistics> {
        let observed = self
            .observed
            .ok_or(JoinsError::MissingParameter("observed"))?;
        let trials = self.trials.ok_or(JoinsError::MissingParameter("trials"))?;
        self.finish(observed, trials, self.prob.unwrap_or(0.5))
    }

    fn run_inner<T: PartialEq>(&self, seq: &[T], state: Option<&T>) -> Result<JoinStatistics> {
        let observed = match self.observed {
            Some(observed) => observed,
            None => count_observed(seq)?,
        };
        let trials = self.trials.unwrap_or(seq.len() as u64);
        let prob = match (self.prob, state) {
            (Some(prob), _) => prob,
            (None, Some(state)) => state_frequency(seq, state),
            (None, None) => 0.5,
        };
        self.finish(observed, trials, prob)
    }

    fn finish(&self, observed: u64, trials: u64, prob: f64) -> Result<JoinStatistics> {
        let prob = check_prob(prob)?;
        let expected = expected_joins(trials, prob)?;
        let variance = variance_joins(trials, prob)?;
        let z = z_score(observed, expected, variance, self.continuity);
        let p_value = significance::p_value_opt(z, self.tails);

        Ok(JoinStatistics {
            observed,
            trials,
            probability: prob,
            expected,
            variance,
            z_score: z,
            p_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_empty_and_single() {
        let empty: [u8; 0] = [];
        assert_eq!(count_observed(&empty).unwrap(), 0);
        assert_eq!(count_observed(&[7u8]).unwrap(), 0);
    }

    #[test]
    fn test_count_constant_sequence() {
        assert_eq!(count_observed(&[3u8, 3, 3, 3, 3]).unwrap(), 0);
    }

    #[test]
    fn test_count_alternating() {
        assert_eq!(count_observed(&[0u8, 1, 0, 1, 0]).unwrap(), 4);
    }

    #[test]
    fn test_count_string_symbols() {
        let seq = ["ban", "che", "che", "che", "che", "che", "che", "che"];
        assert_eq!(count_observed(&seq).unwrap(), 1);
    }

    #[test]
    fn test_count_rejects_third_symbol() {
        let err = count_observed(&["a", "b", "a", "c"]).unwrap_err();
        assert_eq!(err, JoinsError::MalformedSequence { index: 3 });
    }

    #[test]
    fn test_count_no_partial_result_on_error() {
        // The third symbol shows up before any joins would be tallied past it
        assert!(count_observed(&[1u8, 2, 3, 1, 2, 1]).is_err());
    }

    #[test]
    fn test_state_frequency() {
        let seq = ["ban", "ban", "che", "ban"];
        assert!((state_frequency(&seq, &"ban") - 0.75).abs() < 1e-12);
        assert!((state_frequency(&seq, &"che") - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_state_frequency_empty_defaults_to_half() {
        let empty: [u8; 0] = [];
        assert!((state_frequency(&empty, &1u8) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_expected_reference_values() {
        // 8 trials at p = 0.5: 2 * 7 * 0.25
        assert!((expected_joins(8, 0.5).unwrap() - 3.5).abs() < 1e-12);
        // ESP-60 published values
        assert!((expected_joins(200, 0.5).unwrap() - 99.5).abs() < 1e-12);
    }

    #[test]
    fn test_variance_reference_values() {
        assert!((variance_joins(8, 0.5).unwrap() - 1.75).abs() < 1e-12);
        assert!((variance_joins(200, 0.5).unwrap() - 49.75).abs() < 1e-12);
    }

    #[test]
    fn test_moments_by_direct_substitution() {
        // (N, p) = (10, 0.3): pq = 0.21
        let pq = 0.3 * 0.7;
        let expected = 2.0 * 9.0 * pq;
        let variance = 4.0 * 10.0 * pq * (1.0 - 3.0 * pq) - 2.0 * pq * (3.0 - 10.0 * pq);
        assert!((expected_joins(10, 0.3).unwrap() - expected).abs() < 1e-12);
        assert!((variance_joins(10, 0.3).unwrap() - variance).abs() < 1e-12);
    }

    #[test]
    fn test_moments_symmetric_in_p_and_q() {
        for &(n, p) in &[(8u64, 0.25), (50, 0.1), (200, 0.4)] {
            let q = 1.0 - p;
            assert!(
                (expected_joins(n, p).unwrap() - expected_joins(n, q).unwrap()).abs() < 1e-12
            );
            assert!(
                (variance_joins(n, p).unwrap() - variance_joins(n, q).unwrap()).abs() < 1e-12
            );
        }
    }

    #[test]
    fn test_moments_degenerate_trials() {
        assert_eq!(expected_joins(0, 0.5).unwrap(), 0.0);
        assert_eq!(variance_joins(0, 0.5).unwrap(), 0.0);
        assert_eq!(variance_joins(1, 0.3).unwrap(), 0.0);
    }

    #[test]
    fn test_moments_one_sided_probability() {
        assert_eq!(expected_joins(20, 0.0).unwrap(), 0.0);
        assert_eq!(expected_joins(20, 1.0).unwrap(), 0.0);
        assert_eq!(variance_joins(20, 0.0).unwrap(), 0.0);
        assert_eq!(variance_joins(20, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_moments_reject_bad_probability() {
        assert_eq!(
            expected_joins(10, 1.5).unwrap_err(),
            JoinsError::InvalidProbability(1.5)
        );
        assert!(variance_joins(10, -0.1).is_err());
        assert!(expected_joins(10, f64::NAN).is_err());
    }

    #[test]
    fn test_z_score_continuity_correction() {
        // observed 1 of expected 3.5: deviation -2.5 corrected to -2.0
        let z = z_score(1, 3.5, 1.75, true).unwrap();
        assert!((z - (-2.0 / 1.75f64.sqrt())).abs() < 1e-12);

        // without correction the full deviation is standardized
        let z = z_score(1, 3.5, 1.75, false).unwrap();
        assert!((z - (-2.5 / 1.75f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_z_score_half_deviation_corrects_to_zero() {
        let z = z_score(4, 3.5, 1.75, true).unwrap();
        assert_eq!(z, 0.0);
    }

    #[test]
    fn test_z_score_exact_expectation_gets_no_correction() {
        let z = z_score(4, 4.0, 1.75, true).unwrap();
        assert_eq!(z, 0.0);
    }

    #[test]
    fn test_z_score_degenerate_variance() {
        assert_eq!(z_score(3, 0.0, 0.0, true), None);
    }

    #[test]
    fn test_run_reference_scenario_one_join() {
        let seq = ["ban", "che", "che", "che", "che", "che", "che", "che"];
        let stats = JoinsTest::new().run(&seq).unwrap();
        assert_eq!(stats.observed, 1);
        assert_eq!(stats.trials, 8);
        assert!((stats.expected - 3.5).abs() < 1e-12);
        assert!((stats.variance - 1.75).abs() < 1e-12);
        assert!((stats.z_score.unwrap() - (-1.511_857)).abs() < 1e-4);
        assert!((stats.p_value - 0.130_57).abs() < 1e-4);
    }

    #[test]
    fn test_run_reference_scenario_near_expected() {
        let seq = ["ban", "ban", "che", "ban", "che", "ban", "ban", "ban"];
        let stats = JoinsTest::new().run(&seq).unwrap();
        assert_eq!(stats.observed, 4);
        assert_eq!(stats.z_score, Some(0.0));
        assert!((stats.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_run_reference_scenario_dichotomized() {
        let seq = [1u8, 0, 1, 0, 1, 0, 0, 0];
        let stats = JoinsTest::new().run(&seq).unwrap();
        assert_eq!(stats.observed, 5);
        assert!((stats.z_score.unwrap() - 0.755_93).abs() < 1e-4);
        assert!((stats.p_value - 0.449_7).abs() < 1e-3);
    }

    #[test]
    fn test_run_with_state_estimates_probability() {
        let seq = ["hit", "miss", "miss", "miss"];
        let stats = JoinsTest::new().run_with_state(&seq, &"hit").unwrap();
        assert!((stats.probability - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_run_explicit_parameters_win() {
        let seq = [0u8, 1, 0, 1];
        let test = JoinsTest {
            observed: Some(2),
            trials: Some(100),
            prob: Some(0.4),
            ..JoinsTest::new()
        };
        let stats = test.run(&seq).unwrap();
        assert_eq!(stats.observed, 2);
        assert_eq!(stats.trials, 100);
        assert!((stats.probability - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_run_degenerate_state_probability() {
        // every symbol matches the state: p = 1, variance 0
        let seq = ["x", "x", "x", "x"];
        let stats = JoinsTest::new().run_with_state(&seq, &"x").unwrap();
        assert_eq!(stats.z_score, None);
        assert_eq!(stats.p_value, 1.0);
    }

    #[test]
    fn test_run_counts_requires_parameters() {
        let err = JoinsTest::new().run_counts().unwrap_err();
        assert_eq!(err, JoinsError::MissingParameter("observed"));

        let test = JoinsTest {
            observed: Some(90),
            ..JoinsTest::new()
        };
        assert_eq!(
            test.run_counts().unwrap_err(),
            JoinsError::MissingParameter("trials")
        );
    }

    #[test]
    fn test_run_counts_parameter_only() {
        let test = JoinsTest {
            observed: Some(90),
            trials: Some(200),
            prob: Some(0.5),
            ..JoinsTest::new()
        };
        let stats = test.run_counts().unwrap();
        assert!((stats.expected - 99.5).abs() < 1e-12);
        assert!((stats.variance - 49.75).abs() < 1e-12);
        assert!(stats.z_score.unwrap() < 0.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let stats = JoinsTest::new().run(&[0u8, 1, 0, 1]).unwrap();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"observed\":2"));
        let back: JoinStatistics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
