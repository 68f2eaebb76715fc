//! Significance stage: standard normal tail probabilities
//!
//! The z-transform feeds this module a standardized deviation; here it is
//! mapped to a one- or two-tailed p-value through the standard normal CDF.
//! Everything is a free function so the stage can be unit tested in
//! isolation and called concurrently with no shared state.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::joins::{JoinsError, Result};

/// Number of tails for the significance test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tails {
    /// Probability of a deviation of magnitude >= |z| in the tail matching
    /// the observed deviation's direction
    One,
    /// Probability of a deviation of magnitude >= |z| in either tail
    #[default]
    Two,
}

impl Tails {
    /// Parse the user-facing 1/2 encoding.
    pub fn from_count(tails: u8) -> Result<Self> {
        match tails {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(JoinsError::InvalidTails(other)),
        }
    }

    fn factor(self) -> f64 {
        match self {
            Self::One => 1.0,
            Self::Two => 2.0,
        }
    }
}

/// Standard normal CDF.
fn phi(z: f64) -> f64 {
    let standard = Normal::new(0.0, 1.0).unwrap();
    standard.cdf(z)
}

/// Tail probability of a deviation of magnitude >= |z|.
///
/// One-tailed is `1 - phi(|z|)` for either sign of z (the tail matching the
/// observed deviation's direction); two-tailed doubles it. Clamped to
/// `[0, 1]`.
pub fn p_value(z: f64, tails: Tails) -> f64 {
    let tail = 1.0 - phi(z.abs());
    (tail * tails.factor()).clamp(0.0, 1.0)
}

/// Degenerate-aware wrapper: a missing z-score carries no evidence of
/// deviation, so the p-value defaults to 1.0.
pub fn p_value_opt(z: Option<f64>, tails: Tails) -> f64 {
    match z {
        Some(z) => p_value(z, tails),
        None => 1.0,
    }
}

/// Round to `dp` decimal places. Display-side only; the value fed from the
/// z-transform into the p-value is never rounded.
pub fn round_dp(x: f64, dp: u32) -> f64 {
    let scale = 10f64.powi(dp as i32);
    (x * scale).round() / scale
}
