//! Dichotomization of continuous or multi-valued numeric data
//!
//! The joins test wants exactly two symbol classes; this module cuts a
//! numeric sample at a threshold (explicit value, mean, or median) into a
//! 0/1 sequence the engine can consume.

use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while dichotomizing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DichotomizeError {
    #[error("token '{token}' at index {index} is not numeric")]
    NotNumeric { index: usize, token: String },

    #[error("value at index {index} is not finite")]
    NonFiniteValue { index: usize },

    #[error("unrecognized cut point '{0}': expected 'median', 'mean', or a number")]
    BadCutPoint(String),
}

/// Result type for dichotomization operations
pub type Result<T> = std::result::Result<T, DichotomizeError>;

/// Where to cut a numeric sample into two classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CutPoint {
    /// Cut at the sample median (even lengths average the middle pair)
    Median,
    /// Cut at the sample mean
    Mean,
    /// Cut at an explicit threshold
    Value(f64),
}

impl FromStr for CutPoint {
    type Err = DichotomizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "median" => Ok(Self::Median),
            "mean" => Ok(Self::Mean),
            other => match other.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Self::Value(value)),
                _ => Err(DichotomizeError::BadCutPoint(other.to_string())),
            },
        }
    }
}

/// Parse symbol tokens as numeric values for dichotomization.
pub fn parse_numeric(tokens: &[String]) -> Result<Vec<f64>> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| {
            token.parse::<f64>().map_err(|_| DichotomizeError::NotNumeric {
                index,
                token: token.clone(),
            })
        })
        .collect()
}

/// Cut a numeric sample into 0/1 classes.
///
/// Values strictly above the cut point map to 1, the rest (including values
/// equal to the cut) map to 0. An empty sample yields an empty sequence.
pub fn dichotomize(xs: &[f64], cut: CutPoint) -> Result<Vec<u8>> {
    if let Some(index) = xs.iter().position(|v| !v.is_finite()) {
        return Err(DichotomizeError::NonFiniteValue { index });
    }
    if xs.is_empty() {
        return Ok(Vec::new());
    }

    let threshold = match cut {
        CutPoint::Value(value) => value,
        CutPoint::Mean => mean(xs),
        CutPoint::Median => median(xs),
    };

    Ok(xs.iter().map(|&v| u8::from(v > threshold)).collect())
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Median via a sorted copy; even lengths average the middle pair.
fn median(xs: &[f64]) -> f64 {
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
