//! Joinstat - Wishart-Hirshfeld joins test for dichotomous sequences
//!
//! This library counts alternations ("joins") between the two symbol
//! classes of a dichotomous sequence, computes the expectation and variance
//! of the count under a binomial null model, standardizes the deviation
//! with an optional continuity correction, and reports one- or two-tailed
//! normal-approximation p-values.
//!
//! The engine lives in [`joins`] and [`significance`]; the remaining
//! modules are thin collaborators for sample storage, dichotomization of
//! numeric data, and formatted output.

pub mod cli;
pub mod csv_output;
pub mod dichotomize;
pub mod joins;
pub mod json_output;
pub mod report;
pub mod significance;
pub mod store;
