//! Human-readable text report for joins-test results

use crate::joins::JoinStatistics;

/// Render the snapshot as an aligned text block.
///
/// Rounding to `precision` decimals happens here only; the snapshot keeps
/// full-precision values. The degenerate z-score prints as `undefined`.
pub fn render(stats: &JoinStatistics, precision: u32) -> String {
    let dp = precision as usize;
    let z = match stats.z_score {
        Some(z) => format!("{z:.dp$}"),
        None => "undefined".to_string(),
    };

    let lines = [
        "Wishart-Hirshfeld joins test".to_string(),
        "----------------------------".to_string(),
        format!("trials:      {}", stats.trials),
        format!("probability: {:.dp$}", stats.probability),
        format!("observed:    {}", stats.observed),
        format!("expected:    {:.dp$}", stats.expected),
        format!("variance:    {:.dp$}", stats.variance),
        format!("z-score:     {z}"),
        format!("p-value:     {:.dp$}", stats.p_value),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
