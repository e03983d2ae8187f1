//! Fixed-domain score histogram.
//!
//! # Responsibility
//! - Partition the [0.5, 5.0] score domain into 0.1-wide bins.
//! - Render bin counts as a scaled text chart.
//!
//! # Invariants
//! - The bin domain and width are fixed; only presentation is configurable.
//! - Scores outside the domain are dropped, never miscounted.

use std::io::{self, Write};

/// Width of one histogram bin.
pub const BIN_WIDTH: f64 = 0.1;
/// Lower edge of the first bin.
pub const DOMAIN_START: f64 = 0.5;
/// Number of bins covering [0.5, 5.0].
pub const BIN_COUNT: usize = 45;

/// Presentation options for histogram rendering.
///
/// Callers pass this explicitly instead of mutating process-global display
/// state; `HistogramConfig::default()` is the documented default.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramConfig {
    /// Title printed above the chart.
    pub title: String,
    /// Label for the bin-edge column.
    pub x_label: String,
    /// Label for the count column.
    pub y_label: String,
    /// Longest bar drawn; larger counts scale down to fit.
    pub max_bar_width: usize,
}

impl Default for HistogramConfig {
    /// English labels and 40-column bars.
    fn default() -> Self {
        Self {
            title: "Restaurant score distribution".to_string(),
            x_label: "score".to_string(),
            y_label: "count".to_string(),
            max_bar_width: 40,
        }
    }
}

/// Buckets scores into 0.1-wide bins over [0.5, 5.0].
///
/// The last bin is right-closed so a score of exactly 5.0 is counted.
/// Values outside the domain are dropped. Persisted scores are rounded to
/// one decimal place, so indexing by integer tenths is exact.
pub fn bucket_scores(scores: &[f64]) -> [u32; BIN_COUNT] {
    let mut bins = [0_u32; BIN_COUNT];

    for &score in scores {
        let tenths = (score * 10.0).round() as i64;
        // Bin i covers [0.5 + 0.1 * i, 0.5 + 0.1 * (i + 1)).
        let index = tenths - 5;
        if !(0..=BIN_COUNT as i64).contains(&index) {
            continue;
        }
        let index = (index as usize).min(BIN_COUNT - 1);
        bins[index] += 1;
    }

    bins
}

/// Renders a text histogram of the provided scores.
///
/// Prints the title, an axis-label line, then one row per bin with the
/// bin's lower edge, a bar scaled to `config.max_bar_width` and the raw
/// count. Purely presentational.
pub fn render_histogram<W: Write>(
    scores: &[f64],
    config: &HistogramConfig,
    out: &mut W,
) -> io::Result<()> {
    let bins = bucket_scores(scores);
    let peak = bins.iter().copied().max().unwrap_or(0);

    writeln!(out, "{}", config.title)?;
    writeln!(out, "{} | {}", config.x_label, config.y_label)?;

    for (position, &count) in bins.iter().enumerate() {
        let edge = DOMAIN_START + BIN_WIDTH * position as f64;
        let bar = "#".repeat(bar_length(count, peak, config.max_bar_width));
        writeln!(out, "{edge:>5.1} | {bar} {count}")?;
    }

    Ok(())
}

fn bar_length(count: u32, peak: u32, max_width: usize) -> usize {
    if count == 0 || peak == 0 {
        return 0;
    }
    if peak as usize <= max_width {
        return count as usize;
    }
    // Nonzero counts stay visible after scaling.
    ((count as usize * max_width) / peak as usize).max(1)
}
