//! Metrics series binder: turns a snapshot into chart-ready datasets.

use crate::metrics::{MetricField, MetricsSnapshot};
use serde::Serialize;

/// Hex alpha appended to a line color for its fill (0x20 ≈ 12.5% opacity).
pub const FILL_ALPHA_SUFFIX: &str = "20";

/// Line color used when a palette is empty.
pub const FALLBACK_COLOR: &str = "#778da9";

pub const CPU_PALETTE: &[&str] = &[
    "#4361ee", "#4cc9f0", "#f72585", "#b5179e", "#7209b7", "#3a0ca3",
];

pub const MEMORY_PALETTE: &[&str] = &[
    "#f72585", "#b5179e", "#4361ee", "#4cc9f0", "#7209b7", "#3a0ca3",
];

/// One line on a chart. Serializes in the shape Chart.js expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
    pub tension: f64,
    pub fill: bool,
}

/// Color for the `index`-th host: `palette[index % palette.len()]`.
pub fn color_at<S: AsRef<str>>(palette: &[S], index: usize) -> &str {
    if palette.is_empty() {
        return FALLBACK_COLOR;
    }
    palette[index % palette.len()].as_ref()
}

/// Translucent fill variant of a color token.
pub fn fill_color(color: &str) -> String {
    format!("{}{}", color, FILL_ALPHA_SUFFIX)
}

/// Build one dataset per host, in snapshot order.
///
/// Series are passed through as-is: a host with fewer samples gets a
/// shorter line, nothing is padded or truncated.
pub fn build_datasets<S: AsRef<str>>(
    snapshot: &MetricsSnapshot,
    field: MetricField,
    palette: &[S],
) -> Vec<ChartDataset> {
    snapshot
        .iter()
        .enumerate()
        .map(|(index, (host, metrics))| {
            let color = color_at(palette, index);
            ChartDataset {
                label: host.clone(),
                data: metrics.series(field).to_vec(),
                border_color: color.to_string(),
                background_color: fill_color(color),
                border_width: 2,
                tension: 0.4,
                fill: false,
            }
        })
        .collect()
}

/// Length of the longest series.
pub fn longest_series(datasets: &[ChartDataset]) -> usize {
    datasets.iter().map(|d| d.data.len()).max().unwrap_or(0)
}

/// Positional x-axis labels `"point 1"..="point n"`, `n` being the longest
/// series.
pub fn axis_labels(datasets: &[ChartDataset]) -> Vec<String> {
    axis_labels_with(datasets, |i| format!("point {}", i))
}

/// Positional x-axis labels built by `label` from 1-based positions.
pub fn axis_labels_with<F>(datasets: &[ChartDataset], label: F) -> Vec<String>
where
    F: FnMut(usize) -> String,
{
    (1..=longest_series(datasets)).map(label).collect()
}
