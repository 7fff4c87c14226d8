//! Text chart backend: renders each surface as sparkline rows for terminals.

use crate::charts::binder::ChartDataset;
use crate::charts::registry::{ChartKind, ChartOptions, RenderBackend, SurfaceHandle};

const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Map a sample to a block character within the y-axis bounds.
fn level(value: f64, options: &ChartOptions) -> char {
    let span = options.y_max - options.y_min;
    if span <= 0.0 || !value.is_finite() {
        return LEVELS[0];
    }
    let ratio = ((value - options.y_min) / span).clamp(0.0, 1.0);
    LEVELS[((ratio * 7.0).round() as usize).min(7)]
}

pub fn sparkline(values: &[f64], options: &ChartOptions) -> String {
    values.iter().map(|&v| level(v, options)).collect()
}

/// Render a whole chart: title, one row per dataset, and the axis span.
pub fn render_frame(options: &ChartOptions, labels: &[String], datasets: &[ChartDataset]) -> String {
    let mut frame = format!("── {} ──\n", options.title);

    let width = datasets.iter().map(|d| d.label.len()).max().unwrap_or(0);
    for dataset in datasets {
        let latest = dataset
            .data
            .last()
            .map(|v| format!("{:5.1}", v))
            .unwrap_or_else(|| "    -".to_string());
        frame.push_str(&format!(
            "{:<width$} {} {}\n",
            dataset.label,
            latest,
            sparkline(&dataset.data, options),
            width = width
        ));
    }

    if let (Some(first), Some(last)) = (labels.first(), labels.last()) {
        frame.push_str(&format!("{} … {}\n", first, last));
    }

    frame
}

/// Handle holding the most recently rendered frame.
#[derive(Debug, Default)]
pub struct TextSurface {
    frame: String,
    redraws: usize,
    destroyed: bool,
}

impl TextSurface {
    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn redraws(&self) -> usize {
        self.redraws
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl SurfaceHandle for TextSurface {
    fn redraw(&mut self, options: &ChartOptions, labels: &[String], datasets: &[ChartDataset]) {
        self.frame = render_frame(options, labels, datasets);
        self.redraws += 1;
    }

    fn destroy(&mut self) {
        self.frame.clear();
        self.destroyed = true;
    }
}

#[derive(Debug, Default)]
pub struct TextBackend;

impl RenderBackend for TextBackend {
    type Handle = TextSurface;

    fn create_surface(&mut self, _container_id: &str, _kind: ChartKind, _options: &ChartOptions) -> TextSurface {
        TextSurface::default()
    }
}
