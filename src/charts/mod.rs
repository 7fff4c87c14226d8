//! Metrics charts: dataset binding and the surface registry.

pub mod binder;
pub mod registry;
pub mod text;

pub use binder::{axis_labels, axis_labels_with, build_datasets, color_at, ChartDataset};
pub use registry::{ChartKind, ChartOptions, ChartRegistry, RenderBackend, Surface, SurfaceHandle};
pub use text::{TextBackend, TextSurface};
