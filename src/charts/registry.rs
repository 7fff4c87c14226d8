//! Chart surface registry: one rendering surface per display container.

use crate::charts::binder::{ChartDataset, CPU_PALETTE, MEMORY_PALETTE};
use crate::metrics::MetricField;
use crate::ui::document::Document;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// The charts the dashboard knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Cpu,
    Memory,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Cpu, ChartKind::Memory];

    /// Conventional container id for this chart.
    pub fn container_id(&self) -> &'static str {
        match self {
            ChartKind::Cpu => "cpuChart",
            ChartKind::Memory => "memoryChart",
        }
    }

    pub fn field(&self) -> MetricField {
        match self {
            ChartKind::Cpu => MetricField::Cpu,
            ChartKind::Memory => MetricField::Memory,
        }
    }

    /// Translation key of the chart title.
    pub fn title_key(&self) -> &'static str {
        match self {
            ChartKind::Cpu => "chart.cpu_title",
            ChartKind::Memory => "chart.memory_title",
        }
    }

    pub fn palette(&self) -> &'static [&'static str] {
        match self {
            ChartKind::Cpu => CPU_PALETTE,
            ChartKind::Memory => MEMORY_PALETTE,
        }
    }
}

/// Display options of a line chart surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub title: String,
    pub y_min: f64,
    pub y_max: f64,
}

impl ChartOptions {
    /// Options for a percentage chart: y axis fixed to 0–100.
    pub fn percentage(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            y_min: 0.0,
            y_max: 100.0,
        }
    }
}

/// Backend-owned drawing handle for one surface.
pub trait SurfaceHandle {
    fn redraw(&mut self, options: &ChartOptions, labels: &[String], datasets: &[ChartDataset]);

    /// Release the backend resources. The handle is dropped right after.
    fn destroy(&mut self);
}

/// Creates drawing handles.
pub trait RenderBackend {
    type Handle: SurfaceHandle;

    fn create_surface(&mut self, container_id: &str, kind: ChartKind, options: &ChartOptions) -> Self::Handle;
}

/// A registered chart: its last rendered data plus the backend handle.
#[derive(Debug)]
pub struct Surface<H> {
    container_id: String,
    kind: ChartKind,
    options: ChartOptions,
    labels: Vec<String>,
    datasets: Vec<ChartDataset>,
    handle: H,
}

impl<H> Surface<H> {
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn datasets(&self) -> &[ChartDataset] {
        &self.datasets
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }
}

pub struct ChartRegistry<B: RenderBackend> {
    backend: B,
    surfaces: HashMap<String, Surface<B::Handle>>,
}

impl<B: RenderBackend> ChartRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            surfaces: HashMap::new(),
        }
    }

    /// Create a surface in `container_id`.
    ///
    /// Returns `None` when the document has no such container. Registering
    /// an id twice destroys the previous surface first.
    pub fn register<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        container_id: &str,
        kind: ChartKind,
        options: ChartOptions,
    ) -> Option<&Surface<B::Handle>> {
        if !doc.has_element(container_id) {
            warn!("Chart container not found: {}", container_id);
            return None;
        }

        if self.destroy(container_id) {
            debug!("Replaced existing surface in {}", container_id);
        }

        let mut handle = self.backend.create_surface(container_id, kind, &options);
        handle.redraw(&options, &[], &[]);

        info!("Registered {:?} chart in {}", kind, container_id);

        let surface = Surface {
            container_id: container_id.to_string(),
            kind,
            options,
            labels: Vec::new(),
            datasets: Vec::new(),
            handle,
        };
        self.surfaces.insert(container_id.to_string(), surface);
        self.surfaces.get(container_id)
    }

    /// Replace a surface's labels and datasets and redraw it.
    ///
    /// Returns `false` (and does nothing) when no surface is registered
    /// under `container_id`.
    pub fn update(&mut self, container_id: &str, datasets: Vec<ChartDataset>, labels: Vec<String>) -> bool {
        let Some(surface) = self.surfaces.get_mut(container_id) else {
            debug!("No surface registered for {}, skipping update", container_id);
            return false;
        };

        surface.datasets = datasets;
        surface.labels = labels;
        surface
            .handle
            .redraw(&surface.options, &surface.labels, &surface.datasets);
        true
    }

    /// Change a surface's title and redraw it.
    pub fn set_title(&mut self, container_id: &str, title: &str) -> bool {
        let Some(surface) = self.surfaces.get_mut(container_id) else {
            return false;
        };

        surface.options.title = title.to_string();
        surface
            .handle
            .redraw(&surface.options, &surface.labels, &surface.datasets);
        true
    }

    pub fn get(&self, container_id: &str) -> Option<&Surface<B::Handle>> {
        self.surfaces.get(container_id)
    }

    /// Registered surfaces, in no particular order.
    pub fn surfaces(&self) -> impl Iterator<Item = &Surface<B::Handle>> {
        self.surfaces.values()
    }

    /// Destroy one surface. Returns whether it existed.
    pub fn destroy(&mut self, container_id: &str) -> bool {
        match self.surfaces.remove(container_id) {
            Some(mut surface) => {
                surface.handle.destroy();
                true
            }
            None => false,
        }
    }

    /// Destroy every surface and empty the registry.
    pub fn destroy_all(&mut self) {
        let count = self.surfaces.len();
        for (_, mut surface) in self.surfaces.drain() {
            surface.handle.destroy();
        }
        if count > 0 {
            info!("Destroyed {} chart surfaces", count);
        }
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
