//! Dashboard context: the document, the language controller and the chart
//! registry, wired together.

use crate::charts::binder::{axis_labels_with, build_datasets};
use crate::charts::registry::{ChartKind, ChartOptions, ChartRegistry, RenderBackend};
use crate::i18n::{LanguageChanged, LanguageController};
use crate::metrics::MetricsSnapshot;
use crate::preferences::PreferenceStore;
use crate::ui::document::{Document, Element, MemoryDocument};
use crate::ui::feedback::Feedback;
use crate::ui::sidebar::{mount_sidebar, SidebarNodes};
use crate::validation::format_time;
use std::fmt::Display;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Add the dashboard page to an empty document: sidebar, one heading and
/// container per chart, and the refresh button.
pub fn mount_page(doc: &mut MemoryDocument, current_path: &str) -> SidebarNodes {
    let sidebar = mount_sidebar(doc, current_path);

    for kind in ChartKind::ALL {
        doc.push(Element::translated("h3", kind.title_key()));
        doc.push(Element::new("canvas").with_id(kind.container_id()));
    }

    doc.push(Element::translated("button", "host.refresh").with_id("refreshButton"));

    sidebar
}

pub struct Dashboard<D, P, B>
where
    D: Document + Feedback,
    P: PreferenceStore,
    B: RenderBackend,
{
    doc: D,
    language: LanguageController<P>,
    charts: ChartRegistry<B>,
    last_snapshot: Option<MetricsSnapshot>,
    torn_down: bool,
}

impl<D, P, B> Dashboard<D, P, B>
where
    D: Document + Feedback,
    P: PreferenceStore,
    B: RenderBackend,
{
    pub fn new(doc: D, preferences: P, backend: B) -> Self {
        Self {
            doc,
            language: LanguageController::new(preferences),
            charts: ChartRegistry::new(backend),
            last_snapshot: None,
            torn_down: false,
        }
    }

    /// Sync the document to the persisted language and create the charts.
    ///
    /// Charts whose container is missing are skipped. Returns how many
    /// were registered.
    pub fn initialize(&mut self) -> usize {
        self.torn_down = false;
        self.language.initialize(&mut self.doc);

        let mut registered = 0;
        for kind in ChartKind::ALL {
            let title = self.language.t_plain(kind.title_key());
            if self
                .charts
                .register(&self.doc, kind.container_id(), kind, ChartOptions::percentage(title))
                .is_some()
            {
                registered += 1;
            }
        }

        info!(
            "Dashboard initialized in {} with {} charts",
            self.language.language(),
            registered
        );
        registered
    }

    /// Show the loading indicator on every chart.
    pub fn begin_refresh(&mut self) {
        for kind in ChartKind::ALL {
            self.doc.show_loading(kind.container_id());
        }
    }

    /// Replace every chart's data with `snapshot`.
    ///
    /// Ignored after [`teardown`](Self::teardown) until the next `initialize`.
    pub fn apply_snapshot(&mut self, snapshot: &MetricsSnapshot) {
        for kind in ChartKind::ALL {
            self.doc.hide_loading(kind.container_id());
        }

        if self.torn_down {
            debug!("Dashboard torn down, dropping snapshot of {} hosts", snapshot.len());
            return;
        }

        self.render(snapshot);
        self.last_snapshot = Some(snapshot.clone());
    }

    /// Switch the UI language and re-localize chart titles and axis labels.
    pub fn switch_language(&mut self, code: &str) -> bool {
        if !self.language.switch_language(code, &mut self.doc) {
            return false;
        }

        for kind in ChartKind::ALL {
            let title = self.language.t_plain(kind.title_key());
            self.charts.set_title(kind.container_id(), &title);
        }

        if let Some(snapshot) = self.last_snapshot.take() {
            self.render(&snapshot);
            self.last_snapshot = Some(snapshot);
        }

        true
    }

    /// Tell the user a request failed and clear the loading indicators.
    pub fn report_error<E: Display>(&mut self, err: E) {
        for kind in ChartKind::ALL {
            self.doc.hide_loading(kind.container_id());
        }
        let text = self.language.t("message.request_failed", &[("error", err)]);
        self.doc.error(&text);
    }

    /// One localized status line per host of the last snapshot, preceded by
    /// the host count.
    pub fn host_status_lines(&self) -> Vec<String> {
        let Some(snapshot) = &self.last_snapshot else {
            return vec![self.language.t_plain("chart.no_data")];
        };

        let unknown = self.language.t_plain("time.unknown");
        let updated = self.language.t_plain("host.last_update");
        let alerts = self.language.t_plain("host.alerts");

        let mut lines = vec![self.language.t("host.count", &[("count", snapshot.len())])];
        for (host, metrics) in snapshot {
            let mut line = format!(
                "{}  {}: {}",
                host,
                updated,
                format_time(metrics.last_update.as_deref(), &unknown)
            );
            if metrics.has_alerts() {
                line.push_str(&format!("  {}: {}", alerts, metrics.alerts.join("; ")));
            }
            lines.push(line);
        }
        lines
    }

    /// Destroy every chart surface. Later snapshots are ignored.
    pub fn teardown(&mut self) {
        self.charts.destroy_all();
        self.last_snapshot = None;
        self.torn_down = true;
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.language.subscribe()
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn language(&self) -> &LanguageController<P> {
        &self.language
    }

    pub fn charts(&self) -> &ChartRegistry<B> {
        &self.charts
    }

    pub fn last_snapshot(&self) -> Option<&MetricsSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Rebuild chart data from `snapshot`. Loading indicators are left as is.
    fn render(&mut self, snapshot: &MetricsSnapshot) {
        let language = &self.language;

        for kind in ChartKind::ALL {
            let container_id = kind.container_id();
            if self.charts.get(container_id).is_none() {
                continue;
            }

            let datasets = build_datasets(snapshot, kind.field(), kind.palette());
            let labels = axis_labels_with(&datasets, |i| language.t("chart.point", &[("index", i)]));
            debug!(
                "Updating {} with {} datasets over {} points",
                container_id,
                datasets.len(),
                labels.len()
            );
            self.charts.update(container_id, datasets, labels);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::text::TextBackend;
    use crate::i18n::Language;
    use crate::metrics::HostMetrics;
    use crate::preferences::{MemoryPreferences, PREFERRED_LANGUAGE_KEY};
    use crate::ui::document::LANGUAGE_SWITCHER_ID;
    use crate::ui::feedback::Severity;

    type TestDashboard = Dashboard<MemoryDocument, MemoryPreferences, TextBackend>;

    fn dashboard(prefs: MemoryPreferences) -> TestDashboard {
        let mut doc = MemoryDocument::new();
        mount_page(&mut doc, "/index.html");
        Dashboard::new(doc, prefs, TextBackend)
    }

    fn snapshot() -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot::new();
        snapshot.insert(
            "10.0.0.1".to_string(),
            HostMetrics {
                cpu: vec![10.0, 20.0, 30.0],
                memory: vec![40.0, 50.0, 60.0],
                last_update: Some("2024-01-15T10:30:05".to_string()),
                ..Default::default()
            },
        );
        snapshot.insert(
            "10.0.0.2".to_string(),
            HostMetrics {
                cpu: vec![5.0, 15.0],
                memory: vec![25.0, 35.0],
                alerts: vec!["SSH连接失败".to_string()],
                ..Default::default()
            },
        );
        snapshot
    }

    #[test]
    fn test_initialize_registers_localized_charts() {
        let mut dashboard = dashboard(MemoryPreferences::new());
        assert_eq!(dashboard.initialize(), 2);

        let cpu = dashboard.charts().get("cpuChart").unwrap();
        assert_eq!(cpu.options().title, "CPU 使用率 (%)");
        assert_eq!(cpu.options().y_max, 100.0);
        assert_eq!(
            dashboard
                .document()
                .element_by_id(LANGUAGE_SWITCHER_ID)
                .and_then(|el| el.value.as_deref()),
            Some("zh")
        );
    }

    #[test]
    fn test_initialize_without_containers() {
        let mut dashboard: TestDashboard =
            Dashboard::new(MemoryDocument::new(), MemoryPreferences::new(), TextBackend);
        assert_eq!(dashboard.initialize(), 0);
        dashboard.apply_snapshot(&snapshot());
        assert!(dashboard.charts().is_empty());
    }

    #[test]
    fn test_apply_snapshot_binds_both_charts() {
        let mut dashboard = dashboard(MemoryPreferences::new());
        dashboard.initialize();
        dashboard.begin_refresh();
        assert!(dashboard.document().is_loading("cpuChart"));

        dashboard.apply_snapshot(&snapshot());

        let cpu = dashboard.charts().get("cpuChart").unwrap();
        assert_eq!(cpu.datasets().len(), 2);
        assert_eq!(cpu.datasets()[0].data, vec![10.0, 20.0, 30.0]);
        assert_eq!(cpu.datasets()[0].border_color, "#4361ee");
        assert_eq!(cpu.labels(), ["点 1", "点 2", "点 3"]);

        let memory = dashboard.charts().get("memoryChart").unwrap();
        assert_eq!(memory.datasets()[1].data, vec![25.0, 35.0]);
        assert_eq!(memory.datasets()[0].border_color, "#f72585");
        assert!(!dashboard.document().is_loading("cpuChart"));
    }

    #[test]
    fn test_empty_snapshot_clears_charts() {
        let mut dashboard = dashboard(MemoryPreferences::new());
        dashboard.initialize();
        dashboard.apply_snapshot(&snapshot());
        dashboard.apply_snapshot(&MetricsSnapshot::new());

        let cpu = dashboard.charts().get("cpuChart").unwrap();
        assert!(cpu.datasets().is_empty());
        assert!(cpu.labels().is_empty());
    }

    #[test]
    fn test_switch_language_relocalizes_charts() {
        let mut dashboard = dashboard(MemoryPreferences::new());
        dashboard.initialize();
        dashboard.apply_snapshot(&snapshot());
        let mut events = dashboard.subscribe();

        assert!(dashboard.switch_language("en"));

        let cpu = dashboard.charts().get("cpuChart").unwrap();
        assert_eq!(cpu.options().title, "CPU Usage (%)");
        assert_eq!(cpu.labels(), ["point 1", "point 2", "point 3"]);
        assert!(cpu.handle().frame().starts_with("── CPU Usage (%) ──"));
        assert_eq!(events.try_recv().unwrap().language, Language::ENGLISH);
        assert_eq!(
            dashboard.language().preferences().get(PREFERRED_LANGUAGE_KEY).as_deref(),
            Some("en")
        );
    }

    #[test]
    fn test_subscriber_sees_only_later_switches() {
        let mut dashboard = dashboard(MemoryPreferences::new());
        dashboard.initialize();
        let mut early = dashboard.subscribe();

        assert!(dashboard.switch_language("en"));
        let mut late = dashboard.subscribe();

        assert_eq!(early.try_recv().unwrap().language, Language::ENGLISH);
        assert!(late.try_recv().is_err());
    }

    #[test]
    fn test_switch_to_same_language_keeps_charts() {
        let mut dashboard = dashboard(MemoryPreferences::new());
        dashboard.initialize();
        let redraws = dashboard.charts().get("cpuChart").unwrap().handle().redraws();

        assert!(!dashboard.switch_language("zh"));
        assert_eq!(dashboard.charts().get("cpuChart").unwrap().handle().redraws(), redraws);
    }

    #[test]
    fn test_report_error_shows_toast() {
        let prefs = MemoryPreferences::new().with_value(PREFERRED_LANGUAGE_KEY, "en");
        let mut dashboard = dashboard(prefs);
        dashboard.initialize();
        dashboard.begin_refresh();

        dashboard.report_error("HTTP 500: boom");

        let toast = dashboard.document().current_toast().unwrap();
        assert_eq!(toast.text, "Request failed: HTTP 500: boom");
        assert_eq!(toast.severity, Severity::Error);
        assert!(!dashboard.document().is_loading("memoryChart"));
    }

    #[test]
    fn test_host_status_lines() {
        let prefs = MemoryPreferences::new().with_value(PREFERRED_LANGUAGE_KEY, "en");
        let mut dashboard = dashboard(prefs);
        assert_eq!(dashboard.host_status_lines(), vec!["No data"]);

        dashboard.initialize();
        dashboard.apply_snapshot(&snapshot());

        let lines = dashboard.host_status_lines();
        assert_eq!(lines[0], "Hosts: 2");
        assert_eq!(lines[1], "10.0.0.1  Last Update: 2024-01-15 10:30:05");
        assert_eq!(lines[2], "10.0.0.2  Last Update: Unknown time  Alerts: SSH连接失败");
    }

    #[test]
    fn test_teardown_then_snapshot_is_noop() {
        let mut dashboard = dashboard(MemoryPreferences::new());
        dashboard.initialize();
        dashboard.teardown();
        let before = dashboard.host_status_lines();

        dashboard.apply_snapshot(&snapshot());

        assert!(dashboard.charts().is_empty());
        assert!(dashboard.last_snapshot().is_none());
        assert_eq!(dashboard.host_status_lines(), before);
        assert_eq!(before, vec!["暂无数据"]);
    }

    #[test]
    fn test_switch_language_after_teardown_renders_nothing() {
        let mut dashboard = dashboard(MemoryPreferences::new());
        dashboard.initialize();
        dashboard.apply_snapshot(&snapshot());
        dashboard.teardown();
        dashboard.apply_snapshot(&snapshot());

        assert!(dashboard.switch_language("en"));
        assert!(dashboard.charts().is_empty());
        assert_eq!(dashboard.host_status_lines(), vec!["No data"]);
    }

    #[test]
    fn test_initialize_after_teardown_accepts_snapshots() {
        let mut dashboard = dashboard(MemoryPreferences::new());
        dashboard.initialize();
        dashboard.teardown();
        dashboard.initialize();
        dashboard.apply_snapshot(&snapshot());

        assert_eq!(dashboard.charts().get("cpuChart").unwrap().datasets().len(), 2);
    }

    #[test]
    fn test_switch_language_keeps_loading_indicator() {
        let mut dashboard = dashboard(MemoryPreferences::new());
        dashboard.initialize();
        dashboard.apply_snapshot(&snapshot());
        dashboard.begin_refresh();

        assert!(dashboard.switch_language("en"));

        assert!(dashboard.document().is_loading("cpuChart"));
        assert!(dashboard.document().is_loading("memoryChart"));
        let cpu = dashboard.charts().get("cpuChart").unwrap();
        assert_eq!(cpu.labels(), ["point 1", "point 2", "point 3"]);
    }
}
