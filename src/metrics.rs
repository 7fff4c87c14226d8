//! Metrics snapshot as served by `GET /metrics`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-host metric samples, keyed by host id (an IP address).
///
/// Keys keep the order the backend sent them in; chart colors depend on it.
pub type MetricsSnapshot = IndexMap<String, HostMetrics>;

/// Samples for one host, oldest first.
///
/// Every field may be absent in the JSON; absent series are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostMetrics {
    #[serde(default)]
    pub cpu: Vec<f64>,

    #[serde(default)]
    pub memory: Vec<f64>,

    #[serde(default)]
    pub disk: Vec<f64>,

    /// Collection errors reported by the backend for the last refresh
    #[serde(default)]
    pub alerts: Vec<String>,

    #[serde(default)]
    pub last_update: Option<String>,
}

/// Which series of [`HostMetrics`] to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    Cpu,
    Memory,
    Disk,
}

impl HostMetrics {
    pub fn series(&self, field: MetricField) -> &[f64] {
        match field {
            MetricField::Cpu => &self.cpu,
            MetricField::Memory => &self.memory,
            MetricField::Disk => &self.disk,
        }
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_keeps_backend_order() {
        let json = r#"{
            "10.0.0.9": {"cpu": [1.0]},
            "10.0.0.1": {"cpu": [2.0]},
            "10.0.0.5": {"cpu": [3.0]}
        }"#;
        let snapshot: MetricsSnapshot = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = snapshot.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["10.0.0.9", "10.0.0.1", "10.0.0.5"]);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let json = r#"{"10.0.0.1": {"cpu": [12.5, 40]}}"#;
        let snapshot: MetricsSnapshot = serde_json::from_str(json).unwrap();
        let host = &snapshot["10.0.0.1"];
        assert_eq!(host.series(MetricField::Cpu), &[12.5, 40.0]);
        assert!(host.series(MetricField::Memory).is_empty());
        assert!(host.series(MetricField::Disk).is_empty());
        assert!(host.last_update.is_none());
        assert!(!host.has_alerts());
    }

    #[test]
    fn test_full_backend_record() {
        let json = r#"{
            "192.168.1.10": {
                "cpu": [0],
                "memory": [0],
                "disk": [0],
                "alerts": ["SSH连接失败: timed out"],
                "last_update": "2024-01-15T10:30:00.123456"
            }
        }"#;
        let snapshot: MetricsSnapshot = serde_json::from_str(json).unwrap();
        let host = &snapshot["192.168.1.10"];
        assert!(host.has_alerts());
        assert_eq!(host.last_update.as_deref(), Some("2024-01-15T10:30:00.123456"));
    }
}
