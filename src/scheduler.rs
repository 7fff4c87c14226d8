use crate::api::{ApiClient, ApiError};
use crate::charts::registry::RenderBackend;
use crate::dashboard::Dashboard;
use crate::preferences::PreferenceStore;
use crate::ui::document::Document;
use crate::ui::feedback::Feedback;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info};

/// Dashboard shared between the poll job and the rest of the binary.
pub type SharedDashboard<D, P, B> = Arc<Mutex<Dashboard<D, P, B>>>;

/// Start a job fetching `/metrics` every `interval` and pushing it into the
/// dashboard.
pub async fn start_poller<D, P, B>(
    client: Arc<ApiClient>,
    dashboard: SharedDashboard<D, P, B>,
    interval: Duration,
) -> Result<JobScheduler>
where
    D: Document + Feedback + Send + 'static,
    P: PreferenceStore + Send + 'static,
    B: RenderBackend + Send + 'static,
    B::Handle: Send,
{
    let scheduler = JobScheduler::new().await?;

    info!("Scheduling metrics poll every {:?}", interval);

    let job = Job::new_repeated_async(interval, move |_uuid, _l| {
        let client = Arc::clone(&client);
        let dashboard = Arc::clone(&dashboard);

        Box::pin(async move {
            debug!("⏰ Metrics poll triggered");
            if let Err(e) = poll_once(&client, &*dashboard).await {
                error!("Metrics poll failed: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    info!("✓ Poller started");

    Ok(scheduler)
}

/// Fetch one snapshot and apply it. Failures are shown to the user and
/// returned.
///
/// The lock is not held while the request is in flight.
pub async fn poll_once<D, P, B>(client: &ApiClient, dashboard: &Mutex<Dashboard<D, P, B>>) -> Result<(), ApiError>
where
    D: Document + Feedback,
    P: PreferenceStore,
    B: RenderBackend,
{
    dashboard.lock().await.begin_refresh();

    match client.get_metrics().await {
        Ok(snapshot) => {
            debug!("Received metrics for {} hosts", snapshot.len());
            dashboard.lock().await.apply_snapshot(&snapshot);
            Ok(())
        }
        Err(e) => {
            dashboard.lock().await.report_error(&e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::text::TextBackend;
    use crate::config::Config;
    use crate::dashboard::mount_page;
    use crate::preferences::MemoryPreferences;
    use crate::retry::RetryConfig;
    use crate::ui::document::MemoryDocument;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    type TestDashboard = Dashboard<MemoryDocument, MemoryPreferences, TextBackend>;

    fn client_for(server: &MockServer) -> ApiClient {
        let config = Config {
            api_base_url: format!("{}/api", server.uri()),
            request_timeout_secs: 5,
            poll_interval_secs: 1,
            preferences_file: "unused.json".to_string(),
            language_override: None,
        };
        ApiClient::new(&config)
            .unwrap()
            .with_retry(RetryConfig::new(1, Duration::from_millis(1)))
    }

    fn shared_dashboard() -> Mutex<TestDashboard> {
        let mut doc = MemoryDocument::new();
        mount_page(&mut doc, "/index.html");
        let mut dashboard = Dashboard::new(doc, MemoryPreferences::new(), TextBackend);
        dashboard.initialize();
        Mutex::new(dashboard)
    }

    #[tokio::test]
    async fn test_poll_once_applies_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/metrics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "10.0.0.1": {"cpu": [12.5, 40.0], "memory": [60.0, 61.0]}
            })))
            .mount(&server)
            .await;

        let dashboard = shared_dashboard();
        poll_once(&client_for(&server), &dashboard).await.unwrap();

        let guard = dashboard.lock().await;
        let cpu = guard.charts().get("cpuChart").unwrap();
        assert_eq!(cpu.datasets()[0].label, "10.0.0.1");
        assert_eq!(cpu.labels().len(), 2);
        assert!(!guard.document().is_loading("cpuChart"));
    }

    #[tokio::test]
    async fn test_poll_once_reports_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/metrics"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "ssh down"})))
            .mount(&server)
            .await;

        let dashboard = shared_dashboard();
        let err = poll_once(&client_for(&server), &dashboard).await.unwrap_err();
        assert!(matches!(err, ApiError::Backend { status: 500, .. }));

        let guard = dashboard.lock().await;
        let toast = guard.document().current_toast().unwrap();
        assert_eq!(toast.text, "请求失败: HTTP 500: ssh down");
        assert!(guard.charts().get("cpuChart").unwrap().datasets().is_empty());
    }
}
