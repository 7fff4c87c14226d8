use anyhow::Result;
use monitor_dashboard::api::ApiClient;
use monitor_dashboard::charts::{ChartKind, TextBackend};
use monitor_dashboard::config::Config;
use monitor_dashboard::dashboard::{mount_page, Dashboard};
use monitor_dashboard::preferences::FilePreferences;
use monitor_dashboard::retry::{with_retry, RetryConfig};
use monitor_dashboard::scheduler::{poll_once, start_poller};
use monitor_dashboard::ui::{Feedback, MemoryDocument};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when variables come from the environment)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("monitor_dashboard=info".parse()?),
        )
        .init();

    info!("Starting server monitor dashboard");

    let config = Config::from_env()?;
    info!("Backend: {}", config.api_base_url);

    let client = Arc::new(ApiClient::new(&config)?);

    let mut doc = MemoryDocument::new();
    mount_page(&mut doc, "/index.html");
    let preferences = FilePreferences::open(&config.preferences_file);

    let mut dashboard = Dashboard::new(doc, preferences, TextBackend);
    dashboard.initialize();

    // Subscribe first so the override below is reported too
    let mut language_events = dashboard.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = language_events.recv().await {
            info!("languageChanged: {}", event.language);
        }
    });

    if let Some(code) = &config.language_override {
        dashboard.switch_language(code);
    }

    // The backend may still be starting; give it a few seconds
    let health = with_retry(&RetryConfig::health_check(), "Backend health check", || {
        client.health_check()
    })
    .await;

    match health {
        Ok(status) => {
            let text = dashboard
                .language()
                .t("status.healthy", &[("count", status.hosts_count)]);
            dashboard.document_mut().success(&text);
        }
        Err(e) => {
            warn!("Health check failed: {}", e);
            let text = dashboard.language().t_plain("message.backend_unavailable");
            dashboard.document_mut().error(&text);
        }
    }

    let dashboard = Arc::new(Mutex::new(dashboard));

    if poll_once(&client, &*dashboard).await.is_ok() {
        print_dashboard(&*dashboard.lock().await);
    }

    let interval = Duration::from_secs(config.poll_interval_secs);
    let mut scheduler = start_poller(Arc::clone(&client), Arc::clone(&dashboard), interval).await?;

    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                print_dashboard(&*dashboard.lock().await);
            }
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("Shutting down");
                break;
            }
        }
    }

    scheduler.shutdown().await?;
    dashboard.lock().await.teardown();

    info!("Dashboard stopped");
    Ok(())
}

/// Print every chart frame and the host status lines.
fn print_dashboard(dashboard: &Dashboard<MemoryDocument, FilePreferences, TextBackend>) {
    for kind in ChartKind::ALL {
        if let Some(surface) = dashboard.charts().get(kind.container_id()) {
            println!("{}", surface.handle().frame());
        }
    }
    for line in dashboard.host_status_lines() {
        println!("{}", line);
    }
    println!();
}
