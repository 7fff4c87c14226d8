//! Snapshot binary - fetches metrics once and prints the chart data as JSON
//!
//! Usage:
//!   cargo run --bin snapshot
//!   cargo run --bin snapshot -- en      # axis labels in English
//!
//! Uses the same environment as the dashboard (MONITOR_API_URL, PREFERENCES_FILE).

use anyhow::{Context, Result};
use monitor_dashboard::api::ApiClient;
use monitor_dashboard::charts::{axis_labels_with, build_datasets, ChartKind};
use monitor_dashboard::config::Config;
use monitor_dashboard::i18n::{lookup, lookup_plain, Language, TranslationStore};
use monitor_dashboard::preferences::{FilePreferences, PreferenceStore, PREFERRED_LANGUAGE_KEY};
use serde_json::{json, Map, Value};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("monitor_dashboard=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    // Argument, then DASHBOARD_LANGUAGE, then the saved preference
    let language = match std::env::args().nth(1).or(config.language_override.clone()) {
        Some(code) => Language::resolve(&code),
        None => FilePreferences::open(&config.preferences_file)
            .get(PREFERRED_LANGUAGE_KEY)
            .map(|code| Language::resolve(&code))
            .unwrap_or_default(),
    };
    let table = TranslationStore::load(language);

    let client = ApiClient::new(&config)?;
    let snapshot = client
        .get_metrics()
        .await
        .context("Failed to fetch metrics")?;

    info!("Fetched metrics for {} hosts", snapshot.len());

    let mut charts = Map::new();
    for kind in ChartKind::ALL {
        let datasets = build_datasets(&snapshot, kind.field(), kind.palette());
        let labels = axis_labels_with(&datasets, |i| lookup(table, "chart.point", &[("index", i)]));
        charts.insert(
            kind.container_id().to_string(),
            json!({
                "title": lookup_plain(table, kind.title_key()),
                "labels": labels,
                "datasets": datasets,
            }),
        );
    }

    let output = json!({
        "language": language,
        "charts": Value::Object(charts),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
