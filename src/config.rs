use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Monitoring backend
    pub api_base_url: String,
    pub request_timeout_secs: u64,

    // Polling
    pub poll_interval_secs: u64,

    // UI
    pub preferences_file: String,
    pub language_override: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("MONITOR_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000/api".to_string())
            .trim_end_matches('/')
            .to_string();

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            bail!("MONITOR_API_URL must be an http(s) URL, got '{}'", api_base_url);
        }

        let poll_interval_secs = match std::env::var("POLL_INTERVAL_SECS") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("POLL_INTERVAL_SECS is not a number: '{}'", v))?,
            Err(_) => 10,
        };
        if poll_interval_secs == 0 {
            bail!("POLL_INTERVAL_SECS must be at least 1");
        }

        Ok(Self {
            api_base_url,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            poll_interval_secs,

            preferences_file: std::env::var("PREFERENCES_FILE")
                .unwrap_or_else(|_| "data/preferences.json".to_string()),
            language_override: std::env::var("DASHBOARD_LANGUAGE")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        })
    }

    /// Root URL of the backend service (the API base without `/api`).
    pub fn service_root_url(&self) -> &str {
        self.api_base_url
            .strip_suffix("/api")
            .unwrap_or(&self.api_base_url)
    }
}
