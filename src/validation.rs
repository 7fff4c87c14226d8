//! Host address validation and timestamp formatting.

use chrono::{DateTime, Local, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

static IPV4_REGEX: OnceLock<Regex> = OnceLock::new();

fn ipv4_regex() -> &'static Regex {
    IPV4_REGEX.get_or_init(|| {
        Regex::new(
            r"^((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
        )
        .expect("Invalid IPv4 regex")
    })
}

/// Dotted-quad IPv4 address with every octet in 0–255.
pub fn is_valid_ip(ip: &str) -> bool {
    ipv4_regex().is_match(ip)
}

/// Format a backend timestamp as `YYYY-MM-DD HH:MM:SS` in local time.
///
/// `None` or an empty string yields `unknown`. Text that is not a
/// recognizable timestamp is returned unchanged.
pub fn format_time(time: Option<&str>, unknown: &str) -> String {
    let raw = match time.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return unknown.to_string(),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
    }

    // The backend writes naive ISO timestamps (`datetime.now().isoformat()`)
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%Y-%m-%d %H:%M:%S").to_string();
    }

    raw.to_string()
}
