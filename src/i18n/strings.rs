//! Localized UI strings, keyed by translation key.
//!
//! Templates may contain `{param}` placeholders filled in by
//! [`lookup`](crate::i18n::lookup). Both tables must define the same keys.

/// Chinese UI strings (default language)
pub const CHINESE_STRINGS: &[(&str, &str)] = &[
    // Sidebar
    ("sidebar.system", "服务器系统"),
    ("sidebar.server_monitor", "服务器监控"),
    ("sidebar.dashboard", "监控大屏"),
    ("sidebar.host_management", "主机管理"),
    ("sidebar.history", "历史记录"),
    ("sidebar.settings", "系统设置"),
    ("sidebar.language", "语言"),
    // Charts
    ("chart.cpu_title", "CPU 使用率 (%)"),
    ("chart.memory_title", "内存使用率 (%)"),
    ("chart.point", "点 {index}"),
    ("chart.no_data", "暂无数据"),
    // Host management
    ("host.ip", "IP 地址"),
    ("host.ip_placeholder", "请输入主机IP"),
    ("host.username", "用户名"),
    ("host.password", "密码"),
    ("host.add", "添加主机"),
    ("host.delete", "删除"),
    ("host.delete_title", "删除该主机"),
    ("host.refresh", "刷新数据"),
    ("host.alerts", "告警"),
    ("host.last_update", "最后更新"),
    ("host.count", "共 {count} 台主机"),
    // Messages
    ("message.loading", "加载中..."),
    ("language.switched", "语言已切换到中文"),
    ("message.invalid_ip", "请输入有效的IP地址"),
    ("message.incomplete_host", "请填写完整的主机信息"),
    ("message.host_added", "主机 {ip} 添加成功"),
    ("message.host_deleted", "主机 {ip} 删除成功"),
    ("message.request_failed", "请求失败: {error}"),
    ("message.backend_unavailable", "后端服务不可用"),
    ("status.healthy", "服务正常，共 {count} 台主机"),
    // Time
    ("time.unknown", "未知时间"),
];

/// English UI strings
pub const ENGLISH_STRINGS: &[(&str, &str)] = &[
    // Sidebar
    ("sidebar.system", "Server System"),
    ("sidebar.server_monitor", "Server Monitor"),
    ("sidebar.dashboard", "Dashboard"),
    ("sidebar.host_management", "Host Management"),
    ("sidebar.history", "History"),
    ("sidebar.settings", "Settings"),
    ("sidebar.language", "Language"),
    // Charts
    ("chart.cpu_title", "CPU Usage (%)"),
    ("chart.memory_title", "Memory Usage (%)"),
    ("chart.point", "point {index}"),
    ("chart.no_data", "No data"),
    // Host management
    ("host.ip", "IP Address"),
    ("host.ip_placeholder", "Enter host IP"),
    ("host.username", "Username"),
    ("host.password", "Password"),
    ("host.add", "Add Host"),
    ("host.delete", "Delete"),
    ("host.delete_title", "Delete this host"),
    ("host.refresh", "Refresh"),
    ("host.alerts", "Alerts"),
    ("host.last_update", "Last Update"),
    ("host.count", "Hosts: {count}"),
    // Messages
    ("message.loading", "Loading..."),
    ("language.switched", "Language switched to English"),
    ("message.invalid_ip", "Please enter a valid IP address"),
    ("message.incomplete_host", "Please fill in all host fields"),
    ("message.host_added", "Host {ip} added"),
    ("message.host_deleted", "Host {ip} deleted"),
    ("message.request_failed", "Request failed: {error}"),
    ("message.backend_unavailable", "Backend service unavailable"),
    ("status.healthy", "Service healthy, hosts: {count}"),
    // Time
    ("time.unknown", "Unknown time"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn keys(table: &[(&'static str, &'static str)]) -> BTreeSet<&'static str> {
        table.iter().map(|(key, _)| *key).collect()
    }

    fn placeholders(template: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            match rest[start..].find('}') {
                Some(end) => {
                    found.insert(rest[start + 1..start + end].to_string());
                    rest = &rest[start + end + 1..];
                }
                None => break,
            }
        }
        found
    }

    #[test]
    fn test_tables_define_same_keys() {
        assert_eq!(keys(CHINESE_STRINGS), keys(ENGLISH_STRINGS));
    }

    #[test]
    fn test_no_duplicate_keys() {
        assert_eq!(keys(CHINESE_STRINGS).len(), CHINESE_STRINGS.len());
        assert_eq!(keys(ENGLISH_STRINGS).len(), ENGLISH_STRINGS.len());
    }

    #[test]
    fn test_no_empty_templates() {
        for (key, value) in CHINESE_STRINGS.iter().chain(ENGLISH_STRINGS) {
            assert!(!value.is_empty(), "empty template for {}", key);
        }
    }

    #[test]
    fn test_placeholders_match_across_languages() {
        for (key, zh) in CHINESE_STRINGS {
            let (_, en) = ENGLISH_STRINGS
                .iter()
                .find(|(k, _)| k == key)
                .expect("key present in both tables");
            assert_eq!(placeholders(zh), placeholders(en), "placeholders differ for {}", key);
        }
    }

    #[test]
    fn test_point_label_placeholder() {
        let (_, en) = ENGLISH_STRINGS
            .iter()
            .find(|(k, _)| *k == "chart.point")
            .expect("chart.point defined");
        assert_eq!(*en, "point {index}");
    }
}
