//! Dashboard configuration

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct DashConfig {
    /// ProfitApp server base URL
    pub server_url: String,
    /// Seconds between automatic refresh cycles
    pub refresh_secs: u64,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Initial display language code (the server injects the same value
    /// into its web dashboard)
    pub lang: String,
    /// User id for plan changes; plan changes are hidden without it
    pub user_id: Option<i64>,
    /// Directory export downloads are saved into
    pub export_dir: String,
    /// Directory the rolling log file is written into
    pub log_dir: String,
}

impl DashConfig {
    pub fn from_env() -> Self {
        Self {
            server_url: std::env::var("PROFIT_SERVER_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".into()),
            refresh_secs: std::env::var("PROFIT_REFRESH_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            timeout_secs: std::env::var("PROFIT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            lang: std::env::var("PROFIT_LANG").unwrap_or_else(|_| "en".into()),
            user_id: std::env::var("PROFIT_USER_ID")
                .ok()
                .and_then(|v| v.parse().ok()),
            export_dir: std::env::var("PROFIT_EXPORT_DIR").unwrap_or_else(|_| ".".into()),
            log_dir: std::env::var("PROFIT_LOG_DIR").unwrap_or_else(|_| "logs".into()),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            server_url: "http://127.0.0.1:9".into(),
            refresh_secs: 5,
            timeout_secs: 1,
            lang: "en".into(),
            user_id: None,
            export_dir: ".".into(),
            log_dir: "logs".into(),
        }
    }
}

impl Default for DashConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
