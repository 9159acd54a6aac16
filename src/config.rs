//! Build-time Configuration
//!
//! The browser has no process environment, so settings are baked in at
//! compile time from `TASK_BOARD_*` variables, falling back to defaults.

use std::time::Duration;

use tracing::Level;

pub const DEFAULT_API_URL: &str = "https://task-deployed.onrender.com/tasks";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

/// Settings for the remote task gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// URL of the tasks collection, without a trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl GatewayConfig {
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(base_url.as_ref());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    pub log_level: Level,
    /// Values that were set but could not be parsed
    pub rejected: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            log_level: DEFAULT_LOG_LEVEL,
            rejected: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Configuration baked in at build time
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("TASK_BOARD_API_URL"),
            option_env!("TASK_BOARD_TIMEOUT_MS"),
            option_env!("TASK_BOARD_LOG"),
        )
    }

    /// Resolve configuration from raw values. Malformed values are recorded
    /// in `rejected` and replaced by defaults.
    pub fn from_values(api_url: Option<&str>, timeout_ms: Option<&str>, log_level: Option<&str>) -> Self {
        let mut config = Self::default();

        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            if url.starts_with("http://") || url.starts_with("https://") {
                config.gateway = config.gateway.with_base_url(url);
            } else {
                config.rejected.push(format!("TASK_BOARD_API_URL={}", url));
            }
        }

        if let Some(raw) = timeout_ms {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.gateway.timeout = Duration::from_millis(ms),
                _ => config.rejected.push(format!("TASK_BOARD_TIMEOUT_MS={}", raw)),
            }
        }

        if let Some(raw) = log_level {
            match raw.trim().parse::<Level>() {
                Ok(level) => config.log_level = level,
                Err(_) => config.rejected.push(format!("TASK_BOARD_LOG={}", raw)),
            }
        }

        config
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
