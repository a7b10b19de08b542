//! Config - Application Configuration

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GATEWAY_HOST, DEFAULT_GATEWAY_PORT, MESSAGE_BADGE_MAX, MESSAGE_LIMIT, PAGE_DWELL_SECS,
    RUN_SECS, TICK_INTERVAL_MS,
};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Gateway connection
    pub gateway: GatewayConfig,
    /// Dashboard behavior
    pub dashboard: DashboardConfig,
}

/// Gateway connection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Gateway host name or IP
    pub host: String,
    /// Gateway port
    pub port: u16,
    /// User name (optional)
    pub user: Option<String>,
    /// Password (optional), only forwarded to the client
    pub password: Option<String>,
    /// Connect when the connection page is shown
    pub auto_connect: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_GATEWAY_HOST.to_string(),
            port: DEFAULT_GATEWAY_PORT,
            user: None,
            password: None,
            auto_connect: true,
        }
    }
}

impl GatewayConfig {
    /// `host:port` label for logs
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of device messages fetched and kept by the messages page
    pub message_limit: usize,
    /// Upper bound of the unread message counter
    pub message_badge_max: u32,
    /// Event pump period of the headless runner
    pub tick_interval_ms: u64,
    /// Time the headless runner stays on each page
    pub page_dwell_secs: u64,
    /// Total run time of the headless runner, 0 runs until Ctrl-C
    pub run_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            message_limit: MESSAGE_LIMIT,
            message_badge_max: MESSAGE_BADGE_MAX,
            tick_interval_ms: TICK_INTERVAL_MS,
            page_dwell_secs: PAGE_DWELL_SECS,
            run_secs: RUN_SECS,
        }
    }
}
