// --- File: crates/omboka_config/src/models.rs ---

use serde::{Deserialize, Serialize};

fn default_timeout_secs() -> u64 {
    30
}

fn default_interval_hours() -> f64 {
    1.0
}

fn default_window_months() -> u32 {
    4
}

// --- Portal Config ---
// Everything needed to reach the rebooking portal. The entry URL is a fixed
// production constant owned by the booking crate; setting it here points the
// engine somewhere else (staging, a local mock).
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PortalConfig {
    /// Override for the portal entry URL. Unset means the production portal.
    #[serde(default)]
    pub entry_url: Option<String>,
    /// Transport-level timeout applied to every portal request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            entry_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

// --- Watcher Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WatcherConfig {
    /// Hours between scheduled checks.
    #[serde(default = "default_interval_hours")]
    pub interval_hours: f64,
    /// How many months ahead the calendar is queried.
    #[serde(default = "default_window_months")]
    pub window_months: u32,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            interval_hours: default_interval_hours(),
            window_months: default_window_months(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub watcher: WatcherConfig,
}
