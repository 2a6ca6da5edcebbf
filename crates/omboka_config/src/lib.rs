use config::{Config, ConfigError, Environment, File};
use std::env;

pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Layering, lowest priority first: built-in serde defaults, an optional
/// `config/default` file, an optional `config/{RUN_ENV}` file, then
/// `OMBOKA`-prefixed environment variables with `__` as the section
/// separator (e.g. `OMBOKA__PORTAL__TIMEOUT_SECS=10`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let _ = dotenv::dotenv();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "default".to_string());

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_env}")).required(false))
        .add_source(Environment::with_prefix("OMBOKA").separator("__"));

    builder.build()?.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.portal.entry_url, None);
        assert_eq!(config.portal.timeout_secs, 30);
        assert_eq!(config.watcher.interval_hours, 1.0);
        assert_eq!(config.watcher.window_months, 4);
    }

    #[test]
    fn partial_section_keeps_remaining_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"portal": {"timeout_secs": 5}}"#).unwrap();

        assert_eq!(config.portal.timeout_secs, 5);
        assert_eq!(config.watcher.window_months, 4);
    }

    #[test]
    fn entry_url_override_round_trips() {
        let config: AppConfig =
            serde_json::from_str(r#"{"portal": {"entry_url": "http://localhost:9999/omboka"}}"#)
                .unwrap();

        assert_eq!(
            config.portal.entry_url.as_deref(),
            Some("http://localhost:9999/omboka")
        );
    }
}
