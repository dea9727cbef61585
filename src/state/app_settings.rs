use log::LevelFilter;
use lume_api::client::DEFAULT_BASE_URL;
use std::time::Duration;

pub const ENV_API_URL: &str = "KAZINO_API_URL";
pub const ENV_INIT_DATA: &str = "KAZINO_INIT_DATA";
pub const ENV_LOG_LEVEL: &str = "KAZINO_LOG_LEVEL";
pub const ENV_TIMEOUT_SECS: &str = "KAZINO_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub api_url: String,
    /// Telegram `initData` handed over by the launcher.
    pub init_data: Option<String>,
    pub log_level: Option<LevelFilter>,
    pub timeout: Option<Duration>,
    pub full_screen: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            init_data: None,
            log_level: None,
            timeout: None,
            full_screen: false,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut settings = Self::default();
        if let Some(url) = non_empty(ENV_API_URL) {
            settings.api_url = url;
        }
        settings.init_data = non_empty(ENV_INIT_DATA);
        settings.log_level = non_empty(ENV_LOG_LEVEL).and_then(|v| v.parse::<LevelFilter>().ok());
        settings.timeout = non_empty(ENV_TIMEOUT_SECS)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        settings
    }
}
