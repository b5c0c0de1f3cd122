use crate::domain::error::DirectoryError;
use crate::infrastructure::network::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_theme")]
    pub theme: String,
    pub http_proxy: Option<String>,
    #[serde(default = "default_spinner")]
    pub spinner: bool,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub retry: Retry,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Endpoints {
    /// JSON array of tournament records.
    #[serde(default = "default_events_url")]
    pub events_url: String,
    /// JSON array of cash-game records.
    #[serde(default = "default_cash_games_url")]
    pub cash_games_url: String,
    /// XML casino API; form-encoded POST with either `country` or `id`.
    #[serde(default = "default_casino_api_url")]
    pub casino_api_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Retry {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Logging {
    /// Map the config's upper-case level names onto tracing filter levels,
    /// falling back to `warn` for anything unrecognized.
    pub fn filter_level(&self) -> &'static str {
        match self.level.as_str() {
            "DEBUG" => "debug",
            "INFO" => "info",
            "WARN" => "warn",
            "ERROR" => "error",
            _ => "warn",
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            events_url: default_events_url(),
            cash_games_url: default_cash_games_url(),
            casino_api_url: default_casino_api_url(),
        }
    }
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            theme: default_theme(),
            http_proxy: None,
            spinner: default_spinner(),
            logging: Logging::default(),
            endpoints: Endpoints::default(),
            retry: Retry::default(),
        }
    }
}

impl Config {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts.max(1),
            base_delay: Duration::from_millis(self.retry.base_delay_ms),
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

// Defaults
fn default_page_size() -> usize {
    12
}
fn default_search_debounce_ms() -> u64 {
    300
}
fn default_theme() -> String {
    "felt".to_string()
}
fn default_spinner() -> bool {
    true
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
fn default_events_url() -> String {
    "https://www.pokerlist.net/events.php".to_string()
}
fn default_cash_games_url() -> String {
    "https://www.pokerlist.net/cash_games.php".to_string()
}
fn default_casino_api_url() -> String {
    "https://api.pokerclub.net/casinos.php".to_string()
}
fn default_max_attempts() -> u32 {
    3
}
fn default_base_delay_ms() -> u64 {
    500
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cardex").join("config.toml"))
}

pub fn load_config() -> Result<Config, DirectoryError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match toml::from_str::<Config>(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample() -> Result<(), DirectoryError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| DirectoryError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| DirectoryError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(DirectoryError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}
