use crate::core::booking::parse_weekday;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{OrderError, Result};
use crate::utils::validation::{self, Validate};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "bistro.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub restaurant: RestaurantConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantConfig {
    pub name: String,
    pub closed_weekday: Option<String>,
    #[serde(default)]
    pub admin_phones: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./.bistro".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| OrderError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OrderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BISTRO_ENDPOINT})，未設定的變數保留原字
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| OrderError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        // 環境變數未設定時佔位字串會原樣留下
        if self.backend.endpoint.contains("${") {
            return Err(OrderError::MissingConfigError {
                field: "backend.endpoint".to_string(),
            });
        }
        validation::validate_url("backend.endpoint", &self.backend.endpoint)?;

        if let Some(timeout) = self.backend.timeout_seconds {
            validation::validate_range("backend.timeout_seconds", timeout, 1, 300)?;
        }

        validation::validate_non_empty_string("restaurant.name", &self.restaurant.name)?;

        if let Some(raw) = &self.restaurant.closed_weekday {
            if parse_weekday(raw).is_none() {
                return Err(OrderError::InvalidConfigValueError {
                    field: "restaurant.closed_weekday".to_string(),
                    value: raw.clone(),
                    reason: "Expected a weekday such as Mon, monday or 週一".to_string(),
                });
            }
        }

        for phone in &self.restaurant.admin_phones {
            validation::validate_non_empty_string("restaurant.admin_phones", phone)?;
        }

        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.backend.timeout_seconds.map(Duration::from_secs)
    }

    pub fn restaurant_name(&self) -> &str {
        &self.restaurant.name
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.format
    }
}

impl ConfigProvider for AppConfig {
    fn api_endpoint(&self) -> &str {
        &self.backend.endpoint
    }

    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn admin_phones(&self) -> &[String] {
        &self.restaurant.admin_phones
    }

    fn closed_weekday(&self) -> Weekday {
        self.restaurant
            .closed_weekday
            .as_deref()
            .and_then(parse_weekday)
            .unwrap_or(Weekday::Mon)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
