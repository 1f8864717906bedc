use crate::config::{DEFAULT_DELAY_MS, DEFAULT_OUTPUT_FILE, DEFAULT_PAGE_TITLE};
use crate::core::ConfigProvider;
use crate::utils::error::{FeedError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub render: RenderConfig,
    pub startup: Option<StartupConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub posts_endpoint: String,
    pub comments_endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub output_path: String,
    pub output_file: Option<String>,
    pub page_title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupConfig {
    pub delay_ms: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FeedError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_HOST})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn posts_endpoint(&self) -> &str {
        &self.source.posts_endpoint
    }

    fn comments_endpoint(&self) -> &str {
        &self.source.comments_endpoint
    }

    fn output_path(&self) -> &str {
        &self.render.output_path
    }

    fn output_file(&self) -> &str {
        self.render.output_file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    fn page_title(&self) -> &str {
        self.render.page_title.as_deref().unwrap_or(DEFAULT_PAGE_TITLE)
    }

    fn startup_delay(&self) -> Duration {
        let delay_ms = self
            .startup
            .as_ref()
            .and_then(|startup| startup.delay_ms)
            .unwrap_or(DEFAULT_DELAY_MS);
        Duration::from_millis(delay_ms)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::config::validate_provider(self)
    }
}
