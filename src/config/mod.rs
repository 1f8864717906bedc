pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use std::time::Duration;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

pub const DEFAULT_POSTS_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_COMMENTS_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/comments";
pub const DEFAULT_OUTPUT_FILE: &str = "index.html";
pub const DEFAULT_PAGE_TITLE: &str = "Posts";
pub const DEFAULT_DELAY_MS: u64 = 3000;

pub(crate) const MAX_DELAY_MS: u64 = 60_000;
pub(crate) const MAX_TIMEOUT_SECONDS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "post-feed")]
#[command(about = "Fetch posts and comments, join them and render an HTML page")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_POSTS_ENDPOINT)]
    pub posts_endpoint: String,

    #[arg(long, default_value = DEFAULT_COMMENTS_ENDPOINT)]
    pub comments_endpoint: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    #[arg(long, default_value = DEFAULT_PAGE_TITLE)]
    pub page_title: String,

    #[arg(long, default_value_t = DEFAULT_DELAY_MS, help = "Pause before fetching, in milliseconds")]
    pub delay_ms: u64,

    #[arg(long, help = "Per-request HTTP timeout")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn posts_endpoint(&self) -> &str {
        &self.posts_endpoint
    }

    fn comments_endpoint(&self) -> &str {
        &self.comments_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn page_title(&self) -> &str {
        &self.page_title
    }

    fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_url("posts_endpoint", config.posts_endpoint())?;
    validation::validate_url("comments_endpoint", config.comments_endpoint())?;
    validation::validate_path("output_path", config.output_path())?;
    validation::validate_file_name("output_file", config.output_file())?;
    validation::validate_non_empty_string("page_title", config.page_title())?;

    let delay_ms = u64::try_from(config.startup_delay().as_millis()).unwrap_or(u64::MAX);
    validation::validate_range("delay_ms", delay_ms, 0, MAX_DELAY_MS)?;

    if let Some(timeout) = config.request_timeout() {
        validation::validate_range("timeout_seconds", timeout.as_secs(), 1, MAX_TIMEOUT_SECONDS)?;
    }

    Ok(())
}
