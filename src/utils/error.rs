use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} for {endpoint}")]
    HttpStatusError { endpoint: String, status: u16 },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FeedError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FeedError::ApiError(_) | FeedError::HttpStatusError { .. } => ErrorCategory::Network,
            FeedError::SerializationError(_) => ErrorCategory::Data,
            FeedError::IoError(_) => ErrorCategory::Output,
            FeedError::InvalidConfigValueError { .. }
            | FeedError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => "Could not reach the posts API".to_string(),
            ErrorCategory::Data => "The posts API returned data in an unexpected shape".to_string(),
            ErrorCategory::Output => "Could not write the rendered page".to_string(),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the endpoint URLs and your network connection",
            ErrorCategory::Data => "Make sure both endpoints return JSON arrays of posts and comments",
            ErrorCategory::Output => "Check that the output directory exists and is writable",
            ErrorCategory::Configuration => "Run with --help to see the accepted options",
        }
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
