pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::{FileContainer, MemoryContainer};
pub use config::toml_config::TomlConfig;
pub use crate::core::{engine::FeedEngine, fetcher::HttpCollectionSource, join::join};
pub use domain::model::{Comment, OutcomeKind, Post, PostWithComments, RenderOutcome};
pub use utils::error::{FeedError, Result};
