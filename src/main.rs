use clap::Parser;
use post_feed::config::LogFormat;
use post_feed::core::ConfigProvider;
use post_feed::utils::error::FeedError;
use post_feed::utils::{logger, validation::Validate};
use post_feed::{CliConfig, FeedEngine, FileContainer, HttpCollectionSource, OutcomeKind, TomlConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting post-feed CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let exit_code = match &cli.config {
        Some(path) => {
            tracing::info!("📄 Loading configuration from {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => run(&config).await,
                Err(e) => report_config_error(&e),
            }
        }
        None => run(&cli).await,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(config: &C) -> i32 {
    // 驗證配置
    if let Err(e) = config.validate() {
        return report_config_error(&e);
    }

    let source = match HttpCollectionSource::from_config(config) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!("❌ Could not build HTTP client: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            return 3;
        }
    };

    let container = FileContainer::new(
        config.output_path().to_string(),
        config.output_file().to_string(),
        config.page_title().to_string(),
    );
    let output = container.full_path();

    let engine = FeedEngine::new(source, container).with_startup_delay(config.startup_delay());

    match engine.run().await {
        Ok(kind) => {
            tracing::info!("📁 Page written to: {}", output.display());
            println!("📁 Page written to: {}", output.display());
            report_outcome(kind)
        }
        Err(e) => {
            tracing::error!(
                "❌ Rendering failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            3
        }
    }
}

fn report_outcome(kind: OutcomeKind) -> i32 {
    match kind {
        OutcomeKind::Populated => {
            println!("✅ Posts rendered successfully!");
            0
        }
        OutcomeKind::Empty => {
            println!("ℹ️  No posts found");
            0
        }
        OutcomeKind::Failed => {
            eprintln!("❌ Failed to load posts; the page shows the error state");
            2
        }
        // run() 一定會再渲染一次最終狀態
        OutcomeKind::Loading => {
            tracing::warn!("⚠️ Page was left in the loading state");
            3
        }
    }
}

fn report_config_error(e: &FeedError) -> i32 {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    1
}
