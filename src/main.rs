use bibfetch::core::ConfigProvider;
use bibfetch::utils::{logger, validation::Validate};
use bibfetch::{ApaRenderer, CitationEngine, CliConfig, HttpMetadataSource};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting bibfetch");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let source = HttpMetadataSource::new(config.endpoints().clone())?;
    let engine = CitationEngine::new(source, ApaRenderer, config.render_config().clone());

    match engine.run(config.identifiers.as_slice()).await {
        Ok(report) => {
            if report.is_empty() {
                tracing::info!("No identifiers given, nothing to do");
            }
            print!("{}", report);
        }
        Err(e) => {
            // 只有渲染失敗會走到這裡
            tracing::error!("❌ Bibliography rendering failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}
