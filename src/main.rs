use clap::Parser;
use fold_predict::config::toml_config::FileConfig;
use fold_predict::core::chart;
use fold_predict::utils::{logger, validation::Validate};
use fold_predict::{CliConfig, EsmFoldPipeline, FoldEngine, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting fold-predict CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 套用 TOML 設定檔（若有指定）
    if let Some(path) = config.config.clone() {
        match FileConfig::from_file(&path) {
            Ok(file_config) => config.apply_file_config(&file_config),
            Err(e) => {
                tracing::error!("❌ Failed to load config file {}: {}", path, e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(1);
            }
        }
    }

    // 取得並驗證序列；無效輸入在這裡就擋下，不會發出任何請求
    if let Err(e) = config.resolve_sequence().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 建立儲存與管線
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = EsmFoldPipeline::new(storage, config);

    let engine = FoldEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            tracing::info!("✅ Prediction completed successfully!");
            println!("✅ Prediction completed successfully!");
            println!("📏 Sequence length: {}", outcome.analysis.sequence_length);
            println!("📊 Average pLDDT: {:.2}", outcome.analysis.mean_plddt);
            println!("🎯 Confidence: {}", outcome.analysis.confidence);
            println!();
            println!("{}", chart::confidence_chart(&outcome.analysis.residues));
            println!();
            println!("📁 Output saved to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Prediction failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 依錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                fold_predict::utils::error::ErrorSeverity::Low => 0,
                fold_predict::utils::error::ErrorSeverity::Medium => 2,
                fold_predict::utils::error::ErrorSeverity::High => 1,
                fold_predict::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
