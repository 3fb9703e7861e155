use clap::Parser;
use hurricane_supply::utils::error::{ErrorSeverity, SupplyError};
use hurricane_supply::utils::{logger, validation::Validate};
use hurricane_supply::{
    CliConfig, HttpGenerator, LocalStorage, RunReport, SupplyListEngine, SupplyPipeline,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting hurricane-supply CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let profile = config.profile();
    let raw_file = config.raw_file.clone();

    let generator = match HttpGenerator::from_config(&config) {
        Ok(generator) => generator,
        Err(e) => exit_with(e),
    };
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = SupplyListEngine::new(SupplyPipeline::new(storage, generator, config));

    let outcome = match raw_file {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(raw) => engine.run_offline(&profile, &raw).await,
            Err(e) => Err(SupplyError::IoError(e)),
        },
        None => engine.run(&profile).await,
    };

    match outcome {
        Ok(report) => print_report(&report),
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    if report.result.has_items() {
        println!("✅ Personalized supply list generated!");
        for (index, item) in report.result.items.iter().enumerate() {
            println!("  [ ] {}. {}", index + 1, item);
        }
    } else {
        // 沒有抓到清單項目時直接顯示原文
        println!("⚠️  Could not pick out list items, showing the generated text instead:\n");
        println!("{}", report.result.text);
    }
    println!("📁 Output saved to: {}", report.output_path);
}

fn exit_with(e: SupplyError) -> ! {
    tracing::error!(
        "❌ Supply list run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
