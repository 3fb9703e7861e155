use clap::Parser;
use hurricane_supply::core::ConfigProvider;
use hurricane_supply::utils::error::{ErrorSeverity, SupplyError};
use hurricane_supply::utils::{logger, validation::Validate};
use hurricane_supply::{
    build_prompt, HttpGenerator, LocalStorage, SupplyListEngine, SupplyPipeline, TomlConfig,
};

#[derive(Parser)]
#[command(name = "toml-supply")]
#[command(about = "Hurricane supply list generator with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "supply-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Extract from a saved generation instead of calling the service
    #[arg(long)]
    raw_file: Option<String>,

    /// Dry run - show the prompt and settings without calling the service
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logging() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based supply list tool");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No request will be sent");
        perform_dry_run(&config);
        return Ok(());
    }

    let profile = config.profile.clone();
    let generator = HttpGenerator::from_config(&config)?;
    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = SupplyListEngine::new(SupplyPipeline::new(storage, generator, config));

    let outcome = match &args.raw_file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(raw) => engine.run_offline(&profile, &raw).await,
            Err(e) => Err(SupplyError::IoError(e)),
        },
        None => engine.run(&profile).await,
    };

    match outcome {
        Ok(report) => {
            tracing::info!("✅ Supply list completed successfully!");
            if report.result.has_items() {
                for (index, item) in report.result.items.iter().enumerate() {
                    println!("  [ ] {}. {}", index + 1, item);
                }
            } else {
                println!("{}", report.result.text);
            }
            println!("📁 Output saved to: {}", report.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Supply list run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Service: {}", config.endpoint());
    println!("  Timeout: {}s", config.timeout_seconds());
    println!(
        "  Output: {}/{}",
        config.output_path(),
        config.output_filename()
    );
    println!("  Family size: {}", config.profile.family_size);

    if args.raw_file.is_some() {
        println!("  📄 Offline mode: using saved generation text");
    }
    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Generation Service:");
    println!("  Endpoint: {}", config.endpoint());
    let headers = config.headers();
    if !headers.is_empty() {
        println!("  Headers: {} custom headers", headers.len());
    }

    // 抽取規則
    let rules = config.extraction_rules();
    println!();
    println!("⚙️ Extraction Rules:");
    println!(
        "  Item length: {}-{} characters",
        rules.min_item_chars, rules.max_item_chars
    );
    println!("  Prose threshold: {} characters", rules.prose_threshold);
    println!("  Header threshold: {} characters", rules.header_max_chars);
    println!("  Sentence fallback cap: {} items", rules.sentence_tier_cap);
    println!("  Noise phrases: {}", rules.noise_phrases.join(", "));

    println!();
    println!("📝 Prompt:");
    println!("{}", build_prompt(&config.profile));

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
