use clap::Parser;
use leads_etl::utils::{logger, validation::Validate};
use leads_etl::{CliConfig, EtlEngine, EtlError, LeadPipeline, LocalStorage, Settings, TomlConfig};

fn fail(stage: &str, e: &EtlError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}

fn resolve_settings(cli: &CliConfig) -> Result<Settings, EtlError> {
    let mut settings = Settings::from_env()?;

    if let Some(path) = &cli.config {
        tracing::info!("📁 Loading search plan from: {}", path);
        let plan = TomlConfig::from_file(path)?;
        plan.validate()?;
        settings.apply_plan(&plan)?;
    }

    cli.apply_to(&mut settings);
    settings.validate()?;
    Ok(settings)
}

fn display_plan(settings: &Settings) {
    println!("📋 Search plan");
    println!("   Center:     {}", settings.location);
    println!("   Radius:     {} m", settings.radius_meters);
    println!("   Categories: {}", settings.categories.join(", "));
    println!("   Keywords:   {}", settings.keywords.join(", "));
    println!(
        "   Filter:     rating <= {} or reviews < {}",
        settings.reputation_filter.max_rating, settings.reputation_filter.min_reviews
    );
    println!(
        "   Delays:     page token {:?}, details {:?}, between searches {:?}",
        settings.delays.page_token, settings.delays.details, settings.delays.between_searches
    );
    println!("   Output:     {}/{}", settings.output_path, settings.output_file);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting leads-etl");
    tracing::debug!("CLI config: {:?}", cli);

    // 缺少金鑰或設定錯誤時，在發出任何請求前結束
    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => fail("Configuration", &e),
    };

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No requests will be made");
        display_plan(&settings);
        println!("   Searches:   {}", settings.search_count());
        return Ok(());
    }

    let storage = LocalStorage::new(settings.output_path.clone());
    let pipeline = LeadPipeline::new(storage, settings);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) if cli.json_logs => println!("{}", serde_json::to_string(&summary)?),
        Ok(summary) => match summary.output_path {
            Some(path) => println!("✅ Saved {} leads to {}", summary.leads_exported, path),
            None => println!("✅ No places matched the filter; nothing was written"),
        },
        Err(e) => fail("Lead collection", &e),
    }

    Ok(())
}
