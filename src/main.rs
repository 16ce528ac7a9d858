use aircraft_alert::utils::{logger, validation::Validate};
use aircraft_alert::{app, CliConfig, FileConfig, Settings};
use anyhow::Context;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; credentials may come from the real environment.
    let dotenv = dotenvy::dotenv();

    let config = CliConfig::parse();

    let log_path = logger::init_cli_logger(config.verbose, &config.log_dir, config.log_format)
        .with_context(|| format!("Failed to set up logging in {}", config.log_dir.display()))?;

    tracing::info!("Starting aircraft-alert, logging to {}", log_path.display());
    if let Ok(path) = &dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let file_config = match FileConfig::load(config.config.as_deref()) {
        Ok(file_config) => file_config,
        Err(e) => {
            tracing::error!("❌ Failed to load config file: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let settings = Settings::resolve(&config, file_config.as_ref());
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    match app::run(settings).await {
        Ok(cycles) => {
            tracing::info!("✅ Monitor stopped after {} cycles", cycles);
        }
        Err(e) => {
            tracing::error!(
                "❌ Monitor failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
