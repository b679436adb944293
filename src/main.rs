use std::sync::Arc;

use logogen::{logger, server, Config, GenerationRelay, OpenAiImageClient};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(logger::LoggerConfig::from_env())?;

    if env_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = Config::from_env();
    logger::log_config_info(&config);
    config.provider.validate();

    let provider = Arc::new(OpenAiImageClient::from_config(&config.provider));
    let relay = GenerationRelay::new(provider, config.provider.clone());

    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &config);
    server::run(&config, relay).await?;

    log::info!("👋 Relay stopped");
    Ok(())
}
