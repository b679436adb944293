use logogen::{
    logger, Config, FileStore, GenerationRelay, HistoryStore, OnboardingFlow, OpenAiImageClient,
    Studio,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    logger::init()?;

    let config = Config::from_env();

    // Walk the brand setup wizard the way a first-time user would.
    let mut flow = OnboardingFlow::brand_setup();
    flow.advance();
    flow.set_brand_name("Acme Corp");
    flow.advance();
    flow.select("Minimal")?;
    flow.advance();
    flow.select("Monochrome")?;
    flow.advance();
    flow.select("1:1")?;
    flow.advance();
    flow.advance();
    let outcome = flow.outcome().ok_or("onboarding did not finish")?;

    let relay = GenerationRelay::new(
        Arc::new(OpenAiImageClient::from_config(&config.provider)),
        config.provider.clone(),
    );
    let history = HistoryStore::new(Arc::new(FileStore::new(config.history_dir_or_default())));
    let studio = Studio::new(Arc::new(relay), history).with_onboarding(&outcome);

    studio.set_prompt("Acme Corp logo, a geometric fox head");
    match studio.submit().await {
        Ok(logo) => println!("{}", logo.url),
        Err(e) => println!("Generation failed: {}", e),
    }

    for entry in studio.history() {
        println!("{}  {}  {}", entry.created_at, entry.prompt, entry.url);
    }
    Ok(())
}
