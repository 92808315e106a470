//! Standalone server binary.

use std::sync::Arc;

use clap::Parser;
use slovo_server::{router, AppState, Config, GeminiClient, Pipeline, TextService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` is optional; variables already set take precedence
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("slovo_server=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    let lexicon = Arc::new(config.load_lexicon()?);
    tracing::info!(entries = lexicon.entries.len(), "Lexicon loaded");

    let service: Option<Arc<dyn TextService>> = match config.api_key() {
        Some(key) => {
            let client = GeminiClient::new(
                key,
                config.model.as_str(),
                config.base_url.as_str(),
                config.timeout(),
            )?;
            Some(Arc::new(client) as Arc<dyn TextService>)
        }
        None => {
            tracing::warn!("GEMINI_API_KEY is not set; serving rule-based analysis only");
            None
        }
    };

    let pipeline = Pipeline::new(service, lexicon, config.concurrency);
    let app = router(AppState::new(pipeline));

    let addr = config.addr();
    tracing::info!("-- Starting Slovo server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
