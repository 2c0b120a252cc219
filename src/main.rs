use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cvg::{
    clients::OpenAiClient,
    config::CliArgs,
    server::{self, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cvg=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CliArgs::parse().into_config()?;
    info!(
        port = config.port,
        text_model = %config.text_model,
        vision_model = %config.vision_model,
        "starting chat-vision gateway"
    );

    // No request timeout on the upstream client: a hung inference call hangs
    // the request, matching the contract the frontend was built against.
    let http = reqwest::Client::new();
    let backend = Arc::new(OpenAiClient::new(http, &config));
    let state = AppState::new(backend, Arc::new(config));

    server::serve(state).await
}
