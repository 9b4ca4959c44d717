use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod ollama;
mod store;
mod tts;

use api::routes::{create_router, AppState};
use config::Config;
use ollama::OllamaClient;
use store::ArtifactStore;
use tts::{GoogleTtsEngine, SpeechService};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    tracing::info!("TTS + Ollama Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Ollama URL: {}", config.ollama_url);
    tracing::info!("Default model: {}", config.default_model);
    tracing::info!("Audio directory: {}", config.audio_dir.display());

    let store = ArtifactStore::new(config.audio_dir.clone())
        .expect("Failed to create audio directory");
    let tts = SpeechService::new(Arc::new(GoogleTtsEngine::new()), store.clone());
    let ollama = OllamaClient::new(config.ollama_url, config.default_model);

    // One-shot startup probe so a missing Ollama is visible in the logs
    if ollama.check_connection().await {
        let models = ollama.list_models().await;
        tracing::info!("Ollama connection successful, available models: {:?}", models);
    } else {
        tracing::warn!("Could not connect to Ollama. Make sure Ollama is running.");
    }

    let state = Arc::new(AppState { tts, ollama, store });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
