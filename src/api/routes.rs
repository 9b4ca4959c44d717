use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::ollama::OllamaClient;
use crate::store::ArtifactStore;
use crate::tts::SpeechService;

pub struct AppState {
    pub tts: SpeechService,
    pub ollama: OllamaClient,
    pub store: ArtifactStore,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/text-to-speech", post(handlers::text_to_speech))
        .route("/audio/:filename", get(handlers::get_audio))
        .route("/languages", get(handlers::languages))
        .route("/chat", post(handlers::chat))
        .route("/chat-and-speak", post(handlers::chat_and_speak))
        .route("/models", get(handlers::models))
        .route("/ollama-status", get(handlers::ollama_status))
        .route("/health", get(handlers::health))
        .route("/cleanup", post(handlers::cleanup));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
