use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{
    ChatAndSpeakRequest, ChatAndSpeakResponse, ChatRequest, ChatResponse, CleanupResponse,
    HealthResponse, ModelsResponse, OllamaStatusResponse, SynthesizeRequest, SynthesizeResponse,
};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::tts::LANGUAGES;

pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SynthesizeRequest>,
) -> Result<Json<SynthesizeResponse>, AppError> {
    let text = request
        .text
        .ok_or_else(|| AppError::BadRequest("Text is required".into()))?;

    let artifact = state.tts.synthesize(&text, &request.language).await?;

    Ok(Json(SynthesizeResponse {
        success: true,
        message: "Text converted to speech successfully".to_string(),
        audio_url: artifact.url(),
        filename: artifact.filename,
    }))
}

pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let bytes = state.store.open(&filename)?;

    Ok((
        [
            (header::CONTENT_TYPE, "audio/mpeg".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

pub async fn languages() -> Json<serde_json::Value> {
    let map: serde_json::Map<String, serde_json::Value> = LANGUAGES
        .iter()
        .map(|(code, name)| (code.to_string(), serde_json::Value::from(*name)))
        .collect();
    Json(serde_json::Value::Object(map))
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let question = validate_question(request.question)?;
    let model = request
        .model
        .unwrap_or_else(|| state.ollama.default_model().to_string());

    ensure_ollama(&state).await?;

    let response = state.ollama.generate(&question, &model).await?;

    Ok(Json(ChatResponse {
        success: true,
        question,
        response,
        model,
    }))
}

/// Chat, then synthesize the reply. The stages fail with distinct error codes
/// (`OLLAMA_UNAVAILABLE`, `OLLAMA_ERROR`, `TTS_ERROR`) so the caller can tell
/// which one gave out; a failed generation never produces an artifact.
pub async fn chat_and_speak(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatAndSpeakRequest>,
) -> Result<Json<ChatAndSpeakResponse>, AppError> {
    let question = validate_question(request.question)?;
    let model = request
        .model
        .unwrap_or_else(|| state.ollama.default_model().to_string());

    ensure_ollama(&state).await?;

    let response = state.ollama.generate(&question, &model).await?;
    let artifact = state.tts.synthesize(&response, &request.language).await?;

    Ok(Json(ChatAndSpeakResponse {
        success: true,
        question,
        response,
        audio_url: artifact.url(),
        filename: artifact.filename,
        model,
    }))
}

pub async fn models(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModelsResponse>, AppError> {
    ensure_ollama(&state).await?;

    let models = state.ollama.list_models().await;

    Ok(Json(ModelsResponse {
        success: true,
        models,
        default_model: state.ollama.default_model().to_string(),
    }))
}

pub async fn ollama_status(State(state): State<Arc<AppState>>) -> Json<OllamaStatusResponse> {
    let connected = state.ollama.check_connection().await;
    let models = if connected {
        state.ollama.list_models().await
    } else {
        Vec::new()
    };

    Json(OllamaStatusResponse {
        connected,
        url: state.ollama.base_url().to_string(),
        models,
        default_model: state.ollama.default_model().to_string(),
    })
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let ollama_connected = state.ollama.check_connection().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "Text-to-Speech + Ollama API".to_string(),
        ollama_connected,
        ollama_url: state.ollama.base_url().to_string(),
    })
}

pub async fn cleanup(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CleanupResponse>, AppError> {
    let deleted = state.store.cleanup()?;

    tracing::info!("Cleaned up {} audio files", deleted);

    Ok(Json(CleanupResponse {
        success: true,
        message: format!("Cleaned up {} audio files", deleted),
    }))
}

fn validate_question(question: Option<String>) -> Result<String, AppError> {
    let question = question.ok_or_else(|| AppError::BadRequest("Question is required".into()))?;
    let question = question.trim().to_string();
    if question.is_empty() {
        return Err(AppError::BadRequest("Question cannot be empty".into()));
    }
    Ok(question)
}

async fn ensure_ollama(state: &AppState) -> Result<(), AppError> {
    if !state.ollama.check_connection().await {
        return Err(AppError::OllamaUnavailable(
            "Ollama service is not available. Please make sure Ollama is running.".into(),
        ));
    }
    Ok(())
}
