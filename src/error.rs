use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Audio file not found: {0}")]
    ArtifactNotFound(String),

    #[error("Ollama unavailable: {0}")]
    OllamaUnavailable(String),

    #[error("Ollama request failed: {0}")]
    OllamaError(String),

    #[error("TTS synthesis failed: {0}")]
    TtsError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::ArtifactNotFound(_) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Audio file not found".to_string(),
            ),
            AppError::OllamaUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "OLLAMA_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::OllamaError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "OLLAMA_ERROR",
                msg.clone(),
            ),
            AppError::TtsError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TTS_ERROR",
                msg.clone(),
            ),
            AppError::IoError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "IO_ERROR",
                e.to_string(),
            ),
        };

        tracing::error!("Request failed: {} - {}", code, message);

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}
