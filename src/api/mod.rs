pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct SynthesizeResponse {
    pub success: bool,
    pub message: String,
    pub audio_url: String,
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatAndSpeakRequest {
    pub question: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub question: String,
    pub response: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct ChatAndSpeakResponse {
    pub success: bool,
    pub question: String,
    pub response: String,
    pub audio_url: String,
    pub filename: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub success: bool,
    pub models: Vec<String>,
    pub default_model: String,
}

#[derive(Debug, Serialize)]
pub struct OllamaStatusResponse {
    pub connected: bool,
    pub url: String,
    pub models: Vec<String>,
    pub default_model: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub ollama_connected: bool,
    pub ollama_url: String,
}

#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub success: bool,
    pub message: String,
}
