use std::path::PathBuf;

/// Runtime configuration, read once at startup and passed into the services
/// that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub ollama_url: String,
    pub default_model: String,
    pub audio_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5001".to_string())
            .parse()
            .expect("PORT must be a number");
        let ollama_url =
            std::env::var("OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".to_string());
        let default_model =
            std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama2:latest".to_string());
        let audio_dir = std::env::var("AUDIO_DIR").unwrap_or_else(|_| "temp_audio".to_string());

        Self {
            host,
            port,
            ollama_url,
            default_model,
            audio_dir: audio_dir.into(),
        }
    }
}
