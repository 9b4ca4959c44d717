use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// Probe fast, generate slow: a liveness check should fail within seconds,
// while inference on a cold model can legitimately take most of a minute.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const TAGS_TIMEOUT: Duration = Duration::from_secs(10);
const GENERATE_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for a locally running Ollama server.
#[derive(Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    default_model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, default_model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            default_model: default_model.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Fast probe against the tag registry, used before any generation call.
    pub async fn check_connection(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::error!("Ollama connection check failed: {}", response.status());
                false
            }
            Err(e) => {
                tracing::error!("Error connecting to Ollama: {}", e);
                false
            }
        }
    }

    /// Single non-streaming generation call. No retries; one failed attempt is
    /// reported straight back to the caller.
    pub async fn generate(&self, prompt: &str, model: &str) -> Result<String, AppError> {
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(GENERATE_TIMEOUT)
            .json(&GenerateRequest {
                model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| AppError::OllamaError(format!("Error connecting to Ollama: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::OllamaError(format!(
                "Ollama API error: {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::OllamaError(format!("Invalid Ollama response: {}", e)))?;

        Ok(body.response)
    }

    /// Model names known to Ollama, `:tag` suffixes stripped. Re-fetched on
    /// every call; any failure collapses to an empty list rather than an error.
    pub async fn list_models(&self) -> Vec<String> {
        let url = format!("{}/api/tags", self.base_url);
        let response = match self.client.get(&url).timeout(TAGS_TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Error fetching models from Ollama: {}", e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            tracing::error!("Failed to get models: {}", response.status());
            return Vec::new();
        }

        match response.json::<TagsResponse>().await {
            Ok(tags) => tags
                .models
                .into_iter()
                .map(|m| m.name.split(':').next().unwrap_or_default().to_string())
                .collect(),
            Err(e) => {
                tracing::error!("Invalid tags response from Ollama: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_check_connection_ok() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"models":[]}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(server.url(), "llama2:latest");
        assert!(client.check_connection().await);
    }

    #[tokio::test]
    async fn test_check_connection_down() {
        // Nothing listens on port 1
        let client = OllamaClient::new("http://127.0.0.1:1", "llama2:latest");
        assert!(!client.check_connection().await);
    }

    #[tokio::test]
    async fn test_check_connection_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/tags")
            .with_status(500)
            .create_async()
            .await;

        let client = OllamaClient::new(server.url(), "llama2:latest");
        assert!(!client.check_connection().await);
    }

    #[tokio::test]
    async fn test_generate_extracts_response_field() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"model":"llama2:latest","response":"Hello there!","done":true}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(server.url(), "llama2:latest");
        let text = client.generate("Say hello", "llama2:latest").await.unwrap();
        assert_eq!(text, "Hello there!");
    }

    #[tokio::test]
    async fn test_generate_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/generate")
            .with_status(500)
            .create_async()
            .await;

        let client = OllamaClient::new(server.url(), "llama2:latest");
        let err = client.generate("Say hello", "llama2:latest").await.unwrap_err();
        assert!(matches!(err, AppError::OllamaError(_)));
    }

    #[tokio::test]
    async fn test_list_models_strips_tags() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"models":[{"name":"llama2:latest"},{"name":"mistral:7b"}]}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(server.url(), "llama2:latest");
        let models = client.list_models().await;
        assert_eq!(models, vec!["llama2".to_string(), "mistral".to_string()]);
    }

    #[tokio::test]
    async fn test_list_models_failure_is_empty() {
        let client = OllamaClient::new("http://127.0.0.1:1", "llama2:latest");
        assert!(client.list_models().await.is_empty());

        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/tags")
            .with_status(500)
            .create_async()
            .await;
        let client = OllamaClient::new(server.url(), "llama2:latest");
        assert!(client.list_models().await.is_empty());
    }
}
