pub mod google;

use std::sync::Arc;

use crate::error::AppError;
use crate::store::{ArtifactStore, AudioArtifact};

pub use google::GoogleTtsEngine;

const MAX_TEXT_LEN: usize = 10_000;

/// Languages offered by `/api/languages`. The synthesis path does not
/// pre-validate against this table; an unsupported code fails at the engine.
pub const LANGUAGES: [(&str, &str); 12] = [
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("hi", "Hindi"),
    ("ar", "Arabic"),
];

/// Seam to the synthesis backend, so tests can swap in a double.
#[async_trait::async_trait]
pub trait TtsEngine: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, AppError>;
}

pub struct SpeechService {
    engine: Arc<dyn TtsEngine>,
    store: ArtifactStore,
}

impl SpeechService {
    pub fn new(engine: Arc<dyn TtsEngine>, store: ArtifactStore) -> Self {
        Self { engine, store }
    }

    /// Synthesize `text` and persist the audio as a fresh artifact. Input is
    /// validated before the engine is contacted.
    pub async fn synthesize(
        &self,
        text: &str,
        language: &str,
    ) -> Result<AudioArtifact, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::BadRequest("Text cannot be empty".into()));
        }
        if text.len() > MAX_TEXT_LEN {
            return Err(AppError::BadRequest(
                "Text too long (max 10000 chars)".into(),
            ));
        }

        let audio = self.engine.synthesize(text, language).await?;
        let artifact = self.store.create(&audio)?;

        tracing::info!("Generated TTS file: {}", artifact.filename);
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    struct CountingEngine {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingEngine {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait::async_trait]
    impl TtsEngine for CountingEngine {
        async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AppError::TtsError("engine failure".into()))
            } else {
                Ok(vec![0xff, 0xfb, 0x90])
            }
        }
    }

    fn temp_store() -> ArtifactStore {
        let dir = std::env::temp_dir().join(format!("tts-svc-test-{}", Uuid::new_v4().simple()));
        ArtifactStore::new(dir).unwrap()
    }

    #[tokio::test]
    async fn test_empty_text_never_reaches_engine() {
        let engine = CountingEngine::new(false);
        let service = SpeechService::new(engine.clone(), temp_store());

        for text in ["", "   ", "\n\t"] {
            let err = service.synthesize(text, "en").await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_overlong_text_never_reaches_engine() {
        let engine = CountingEngine::new(false);
        let service = SpeechService::new(engine.clone(), temp_store());

        let text = "a".repeat(MAX_TEXT_LEN + 1);
        let err = service.synthesize(&text, "en").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_synthesize_writes_artifact() {
        let engine = CountingEngine::new(false);
        let store = temp_store();
        let service = SpeechService::new(engine.clone(), store.clone());

        let artifact = service.synthesize("Hello", "en").await.unwrap();
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.open(&artifact.filename).unwrap(), vec![0xff, 0xfb, 0x90]);
    }

    #[tokio::test]
    async fn test_engine_failure_produces_no_artifact() {
        let engine = CountingEngine::new(true);
        let store = temp_store();
        let service = SpeechService::new(engine, store.clone());

        let err = service.synthesize("Hello", "en").await.unwrap_err();
        assert!(matches!(err, AppError::TtsError(_)));
        assert_eq!(store.cleanup().unwrap(), 0);
    }
}
