use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Which classifier artifact the inference context loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierBackend {
    /// ONNX export of the trained model (default), run through onnxruntime
    Onnx,
    /// Linear model weights exported as JSON, no native runtime needed
    Linear,
}

/// Central configuration loaded from environment variables.
///
/// API keys come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// YouTube Data API v3 key
    pub youtube_api_key: String,
    /// YouTube Data API base URL (defaults to https://www.googleapis.com/youtube/v3)
    pub youtube_api_url: String,
    /// Gemini API key (GEMINI_API_KEY, falling back to GOOGLE_API_KEY)
    pub gemini_api_key: String,
    /// Gemini model used for topic discovery and classification
    pub gemini_model: String,
    /// Gemini API base URL
    pub gemini_api_url: String,
    /// Directory holding the vectorizer, schema and classifier artifacts
    pub model_dir: PathBuf,
    /// Base URL the artifacts are downloaded from (`download-model`)
    pub model_url: String,
    /// Which classifier artifact to load (default: Onnx)
    pub classifier_backend: ClassifierBackend,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nothing is required at load time; each command calls the
    /// `require_*` check for the pieces it actually needs.
    pub fn load() -> Result<Self> {
        let classifier_backend = match env::var("COMMENTLENS_CLASSIFIER").as_deref() {
            Ok("linear") => ClassifierBackend::Linear,
            // "onnx" or unset both default to ONNX
            _ => ClassifierBackend::Onnx,
        };

        let model_dir = env::var("COMMENTLENS_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::sentiment::download::default_model_dir());

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .unwrap_or_default();

        Ok(Self {
            youtube_api_key: env::var("YOUTUBE_API_KEY").unwrap_or_default(),
            youtube_api_url: env::var("YOUTUBE_API_URL")
                .unwrap_or_else(|_| crate::youtube::client::DEFAULT_YOUTUBE_API_URL.to_string()),
            gemini_api_key,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| crate::topics::gemini::DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| crate::topics::gemini::DEFAULT_GEMINI_API_URL.to_string()),
            model_dir,
            model_url: env::var("COMMENTLENS_MODEL_URL").unwrap_or_default(),
            classifier_backend,
        })
    }

    /// Check that the YouTube API key is configured.
    /// Call this before any operation that fetches comments.
    pub fn require_youtube(&self) -> Result<()> {
        if self.youtube_api_key.is_empty() {
            anyhow::bail!(
                "YOUTUBE_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that a Gemini API key is configured.
    /// Call this before running the topic workflow.
    pub fn require_gemini(&self) -> Result<()> {
        if self.gemini_api_key.is_empty() {
            anyhow::bail!(
                "GEMINI_API_KEY not set (GOOGLE_API_KEY is also accepted). Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that the artifact download URL is configured.
    pub fn require_model_url(&self) -> Result<()> {
        if self.model_url.is_empty() {
            anyhow::bail!(
                "COMMENTLENS_MODEL_URL not set. Point it at the directory that serves\n\
                 vectorizer.json, schema.json and the classifier file."
            );
        }
        Ok(())
    }

    /// Validate that the chosen classifier backend has its artifacts on disk.
    pub fn require_model(&self) -> Result<()> {
        if !crate::sentiment::download::artifact_files_present(
            &self.model_dir,
            self.classifier_backend,
        ) {
            anyhow::bail!(
                "Model artifacts not found in {}\n\
                 Run `commentlens download-model` to download them,\n\
                 or set COMMENTLENS_MODEL_DIR to a directory that already has them.",
                self.model_dir.display()
            );
        }
        Ok(())
    }
}
