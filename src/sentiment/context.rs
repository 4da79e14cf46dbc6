// Inference context: the loaded, immutable model state.
//
// Built once at process start from the artifact directory and passed by
// reference into every prediction call. Nothing in it changes afterwards;
// picking up new artifacts means building a new context.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::download::{classifier_file, SCHEMA_FILE, VECTORIZER_FILE};
use super::linear::LinearClassifier;
use super::onnx::OnnxClassifier;
use super::schema::ModelSchema;
use super::traits::SentimentClassifier;
use crate::config::ClassifierBackend;
use crate::features::tfidf::TfIdfVectorizer;
use crate::features::traits::Vectorizer;
use crate::text::normalize::TextNormalizer;

pub struct InferenceContext {
    normalizer: TextNormalizer,
    vectorizer: Box<dyn Vectorizer>,
    classifier: Box<dyn SentimentClassifier>,
}

impl InferenceContext {
    /// Assemble a context from already-built parts.
    pub fn new(
        normalizer: TextNormalizer,
        vectorizer: Box<dyn Vectorizer>,
        classifier: Box<dyn SentimentClassifier>,
    ) -> Self {
        Self {
            normalizer,
            vectorizer,
            classifier,
        }
    }

    /// Load the vectorizer, schema and classifier from `model_dir`.
    pub fn load(model_dir: &Path, backend: ClassifierBackend) -> Result<Self> {
        let vectorizer = TfIdfVectorizer::load(&model_dir.join(VECTORIZER_FILE))?;
        let schema = ModelSchema::load(&model_dir.join(SCHEMA_FILE))?;

        let model_path = model_dir.join(classifier_file(backend));
        let classifier: Box<dyn SentimentClassifier> = match backend {
            ClassifierBackend::Onnx => Box::new(
                OnnxClassifier::load(&model_path, &schema)
                    .context("Failed to load ONNX classifier")?,
            ),
            ClassifierBackend::Linear => Box::new(
                LinearClassifier::load(&model_path, &schema)
                    .context("Failed to load linear classifier")?,
            ),
        };

        info!(
            vocabulary = vectorizer.feature_names().len(),
            expected_columns = classifier.expected_columns().len(),
            backend = ?backend,
            "Inference context ready"
        );

        Ok(Self::new(
            TextNormalizer::default(),
            Box::new(vectorizer),
            classifier,
        ))
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn vectorizer(&self) -> &dyn Vectorizer {
        self.vectorizer.as_ref()
    }

    pub fn classifier(&self) -> &dyn SentimentClassifier {
        self.classifier.as_ref()
    }
}
