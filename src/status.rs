// System status display: model artifacts and which API keys are set.

use std::path::Path;

use crate::config::{ClassifierBackend, Config};
use crate::sentiment::download::{artifact_files, artifact_files_present};

/// Display system status to the terminal.
pub fn show(config: &Config) {
    println!("Model directory: {}", config.model_dir.display());
    println!("Classifier backend: {}", backend_name(config.classifier_backend));

    for backend in [ClassifierBackend::Onnx, ClassifierBackend::Linear] {
        let state = if artifact_files_present(&config.model_dir, backend) {
            "ready".to_string()
        } else {
            format!("missing {}", missing_files(&config.model_dir, backend).join(", "))
        };
        println!("  {:<7} {}", backend_name(backend), state);
    }
    if !artifact_files_present(&config.model_dir, config.classifier_backend) {
        println!("  Run `commentlens download-model` to fetch the artifacts");
    }

    println!("YouTube API key: {}", key_state(&config.youtube_api_key));
    println!(
        "Gemini API key: {} (model {})",
        key_state(&config.gemini_api_key),
        config.gemini_model
    );
    if config.model_url.is_empty() {
        println!("Model download URL: not set");
    } else {
        println!("Model download URL: {}", config.model_url);
    }
}

fn backend_name(backend: ClassifierBackend) -> &'static str {
    match backend {
        ClassifierBackend::Onnx => "onnx",
        ClassifierBackend::Linear => "linear",
    }
}

fn key_state(key: &str) -> &'static str {
    if key.is_empty() {
        "not set"
    } else {
        "set"
    }
}

fn missing_files(dir: &Path, backend: ClassifierBackend) -> Vec<&'static str> {
    artifact_files(backend)
        .into_iter()
        .filter(|f| !dir.join(f).exists())
        .collect()
}
