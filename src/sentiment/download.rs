// Artifact download helper for the sentiment model.
//
// Three files make up a model directory:
// 1. vectorizer.json: the fitted TF-IDF vocabulary and idf weights
// 2. schema.json: the classifier's declared input columns
// 3. model.onnx (or linear.json): the classifier itself
//
// Files are stored in a platform-appropriate directory
// (~/.local/share/commentlens/models/ on Linux) so they persist across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::ClassifierBackend;

pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const SCHEMA_FILE: &str = "schema.json";
pub const ONNX_MODEL_FILE: &str = "model.onnx";
pub const LINEAR_MODEL_FILE: &str = "linear.json";

/// Returns the default directory for storing model artifacts.
/// Uses the platform data directory: ~/.local/share/commentlens/models/ on Linux.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("commentlens")
        .join("models")
}

/// The classifier file a backend loads.
pub fn classifier_file(backend: ClassifierBackend) -> &'static str {
    match backend {
        ClassifierBackend::Onnx => ONNX_MODEL_FILE,
        ClassifierBackend::Linear => LINEAR_MODEL_FILE,
    }
}

/// All files a backend needs, in download order.
pub fn artifact_files(backend: ClassifierBackend) -> [&'static str; 3] {
    [VECTORIZER_FILE, SCHEMA_FILE, classifier_file(backend)]
}

/// Check whether every artifact the backend needs exists in `dir`.
pub fn artifact_files_present(dir: &Path, backend: ClassifierBackend) -> bool {
    artifact_files(backend)
        .iter()
        .all(|file| dir.join(file).exists())
}

/// Download the artifacts for `backend` from `base_url` into `dir`.
///
/// Skips files that already exist. The classifier file gets a progress bar.
pub async fn download_artifacts(base_url: &str, dir: &Path, backend: ClassifierBackend) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create model directory: {}", dir.display()))?;

    let base_url = base_url.trim_end_matches('/');
    let model_file = classifier_file(backend);

    for file in artifact_files(backend) {
        let dest = dir.join(file);
        if dest.exists() {
            info!("{} already exists, skipping", file);
            println!("  {} (already exists)", file);
            continue;
        }

        println!("  Downloading {}...", file);
        download_file(&format!("{base_url}/{file}"), &dest, file == model_file).await?;
    }

    Ok(())
}

/// Download a single file from a URL to a local path.
/// If `show_progress` is true, display a progress bar.
async fn download_file(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let total_size = response.content_length();

    let pb = if show_progress {
        let pb = if let Some(size) = total_size {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .expect("valid template")
                    .progress_chars("=> "),
            );
            pb
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("    {spinner} {bytes}")
                    .expect("valid template"),
            );
            pb
        };
        Some(pb)
    } else {
        None
    };

    let bytes = response
        .bytes()
        .await
        .context("Failed to read response body")?;

    if let Some(ref pb) = pb {
        pb.set_position(bytes.len() as u64);
    }

    std::fs::write(dest, &bytes).with_context(|| format!("Failed to write {}", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    info!("Downloaded {} to {}", url, dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_dir_is_under_commentlens() {
        let dir = default_model_dir();
        let path_str = dir.to_string_lossy();
        assert!(
            path_str.contains("commentlens") && path_str.contains("models"),
            "Expected path containing commentlens/models, got: {path_str}"
        );
    }

    #[test]
    fn test_backend_selects_classifier_file() {
        assert_eq!(classifier_file(ClassifierBackend::Onnx), "model.onnx");
        assert_eq!(
            artifact_files(ClassifierBackend::Linear),
            ["vectorizer.json", "schema.json", "linear.json"]
        );
    }

    #[test]
    fn test_artifacts_absent_in_empty_dir() {
        let dir = std::env::temp_dir().join("commentlens-test-nonexistent");
        assert!(!artifact_files_present(&dir, ClassifierBackend::Onnx));
    }

    #[test]
    fn test_artifacts_present_per_backend() {
        let dir = std::env::temp_dir().join("commentlens-artifact-test");
        std::fs::create_dir_all(&dir).unwrap();
        for file in [VECTORIZER_FILE, SCHEMA_FILE, LINEAR_MODEL_FILE] {
            std::fs::write(dir.join(file), b"{}").unwrap();
        }

        assert!(artifact_files_present(&dir, ClassifierBackend::Linear));
        assert!(!artifact_files_present(&dir, ClassifierBackend::Onnx));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
