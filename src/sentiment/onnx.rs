// ONNX sentiment classifier.
//
// Runs the exported sentiment model (LightGBM converted with onnxmltools)
// on the local CPU. The aligned feature table is packed into a single
// [rows, columns] float tensor; the model's first output holds the int64
// class label per row.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Tensor;
use tracing::debug;

use super::schema::ModelSchema;
use super::traits::{ensure_aligned, SentimentClassifier};
use crate::features::table::FeatureTable;

/// Local ONNX-based sentiment classifier.
pub struct OnnxClassifier {
    // ort::Session::run takes &mut self, so inference goes through a Mutex.
    // Calls are one batch at a time, so there is no contention to speak of.
    session: Mutex<Session>,
    tensor_input: String,
    expected_columns: Vec<String>,
}

impl OnnxClassifier {
    /// Load the ONNX model, taking its column order and input name from `schema`.
    pub fn load(model_path: &Path, schema: &ModelSchema) -> Result<Self> {
        if !model_path.exists() {
            anyhow::bail!(
                "Model file not found: {}\nRun `commentlens download-model` to download it.",
                model_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        debug!(
            columns = schema.inputs.len(),
            "Loaded ONNX sentiment model from {}",
            model_path.display()
        );

        Ok(Self {
            session: Mutex::new(session),
            tensor_input: schema.tensor_input().to_string(),
            expected_columns: schema.column_names(),
        })
    }
}

impl SentimentClassifier for OnnxClassifier {
    fn expected_columns(&self) -> &[String] {
        &self.expected_columns
    }

    fn predict(&self, table: &FeatureTable) -> Result<Vec<i64>> {
        ensure_aligned(table, &self.expected_columns)?;
        if table.n_rows() == 0 {
            return Ok(Vec::new());
        }

        // Shape: [rows, columns]
        let shape = [table.n_rows() as i64, table.n_cols() as i64];
        let values: Vec<f32> = table.as_slice().iter().map(|&v| v as f32).collect();
        let input = Tensor::from_array((shape, values)).context("Failed to create input tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

        let outputs = session
            .run(ort::inputs! {
                self.tensor_input.as_str() => input
            })
            .context("ONNX inference failed")?;

        // Output 0: label, shape [rows]
        let (_shape, labels) = outputs[0]
            .try_extract_tensor::<i64>()
            .context("Failed to extract label tensor")?;

        if labels.len() != table.n_rows() {
            anyhow::bail!(
                "Model returned {} labels for {} rows",
                labels.len(),
                table.n_rows()
            );
        }

        Ok(labels.to_vec())
    }
}
