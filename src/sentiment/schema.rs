// Declared model input signature.
//
// `schema.json` lists the classifier's input columns in the order the model
// was trained on, in the same shape as an MLflow model signature:
//
//   { "inputs": [{"name": "love", "type": "double"}, ...], "tensor_input": "input" }
//
// `tensor_input` names the ONNX graph input the columns are packed into.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default ONNX graph input name (onnxmltools' default for tree ensembles).
pub const DEFAULT_TENSOR_INPUT: &str = "input";

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSchema {
    pub inputs: Vec<ColumnSpec>,
    #[serde(default)]
    pub tensor_input: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub dtype: Option<String>,
}

impl ModelSchema {
    /// Load and validate a schema file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model schema from {}", path.display()))?;
        let schema: ModelSchema = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse model schema {}", path.display()))?;

        if schema.inputs.is_empty() {
            anyhow::bail!("Model schema {} declares no input columns", path.display());
        }
        Ok(schema)
    }

    /// Expected input column names, in declared order.
    pub fn column_names(&self) -> Vec<String> {
        self.inputs.iter().map(|c| c.name.clone()).collect()
    }

    pub fn tensor_input(&self) -> &str {
        self.tensor_input.as_deref().unwrap_or(DEFAULT_TENSOR_INPUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema() {
        let json = r#"{"inputs": [{"name": "love", "type": "double"}, {"name": "not good"}]}"#;
        let schema: ModelSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.column_names(), vec!["love", "not good"]);
        assert_eq!(schema.inputs[0].dtype.as_deref(), Some("double"));
        assert_eq!(schema.tensor_input(), DEFAULT_TENSOR_INPUT);
    }

    #[test]
    fn test_custom_tensor_input() {
        let json = r#"{"inputs": [{"name": "a"}], "tensor_input": "float_input"}"#;
        let schema: ModelSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.tensor_input(), "float_input");
    }

    #[test]
    fn test_load_rejects_empty_inputs() {
        let dir = std::env::temp_dir().join("commentlens-schema-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("schema.json");
        std::fs::write(&path, r#"{"inputs": []}"#).unwrap();

        assert!(ModelSchema::load(&path).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
