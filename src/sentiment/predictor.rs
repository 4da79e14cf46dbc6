// Sentiment prediction pipeline.
//
// normalize -> encode (aligned to the model schema) -> classify -> label.
//
// Failures on this path are reported as data: every error comes back as a
// `PredictionError`, which serializes to `{"error": "..."}` for callers that
// hand the result straight to a presentation layer. Output order is input
// order: predictions are zipped back onto comments by position, so nothing
// between here and the classifier may reorder rows.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

use super::context::InferenceContext;
use crate::features::encoder::encode;
use crate::youtube::comments::Comment;

/// Sentiment label predicted for a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    /// Map a raw model label onto a sentiment. Only -1, 0 and 1 are valid.
    pub fn from_label(label: i64) -> Option<Self> {
        match label {
            -1 => Some(Sentiment::Negative),
            0 => Some(Sentiment::Neutral),
            1 => Some(Sentiment::Positive),
            _ => None,
        }
    }

    pub fn label(self) -> i64 {
        match self {
            Sentiment::Negative => -1,
            Sentiment::Neutral => 0,
            Sentiment::Positive => 1,
        }
    }

    /// The label as the string the model's predictions are cast to.
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Negative => "-1",
            Sentiment::Neutral => "0",
            Sentiment::Positive => "1",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
        }
    }
}

impl Serialize for Sentiment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One comment's prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub comment: Comment,
    pub sentiment: Sentiment,
    /// Set by `predict_with_timestamps`: the comment's original timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Structured failure of the prediction path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    #[error("No comments provided")]
    NoComments,

    #[error("Prediction failed: feature encoding: {0}")]
    Encoding(String),

    #[error("Prediction failed: inference: {0}")]
    Inference(String),
}

impl Serialize for PredictionError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("error", &self.to_string())?;
        map.end()
    }
}

/// Predict a sentiment for each comment, in input order.
pub fn predict_sentiment(
    ctx: &InferenceContext,
    comments: &[Comment],
) -> Result<Vec<Prediction>, PredictionError> {
    let labels = classify(ctx, comments)?;

    Ok(comments
        .iter()
        .zip(labels)
        .map(|(comment, sentiment)| Prediction {
            comment: comment.clone(),
            sentiment,
            timestamp: None,
        })
        .collect())
}

/// Like `predict_sentiment`, with each comment's timestamp carried onto
/// its prediction by position.
pub fn predict_with_timestamps(
    ctx: &InferenceContext,
    comments: &[Comment],
) -> Result<Vec<Prediction>, PredictionError> {
    let labels = classify(ctx, comments)?;

    Ok(comments
        .iter()
        .zip(labels)
        .map(|(comment, sentiment)| Prediction {
            comment: comment.clone(),
            sentiment,
            timestamp: Some(comment.timestamp.clone()),
        })
        .collect())
}

/// Run the full pipeline, returning one label per comment in order.
fn classify(ctx: &InferenceContext, comments: &[Comment]) -> Result<Vec<Sentiment>, PredictionError> {
    if comments.is_empty() {
        return Err(PredictionError::NoComments);
    }

    let texts: Vec<String> = comments
        .iter()
        .map(|c| ctx.normalizer().normalize(&c.text))
        .collect();

    let classifier = ctx.classifier();
    let table = encode(ctx.vectorizer(), &texts, classifier.expected_columns())
        .map_err(|e| PredictionError::Encoding(format!("{e:#}")))?;

    debug!(
        rows = table.n_rows(),
        columns = table.n_cols(),
        "Encoded comments for inference"
    );

    let raw = classifier
        .predict(&table)
        .map_err(|e| PredictionError::Inference(format!("{e:#}")))?;

    if raw.len() != comments.len() {
        return Err(PredictionError::Inference(format!(
            "model returned {} labels for {} comments",
            raw.len(),
            comments.len()
        )));
    }

    raw.into_iter()
        .map(|label| {
            Sentiment::from_label(label).ok_or_else(|| {
                PredictionError::Inference(format!("model returned unknown label {label}"))
            })
        })
        .collect()
}
