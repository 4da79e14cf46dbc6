// Sentiment counts (the KPI row) and percentage shares.

use serde::Serialize;

use crate::sentiment::predictor::{Prediction, Sentiment};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let mut counts = Self::default();
        for p in predictions {
            counts.add(p.sentiment);
        }
        counts
    }

    pub fn add(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Share of `sentiment` in percent. Zero when there is nothing counted.
    pub fn percent(&self, sentiment: Sentiment) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(sentiment) as f64 * 100.0 / total as f64
    }
}
