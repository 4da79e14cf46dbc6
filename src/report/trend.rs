// Monthly sentiment trend.
//
// Predictions are bucketed by the calendar month (UTC) of their timestamp.
// Each month reports the share of every label, including labels that never
// occurred that month (as 0%).

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use tracing::warn;

use super::summary::SentimentCounts;
use crate::sentiment::predictor::{Prediction, Sentiment};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    /// "YYYY-MM"
    pub month: String,
    pub negative_pct: f64,
    pub neutral_pct: f64,
    pub positive_pct: f64,
    pub total: usize,
}

/// Sentiment shares per month, oldest month first.
///
/// Predictions whose timestamp does not parse as RFC 3339 are skipped.
pub fn monthly_trend(predictions: &[Prediction]) -> Vec<MonthlyTrend> {
    let mut months: BTreeMap<(i32, u32), SentimentCounts> = BTreeMap::new();
    let mut skipped = 0usize;

    for p in predictions {
        let raw = p.timestamp.as_deref().unwrap_or(&p.comment.timestamp);
        match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => {
                let ts = ts.with_timezone(&Utc);
                months
                    .entry((ts.year(), ts.month()))
                    .or_default()
                    .add(p.sentiment);
            }
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, "Skipped predictions with unparseable timestamps");
    }

    months
        .into_iter()
        .map(|((year, month), counts)| MonthlyTrend {
            month: format!("{year:04}-{month:02}"),
            negative_pct: counts.percent(Sentiment::Negative),
            neutral_pct: counts.percent(Sentiment::Neutral),
            positive_pct: counts.percent(Sentiment::Positive),
            total: counts.total(),
        })
        .collect()
}
