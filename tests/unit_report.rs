// Unit tests for aggregate reports: counts and the monthly trend.

use commentlens::report::summary::SentimentCounts;
use commentlens::report::trend::monthly_trend;
use commentlens::sentiment::predictor::{Prediction, Sentiment};
use commentlens::youtube::comments::Comment;

fn prediction(timestamp: &str, sentiment: Sentiment) -> Prediction {
    Prediction {
        comment: Comment {
            text: "text".to_string(),
            timestamp: timestamp.to_string(),
            author_id: "Unknown".to_string(),
        },
        sentiment,
        timestamp: Some(timestamp.to_string()),
    }
}

#[test]
fn counts_match_predictions() {
    let predictions = vec![
        prediction("2024-01-01T00:00:00Z", Sentiment::Positive),
        prediction("2024-01-02T00:00:00Z", Sentiment::Positive),
        prediction("2024-01-03T00:00:00Z", Sentiment::Neutral),
        prediction("2024-01-04T00:00:00Z", Sentiment::Negative),
    ];
    let counts = SentimentCounts::from_predictions(&predictions);
    assert_eq!(
        counts,
        SentimentCounts {
            positive: 2,
            neutral: 1,
            negative: 1
        }
    );
    assert_eq!(counts.total(), 4);
    assert!((counts.percent(Sentiment::Positive) - 50.0).abs() < 1e-9);
}

#[test]
fn trend_is_chronological_and_zero_filled() {
    let predictions = vec![
        prediction("2024-03-15T10:00:00Z", Sentiment::Negative),
        prediction("2023-12-31T23:59:59Z", Sentiment::Positive),
        prediction("2024-03-01T00:00:00+00:00", Sentiment::Positive),
        prediction("2024-03-20T10:00:00Z", Sentiment::Positive),
        prediction("2024-03-21T10:00:00Z", Sentiment::Neutral),
    ];
    let trend = monthly_trend(&predictions);

    let months: Vec<&str> = trend.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, vec!["2023-12", "2024-03"]);

    assert_eq!(trend[0].total, 1);
    assert_eq!(trend[0].positive_pct, 100.0);
    assert_eq!(trend[0].negative_pct, 0.0);
    assert_eq!(trend[0].neutral_pct, 0.0);

    assert_eq!(trend[1].total, 4);
    assert!((trend[1].positive_pct - 50.0).abs() < 1e-9);
    assert!((trend[1].negative_pct - 25.0).abs() < 1e-9);
    assert!((trend[1].neutral_pct - 25.0).abs() < 1e-9);
}

#[test]
fn offsets_are_bucketed_in_utc() {
    // 23:30 at -05:00 is already the next month in UTC
    let trend = monthly_trend(&[prediction("2024-01-31T23:30:00-05:00", Sentiment::Neutral)]);
    assert_eq!(trend[0].month, "2024-02");
}

#[test]
fn unparseable_timestamps_are_skipped() {
    let trend = monthly_trend(&[
        prediction("yesterday", Sentiment::Negative),
        prediction("2024-05-05T05:05:05Z", Sentiment::Positive),
    ]);
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0].total, 1);
}

#[test]
fn comment_timestamp_used_when_prediction_has_none() {
    let mut p = prediction("2024-07-04T00:00:00Z", Sentiment::Positive);
    p.timestamp = None;
    let trend = monthly_trend(&[p]);
    assert_eq!(trend[0].month, "2024-07");
}

#[test]
fn empty_trend() {
    assert!(monthly_trend(&[]).is_empty());
}
