// Colored terminal output for sentiment reports and topic groups.
//
// main.rs gathers the data; everything that decides how it looks lives here.

use colored::{ColoredString, Colorize};

use crate::report::summary::SentimentCounts;
use crate::report::trend::MonthlyTrend;
use crate::sentiment::predictor::{Prediction, Sentiment};
use crate::topics::grouping::TopicGroup;

const BAR_WIDTH: usize = 40;

/// The KPI row: one count per label plus the total.
pub fn display_kpis(counts: &SentimentCounts) {
    println!(
        "\n{}",
        format!("=== Sentiment ({} comments) ===", counts.total()).bold()
    );
    println!();
    println!(
        "  {} {:>5}    {} {:>5}    {} {:>5}    {} {:>5}",
        "Positive".green(),
        counts.positive,
        "Neutral".dimmed(),
        counts.neutral,
        "Negative".red(),
        counts.negative,
        "Total".bold(),
        counts.total(),
    );
}

/// Share of each label as a horizontal bar.
pub fn display_distribution(counts: &SentimentCounts) {
    if counts.total() == 0 {
        println!("  No sentiment data to chart.");
        return;
    }

    println!();
    for sentiment in [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative] {
        let pct = counts.percent(sentiment);
        let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar = format!("{:<BAR_WIDTH$}", "█".repeat(filled));
        println!(
            "  {:<9} {} {:>5.1}%",
            sentiment.name(),
            colorize(sentiment, &bar),
            pct,
        );
    }
}

/// Month-by-month percentages, oldest first.
pub fn display_trend(trend: &[MonthlyTrend]) {
    if trend.is_empty() {
        return;
    }

    println!("\n{}", "=== Sentiment Trend ===".bold());
    println!();
    println!(
        "  {:<8} {:>9} {:>9} {:>9} {:>7}",
        "Month".dimmed(),
        "Positive".dimmed(),
        "Neutral".dimmed(),
        "Negative".dimmed(),
        "Count".dimmed(),
    );
    println!("  {}", "-".repeat(46).dimmed());

    for month in trend {
        println!(
            "  {:<8} {:>8.1}% {:>8.1}% {:>8.1}% {:>7}",
            month.month, month.positive_pct, month.neutral_pct, month.negative_pct, month.total,
        );
    }
}

/// Top keywords with their relative weight.
pub fn display_keywords(keywords: &[(String, f32)]) {
    if keywords.is_empty() {
        println!("\n  Text is empty after preprocessing; no keywords to show.");
        return;
    }

    println!("\n{}", "=== Top Keywords ===".bold());
    println!();

    let max = keywords
        .iter()
        .map(|(_, s)| *s)
        .fold(f32::MIN, f32::max)
        .max(f32::EPSILON);
    for (word, score) in keywords {
        let filled = ((score / max) * 20.0).round() as usize;
        println!("  {:<20} {}", word, "▪".repeat(filled.max(1)).cyan());
    }
}

/// The first `limit` predictions with their comment text.
pub fn display_predictions(predictions: &[Prediction], limit: usize) {
    if predictions.is_empty() || limit == 0 {
        return;
    }

    let shown = predictions.len().min(limit);
    println!(
        "\n{}",
        format!("=== Sample ({shown} of {}) ===", predictions.len()).bold()
    );
    println!();

    for p in predictions.iter().take(limit) {
        let preview = super::truncate_chars(&p.comment.text.replace('\n', " "), 100);
        println!(
            "  {:<9} {}  {}",
            colorize(p.sentiment, p.sentiment.name()),
            p.comment.timestamp.dimmed(),
            preview,
        );
    }
}

/// Each topic with the comments classified under it.
pub fn display_topics(groups: &[TopicGroup], per_topic: usize) {
    if groups.is_empty() {
        println!("No topics discovered.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Topics ({}) ===", groups.len()).bold()
    );

    for group in groups {
        println!(
            "\n  {} {}",
            group.topic.cyan().bold(),
            format!("({} comments)", group.comments.len()).dimmed()
        );
        if group.comments.is_empty() {
            println!("    {}", "no comments in this topic".dimmed());
            continue;
        }
        for comment in group.comments.iter().take(per_topic) {
            let preview = super::truncate_chars(&comment.replace('\n', " "), 120);
            println!("    - {}", preview);
        }
        if group.comments.len() > per_topic {
            println!(
                "    {}",
                format!("... and {} more", group.comments.len() - per_topic).dimmed()
            );
        }
    }
    println!();
}

fn colorize(sentiment: Sentiment, text: &str) -> ColoredString {
    match sentiment {
        Sentiment::Positive => text.green(),
        Sentiment::Neutral => text.normal(),
        Sentiment::Negative => text.red(),
    }
}
