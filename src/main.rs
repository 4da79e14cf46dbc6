use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use commentlens::config::Config;
use commentlens::youtube::comments::Comment;

/// Commentlens: sentiment and topic analysis for YouTube comments.
///
/// Fetches a video's comments, scores each one with a local sentiment
/// model, and groups the discussion into topics with an LLM.
#[derive(Parser)]
#[command(name = "commentlens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the sentiment of a video's comments
    Analyze {
        /// Video URL (youtube.com/watch?v=... or youtu.be/...)
        url: String,

        /// Max comments to fetch (default: 200)
        #[arg(long, default_value = "200")]
        max_comments: usize,

        /// Print predictions as JSON instead of the terminal report
        #[arg(long)]
        json: bool,

        /// Number of sample predictions to show (default: 10)
        #[arg(long, default_value = "10")]
        show: usize,

        /// Number of keywords in the summary (default: 15)
        #[arg(long, default_value = "15")]
        keywords: usize,
    },

    /// Discover discussion topics and group comments under them
    Topics {
        /// Video URL (youtube.com/watch?v=... or youtu.be/...)
        url: String,

        /// Max comments to fetch (default: 500)
        #[arg(long, default_value = "500")]
        max_comments: usize,

        /// Comments sent to the topic workflow (default: 20)
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Comments shown per topic (default: 5)
        #[arg(long, default_value = "5")]
        per_topic: usize,

        /// Print the topic report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download the sentiment model artifacts
    DownloadModel,

    /// Show system status (model artifacts, API keys)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("commentlens=info")),
        )
        // stdout carries --json output
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            url,
            max_comments,
            json,
            show,
            keywords,
        } => {
            let Some(video_id) = video_id_or_report(&url, json) else {
                return Ok(());
            };

            let config = Config::load()?;
            config.require_youtube()?;
            config.require_model()?;

            let Some(comments) = fetch_comments(&config, &video_id, max_comments, json).await? else {
                return Ok(());
            };

            let ctx = Arc::new(commentlens::sentiment::context::InferenceContext::load(
                &config.model_dir,
                config.classifier_backend,
            )?);

            let spinner = spinner(format!("Scoring {} comments...", comments.len()));
            // Inference is CPU-bound; keep it off the async runtime
            let result = {
                let ctx = Arc::clone(&ctx);
                let comments = comments.clone();
                tokio::task::spawn_blocking(move || {
                    commentlens::sentiment::predictor::predict_with_timestamps(&ctx, &comments)
                })
                .await
                .context("Prediction task panicked")?
            };
            spinner.finish_and_clear();

            let predictions = match result {
                Ok(predictions) => predictions,
                Err(e) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&e)?);
                    } else {
                        println!("{} {}", "Error:".red().bold(), e);
                    }
                    return Ok(());
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&predictions)?);
                return Ok(());
            }

            let counts =
                commentlens::report::summary::SentimentCounts::from_predictions(&predictions);
            commentlens::output::terminal::display_kpis(&counts);
            commentlens::output::terminal::display_distribution(&counts);

            let trend = commentlens::report::trend::monthly_trend(&predictions);
            commentlens::output::terminal::display_trend(&trend);

            let texts: Vec<String> = comments.iter().map(|c| c.text.clone()).collect();
            let normalized = ctx.normalizer().normalize_batch(&texts);
            let ranked = commentlens::report::keywords::top_keywords(&normalized, keywords);
            commentlens::output::terminal::display_keywords(&ranked);

            commentlens::output::terminal::display_predictions(&predictions, show);
        }

        Commands::Topics {
            url,
            max_comments,
            limit,
            per_topic,
            json,
        } => {
            let Some(video_id) = video_id_or_report(&url, json) else {
                return Ok(());
            };

            let config = Config::load()?;
            config.require_youtube()?;
            config.require_gemini()?;

            let Some(comments) = fetch_comments(&config, &video_id, max_comments, json).await? else {
                return Ok(());
            };

            let texts: Vec<String> = comments
                .into_iter()
                .take(limit)
                .map(|c| c.text)
                .collect();

            let gemini = commentlens::topics::gemini::GeminiClient::new(
                &config.gemini_api_url,
                &config.gemini_api_key,
                &config.gemini_model,
            )?;
            let workflow = commentlens::topics::workflow::TopicWorkflow::new(&gemini);

            let spinner = spinner(format!("Discovering topics in {} comments...", texts.len()));
            let report = workflow.run(texts).await;
            spinner.finish_and_clear();
            let report = report.context("Topic workflow failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            let groups = commentlens::topics::grouping::group_by_topic(
                &report.topics,
                &report.classified_comments,
            );
            commentlens::output::terminal::display_topics(&groups, per_topic);
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            config.require_model_url()?;
            let model_dir = &config.model_dir;

            println!("Downloading sentiment model artifacts...");
            println!("  Destination: {}", model_dir.display());

            commentlens::sentiment::download::download_artifacts(
                &config.model_url,
                model_dir,
                config.classifier_backend,
            )
            .await?;

            println!("\n{}", "Model artifacts downloaded successfully.".bold());
            println!("You can now run `commentlens analyze <video-url>`.");
        }

        Commands::Status => {
            let config = Config::load()?;
            commentlens::status::show(&config);
        }
    }

    Ok(())
}

/// Extract the video id from `url`, telling the user when there is none.
fn video_id_or_report(url: &str, json: bool) -> Option<String> {
    let video_id = commentlens::youtube::video_id::extract_video_id(url);
    if video_id.is_none() {
        warn!(url = %url, "No video id in URL");
        report_error(&format!("Invalid YouTube URL: {url}"), json);
    }
    video_id
}

/// Fetch the video's comments.
///
/// Returns `None` (after telling the user) when the video has no
/// retrievable comments.
async fn fetch_comments(
    config: &Config,
    video_id: &str,
    max_comments: usize,
    json: bool,
) -> Result<Option<Vec<Comment>>> {
    let client =
        commentlens::youtube::client::YouTubeClient::new(&config.youtube_api_url, &config.youtube_api_key)?;

    let spinner = spinner(format!("Fetching comments for {video_id}..."));
    let comments = commentlens::youtube::comments::fetch_comments(&client, video_id, max_comments).await;
    spinner.finish_and_clear();

    if comments.is_empty() {
        report_error(&format!("No comments found for video {video_id}."), json);
        return Ok(None);
    }

    info!(video_id = %video_id, count = comments.len(), "Fetched comments");
    eprintln!("Fetched {} comments.", comments.len());
    Ok(Some(comments))
}

/// A user-facing failure: an `{"error": ...}` object on stdout under
/// `--json`, a red line otherwise.
fn report_error(message: &str, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "error": message }));
    } else {
        println!("{} {}", "Error:".red().bold(), message);
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
