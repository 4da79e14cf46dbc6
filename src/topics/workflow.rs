// Two-stage topic workflow.
//
// Discover: ask the model for a handful of short topic names over a sample
// of the comments. Classify: ask it to assign every comment to exactly one
// of those names. The label set is fixed between the two stages.
//
// The run is a small state machine (Discover -> Classify -> Done) with no
// retries; the first failing stage ends the run and its error goes back to
// the caller.

use std::collections::HashSet;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::traits::{generate, StructuredGenerator};

/// How many comments the discovery stage sees.
pub const DISCOVERY_SAMPLE_SIZE: usize = 100;

/// Upper bound on discovered topics.
pub const MAX_TOPICS: usize = 8;

/// Catch-all labels that never count as a topic.
const FALLBACK_LABELS: &[&str] = &["other", "others", "misc", "miscellaneous", "general"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicDiscoveryOutput {
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedComment {
    pub comment: String,
    pub topic: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicClassificationOutput {
    #[serde(default)]
    pub results: Vec<ClassifiedComment>,
}

/// Final output of a workflow run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopicReport {
    pub topics: Vec<String>,
    pub classified_comments: Vec<ClassifiedComment>,
}

/// Where a run currently is.
#[derive(Debug)]
pub enum WorkflowState {
    Discover { comments: Vec<String> },
    Classify { comments: Vec<String>, topics: Vec<String> },
    Done(TopicReport),
}

pub struct TopicWorkflow<'a> {
    generator: &'a dyn StructuredGenerator,
}

impl<'a> TopicWorkflow<'a> {
    pub fn new(generator: &'a dyn StructuredGenerator) -> Self {
        Self { generator }
    }

    /// Run both stages over `comments`.
    pub async fn run(&self, comments: Vec<String>) -> Result<TopicReport> {
        let mut state = WorkflowState::Discover { comments };
        loop {
            state = match state {
                WorkflowState::Done(report) => return Ok(report),
                other => self.step(other).await?,
            };
        }
    }

    /// Advance the state machine by one stage.
    pub async fn step(&self, state: WorkflowState) -> Result<WorkflowState> {
        match state {
            WorkflowState::Discover { comments } => {
                let topics = self.discover(&comments).await?;
                Ok(WorkflowState::Classify { comments, topics })
            }
            WorkflowState::Classify { comments, topics } => {
                let classified_comments = self.classify(&comments, &topics).await?;
                Ok(WorkflowState::Done(TopicReport {
                    topics,
                    classified_comments,
                }))
            }
            done @ WorkflowState::Done(_) => Ok(done),
        }
    }

    /// Discover up to `MAX_TOPICS` topic names from the first
    /// `DISCOVERY_SAMPLE_SIZE` comments.
    pub async fn discover(&self, comments: &[String]) -> Result<Vec<String>> {
        if comments.is_empty() {
            debug!("No comments to discover topics from");
            return Ok(Vec::new());
        }

        let sample = &comments[..comments.len().min(DISCOVERY_SAMPLE_SIZE)];
        let prompt = discovery_prompt(sample);
        let output: TopicDiscoveryOutput =
            generate(self.generator, &prompt, &discovery_schema()).await?;

        let raw = output.topics.len();
        let topics = sanitize_topics(output.topics);
        info!(
            sample = sample.len(),
            raw,
            kept = topics.len(),
            "Discovered topics"
        );
        Ok(topics)
    }

    /// Assign each comment one of `topics`.
    ///
    /// Results naming a topic outside the set are dropped; matches are
    /// case-insensitive and rewritten to the discovered spelling.
    pub async fn classify(
        &self,
        comments: &[String],
        topics: &[String],
    ) -> Result<Vec<ClassifiedComment>> {
        if comments.is_empty() || topics.is_empty() {
            debug!(
                comments = comments.len(),
                topics = topics.len(),
                "Nothing to classify"
            );
            return Ok(Vec::new());
        }

        let prompt = classification_prompt(comments, topics);
        let output: TopicClassificationOutput =
            generate(self.generator, &prompt, &classification_schema(topics)).await?;

        let mut classified = Vec::with_capacity(output.results.len());
        let mut invented = 0usize;
        for item in output.results {
            match canonical_topic(&item.topic, topics) {
                Some(topic) => classified.push(ClassifiedComment {
                    comment: item.comment,
                    topic: topic.to_string(),
                }),
                None => {
                    invented += 1;
                    warn!(topic = %item.topic, "Dropping comment classified under unknown topic");
                }
            }
        }

        info!(
            comments = comments.len(),
            classified = classified.len(),
            dropped = invented,
            "Classified comments"
        );
        Ok(classified)
    }
}

/// Trim, drop fallback labels and duplicates, cap at `MAX_TOPICS`.
pub fn sanitize_topics(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && !is_fallback_label(t))
        .filter(|t| seen.insert(fold_case(t)))
        .take(MAX_TOPICS)
        .collect()
}

pub fn is_fallback_label(topic: &str) -> bool {
    let lower = topic.trim().to_lowercase();
    FALLBACK_LABELS.contains(&lower.as_str())
}

/// Case folding shared by deduplication and topic matching.
fn fold_case(topic: &str) -> String {
    topic.trim().to_lowercase()
}

fn canonical_topic<'t>(topic: &str, topics: &'t [String]) -> Option<&'t str> {
    let folded = fold_case(topic);
    topics
        .iter()
        .find(|t| fold_case(t) == folded)
        .map(String::as_str)
}

/// One comment per line; embedded newlines would split a comment in two.
fn comment_lines(comments: &[String]) -> String {
    comments
        .iter()
        .map(|c| c.replace(['\r', '\n'], " "))
        .collect::<Vec<_>>()
        .join("\n")
}

fn discovery_prompt(comments: &[String]) -> String {
    format!(
        "You are analyzing YouTube comments.\n\
         \n\
         TASK:\n\
         - Create discussion topics from the comments\n\
         - Topics must be created by you\n\
         - 2-3 words per topic\n\
         - No sentiment words\n\
         - Max {MAX_TOPICS} topics\n\
         - Do not include \"Other\" as a topic\n\
         \n\
         COMMENTS:\n\
         {}\n",
        comment_lines(comments)
    )
}

fn classification_prompt(comments: &[String], topics: &[String]) -> String {
    format!(
        "You are classifying comments into topics.\n\
         \n\
         TOPICS:\n\
         {}\n\
         \n\
         RULES:\n\
         - Use ONLY the provided topics\n\
         - One topic per comment\n\
         - Do not invent new topics\n\
         - No explanations\n\
         \n\
         COMMENTS:\n\
         {}\n",
        topics.join(", "),
        comment_lines(comments)
    )
}

fn discovery_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "topics": {
                "type": "array",
                "description": "Short, non-overlapping topic names",
                "items": {"type": "string"}
            }
        },
        "required": ["topics"]
    })
}

fn classification_schema(topics: &[String]) -> Value {
    json!({
        "type": "object",
        "properties": {
            "results": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "comment": {"type": "string"},
                        "topic": {"type": "string", "enum": topics}
                    },
                    "required": ["comment", "topic"]
                }
            }
        },
        "required": ["results"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_drops_fallbacks_and_duplicates() {
        let raw = vec![
            " Pricing ".to_string(),
            "Other".to_string(),
            "pricing".to_string(),
            "MISC".to_string(),
            "".to_string(),
            "Tutorial Request".to_string(),
        ];
        assert_eq!(sanitize_topics(raw), vec!["Pricing", "Tutorial Request"]);
    }

    #[test]
    fn test_sanitize_caps_topic_count() {
        let raw: Vec<String> = (0..12).map(|i| format!("Topic {i}")).collect();
        let topics = sanitize_topics(raw);
        assert_eq!(topics.len(), MAX_TOPICS);
        assert_eq!(topics[0], "Topic 0");
    }

    #[test]
    fn test_canonical_topic_is_case_insensitive() {
        let topics = vec!["Pricing".to_string()];
        assert_eq!(canonical_topic(" pricing", &topics), Some("Pricing"));
        assert_eq!(canonical_topic("Shipping", &topics), None);
    }

    #[test]
    fn test_canonical_topic_folds_non_ascii() {
        let topics = sanitize_topics(vec!["Café Tour".to_string(), "CAFÉ TOUR".to_string()]);
        assert_eq!(topics, vec!["Café Tour"]);
        assert_eq!(canonical_topic("CAFÉ TOUR", &topics), Some("Café Tour"));
        assert_eq!(canonical_topic("café tour ", &topics), Some("Café Tour"));
    }

    #[test]
    fn test_prompt_keeps_one_comment_per_line() {
        let prompt = discovery_prompt(&["first\nline".to_string(), "second".to_string()]);
        assert!(prompt.contains("first line\nsecond"));
    }

    #[test]
    fn test_classification_schema_restricts_topics() {
        let topics = vec!["Pricing".to_string(), "Tutorial Request".to_string()];
        let schema = classification_schema(&topics);
        assert_eq!(
            schema["properties"]["results"]["items"]["properties"]["topic"]["enum"],
            json!(["Pricing", "Tutorial Request"])
        );
    }
}
