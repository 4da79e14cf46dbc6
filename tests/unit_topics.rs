// Unit tests for the topic workflow, driven by stub generators.
//
// No network: each stub answers the discovery and classification prompts
// from canned JSON, so the tests pin down what the workflow does with
// whatever the model sends back.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use commentlens::topics::grouping::group_by_topic;
use commentlens::topics::traits::StructuredGenerator;
use commentlens::topics::workflow::{
    is_fallback_label, TopicWorkflow, WorkflowState, DISCOVERY_SAMPLE_SIZE, MAX_TOPICS,
};

/// Answers discovery with `topics` and classification with `results`,
/// recording every prompt it sees.
struct StubGenerator {
    topics: Value,
    results: Value,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    fn new(topics: Value, results: Value) -> Self {
        Self {
            topics,
            results,
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuredGenerator for StubGenerator {
    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<Value> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if schema["properties"].get("topics").is_some() {
            Ok(json!({ "topics": self.topics }))
        } else {
            Ok(json!({ "results": self.results }))
        }
    }
}

/// Always fails.
struct DownGenerator {
    calls: AtomicUsize,
}

#[async_trait]
impl StructuredGenerator for DownGenerator {
    async fn generate_structured(&self, _prompt: &str, _schema: &Value) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("503 Service Unavailable")
    }
}

fn comments(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn discovery_is_capped_and_excludes_fallback() {
    let stub = StubGenerator::new(
        json!([
            "Pricing", "Other", "Audio Quality", "Tutorial Request", "Editing Style",
            "Guest Speakers", "Video Length", "Thumbnail Design", "Upload Schedule",
            "Channel Growth", "Misc"
        ]),
        json!([]),
    );
    let workflow = TopicWorkflow::new(&stub);

    let topics = workflow.discover(&comments(&["a", "b"])).await.unwrap();
    assert!(topics.len() <= MAX_TOPICS);
    assert_eq!(topics.len(), 8);
    assert!(topics.iter().all(|t| !is_fallback_label(t)));
    assert_eq!(topics[0], "Pricing");
}

#[tokio::test]
async fn discovery_sees_only_the_sample() {
    let stub = StubGenerator::new(json!(["Pricing"]), json!([]));
    let workflow = TopicWorkflow::new(&stub);

    let many: Vec<String> = (0..250).map(|i| format!("comment number {i}")).collect();
    workflow.discover(&many).await.unwrap();

    let prompt = &stub.prompts()[0];
    assert!(prompt.contains(&format!("comment number {}", DISCOVERY_SAMPLE_SIZE - 1)));
    assert!(!prompt.contains(&format!("comment number {}", DISCOVERY_SAMPLE_SIZE)));
}

#[tokio::test]
async fn classification_never_emits_an_invented_topic() {
    let stub = StubGenerator::new(
        json!(["Pricing", "Tutorial Request"]),
        json!([
            {"comment": "too expensive", "topic": "Pricing"},
            {"comment": "please explain step 3", "topic": "tutorial request"},
            {"comment": "nice shirt", "topic": "Fashion"},
            {"comment": "refund?", "topic": "Other"}
        ]),
    );
    let workflow = TopicWorkflow::new(&stub);

    let report = workflow
        .run(comments(&["too expensive", "please explain step 3", "nice shirt", "refund?"]))
        .await
        .unwrap();

    assert_eq!(report.topics, vec!["Pricing", "Tutorial Request"]);
    assert_eq!(report.classified_comments.len(), 2);
    for item in &report.classified_comments {
        assert!(report.topics.contains(&item.topic), "invented {}", item.topic);
    }
    assert_eq!(report.classified_comments[1].topic, "Tutorial Request");
}

#[tokio::test]
async fn classification_matches_non_ascii_topics_by_case() {
    let stub = StubGenerator::new(
        json!(["Café Tour", "CAFÉ TOUR", "Überraschung"]),
        json!([
            {"comment": "loved the espresso bar", "topic": "CAFÉ TOUR"},
            {"comment": "did not see that coming", "topic": "ÜBERRASCHUNG"}
        ]),
    );
    let workflow = TopicWorkflow::new(&stub);

    let report = workflow
        .run(comments(&["loved the espresso bar", "did not see that coming"]))
        .await
        .unwrap();

    assert_eq!(report.topics, vec!["Café Tour", "Überraschung"]);
    let assigned: Vec<&str> = report
        .classified_comments
        .iter()
        .map(|c| c.topic.as_str())
        .collect();
    assert_eq!(assigned, vec!["Café Tour", "Überraschung"]);
}

#[tokio::test]
async fn classification_prompt_lists_discovered_topics() {
    let stub = StubGenerator::new(json!(["Pricing", "Tutorial Request"]), json!([]));
    let workflow = TopicWorkflow::new(&stub);
    workflow.run(comments(&["x"])).await.unwrap();

    let prompts = stub.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("Pricing, Tutorial Request"));
    assert!(prompts[1].contains("Do not invent new topics"));
}

#[tokio::test]
async fn empty_input_makes_no_calls() {
    let down = DownGenerator {
        calls: AtomicUsize::new(0),
    };
    let report = TopicWorkflow::new(&down).run(Vec::new()).await.unwrap();
    assert!(report.topics.is_empty());
    assert!(report.classified_comments.is_empty());
    assert_eq!(down.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn no_topics_skips_classification() {
    let stub = StubGenerator::new(json!(["Other"]), json!([{"comment": "x", "topic": "Other"}]));
    let report = TopicWorkflow::new(&stub).run(comments(&["x"])).await.unwrap();
    assert!(report.topics.is_empty());
    assert!(report.classified_comments.is_empty());
    assert_eq!(stub.prompts().len(), 1);
}

#[tokio::test]
async fn generator_failure_propagates() {
    let down = DownGenerator {
        calls: AtomicUsize::new(0),
    };
    let err = TopicWorkflow::new(&down)
        .run(comments(&["a comment"]))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("503"));
    assert_eq!(down.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn malformed_output_is_an_error() {
    let stub = StubGenerator::new(json!("not a list"), json!([]));
    assert!(TopicWorkflow::new(&stub).run(comments(&["a"])).await.is_err());
}

#[tokio::test]
async fn step_walks_discover_classify_done() {
    let stub = StubGenerator::new(
        json!(["Pricing"]),
        json!([{"comment": "cheap", "topic": "Pricing"}]),
    );
    let workflow = TopicWorkflow::new(&stub);

    let state = WorkflowState::Discover {
        comments: comments(&["cheap"]),
    };
    let state = workflow.step(state).await.unwrap();
    assert!(matches!(&state, WorkflowState::Classify { topics, .. } if topics == &["Pricing"]));

    let state = workflow.step(state).await.unwrap();
    let WorkflowState::Done(report) = state else {
        panic!("expected Done");
    };
    assert_eq!(report.classified_comments.len(), 1);
}

#[tokio::test]
async fn grouped_report_covers_every_topic() {
    let stub = StubGenerator::new(
        json!(["Pricing", "Tutorial Request"]),
        json!([{"comment": "too expensive", "topic": "Pricing"}]),
    );
    let report = TopicWorkflow::new(&stub)
        .run(comments(&["too expensive"]))
        .await
        .unwrap();

    let groups = group_by_topic(&report.topics, &report.classified_comments);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].comments, vec!["too expensive"]);
    assert!(groups[1].comments.is_empty());
}
