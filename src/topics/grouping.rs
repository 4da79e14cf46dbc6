// Group classified comments under their topics for display.

use std::collections::HashMap;

use serde::Serialize;

use super::workflow::ClassifiedComment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicGroup {
    pub topic: String,
    pub comments: Vec<String>,
}

/// One group per discovered topic, in discovery order.
///
/// Topics nobody was classified under still get a group with no comments.
/// Comments under a topic outside `topics` are ignored.
pub fn group_by_topic(topics: &[String], classified: &[ClassifiedComment]) -> Vec<TopicGroup> {
    let mut by_topic: HashMap<&str, Vec<String>> = topics
        .iter()
        .map(|t| (t.as_str(), Vec::new()))
        .collect();

    for item in classified {
        if let Some(comments) = by_topic.get_mut(item.topic.as_str()) {
            comments.push(item.comment.clone());
        }
    }

    topics
        .iter()
        .map(|t| TopicGroup {
            topic: t.clone(),
            comments: by_topic.remove(t.as_str()).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cc(comment: &str, topic: &str) -> ClassifiedComment {
        ClassifiedComment {
            comment: comment.to_string(),
            topic: topic.to_string(),
        }
    }

    #[test]
    fn test_every_topic_represented() {
        let topics = vec!["Pricing".to_string(), "Audio Quality".to_string()];
        let groups = group_by_topic(&topics, &[cc("too expensive", "Pricing")]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].comments, vec!["too expensive"]);
        assert_eq!(groups[1].topic, "Audio Quality");
        assert!(groups[1].comments.is_empty());
    }

    #[test]
    fn test_comment_order_within_topic_preserved() {
        let topics = vec!["Pricing".to_string()];
        let groups = group_by_topic(
            &topics,
            &[cc("a", "Pricing"), cc("b", "Pricing"), cc("c", "Unknown")],
        );
        assert_eq!(groups[0].comments, vec!["a", "b"]);
    }
}
