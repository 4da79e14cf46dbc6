// Comment fetching: paginated comment thread retrieval.
//
// Collects a video's top-level comments up to a cap. Used as the input to
// both sentiment prediction and the topic workflow.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::traits::CommentSource;

/// Largest page the Data API will serve for commentThreads.
pub const PAGE_SIZE: usize = 100;

/// A single YouTube comment, reduced to the fields the pipeline needs.
///
/// Immutable once fetched; everything downstream reads it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    /// ISO-8601 publish time as reported by the API
    pub timestamp: String,
    #[serde(rename = "authorId")]
    pub author_id: String,
}

/// Fetch up to `max_comments` comments for a video, following page tokens.
///
/// Pages are requested one at a time. Retrieval stops once the cap is
/// reached or the source reports no further page. A failed page ends
/// retrieval early and whatever was collected so far is returned; partial
/// results are not an error.
pub async fn fetch_comments(
    source: &dyn CommentSource,
    video_id: &str,
    max_comments: usize,
) -> Vec<Comment> {
    let mut comments: Vec<Comment> = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    while comments.len() < max_comments {
        let page = match source
            .fetch_page(video_id, page_token.as_deref(), PAGE_SIZE)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!(
                    error = %e,
                    video_id = video_id,
                    collected = comments.len(),
                    "Comment page fetch failed, returning partial results"
                );
                break;
            }
        };
        pages += 1;

        let page_len = page.comments.len();
        for comment in page.comments {
            comments.push(comment);
            if comments.len() >= max_comments {
                break;
            }
        }

        debug!(
            page = pages,
            page_comments = page_len,
            total_collected = comments.len(),
            "Fetched page of comments for {}",
            video_id
        );

        // An empty token means the same as no token
        page_token = page.next_page_token.filter(|t| !t.is_empty());
        if page_token.is_none() {
            break;
        }
    }

    info!(
        count = comments.len(),
        pages = pages,
        video_id = video_id,
        "Collected comments"
    );

    comments
}
