// Comment source trait: the retrieval boundary.
//
// The paginated collector only needs "give me the page after this token".
// YouTubeClient implements it against the Data API; tests substitute an
// in-memory source so pagination can be checked without the network.

use anyhow::Result;
use async_trait::async_trait;

use super::comments::Comment;

/// One page of comments plus the continuation token for the next page.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    /// Opaque token for the following page. `None` or empty means no more pages.
    pub next_page_token: Option<String>,
}

/// Trait for anything that can serve comment pages for a video.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch a single page of top-level comments.
    ///
    /// `page_token` is `None` for the first page. `page_size` is the
    /// maximum number of comments the source should return.
    async fn fetch_page(
        &self,
        video_id: &str,
        page_token: Option<&str>,
        page_size: usize,
    ) -> Result<CommentPage>;
}
