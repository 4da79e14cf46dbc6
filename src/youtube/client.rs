// YouTube Data API v3 client: API-key authenticated GETs over HTTP.
//
// Only the `commentThreads` resource is used. Responses are deserialized
// into the thin serde types below and flattened into `Comment` records.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::comments::Comment;
use super::traits::{CommentPage, CommentSource};

/// Default endpoint for the YouTube Data API.
pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Author id used when a comment carries no channel id.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// HTTP client for the YouTube Data API.
///
/// A thin reqwest wrapper with a generic GET helper that appends the API key.
pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    /// Create a new client pointing at the given base URL.
    ///
    /// Pass `DEFAULT_YOUTUBE_API_URL` in production, or a different URL for
    /// testing against a local mock.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("commentlens/0.1 (comment-analysis)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Make a GET request to a Data API resource and deserialize the response.
    ///
    /// `resource` is the path segment (e.g. "commentThreads"). The API key is
    /// appended to `params` automatically.
    pub async fn api_get<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, resource);

        debug!(resource = resource, "YouTube API GET request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("YouTube API request failed: {resource}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("YouTube API {resource} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {resource} response"))
    }
}

#[async_trait]
impl CommentSource for YouTubeClient {
    async fn fetch_page(
        &self,
        video_id: &str,
        page_token: Option<&str>,
        page_size: usize,
    ) -> Result<CommentPage> {
        let max_results = page_size.to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", max_results.as_str()),
            ("textFormat", "plainText"),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let response: CommentThreadListResponse = self
            .api_get("commentThreads", &params)
            .await
            .with_context(|| format!("Failed to fetch comments for video {video_id}"))?;

        Ok(response.into_page())
    }
}

// -- Serde types for commentThreads.list --

/// Response from `commentThreads.list`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

/// The fields of a comment snippet Commentlens keeps.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    pub text_original: Option<String>,
    pub published_at: Option<String>,
    pub author_channel_id: Option<AuthorChannelId>,
}

#[derive(Debug, Deserialize)]
pub struct AuthorChannelId {
    pub value: String,
}

impl CommentThreadListResponse {
    /// Flatten the thread list into a page of `Comment` records.
    pub fn into_page(self) -> CommentPage {
        let comments = self
            .items
            .into_iter()
            .map(|thread| Comment::from(thread.snippet.top_level_comment.snippet))
            .collect();

        CommentPage {
            comments,
            next_page_token: self.next_page_token,
        }
    }
}

impl From<CommentSnippet> for Comment {
    fn from(snippet: CommentSnippet) -> Self {
        Comment {
            text: snippet.text_original.unwrap_or_default(),
            timestamp: snippet.published_at.unwrap_or_default(),
            author_id: snippet
                .author_channel_id
                .map(|id| id.value)
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        }
    }
}
