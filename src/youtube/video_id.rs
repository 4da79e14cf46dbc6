// Video reference parsing.

use std::sync::LazyLock;

use regex_lite::Regex;

static VIDEO_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|youtu\.be/)([A-Za-z0-9_-]{11})").expect("valid video id pattern")
});

/// Extract the 11-character video id from a YouTube URL.
///
/// Supports `https://www.youtube.com/watch?v=VIDEO_ID` and
/// `https://youtu.be/VIDEO_ID`. Returns `None` for anything else.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
