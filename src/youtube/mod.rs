// YouTube Data API client: comment thread retrieval and video references.
//
// Each submodule handles one piece of the retrieval boundary: the HTTP
// client, the paginated collector, and parsing video URLs.

pub mod client;
pub mod comments;
pub mod traits;
pub mod video_id;
