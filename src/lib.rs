// Commentlens: sentiment and topic analysis for YouTube comments
//
// This is the library root. Each module corresponds to one stage of the
// comment analysis pipeline, from retrieval through to terminal output.

pub mod config;
pub mod features;
pub mod output;
pub mod report;
pub mod sentiment;
pub mod status;
pub mod text;
pub mod topics;
pub mod youtube;
