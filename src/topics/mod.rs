// Topic discovery and classification: a two-stage LLM workflow over
// structured output, plus the grouping used to present its result.

pub mod gemini;
pub mod grouping;
pub mod traits;
pub mod workflow;
