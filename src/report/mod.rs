// Aggregate views over a batch of predictions: sentiment counts, the
// monthly trend, and the keyword summary.

pub mod keywords;
pub mod summary;
pub mod trend;
