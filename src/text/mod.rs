// Text normalization: the cleaning transform applied to every comment
// before it reaches the vectorizer.

pub mod lemmatize;
pub mod normalize;
pub mod traits;
