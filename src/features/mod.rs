// Feature encoding: turns normalized comment text into the exact
// column-aligned table the trained classifier expects.

pub mod encoder;
pub mod table;
pub mod tfidf;
pub mod traits;
