// Sentiment prediction: trait-based classifier abstraction, the loaded
// inference context, and the prediction pipeline that ties normalization,
// encoding and inference together.
//
// The SentimentClassifier trait defines the interface. OnnxClassifier runs
// an exported model through onnxruntime; LinearClassifier evaluates exported
// linear weights directly. The rest of the pipeline doesn't care which.

pub mod context;
pub mod download;
pub mod linear;
pub mod onnx;
pub mod predictor;
pub mod schema;
pub mod traits;
